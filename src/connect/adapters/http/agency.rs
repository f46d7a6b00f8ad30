//! HTTP adapter for the agency platform's service API.
//!
//! The agency API authenticates with a form-encoded login that yields an
//! `appID` token, threads that token back through a cookie header on every
//! call, and answers list queries as column-indexed tables
//! (`{"hdr": {column -> index}, "data": [[cells]]}`).

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, COOKIE, HeaderValue};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::{DEFAULT_TIMEOUT_SECS, body_excerpt};
use crate::config::AgencyConfig;
use crate::connect::domain::{
    AgencyClientRecord, AgencySession, AgencyTask, ClientId, ConnectError, ConnectResult, JobId,
    JobRecord, TargetEntryId, TaskId, TimesheetFields, TimesheetReceipt,
};
use crate::connect::ports::AgencyPort;

/// Agency service API client with a login-then-cookie session model.
#[derive(Debug, Clone)]
pub struct HttpAgencyClient {
    client: Client,
    base_url: String,
    org_code: String,
    username: String,
    password: String,
    operator_id: String,
}

impl HttpAgencyClient {
    /// Builds a client for the configured agency organisation.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the HTTP client cannot be built.
    pub fn new(config: &AgencyConfig) -> ConnectResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|err| ConnectError::transport("agency", err))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            org_code: config.org_code.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
            operator_id: config.operator_id.clone(),
        })
    }

    fn session_cookie(&self, session: &AgencySession) -> ConnectResult<HeaderValue> {
        HeaderValue::from_str(&format!(
            "appID={}; appOrganization={}; appUsername={}",
            session.token(),
            self.org_code,
            self.username
        ))
        .map_err(|_| ConnectError::Auth("session token is not a valid header".to_owned()))
    }

    async fn get_table(
        &self,
        endpoint: &'static str,
        url: String,
        session: &AgencySession,
    ) -> ConnectResult<Value> {
        debug!(endpoint, %url, "agency GET");
        let response = self
            .client
            .get(&url)
            .header(COOKIE, self.session_cookie(session)?)
            .send()
            .await
            .map_err(|err| ConnectError::transport(endpoint, err))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ConnectError::transport(endpoint, err))?;
        if !status.is_success() {
            return Err(ConnectError::api(
                endpoint,
                status.as_u16(),
                body_excerpt(&body),
            ));
        }
        serde_json::from_str(&body).map_err(|err| ConnectError::decode(endpoint, err.to_string()))
    }

    async fn post_form(
        &self,
        endpoint: &'static str,
        url: String,
        session: &AgencySession,
        form: &[(&str, String)],
    ) -> ConnectResult<Value> {
        debug!(endpoint, %url, "agency POST");
        let response = self
            .client
            .post(&url)
            .header(COOKIE, self.session_cookie(session)?)
            .form(form)
            .send()
            .await
            .map_err(|err| ConnectError::transport(endpoint, err))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ConnectError::transport(endpoint, err))?;
        if !status.is_success() {
            return Err(ConnectError::api(
                endpoint,
                status.as_u16(),
                body_excerpt(&body),
            ));
        }
        let value: Value = serde_json::from_str(&body)
            .map_err(|err| ConnectError::decode(endpoint, err.to_string()))?;
        if value.get("error").is_some() {
            return Err(ConnectError::api(
                endpoint,
                status.as_u16(),
                body_excerpt(&body),
            ));
        }
        Ok(value)
    }

    fn timesheet_form(fields: &TimesheetFields) -> Vec<(&'static str, String)> {
        vec![
            ("idClient", fields.client_ref.clone()),
            ("idJob", fields.job_ref.clone()),
            ("idTask", fields.task_id.to_string()),
            ("idPersonnel", fields.person_id.to_string()),
            ("dblHours", fields.hours.to_string()),
            ("dtTimesheet", fields.day.format("%Y-%m-%d").to_string()),
            ("strDescription", fields.note.clone()),
        ]
    }
}

/// Resolves a column index from a table header object.
fn column(endpoint: &'static str, hdr: &Value, name: &str) -> ConnectResult<usize> {
    hdr.get(name)
        .and_then(Value::as_u64)
        .and_then(|idx| usize::try_from(idx).ok())
        .ok_or_else(|| ConnectError::decode(endpoint, format!("missing column '{name}'")))
}

/// Reads a cell as an integer, accepting numeric strings.
fn cell_i64(endpoint: &'static str, row: &Value, idx: usize) -> ConnectResult<i64> {
    let cell = row
        .get(idx)
        .ok_or_else(|| ConnectError::decode(endpoint, format!("missing cell {idx}")))?;
    cell.as_i64()
        .or_else(|| cell.as_str().and_then(|text| text.trim().parse().ok()))
        .ok_or_else(|| ConnectError::decode(endpoint, format!("cell {idx} is not an integer")))
}

/// Reads a cell as a string.
fn cell_str(endpoint: &'static str, row: &Value, idx: usize) -> ConnectResult<String> {
    row.get(idx)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| ConnectError::decode(endpoint, format!("cell {idx} is not a string")))
}

#[async_trait]
impl AgencyPort for HttpAgencyClient {
    async fn authenticate(&self) -> ConnectResult<AgencySession> {
        let url = format!("{}/login/", self.base_url);
        debug!(%url, "agency login");
        let response = self
            .client
            .post(&url)
            .header(
                CONTENT_TYPE,
                HeaderValue::from_static("application/x-www-form-urlencoded"),
            )
            .form(&[
                ("cmd", "org"),
                ("idOrg", self.org_code.as_str()),
                ("strUsername", self.username.as_str()),
                ("strPassword", self.password.as_str()),
            ])
            .send()
            .await
            .map_err(|err| ConnectError::transport("login", err))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ConnectError::transport("login", err))?;
        if !status.is_success() {
            return Err(ConnectError::Auth(format!(
                "login rejected ({status}): {}",
                body_excerpt(&body)
            )));
        }

        let value: Value = serde_json::from_str(&body)
            .map_err(|err| ConnectError::decode("login", err.to_string()))?;
        value
            .get("appID")
            .and_then(Value::as_str)
            .map(|token| AgencySession::new(token.to_owned()))
            .ok_or_else(|| ConnectError::Auth("appID not found in login response".to_owned()))
    }

    async fn list_clients(&self, session: &AgencySession) -> ConnectResult<Vec<AgencyClientRecord>> {
        let url = format!(
            "{}/client/?o={}&i={}&cmd=list&boolArchived=0",
            self.base_url, self.org_code, self.operator_id
        );
        let value = self.get_table("clients", url, session).await?;
        let rows = value
            .get("listClients")
            .and_then(|list| list.get("data"))
            .and_then(Value::as_array)
            .ok_or_else(|| ConnectError::decode("clients", "no client data found"))?;

        // Client rows are positional: id, code, name.
        rows.iter()
            .map(|row| {
                Ok(AgencyClientRecord {
                    id: ClientId::new(cell_i64("clients", row, 0)?),
                    code: cell_str("clients", row, 1)?,
                    name: cell_str("clients", row, 2)?,
                })
            })
            .collect()
    }

    async fn list_jobs(
        &self,
        session: &AgencySession,
        created_on: Option<NaiveDate>,
    ) -> ConnectResult<Vec<JobRecord>> {
        let mut url = format!(
            "{}/reports/?o={}&i={}&cmd=run&gidReport=JobListCustomizable&boolSaveState=0",
            self.base_url, self.org_code, self.operator_id
        );
        if let Some(day) = created_on {
            let formatted = day.format("%Y-%m-%d");
            url.push_str(&format!(
                "&idRangeJobCreatedDate=10&dtFromJobCreatedDate={formatted}&dtToJobCreatedDate={formatted}"
            ));
        }

        let value = self.get_table("jobs", url, session).await?;
        let results = value
            .get("results")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        let mut jobs = Vec::new();
        for result in &results {
            let (Some(hdr), Some(data)) = (result.get("hdr"), result.get("data")) else {
                continue;
            };
            let job_id = column("jobs", hdr, "Job ID")?;
            let job_code = column("jobs", hdr, "Job Code")?;
            let job_name = column("jobs", hdr, "Job Name")?;
            let client_id = column("jobs", hdr, "Client ID")?;
            let client_code = column("jobs", hdr, "Client Code")?;
            let rows = data.as_array().cloned().unwrap_or_default();
            for row in &rows {
                jobs.push(JobRecord {
                    job_id: JobId::new(cell_i64("jobs", row, job_id)?),
                    client_id: ClientId::new(cell_i64("jobs", row, client_id)?),
                    client_code: cell_str("jobs", row, client_code)?,
                    // The job report omits the client display name.
                    client_name: String::new(),
                    job_code: cell_str("jobs", row, job_code)?,
                    job_name: cell_str("jobs", row, job_name)?,
                });
            }
        }
        Ok(jobs)
    }

    async fn fetch_active_jobs(&self, session: &AgencySession) -> ConnectResult<Vec<JobRecord>> {
        let url = format!(
            "{}/job/?o={}&i={}&cmd=list&boolArchived=0&boolClosed=0",
            self.base_url, self.org_code, self.operator_id
        );
        let value = self.get_table("jobs", url, session).await?;
        let list = value
            .get("listJobs")
            .ok_or_else(|| ConnectError::decode("jobs", "no job data found"))?;
        let hdr = list
            .get("hdr")
            .ok_or_else(|| ConnectError::decode("jobs", "missing job header"))?;
        let data = list
            .get("data")
            .and_then(Value::as_array)
            .ok_or_else(|| ConnectError::decode("jobs", "missing job rows"))?;

        let job_id = column("jobs", hdr, "idJob")?;
        let client_id = column("jobs", hdr, "idClient")?;
        let client_code = column("jobs", hdr, "strClientCode")?;
        let client_name = column("jobs", hdr, "strClientName")?;
        let job_code = column("jobs", hdr, "strJobCode")?;
        let job_name = column("jobs", hdr, "strJobName")?;

        data.iter()
            .map(|row| {
                Ok(JobRecord {
                    job_id: JobId::new(cell_i64("jobs", row, job_id)?),
                    client_id: ClientId::new(cell_i64("jobs", row, client_id)?),
                    client_code: cell_str("jobs", row, client_code)?,
                    client_name: cell_str("jobs", row, client_name)?,
                    job_code: cell_str("jobs", row, job_code)?,
                    job_name: cell_str("jobs", row, job_name)?,
                })
            })
            .collect()
    }

    async fn list_tasks(
        &self,
        session: &AgencySession,
        job_ref: &str,
    ) -> ConnectResult<Vec<AgencyTask>> {
        let url = format!(
            "{}/Task/?i={}&cmd=list&idJob={job_ref}",
            self.base_url, self.operator_id
        );
        let value = self.get_table("tasks", url, session).await?;
        let rows = value
            .get("listTasks")
            .and_then(Value::as_array)
            .ok_or_else(|| ConnectError::decode("tasks", "no task data found"))?;

        rows.iter()
            .map(|row| {
                let id = row
                    .get("idTask")
                    .and_then(Value::as_i64)
                    .or_else(|| {
                        row.get("idTask")
                            .and_then(Value::as_str)
                            .and_then(|text| text.trim().parse().ok())
                    })
                    .ok_or_else(|| ConnectError::decode("tasks", "task id is not an integer"))?;
                let name = row
                    .get("strName")
                    .and_then(Value::as_str)
                    .ok_or_else(|| ConnectError::decode("tasks", "task name is not a string"))?;
                Ok(AgencyTask {
                    id: TaskId::new(id),
                    name: name.to_owned(),
                })
            })
            .collect()
    }

    async fn create_timesheet(
        &self,
        session: &AgencySession,
        fields: &TimesheetFields,
    ) -> ConnectResult<TimesheetReceipt> {
        let url = format!(
            "{}/timesheet/?i={}&cmd=add",
            self.base_url, self.operator_id
        );
        let value = self
            .post_form("timesheet", url, session, &Self::timesheet_form(fields))
            .await?;
        let entry_id = value
            .get("idTimesheet")
            .and_then(Value::as_i64)
            .or_else(|| {
                value
                    .get("idTimesheet")
                    .and_then(Value::as_str)
                    .and_then(|text| text.trim().parse().ok())
            })
            .ok_or_else(|| {
                ConnectError::decode("timesheet", "idTimesheet not found in response")
            })?;
        Ok(TimesheetReceipt {
            entry_id: TargetEntryId::new(entry_id),
        })
    }

    async fn update_timesheet(
        &self,
        session: &AgencySession,
        entry_id: TargetEntryId,
        fields: &TimesheetFields,
    ) -> ConnectResult<()> {
        let url = format!(
            "{}/timesheet/?i={}&cmd=update",
            self.base_url, self.operator_id
        );
        let mut form = Self::timesheet_form(fields);
        form.push(("idTimesheet", entry_id.to_string()));
        self.post_form("timesheet", url, session, &form).await?;
        Ok(())
    }

    async fn delete_timesheet(
        &self,
        session: &AgencySession,
        entry_id: TargetEntryId,
    ) -> ConnectResult<()> {
        let url = format!(
            "{}/timesheet/?i={}&cmd=delete",
            self.base_url, self.operator_id
        );
        self.post_form(
            "timesheet",
            url,
            session,
            &[("idTimesheet", entry_id.to_string())],
        )
        .await?;
        Ok(())
    }
}
