//! HTTP adapter for the tracker platform's REST API.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use super::{DEFAULT_TIMEOUT_SECS, body_excerpt};
use crate::config::TrackerConfig;
use crate::connect::domain::{
    ClientDirectory, ConnectError, ConnectResult, CreatedClient, NewClient, NewProject,
    SourceEntryId, TrackerClientId, TrackerEntry, TrackerProject, TrackerUser, TrackerUserId,
};
use crate::connect::ports::TrackerPort;

/// Tracker REST client authenticated with a bearer token.
#[derive(Debug, Clone)]
pub struct HttpTrackerClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ClientRow {
    name: String,
    id: i64,
}

impl HttpTrackerClient {
    /// Builds a client for the configured tracker account.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectError::Auth`] when the token cannot form a valid
    /// header, or a transport error when the HTTP client cannot be built.
    pub fn new(config: &TrackerConfig) -> ConnectResult<Self> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| ConnectError::Auth("tracker token is not a valid header".to_owned()))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .default_headers(headers)
            .build()
            .map_err(|err| ConnectError::transport("tracker", err))?;

        Ok(Self {
            client,
            base_url: format!(
                "{}/{}",
                config.base_url.trim_end_matches('/'),
                config.account_id
            ),
        })
    }

    async fn parse<T: DeserializeOwned>(
        endpoint: &'static str,
        response: reqwest::Response,
    ) -> ConnectResult<T> {
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

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: String,
    ) -> ConnectResult<T> {
        debug!(endpoint, %url, "tracker GET");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| ConnectError::transport(endpoint, err))?;
        Self::parse(endpoint, response).await
    }

    /// GET variant that maps a 404 to `None`.
    async fn get_optional<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: String,
    ) -> ConnectResult<Option<T>> {
        debug!(endpoint, %url, "tracker GET");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| ConnectError::transport(endpoint, err))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::parse(endpoint, response).await.map(Some)
    }
}

#[async_trait]
impl TrackerPort for HttpTrackerClient {
    async fn fetch_entry(&self, id: SourceEntryId) -> ConnectResult<Option<TrackerEntry>> {
        self.get_optional("events", format!("{}/events/{id}", self.base_url))
            .await
    }

    async fn fetch_user(&self, id: TrackerUserId) -> ConnectResult<Option<TrackerUser>> {
        self.get_optional("users", format!("{}/users/{id}", self.base_url))
            .await
    }

    async fn list_clients(&self) -> ConnectResult<ClientDirectory> {
        let rows: Vec<ClientRow> = self
            .get_json("clients", format!("{}/clients", self.base_url))
            .await?;
        Ok(rows
            .into_iter()
            .map(|row| (row.name, TrackerClientId::new(row.id)))
            .collect())
    }

    async fn create_client(&self, client: &NewClient) -> ConnectResult<CreatedClient> {
        let response = self
            .client
            .post(format!("{}/clients", self.base_url))
            .json(&json!({ "client": client }))
            .send()
            .await
            .map_err(|err| ConnectError::transport("clients", err))?;
        Self::parse("clients", response).await
    }

    async fn list_projects(&self) -> ConnectResult<Vec<TrackerProject>> {
        self.get_json("projects", format!("{}/projects", self.base_url))
            .await
    }

    async fn create_project(&self, project: &NewProject) -> ConnectResult<()> {
        let response = self
            .client
            .post(format!("{}/projects", self.base_url))
            .json(&json!({ "project": project }))
            .send()
            .await
            .map_err(|err| ConnectError::transport("projects", err))?;
        let _: serde_json::Value = Self::parse("projects", response).await?;
        Ok(())
    }

    async fn update_project(&self, project_id: i64, project: &NewProject) -> ConnectResult<()> {
        let response = self
            .client
            .put(format!("{}/projects/{project_id}", self.base_url))
            .json(&json!({ "project": project }))
            .send()
            .await
            .map_err(|err| ConnectError::transport("projects", err))?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ConnectError::api(
                "projects",
                status.as_u16(),
                body_excerpt(&body),
            ))
        }
    }

    async fn delete_project(&self, project_id: i64) -> ConnectResult<()> {
        let response = self
            .client
            .delete(format!("{}/projects/{project_id}", self.base_url))
            .send()
            .await
            .map_err(|err| ConnectError::transport("projects", err))?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ConnectError::api(
                "projects",
                status.as_u16(),
                body_excerpt(&body),
            ))
        }
    }
}
