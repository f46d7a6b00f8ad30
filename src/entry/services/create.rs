//! Entry creation workflow.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use super::{EntryWorkflowResult, bookkeeping_lost, report_failure};
use crate::connect::domain::PersonId;
use crate::connect::ports::{AgencyPort, FailureNotifier, Notice, TrackerPort};
use crate::entry::domain::{
    EntryEvent, EntryMapping, EntryOutcome, SoftFailure, authoritative_label, build_fields,
    match_task,
};
use crate::entry::ports::MappingStore;
use crate::response::WorkflowResponse;
use crate::retry::domain::RetryOperation;
use crate::retry::ports::RetryQueue;

/// Workflow that mirrors a newly created tracker entry into the agency.
///
/// Steps run sequentially and each depends on the previous one succeeding:
/// validate the event, fetch the entry, resolve its label and task mapping,
/// authenticate, resolve the job-scoped task and acting user, submit the
/// timesheet, and record the mapping. A mapping write failure after a
/// successful submission is queued for retry rather than failing the
/// workflow, since the authoritative remote write already happened.
#[derive(Clone)]
pub struct CreateEntryService<T, A, S, Q, N>
where
    T: TrackerPort,
    A: AgencyPort,
    S: MappingStore,
    Q: RetryQueue,
    N: FailureNotifier,
{
    tracker: Arc<T>,
    agency: Arc<A>,
    store: Arc<S>,
    queue: Arc<Q>,
    notifier: Arc<N>,
}

impl<T, A, S, Q, N> CreateEntryService<T, A, S, Q, N>
where
    T: TrackerPort,
    A: AgencyPort,
    S: MappingStore,
    Q: RetryQueue,
    N: FailureNotifier,
{
    /// Creates the workflow service.
    #[must_use]
    pub const fn new(
        tracker: Arc<T>,
        agency: Arc<A>,
        store: Arc<S>,
        queue: Arc<Q>,
        notifier: Arc<N>,
    ) -> Self {
        Self {
            tracker,
            agency,
            store,
            queue,
            notifier,
        }
    }

    /// Parses a webhook payload and runs the workflow.
    ///
    /// Malformed input is rejected with a `400` before any side effect;
    /// hard failures are notified and rendered as `500`.
    pub async fn handle(&self, payload: &Value) -> WorkflowResponse {
        let event = match EntryEvent::from_json(payload) {
            Ok(event) => event,
            Err(err) => return WorkflowResponse::bad_request(err.to_string()),
        };
        match self.process(&event).await {
            Ok(outcome) => outcome.into_response(),
            Err(err) => report_failure(&*self.notifier, "Processing Error", &err).await,
        }
    }

    /// Runs the creation workflow for a validated event.
    ///
    /// # Errors
    ///
    /// Returns [`super::EntryWorkflowError`] on authentication failures,
    /// unexpected remote or store failures, and when bookkeeping could
    /// neither be written nor queued.
    pub async fn process(&self, event: &EntryEvent) -> EntryWorkflowResult<EntryOutcome> {
        if event.is_suggestion() {
            info!(source = %event.source_id, "skipping AI-generated suggestion");
            return Ok(EntryOutcome::Soft(SoftFailure::SuggestionSkipped));
        }

        info!(source = %event.source_id, "fetching tracker entry");
        let Some(entry) = self.tracker.fetch_entry(event.source_id).await? else {
            return Ok(EntryOutcome::Soft(SoftFailure::EntryNotFound(
                event.source_id,
            )));
        };

        let Some(label) = authoritative_label(&entry.label_ids) else {
            return Ok(EntryOutcome::Soft(SoftFailure::NoUsableLabel));
        };

        let Some(task_name) = self.store.task_name(label).await? else {
            return Ok(EntryOutcome::Soft(SoftFailure::TaskMappingMissing(label)));
        };

        let session = self.agency.authenticate().await?;

        let Some(job_ref) = entry.project.external_id.clone() else {
            return Ok(EntryOutcome::Soft(SoftFailure::MissingReference(
                "job reference",
            )));
        };
        let tasks = self.agency.list_tasks(&session, &job_ref).await?;
        let Some(task_id) = match_task(&tasks, &task_name) else {
            return Ok(EntryOutcome::Soft(SoftFailure::TaskNotFound(task_name)));
        };

        let Some(person_id) = self.resolve_person(&entry).await? else {
            return Ok(EntryOutcome::Soft(SoftFailure::MissingReference(
                "user external id",
            )));
        };

        let fields = match build_fields(&entry, person_id, task_id) {
            Ok(fields) => fields,
            Err(soft) => return Ok(EntryOutcome::Soft(soft)),
        };

        info!(source = %event.source_id, "submitting timesheet to the agency");
        let receipt = match self.agency.create_timesheet(&session, &fields).await {
            Ok(receipt) => receipt,
            Err(err) => {
                // Never retried: a duplicate resubmission would double-create.
                let detail = err.to_string();
                self.notifier
                    .notify(Notice::new("Submission Error", detail.clone()))
                    .await;
                return Ok(EntryOutcome::Soft(SoftFailure::SubmissionRejected(detail)));
            }
        };

        let mapping = EntryMapping {
            source_id: event.source_id,
            target_entry_id: receipt.entry_id,
            target_person_id: person_id,
            day: fields.day,
        };
        if let Err(store_err) = self.store.put(&mapping).await {
            warn!(source = %event.source_id, error = %store_err, "mapping write queued for retry");
            self.queue
                .enqueue(&RetryOperation::WriteMapping(mapping))
                .await
                .map_err(|queue_err| {
                    bookkeeping_lost(event.source_id, &store_err, &queue_err)
                })?;
        }

        Ok(EntryOutcome::Created(mapping))
    }

    async fn resolve_person(
        &self,
        entry: &crate::connect::domain::TrackerEntry,
    ) -> EntryWorkflowResult<Option<PersonId>> {
        let Some(user_id) = entry.user.id else {
            return Ok(None);
        };
        Ok(self
            .tracker
            .fetch_user(user_id)
            .await?
            .and_then(|user| user.external_id))
    }
}
