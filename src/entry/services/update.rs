//! Entry update workflow.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use super::{EntryWorkflowResult, bookkeeping_lost, report_failure};
use crate::connect::ports::{AgencyPort, FailureNotifier, Notice, TrackerPort};
use crate::entry::domain::{
    EntryEvent, EntryMapping, EntryOutcome, SoftFailure, authoritative_label, build_fields,
    match_task,
};
use crate::entry::ports::MappingStore;
use crate::response::WorkflowResponse;
use crate::retry::domain::RetryOperation;
use crate::retry::ports::RetryQueue;

/// Workflow that pushes a tracker entry change to its agency timesheet.
///
/// Requires a pre-existing mapping row; the stored personnel reference is
/// reused to reconstruct the update call, so no tracker user lookup is
/// needed here.
///
/// A tracker fetch that returns nothing is treated as a deletion that was
/// misrouted as an update and aborts softly. This compensates for the
/// upstream delete-then-update webhook race; it is a heuristic, not a
/// contract.
#[derive(Clone)]
pub struct UpdateEntryService<T, A, S, Q, N>
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

impl<T, A, S, Q, N> UpdateEntryService<T, A, S, Q, N>
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

    /// Runs the update workflow for a validated event.
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
            return Ok(EntryOutcome::Soft(SoftFailure::MisroutedDeletion(
                event.source_id,
            )));
        };

        let Some(label) = authoritative_label(&entry.label_ids) else {
            return Ok(EntryOutcome::Soft(SoftFailure::NoUsableLabel));
        };

        let Some(task_name) = self.store.task_name(label).await? else {
            return Ok(EntryOutcome::Soft(SoftFailure::TaskMappingMissing(label)));
        };

        let Some(existing) = self.store.fetch(event.source_id).await? else {
            return Ok(EntryOutcome::Soft(SoftFailure::MappingMissing(
                event.source_id,
            )));
        };

        let session = self.agency.authenticate().await?;

        let Some(job_ref) = entry.project.external_id.clone() else {
            return Ok(EntryOutcome::Soft(SoftFailure::MissingReference(
                "job reference",
            )));
        };
        let tasks = match self.agency.list_tasks(&session, &job_ref).await {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(source = %event.source_id, error = %err, "task listing failed");
                return Ok(EntryOutcome::Soft(SoftFailure::TasksUnavailable));
            }
        };
        let Some(task_id) = match_task(&tasks, &task_name) else {
            return Ok(EntryOutcome::Soft(SoftFailure::TaskNotFound(task_name)));
        };

        let fields = match build_fields(&entry, existing.target_person_id, task_id) {
            Ok(fields) => fields,
            Err(soft) => return Ok(EntryOutcome::Soft(soft)),
        };

        info!(source = %event.source_id, target = %existing.target_entry_id, "updating agency timesheet");
        if let Err(err) = self
            .agency
            .update_timesheet(&session, existing.target_entry_id, &fields)
            .await
        {
            let detail = err.to_string();
            self.notifier
                .notify(Notice::new("Update Error", detail.clone()))
                .await;
            return Ok(EntryOutcome::Soft(SoftFailure::UpdateRejected(detail)));
        }

        let refreshed = EntryMapping {
            source_id: event.source_id,
            target_entry_id: existing.target_entry_id,
            target_person_id: existing.target_person_id,
            day: fields.day,
        };
        if let Err(store_err) = self.store.put(&refreshed).await {
            warn!(source = %event.source_id, error = %store_err, "mapping refresh queued for retry");
            self.queue
                .enqueue(&RetryOperation::UpdateMapping(refreshed))
                .await
                .map_err(|queue_err| {
                    bookkeeping_lost(event.source_id, &store_err, &queue_err)
                })?;
        }

        Ok(EntryOutcome::Updated(existing.target_entry_id))
    }
}
