//! Entry deletion workflow.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use super::{EntryWorkflowResult, bookkeeping_lost, report_failure};
use crate::connect::ports::{AgencyPort, FailureNotifier, Notice, TrackerPort};
use crate::entry::domain::{EntryEvent, EntryOutcome, SoftFailure};
use crate::entry::ports::MappingStore;
use crate::response::WorkflowResponse;
use crate::retry::domain::RetryOperation;
use crate::retry::ports::RetryQueue;

/// Workflow that removes an agency timesheet when its tracker entry is
/// deleted.
///
/// The tracker entry is re-fetched first as a stale/duplicate webhook
/// guard. When the agency deletion is rejected the local mapping row is
/// deliberately retained so the deletion can be replayed without
/// re-fetching from the tracker, whose copy vanishes shortly after the
/// webhook fires.
#[derive(Clone)]
pub struct DeleteEntryService<T, A, S, Q, N>
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

impl<T, A, S, Q, N> DeleteEntryService<T, A, S, Q, N>
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
            Err(err) => report_failure(&*self.notifier, "Timesheet Deletion Error", &err).await,
        }
    }

    /// Runs the deletion workflow for a validated event.
    ///
    /// # Errors
    ///
    /// Returns [`super::EntryWorkflowError`] on authentication failures,
    /// unexpected remote or store failures, and when bookkeeping could
    /// neither be written nor queued.
    pub async fn process(&self, event: &EntryEvent) -> EntryWorkflowResult<EntryOutcome> {
        if event.is_suggestion() {
            info!(source = %event.source_id, "skipping AI-generated suggestion deletion");
            return Ok(EntryOutcome::Soft(SoftFailure::SuggestionSkipped));
        }

        info!(source = %event.source_id, "verifying tracker entry before deletion");
        if self.tracker.fetch_entry(event.source_id).await?.is_none() {
            return Ok(self
                .soft_failure(SoftFailure::DeletionEntryMissing(event.source_id))
                .await);
        }

        let Some(mapping) = self.store.fetch(event.source_id).await? else {
            return Ok(self
                .soft_failure(SoftFailure::DeletionMappingMissing(event.source_id))
                .await);
        };

        let session = self.agency.authenticate().await?;
        info!(target = %mapping.target_entry_id, "deleting agency timesheet");
        if let Err(err) = self
            .agency
            .delete_timesheet(&session, mapping.target_entry_id)
            .await
        {
            // Mapping row intentionally retained for replay.
            return Ok(self
                .soft_failure(SoftFailure::DeletionRejected(err.to_string()))
                .await);
        }

        if let Err(store_err) = self.store.delete(event.source_id).await {
            warn!(source = %event.source_id, error = %store_err, "mapping deletion queued for retry");
            self.queue
                .enqueue(&RetryOperation::DeleteEntry {
                    source_id: event.source_id,
                })
                .await
                .map_err(|queue_err| {
                    bookkeeping_lost(event.source_id, &store_err, &queue_err)
                })?;
        }

        Ok(EntryOutcome::Deleted(event.source_id))
    }

    /// Deletion soft failures are operator-notified, unlike the other
    /// workflows' steady-state conditions.
    async fn soft_failure(&self, failure: SoftFailure) -> EntryOutcome {
        self.notifier
            .notify(Notice::new(
                "Timesheet Deletion Error",
                failure.description(),
            ))
            .await;
        EntryOutcome::Soft(failure)
    }
}
