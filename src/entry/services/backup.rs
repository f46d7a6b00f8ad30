//! Entry backup mirror workflows.

use std::sync::Arc;

use mockable::Clock;
use serde_json::Value;
use tracing::{info, warn};

use super::{EntryWorkflowError, EntryWorkflowResult, bookkeeping_lost, report_failure};
use crate::connect::ports::{FailureNotifier, TrackerPort};
use crate::entry::domain::{EntryBackup, EntryEvent, EntryOutcome};
use crate::entry::ports::BackupStore;
use crate::response::WorkflowResponse;
use crate::retry::domain::RetryOperation;
use crate::retry::ports::RetryQueue;

/// Workflows that mirror tracker entries into the backup store.
///
/// Backups are independent of the agency platform: they capture a
/// denormalised audit copy of the entry so it stays inspectable after the
/// tracker's copy changes or disappears.
#[derive(Clone)]
pub struct BackupService<T, B, Q, N, C>
where
    T: TrackerPort,
    B: BackupStore,
    Q: RetryQueue,
    N: FailureNotifier,
    C: Clock + Send + Sync,
{
    tracker: Arc<T>,
    store: Arc<B>,
    queue: Arc<Q>,
    notifier: Arc<N>,
    clock: Arc<C>,
}

impl<T, B, Q, N, C> BackupService<T, B, Q, N, C>
where
    T: TrackerPort,
    B: BackupStore,
    Q: RetryQueue,
    N: FailureNotifier,
    C: Clock + Send + Sync,
{
    /// Creates the backup service.
    #[must_use]
    pub const fn new(
        tracker: Arc<T>,
        store: Arc<B>,
        queue: Arc<Q>,
        notifier: Arc<N>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tracker,
            store,
            queue,
            notifier,
            clock,
        }
    }

    /// Parses a webhook payload and stores a backup row.
    pub async fn handle_record(&self, payload: &Value) -> WorkflowResponse {
        let event = match EntryEvent::from_json(payload) {
            Ok(event) => event,
            Err(err) => return WorkflowResponse::bad_request(err.to_string()),
        };
        match self.record(&event).await {
            Ok(outcome) => outcome.into_response(),
            Err(err) => report_failure(&*self.notifier, "Timesheet Backup Error", &err).await,
        }
    }

    /// Parses a webhook payload and refreshes a backup row.
    pub async fn handle_refresh(&self, payload: &Value) -> WorkflowResponse {
        let event = match EntryEvent::from_json(payload) {
            Ok(event) => event,
            Err(err) => return WorkflowResponse::bad_request(err.to_string()),
        };
        match self.refresh(&event).await {
            Ok(outcome) => outcome.into_response(),
            Err(err) => report_failure(&*self.notifier, "Timesheet Backup Error", &err).await,
        }
    }

    /// Parses a webhook payload and removes a backup row.
    pub async fn handle_remove(&self, payload: &Value) -> WorkflowResponse {
        let event = match EntryEvent::from_json(payload) {
            Ok(event) => event,
            Err(err) => return WorkflowResponse::bad_request(err.to_string()),
        };
        match self.remove(&event).await {
            Ok(outcome) => outcome.into_response(),
            Err(err) => report_failure(&*self.notifier, "Timesheet Backup Error", &err).await,
        }
    }

    /// Stores a backup row for a newly created entry.
    ///
    /// # Errors
    ///
    /// Returns [`EntryWorkflowError::EntryUnavailable`] when the entry no
    /// longer resolves, or a bookkeeping error when neither the write nor
    /// its retry enqueue succeeded.
    pub async fn record(&self, event: &EntryEvent) -> EntryWorkflowResult<EntryOutcome> {
        let backup = self.extract(event).await?;
        self.put_or_queue(backup, RetryOperation::StoreBackup)
            .await?;
        Ok(EntryOutcome::BackedUp(event.source_id))
    }

    /// Overwrites the backup row for an updated entry.
    ///
    /// # Errors
    ///
    /// As for [`Self::record`].
    pub async fn refresh(&self, event: &EntryEvent) -> EntryWorkflowResult<EntryOutcome> {
        let backup = self.extract(event).await?;
        self.put_or_queue(backup, RetryOperation::UpdateBackup)
            .await?;
        Ok(EntryOutcome::BackupRefreshed(event.source_id))
    }

    /// Removes the backup row for a deleted entry.
    ///
    /// # Errors
    ///
    /// Returns a bookkeeping error when neither the delete nor its retry
    /// enqueue succeeded.
    pub async fn remove(&self, event: &EntryEvent) -> EntryWorkflowResult<EntryOutcome> {
        match self.store.delete(event.source_id).await {
            Ok(true) => Ok(EntryOutcome::BackupRemoved(event.source_id)),
            Ok(false) => Ok(EntryOutcome::BackupMissing(event.source_id)),
            Err(store_err) => {
                warn!(source = %event.source_id, error = %store_err, "backup deletion queued for retry");
                self.queue
                    .enqueue(&RetryOperation::DeleteBackup {
                        source_id: event.source_id,
                    })
                    .await
                    .map_err(|queue_err| {
                        bookkeeping_lost(event.source_id, &store_err, &queue_err)
                    })?;
                Ok(EntryOutcome::BackupRemoved(event.source_id))
            }
        }
    }

    async fn extract(&self, event: &EntryEvent) -> EntryWorkflowResult<EntryBackup> {
        info!(source = %event.source_id, "fetching tracker entry for backup");
        let entry = self
            .tracker
            .fetch_entry(event.source_id)
            .await?
            .ok_or(EntryWorkflowError::EntryUnavailable(event.source_id))?;
        Ok(EntryBackup::from_entry(
            &entry,
            self.clock.utc().date_naive(),
        ))
    }

    async fn put_or_queue<F>(&self, backup: EntryBackup, wrap: F) -> EntryWorkflowResult<()>
    where
        F: FnOnce(EntryBackup) -> RetryOperation,
    {
        let source_id = backup.source_id;
        if let Err(store_err) = self.store.put(&backup).await {
            warn!(source = %source_id, error = %store_err, "backup write queued for retry");
            self.queue
                .enqueue(&wrap(backup))
                .await
                .map_err(|queue_err| bookkeeping_lost(source_id, &store_err, &queue_err))?;
        }
        Ok(())
    }
}
