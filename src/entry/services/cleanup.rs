//! Retention cleanup over the mapping store.

use std::sync::Arc;

use chrono::Duration;
use mockable::Clock;
use tracing::{error, info, warn};

use super::{EntryWorkflowError, EntryWorkflowResult};
use crate::connect::ports::{FailureNotifier, Notice};
use crate::entry::ports::MappingStore;
use crate::response::WorkflowResponse;
use crate::retry::domain::RetryOperation;
use crate::retry::ports::RetryQueue;

/// Rows fetched per scan page.
const SCAN_PAGE_SIZE: u32 = 100;

/// Result of one cleanup pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupReport {
    /// Rows deleted this pass.
    pub deleted: u32,
    /// Rows matched by the retention filter, deleted or not.
    pub found: u32,
}

/// Retention-based garbage collector over the mapping store.
///
/// Scans for rows whose day falls before `today - retention_days` in
/// bounded pages and deletes them one by one. A single failed deletion is
/// queued for retry and never aborts the remaining batch; the failed row
/// stays in the store and is re-found on the next pass regardless.
#[derive(Clone)]
pub struct CleanupService<S, Q, N, C>
where
    S: MappingStore,
    Q: RetryQueue,
    N: FailureNotifier,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    queue: Arc<Q>,
    notifier: Arc<N>,
    clock: Arc<C>,
    retention_days: u32,
}

impl<S, Q, N, C> CleanupService<S, Q, N, C>
where
    S: MappingStore,
    Q: RetryQueue,
    N: FailureNotifier,
    C: Clock + Send + Sync,
{
    /// Creates the cleanup service with the configured retention window.
    #[must_use]
    pub const fn new(
        store: Arc<S>,
        queue: Arc<Q>,
        notifier: Arc<N>,
        clock: Arc<C>,
        retention_days: u32,
    ) -> Self {
        Self {
            store,
            queue,
            notifier,
            clock,
            retention_days,
        }
    }

    /// Runs a cleanup pass and renders the uniform workflow response.
    pub async fn handle(&self) -> WorkflowResponse {
        match self.run().await {
            Ok(report) => WorkflowResponse::ok(
                "Cleanup Complete",
                format!("Deleted {} of {} expired entries", report.deleted, report.found),
            ),
            Err(err) => WorkflowResponse::failure("Cleanup Process Error", err.to_string()),
        }
    }

    /// Runs one cleanup pass.
    ///
    /// Always emits a completion notification; scan-level failures (as
    /// opposed to per-row ones) abort the pass and are notified as errors.
    ///
    /// # Errors
    ///
    /// Returns [`EntryWorkflowError::Store`] when a scan page cannot be
    /// fetched.
    pub async fn run(&self) -> EntryWorkflowResult<CleanupReport> {
        let cutoff = self.clock.utc().date_naive() - Duration::days(i64::from(self.retention_days));
        info!(%cutoff, "cleaning up entries older than cutoff");

        let mut deleted = 0_u32;
        let mut found = 0_u32;
        let mut after = None;

        loop {
            let page = match self.store.scan_older_than(cutoff, after, SCAN_PAGE_SIZE).await {
                Ok(page) => page,
                Err(err) => {
                    let failure = EntryWorkflowError::Store(err);
                    error!(error = %failure, "cleanup scan failed");
                    self.notifier
                        .notify(Notice::new("Cleanup Process Error", failure.to_string()))
                        .await;
                    return Err(failure);
                }
            };

            for row in &page.rows {
                found += 1;
                match self.store.delete(row.source_id).await {
                    Ok(()) => deleted += 1,
                    Err(err) => {
                        warn!(source = %row.source_id, error = %err, "deletion queued for retry");
                        if let Err(queue_err) = self
                            .queue
                            .enqueue(&RetryOperation::DeleteEntry {
                                source_id: row.source_id,
                            })
                            .await
                        {
                            // The row survives in the store and is re-found
                            // on the next pass.
                            error!(source = %row.source_id, error = %queue_err, "retry enqueue failed");
                        }
                    }
                }
            }

            match page.next {
                Some(key) => after = Some(key),
                None => break,
            }
        }

        let message = if deleted > 0 {
            format!("Successfully deleted {deleted} entries older than {cutoff}")
        } else {
            format!("No entries found older than {cutoff}")
        };
        self.notifier
            .notify(Notice::new("Cleanup Process Complete", message))
            .await;

        Ok(CleanupReport { deleted, found })
    }
}
