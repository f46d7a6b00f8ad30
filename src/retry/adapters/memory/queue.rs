//! Thread-safe in-memory retry queue.

use async_trait::async_trait;
use std::sync::{Arc, PoisonError, RwLock};

use crate::retry::domain::RetryOperation;
use crate::retry::ports::{RetryQueue, RetryQueueError, RetryQueueResult};

#[derive(Debug, Default)]
struct QueueState {
    operations: Vec<RetryOperation>,
    reject: bool,
}

/// In-memory retry queue with a rejection toggle for failure-path tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRetryQueue {
    state: Arc<RwLock<QueueState>>,
}

impl InMemoryRetryQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent enqueues fail.
    pub fn reject_enqueues(&self) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .reject = true;
    }

    /// Returns the queued operations without consuming them.
    #[must_use]
    pub fn queued(&self) -> Vec<RetryOperation> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .operations
            .clone()
    }

    /// Removes and returns every queued operation, in enqueue order.
    #[must_use]
    pub fn drain(&self) -> Vec<RetryOperation> {
        std::mem::take(
            &mut self
                .state
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .operations,
        )
    }
}

#[async_trait]
impl RetryQueue for InMemoryRetryQueue {
    async fn enqueue(&self, operation: &RetryOperation) -> RetryQueueResult<()> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.reject {
            return Err(RetryQueueError::enqueue(std::io::Error::other(
                "enqueue rejected",
            )));
        }
        state.operations.push(operation.clone());
        Ok(())
    }
}
