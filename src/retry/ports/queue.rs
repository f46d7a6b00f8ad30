//! Enqueue port for the retry queue.

use crate::retry::domain::RetryOperation;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for retry queue operations.
pub type RetryQueueResult<T> = Result<T, RetryQueueError>;

/// Producer side of the durable at-least-once retry queue.
///
/// Consumption (redelivery, visibility timeouts, dead-lettering) is the
/// queue infrastructure's concern; workflows only enqueue.
#[async_trait]
pub trait RetryQueue: Send + Sync {
    /// Enqueues a deferred mutation.
    ///
    /// # Errors
    ///
    /// Returns [`RetryQueueError`] when the message could not be accepted.
    /// Callers treat a failed enqueue after a failed store write as fatal:
    /// that combination is the only way a mutation can be lost.
    async fn enqueue(&self, operation: &RetryOperation) -> RetryQueueResult<()>;
}

/// Errors returned by retry queue implementations.
#[derive(Debug, Clone, Error)]
pub enum RetryQueueError {
    /// The message could not be serialised or accepted by the queue.
    #[error("enqueue failed: {0}")]
    Enqueue(Arc<dyn std::error::Error + Send + Sync>),

    /// A connection could not be obtained.
    #[error("queue connection error: {0}")]
    Connection(String),
}

impl RetryQueueError {
    /// Wraps an enqueue failure.
    #[must_use]
    pub fn enqueue(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Enqueue(Arc::new(err))
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }
}
