//! Port contract for the retry queue.

pub mod queue;

pub use queue::{RetryQueue, RetryQueueError, RetryQueueResult};
