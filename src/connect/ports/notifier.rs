//! Port contract for the operator-visible failure sink.

use async_trait::async_trait;

/// An operator-visible notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Short notice title.
    pub title: String,
    /// Longer notice description.
    pub description: String,
}

impl Notice {
    /// Builds a notice.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Fire-and-forget alerting sink for operator-visible errors.
///
/// Delivery is best-effort: implementations log failures and return
/// normally, and must never block a workflow's return.
#[async_trait]
pub trait FailureNotifier: Send + Sync {
    /// Delivers a notice, swallowing any delivery failure.
    async fn notify(&self, notice: Notice);
}
