//! Recording notifier fake for workflow tests.

use async_trait::async_trait;
use std::sync::{Arc, PoisonError, RwLock};

use crate::connect::ports::{FailureNotifier, Notice};

/// Notifier fake that records every notice instead of delivering it.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<RwLock<Vec<Notice>>>,
}

impl RecordingNotifier {
    /// Creates an empty recording notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every notice recorded so far, in order.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl FailureNotifier for RecordingNotifier {
    async fn notify(&self, notice: Notice) {
        self.notices
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}
