//! Webhook adapter for the failure notification sink.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::warn;

use super::DEFAULT_TIMEOUT_SECS;
use crate::connect::ports::{FailureNotifier, Notice};

/// Posts notices as JSON to a configured webhook destination.
///
/// Delivery failures are logged and swallowed; a broken notifier must never
/// take a workflow down with it.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: Client,
    url: String,
}

impl WebhookNotifier {
    /// Builds a notifier for the given destination URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl FailureNotifier for WebhookNotifier {
    async fn notify(&self, notice: Notice) {
        let payload = json!({
            "source": "custom",
            "content": {
                "title": notice.title,
                "description": notice.description,
            }
        });

        match self.client.post(&self.url).json(&payload).send().await {
            Ok(response) if !response.status().is_success() => {
                warn!(status = %response.status(), title = %notice.title, "notice rejected");
            }
            Ok(_) => {}
            Err(err) => {
                warn!(error = %err, title = %notice.title, "notice delivery failed");
            }
        }
    }
}
