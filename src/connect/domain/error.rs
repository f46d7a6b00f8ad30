//! Error types for remote platform calls.

use std::sync::Arc;
use thiserror::Error;

/// Result type for port operations against the remote platforms.
pub type ConnectResult<T> = Result<T, ConnectError>;

/// Errors returned by tracker, agency, and notifier adapters.
#[derive(Debug, Clone, Error)]
pub enum ConnectError {
    /// Authentication with the platform failed.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The platform answered with a non-success status or error body.
    #[error("{endpoint} rejected the request ({status}): {detail}")]
    Api {
        /// Logical endpoint name.
        endpoint: &'static str,
        /// HTTP-level status code.
        status: u16,
        /// Error detail from the response body.
        detail: String,
    },

    /// The request never produced a usable response (timeout, connect
    /// failure, broken transfer).
    #[error("{endpoint} request failed: {source}")]
    Transport {
        /// Logical endpoint name.
        endpoint: &'static str,
        /// Underlying transport error.
        source: Arc<dyn std::error::Error + Send + Sync>,
    },

    /// The response body did not match the expected shape.
    #[error("{endpoint} returned an unreadable response: {detail}")]
    Decode {
        /// Logical endpoint name.
        endpoint: &'static str,
        /// Description of the decode failure.
        detail: String,
    },
}

impl ConnectError {
    /// Wraps a transport-level failure.
    #[must_use]
    pub fn transport(
        endpoint: &'static str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            endpoint,
            source: Arc::new(source),
        }
    }

    /// Builds a decode failure.
    #[must_use]
    pub fn decode(endpoint: &'static str, detail: impl Into<String>) -> Self {
        Self::Decode {
            endpoint,
            detail: detail.into(),
        }
    }

    /// Builds an API rejection.
    #[must_use]
    pub fn api(endpoint: &'static str, status: u16, detail: impl Into<String>) -> Self {
        Self::Api {
            endpoint,
            status,
            detail: detail.into(),
        }
    }
}
