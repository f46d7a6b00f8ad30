//! Process configuration for the bridge.
//!
//! All secrets and endpoints are resolved once at startup into an explicit
//! [`BridgeConfig`] value that callers pass into adapters and workflows.
//! Nothing in this crate reads the environment after construction.

use thiserror::Error;

/// Default retention window for mapping rows, in days.
pub const DEFAULT_RETENTION_DAYS: u32 = 45;

/// Errors raised while assembling configuration from the environment.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is unset or empty after trimming.
    #[error("{0} is not set; export a non-empty value before starting the bridge")]
    Missing(&'static str),

    /// A numeric variable failed to parse.
    #[error("{name} must be a positive integer, got '{value}'")]
    InvalidNumber {
        /// The offending variable name.
        name: &'static str,
        /// The raw value found in the environment.
        value: String,
    },
}

/// Credentials and endpoints for the tracker platform.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Base URL of the tracker REST API.
    pub base_url: String,
    /// Bearer token for the tracker API.
    pub token: String,
    /// Account identifier appended to the base URL.
    pub account_id: String,
}

/// Credentials and endpoints for the agency platform.
#[derive(Debug, Clone)]
pub struct AgencyConfig {
    /// Base URL of the agency service API.
    pub base_url: String,
    /// Organisation code used during login.
    pub org_code: String,
    /// Login username.
    pub username: String,
    /// Login password.
    pub password: String,
    /// Operator identifier threaded through every authenticated call.
    pub operator_id: String,
}

/// Top-level bridge configuration.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Tracker platform settings.
    pub tracker: TrackerConfig,
    /// Agency platform settings.
    pub agency: AgencyConfig,
    /// Destination URL for operator-visible failure notices.
    pub notifier_url: String,
    /// `PostgreSQL` connection string for the mapping store and retry queue.
    pub database_url: String,
    /// Mapping rows older than this many days are garbage collected.
    pub retention_days: u32,
}

const ENV_TRACKER_BASE_URL: &str = "CHRONOBRIDGE_TRACKER_BASE_URL";
const ENV_TRACKER_TOKEN: &str = "CHRONOBRIDGE_TRACKER_TOKEN";
const ENV_TRACKER_ACCOUNT_ID: &str = "CHRONOBRIDGE_TRACKER_ACCOUNT_ID";
const ENV_AGENCY_BASE_URL: &str = "CHRONOBRIDGE_AGENCY_BASE_URL";
const ENV_AGENCY_ORG_CODE: &str = "CHRONOBRIDGE_AGENCY_ORG_CODE";
const ENV_AGENCY_USERNAME: &str = "CHRONOBRIDGE_AGENCY_USERNAME";
const ENV_AGENCY_PASSWORD: &str = "CHRONOBRIDGE_AGENCY_PASSWORD";
const ENV_AGENCY_OPERATOR_ID: &str = "CHRONOBRIDGE_AGENCY_OPERATOR_ID";
const ENV_NOTIFIER_URL: &str = "CHRONOBRIDGE_NOTIFIER_URL";
const ENV_DATABASE_URL: &str = "CHRONOBRIDGE_DATABASE_URL";
const ENV_RETENTION_DAYS: &str = "CHRONOBRIDGE_RETENTION_DAYS";

impl BridgeConfig {
    /// Assembles configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a
    /// numeric variable fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            tracker: TrackerConfig {
                base_url: required(ENV_TRACKER_BASE_URL)?,
                token: required(ENV_TRACKER_TOKEN)?,
                account_id: required(ENV_TRACKER_ACCOUNT_ID)?,
            },
            agency: AgencyConfig {
                base_url: required(ENV_AGENCY_BASE_URL)?,
                org_code: required(ENV_AGENCY_ORG_CODE)?,
                username: required(ENV_AGENCY_USERNAME)?,
                password: required(ENV_AGENCY_PASSWORD)?,
                operator_id: required(ENV_AGENCY_OPERATOR_ID)?,
            },
            notifier_url: required(ENV_NOTIFIER_URL)?,
            database_url: required(ENV_DATABASE_URL)?,
            retention_days: retention_days_from_env()?,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn retention_days_from_env() -> Result<u32, ConfigError> {
    let Some(raw) = std::env::var(ENV_RETENTION_DAYS)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
    else {
        return Ok(DEFAULT_RETENTION_DAYS);
    };

    match raw.parse::<u32>() {
        Ok(days) if days > 0 => Ok(days),
        _ => Err(ConfigError::InvalidNumber {
            name: ENV_RETENTION_DAYS,
            value: raw,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, retention_days_from_env};

    // Environment mutation is process-global, so these tests stick to the
    // parsing helpers rather than full from_env round-trips.

    #[test]
    fn retention_parsing_covers_default_and_rejection() {
        // Single test so the variable is never touched concurrently.
        // SAFETY: test-local variable name, no concurrent reader.
        unsafe { std::env::remove_var("CHRONOBRIDGE_RETENTION_DAYS") };
        assert_eq!(retention_days_from_env(), Ok(super::DEFAULT_RETENTION_DAYS));

        // SAFETY: as above.
        unsafe { std::env::set_var("CHRONOBRIDGE_RETENTION_DAYS", "0") };
        assert!(matches!(
            retention_days_from_env(),
            Err(ConfigError::InvalidNumber { .. })
        ));

        // SAFETY: as above.
        unsafe { std::env::set_var("CHRONOBRIDGE_RETENTION_DAYS", "30") };
        assert_eq!(retention_days_from_env(), Ok(30));

        // SAFETY: as above.
        unsafe { std::env::remove_var("CHRONOBRIDGE_RETENTION_DAYS") };
    }
}
