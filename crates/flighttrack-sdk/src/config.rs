//! Provider configuration.
//!
//! The API base URL and the access key come from the hosting environment and
//! are injected into [`FlightStatusClient::new`](crate::FlightStatusClient::new).
//! Nothing in the SDK reads them from global state after that.

use std::fmt;
use std::time::Duration;

use crate::error::SdkError;

/// Default provider endpoint (Aviationstack-compatible).
pub const DEFAULT_API_BASE: &str = "http://api.aviationstack.com/v1/flights";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where and how to reach the flight-status provider.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    base_url: String,
    access_key: String,
    timeout: Duration,
}

// The access key never appears in logs.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("access_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ProviderConfig {
    /// Build a configuration. Both strings must be non-empty.
    pub fn new(base_url: impl Into<String>, access_key: impl Into<String>) -> Result<Self, SdkError> {
        let base_url = base_url.into().trim().to_string();
        let access_key = access_key.into().trim().to_string();

        if base_url.is_empty() {
            return Err(SdkError::Config("API base URL must not be empty".into()));
        }
        if access_key.is_empty() {
            return Err(SdkError::Config("access key must not be empty".into()));
        }

        Ok(Self {
            base_url,
            access_key,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Replace the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the configuration from environment variables.
    ///
    /// | Variable                    | Default                                   | Description          |
    /// |-----------------------------|-------------------------------------------|----------------------|
    /// | `FLIGHTTRACK_API_BASE`      | `http://api.aviationstack.com/v1/flights` | Provider endpoint    |
    /// | `FLIGHTTRACK_ACCESS_KEY`    | *(required)*                              | Provider access key  |
    /// | `FLIGHTTRACK_TIMEOUT_SECS`  | `10`                                      | Per-request timeout  |
    pub fn from_env() -> Result<Self, SdkError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_vars<F>(lookup: F) -> Result<Self, SdkError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("FLIGHTTRACK_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let access_key = lookup("FLIGHTTRACK_ACCESS_KEY").ok_or_else(|| {
            SdkError::Config("FLIGHTTRACK_ACCESS_KEY is not set".into())
        })?;
        let timeout = lookup("FLIGHTTRACK_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs);

        Ok(Self::new(base_url, access_key)?.with_timeout(timeout))
    }

    /// Provider endpoint.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Provider access key.
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
