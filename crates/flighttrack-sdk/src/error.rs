//! SDK error types.
//!
//! [`SdkError`] is the single error type returned by every fallible
//! operation in the SDK. It wraps transport, decoding and validation
//! failures into one enum, and knows the message to show the user for each.

use flighttrack_models::ModelError;
use serde::Serialize;

/// Shown when the search text is empty.
pub const EMPTY_QUERY_MESSAGE: &str = "Enter a flight number like AI188 or 188";

/// Shown when the provider returned no flights.
pub const NO_RESULTS_MESSAGE: &str = "No flights found";

/// Shown when a transport error carries no message of its own.
pub const FALLBACK_MESSAGE: &str = "Request failed";

/// Coarse classification of an [`SdkError`].
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The query was rejected before any request was made.
    Validation,
    /// The request failed or the provider answered with a non-2xx status.
    Transport,
    /// The provider answered but had no matching flight.
    NoResults,
    /// The client was not configured correctly.
    Config,
}

/// Error type for all SDK operations.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// Invalid or missing configuration (e.g. empty access key).
    #[error("configuration error: {0}")]
    Config(String),

    /// The search text was empty.
    #[error("invalid query: {0}")]
    InvalidQuery(ModelError),

    /// The provider returned an empty list.
    #[error("no flights found")]
    NoResults,

    /// The provider answered with a non-success HTTP status.
    #[error("HTTP {0}")]
    HttpStatus(u16),

    /// HTTP transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<ModelError> for SdkError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::EmptyQuery => SdkError::InvalidQuery(e),
            ModelError::NoResults => SdkError::NoResults,
        }
    }
}

impl SdkError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Config,
            Self::InvalidQuery(_) => ErrorKind::Validation,
            Self::NoResults => ErrorKind::NoResults,
            Self::HttpStatus(_) | Self::Http(_) | Self::Serialization(_) => ErrorKind::Transport,
        }
    }

    /// The single message shown to the user for this error.
    pub fn user_message(&self) -> String {
        let message = match self {
            Self::InvalidQuery(_) => EMPTY_QUERY_MESSAGE.to_string(),
            Self::NoResults => NO_RESULTS_MESSAGE.to_string(),
            Self::HttpStatus(status) => format!("HTTP {status}"),
            Self::Http(e) => e.to_string(),
            Self::Serialization(e) => e.to_string(),
            Self::Config(msg) => msg.clone(),
        };
        if message.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            message
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_errors_map_to_their_kinds() {
        let e: SdkError = ModelError::EmptyQuery.into();
        assert_eq!(e.kind(), ErrorKind::Validation);
        assert_eq!(e.user_message(), EMPTY_QUERY_MESSAGE);

        let e: SdkError = ModelError::NoResults.into();
        assert_eq!(e.kind(), ErrorKind::NoResults);
        assert_eq!(e.user_message(), "No flights found");
    }

    #[test]
    fn http_status_message() {
        let e = SdkError::HttpStatus(503);
        assert_eq!(e.kind(), ErrorKind::Transport);
        assert_eq!(e.user_message(), "HTTP 503");
        assert_eq!(e.to_string(), "HTTP 503");
    }

    #[test]
    fn serialization_error_is_transport() {
        let e: SdkError = serde_json::from_str::<serde_json::Value>("<html>")
            .unwrap_err()
            .into();
        assert_eq!(e.kind(), ErrorKind::Transport);
        assert!(!e.user_message().is_empty());
    }

    #[test]
    fn empty_message_falls_back() {
        let e = SdkError::Config(String::new());
        assert_eq!(e.user_message(), FALLBACK_MESSAGE);
    }
}
