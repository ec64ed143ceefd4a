//! Error types for the `flighttrack-models` crate.
//!
//! Query parsing and result selection return variants of [`ModelError`].

/// Errors produced while validating a query or selecting a result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// The search text was empty once surrounding whitespace was removed.
    #[error("search query must not be empty")]
    EmptyQuery,

    /// The provider answered with an empty list of flights.
    #[error("no flights found")]
    NoResults,
}
