//! # Flighttrack SDK
//!
//! Client-side plumbing for looking up a flight with an
//! Aviationstack-compatible flight-status provider.
//!
//! The SDK provides:
//!
//! * [`ProviderConfig`]: API base URL, access key and timeout, injected
//!   at construction time.
//! * [`FlightStatusClient`]: builds provider requests, sends them, and
//!   decodes the answer.
//! * [`FlightTracker`]: the `Idle / Loading / Error / Result` state of a
//!   search form, with stale-response discarding.
//! * [`SdkError`]: unified error type, with the message to show the user.
//!
//! Types from [`flighttrack_models`] are re-exported for convenience.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use flighttrack_sdk::{DisplayState, FlightStatusClient, FlightTracker, ProviderConfig};
//!
//! # async fn run() -> Result<(), flighttrack_sdk::SdkError> {
//! let client = FlightStatusClient::new(ProviderConfig::from_env()?)?;
//! let mut tracker = FlightTracker::new();
//!
//! if let DisplayState::Result(_) = tracker.track(&client, "AI188").await {
//!     println!("{}", tracker.card().expect("result state has a card"));
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod tracker;

pub use client::FlightStatusClient;
pub use config::ProviderConfig;
pub use error::{ErrorKind, SdkError};
pub use tracker::{DisplayState, FlightTracker, PendingSearch, Ticket};

// Re-export the display types for ergonomic usage.
pub use flighttrack_models::{
    format_card, format_card_in, FlightCard, FlightRecord, SearchQuery, PLACEHOLDER,
};
