//! UI-level search state.
//!
//! [`FlightTracker`] owns the [`DisplayState`] of one search form:
//!
//! ```text
//!            submit (valid)          resolve(Ok, non-empty)
//!   Idle ───────────────▶ Loading ───────────────────────▶ Result
//!     │                      │
//!     │ submit (invalid)     │ resolve(Err) / empty list
//!     ▼                      ▼
//!   Error ◀──────────────────┘
//! ```
//!
//! Any new submit first clears the previous `Error`/`Result`. Each submit
//! issues a [`Ticket`]; a response carrying an older ticket than the latest
//! submission is discarded, so the display always follows the most recent
//! search even when responses arrive out of order.

use flighttrack_models::{format_card, select_best, FlightCard, FlightRecord, SearchQuery};
use tracing::{debug, info};

use crate::client::FlightStatusClient;
use crate::error::SdkError;

/// What the search form currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DisplayState {
    /// Nothing yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The last search failed with this user-facing message.
    Error(String),
    /// The last search selected this record.
    Result(FlightRecord),
}

impl DisplayState {
    /// The error message, if in the `Error` state.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(msg) => Some(msg),
            _ => None,
        }
    }

    /// The selected record, if in the `Result` state.
    pub fn record(&self) -> Option<&FlightRecord> {
        match self {
            Self::Result(record) => Some(record),
            _ => None,
        }
    }
}

/// Identifies one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// A validated search waiting for its network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    /// Pass back to [`FlightTracker::resolve`].
    pub ticket: Ticket,
    /// What to send to the provider.
    pub query: SearchQuery,
}

/// State machine for a single search form.
#[derive(Debug, Default)]
pub struct FlightTracker {
    state: DisplayState,
    latest: u64,
}

impl FlightTracker {
    /// A tracker in the `Idle` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// `true` while a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.state == DisplayState::Loading
    }

    /// The card for the current result, if any.
    pub fn card(&self) -> Option<FlightCard> {
        self.state.record().map(format_card)
    }

    /// Back to `Idle`. Responses to earlier submissions are ignored from now on.
    pub fn reset(&mut self) {
        self.latest += 1;
        self.state = DisplayState::Idle;
    }

    /// Start a search.
    ///
    /// Returns the pending search to run, or `None` when the input was
    /// rejected (the state is then `Error` and no request should be made).
    /// A submit while `Loading` is accepted and supersedes the earlier one.
    pub fn submit(&mut self, raw: &str) -> Option<PendingSearch> {
        self.reset();
        let ticket = Ticket(self.latest);

        match SearchQuery::parse(raw) {
            Ok(query) => {
                info!(query = %query, ?ticket, "search submitted");
                self.state = DisplayState::Loading;
                Some(PendingSearch { ticket, query })
            }
            Err(e) => {
                self.state = DisplayState::Error(SdkError::from(e).user_message());
                None
            }
        }
    }

    /// Apply the outcome of a network call.
    ///
    /// Returns `false` (and leaves the state untouched) when `ticket` has
    /// been superseded by a later submit or reset.
    pub fn resolve(
        &mut self,
        ticket: Ticket,
        outcome: Result<Vec<FlightRecord>, SdkError>,
    ) -> bool {
        if ticket.0 != self.latest {
            debug!(?ticket, latest = self.latest, "discarding stale response");
            return false;
        }

        let selected = outcome.and_then(|records| Ok(select_best(&records)?.clone()));
        self.state = match selected {
            Ok(record) => DisplayState::Result(record),
            Err(e) => {
                info!(?ticket, error = %e, "search failed");
                DisplayState::Error(e.user_message())
            }
        };
        true
    }

    /// Submit, fetch and resolve in one go.
    pub async fn track(&mut self, client: &FlightStatusClient, raw: &str) -> &DisplayState {
        if let Some(pending) = self.submit(raw) {
            let outcome = client.fetch(&pending.query).await;
            self.resolve(pending.ticket, outcome);
        }
        &self.state
    }
}
