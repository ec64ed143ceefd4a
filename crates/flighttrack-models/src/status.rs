//! Flight status classification.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Status values the provider is known to send.
///
/// Parsing is ASCII case-insensitive but otherwise exact: `"En Route"`
/// classifies, `"en-route"` and `" active"` do not.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FlightStatus {
    /// Not yet departed.
    Scheduled,
    /// Airborne or taxiing.
    Active,
    /// Airborne (alternate wording used by some endpoints).
    #[serde(rename = "en route")]
    #[strum(serialize = "en route")]
    EnRoute,
    /// Arrived.
    Landed,
    /// Will not operate.
    Cancelled,
    /// Incident reported.
    Incident,
    /// Diverted to another airport.
    Diverted,
}

impl FlightStatus {
    /// Classify a raw provider status.
    pub fn classify(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }

    /// Statuses preferred when several records match a search.
    pub fn is_trackable(self) -> bool {
        matches!(self, Self::Active | Self::Scheduled | Self::EnRoute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn classify_is_case_insensitive() {
        assert_eq!(FlightStatus::classify("ACTIVE"), Some(FlightStatus::Active));
        assert_eq!(FlightStatus::classify("Scheduled"), Some(FlightStatus::Scheduled));
        assert_eq!(FlightStatus::classify("En Route"), Some(FlightStatus::EnRoute));
    }

    #[test]
    fn classify_is_exact() {
        assert_eq!(FlightStatus::classify("en-route"), None);
        assert_eq!(FlightStatus::classify(" active"), None);
        assert_eq!(FlightStatus::classify("boarding"), None);
    }

    #[test]
    fn trackable_set() {
        let trackable: Vec<_> = FlightStatus::iter().filter(|s| s.is_trackable()).collect();
        assert_eq!(
            trackable,
            vec![FlightStatus::Scheduled, FlightStatus::Active, FlightStatus::EnRoute]
        );
    }

    #[test]
    fn display_round_trips_through_classify() {
        for status in FlightStatus::iter() {
            assert_eq!(FlightStatus::classify(status.as_ref()), Some(status));
        }
        assert_eq!(FlightStatus::EnRoute.to_string(), "en route");
    }
}
