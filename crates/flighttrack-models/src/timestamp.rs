//! Lenient timestamp parsing.
//!
//! Provider timestamps are usually RFC 3339 (`2024-03-01T09:05:00+00:00`)
//! but some endpoints drop the offset or the seconds. A timestamp without
//! an offset is kept as a floating wall-clock time and shown as-is.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

const ZONED_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];
const FLOATING_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A successfully parsed timestamp.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    /// An instant with a known offset.
    Zoned(DateTime<FixedOffset>),
    /// A wall-clock time with no offset.
    Floating(NaiveDateTime),
}

impl Timestamp {
    /// Parse a provider timestamp.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(Self::Zoned(dt));
        }
        for fmt in ZONED_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
                return Some(Self::Zoned(dt));
            }
        }
        for fmt in FLOATING_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
                return Some(Self::Floating(dt));
            }
        }
        // A bare date is midnight UTC.
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| Self::Zoned(Utc.from_utc_datetime(&dt).fixed_offset()))
    }

    /// Wall-clock time in `tz`. Floating timestamps ignore `tz`.
    pub fn wall_clock<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDateTime {
        match self {
            Self::Zoned(dt) => dt.with_timezone(tz).naive_local(),
            Self::Floating(dt) => *dt,
        }
    }
}

/// Where a displayed time came from.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TimeSource {
    /// The provider sent nothing.
    Absent,
    /// The provider sent a value that could not be parsed.
    Invalid,
    /// The value parsed.
    Parsed,
}

/// An optional provider timestamp, keeping "absent" and "unparseable" apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeField {
    /// No value.
    Absent,
    /// A value that is not a recognisable timestamp.
    Invalid(String),
    /// A parsed value.
    Parsed(Timestamp),
}

impl TimeField {
    /// Classify an optional raw value.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => Self::Absent,
            Some(s) => match Timestamp::parse(s) {
                Some(ts) => Self::Parsed(ts),
                None => Self::Invalid(s.to_string()),
            },
        }
    }

    /// The parsed timestamp, if any.
    pub fn timestamp(&self) -> Option<&Timestamp> {
        match self {
            Self::Parsed(ts) => Some(ts),
            _ => None,
        }
    }

    /// Where this value came from.
    pub fn source(&self) -> TimeSource {
        match self {
            Self::Absent => TimeSource::Absent,
            Self::Invalid(_) => TimeSource::Invalid,
            Self::Parsed(_) => TimeSource::Parsed,
        }
    }
}
