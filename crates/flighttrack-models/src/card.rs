//! Display model for a single flight.
//!
//! [`format_card`] turns a [`FlightRecord`] into a [`FlightCard`] whose fields
//! are ready to print. It is pure and total: every missing or empty source
//! value becomes [`PLACEHOLDER`], and calling it twice on the same record
//! gives the same card.
//!
//! The one exception to the placeholder rule is the gate, which is
//! `None` (and omitted from rendered output) when the provider has no gate.

use std::fmt;

use chrono::{Local, NaiveDateTime, TimeZone};
use serde::Serialize;

use crate::record::{Endpoint, FlightRecord};
use crate::status::FlightStatus;
use crate::timestamp::{TimeField, TimeSource};

/// Rendered in place of any missing value.
pub const PLACEHOLDER: &str = "-";

const TIME_FORMAT: &str = "%-I:%M %p";
const DATE_FORMAT: &str = "%b %-d %Y";

fn or_placeholder(value: Option<&str>) -> String {
    value.unwrap_or(PLACEHOLDER).to_string()
}

fn format_time(wall: &NaiveDateTime) -> String {
    wall.format(TIME_FORMAT).to_string()
}

fn format_date(wall: &NaiveDateTime) -> String {
    wall.format(DATE_FORMAT).to_string()
}

// ---------------------------------------------------------------------------
// Card types
// ---------------------------------------------------------------------------

/// Which side of the flight an [`EndpointCard`] describes.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Departure airport.
    Departure,
    /// Arrival airport.
    Arrival,
}

/// The side-specific detail shown next to the terminal.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum EndpointDetail {
    /// Departure delay in minutes.
    Delay(String),
    /// Arrival baggage belt.
    Baggage(String),
}

impl EndpointDetail {
    /// Label shown above the value.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Delay(_) => "Delay",
            Self::Baggage(_) => "Baggage",
        }
    }

    /// Display value (`15 min`, `- min`, `7`, `-`).
    pub fn display(&self) -> String {
        match self {
            Self::Delay(v) => format!("{v} min"),
            Self::Baggage(v) => v.clone(),
        }
    }
}

/// One side of the card.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EndpointCard {
    /// Departure or arrival.
    pub side: Side,
    /// IATA airport code.
    pub iata: String,
    /// Airport name.
    pub airport: String,
    /// Scheduled local time (`9:05 AM`).
    pub time: String,
    /// Scheduled local date (`Mar 1 2024`).
    pub date: String,
    /// Terminal.
    pub terminal: String,
    /// Gate, `None` when the provider has none.
    pub gate: Option<String>,
    /// Delay (departure) or baggage (arrival).
    pub detail: EndpointDetail,
    /// Estimated local time.
    pub estimated: String,
    /// Whether the estimated time was absent, unparseable or parsed.
    pub estimated_source: TimeSource,
}

impl EndpointCard {
    /// Heading for this side (`Departure from DEL`).
    pub fn heading(&self) -> String {
        match self.side {
            Side::Departure => format!("Departure from {}", self.iata),
            Side::Arrival => format!("Arrival to {}", self.iata),
        }
    }
}

/// Summary row at the bottom of the card.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CardFooter {
    /// Airline name as sent by the provider.
    pub airline: String,
    /// Flight identifier.
    pub flight: String,
    /// Operating date.
    pub flight_date: String,
}

/// Everything needed to render one flight.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FlightCard {
    /// Airline name, uppercased.
    pub airline: String,
    /// IATA code, falling back to the bare number.
    pub flight: String,
    /// Status, uppercased.
    pub status: String,
    /// Classified status, when recognised.
    pub status_kind: Option<FlightStatus>,
    /// `true` iff the status is exactly `active` (case-insensitive).
    pub status_is_active: bool,
    /// Departure side.
    pub departure: EndpointCard,
    /// Arrival side.
    pub arrival: EndpointCard,
    /// Summary row.
    pub footer: CardFooter,
}

// ---------------------------------------------------------------------------
// Formatter
// ---------------------------------------------------------------------------

/// Format a record using the local time zone.
pub fn format_card(record: &FlightRecord) -> FlightCard {
    format_card_in(record, &Local)
}

/// Format a record, showing times in `tz`.
pub fn format_card_in<Tz: TimeZone>(record: &FlightRecord, tz: &Tz) -> FlightCard {
    let status_text = record.status_text();

    FlightCard {
        airline: record
            .airline_name()
            .map_or_else(|| PLACEHOLDER.to_string(), str::to_uppercase),
        flight: or_placeholder(record.flight_identifier()),
        status: status_text.map_or_else(|| PLACEHOLDER.to_string(), str::to_uppercase),
        status_kind: record.status(),
        status_is_active: status_text.is_some_and(|s| s.to_lowercase() == "active"),
        departure: format_endpoint(Side::Departure, record.departure(), tz),
        arrival: format_endpoint(Side::Arrival, record.arrival(), tz),
        footer: CardFooter {
            airline: or_placeholder(record.airline_name()),
            flight: or_placeholder(record.flight_identifier()),
            flight_date: or_placeholder(record.flight_date()),
        },
    }
}

fn format_endpoint<Tz: TimeZone>(side: Side, endpoint: &Endpoint, tz: &Tz) -> EndpointCard {
    let scheduled = TimeField::parse(endpoint.scheduled());
    let (time, date) = match scheduled.timestamp() {
        Some(ts) => {
            let wall = ts.wall_clock(tz);
            (format_time(&wall), format_date(&wall))
        }
        None => (PLACEHOLDER.to_string(), PLACEHOLDER.to_string()),
    };
    if let TimeField::Invalid(raw) = &scheduled {
        tracing::warn!(?side, value = %raw, "unparseable scheduled time");
    }

    let estimated_field = TimeField::parse(endpoint.estimated());
    let estimated = match &estimated_field {
        TimeField::Parsed(ts) => format_time(&ts.wall_clock(tz)),
        TimeField::Invalid(raw) => {
            tracing::warn!(?side, value = %raw, "unparseable estimated time");
            PLACEHOLDER.to_string()
        }
        TimeField::Absent => PLACEHOLDER.to_string(),
    };

    let detail = match side {
        Side::Departure => EndpointDetail::Delay(or_placeholder(endpoint.delay())),
        Side::Arrival => EndpointDetail::Baggage(or_placeholder(endpoint.baggage())),
    };

    EndpointCard {
        side,
        iata: or_placeholder(endpoint.iata()),
        airport: or_placeholder(endpoint.airport()),
        time,
        date,
        terminal: or_placeholder(endpoint.terminal()),
        gate: endpoint.gate().map(str::to_string),
        detail,
        estimated,
        estimated_source: estimated_field.source(),
    }
}

// ---------------------------------------------------------------------------
// Plain-text rendering
// ---------------------------------------------------------------------------

impl fmt::Display for EndpointCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heading())?;
        writeln!(f, "  {}", self.time)?;
        writeln!(f, "  {}", self.date)?;
        writeln!(f, "  {}", self.airport)?;
        write!(f, "  Terminal: {}", self.terminal)?;
        if let Some(gate) = &self.gate {
            write!(f, "   Gate: {gate}")?;
        }
        writeln!(f, "   {}: {}", self.detail.label(), self.detail.display())?;
        write!(f, "  Estimated: {}", self.estimated)
    }
}

impl fmt::Display for FlightCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(40);
        writeln!(f, "{}", self.airline)?;
        writeln!(f, "Flight: {} • Status: {}", self.flight, self.status)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "{}", self.departure)?;
        writeln!(f)?;
        writeln!(f, "{}", self.arrival)?;
        writeln!(f, "{rule}")?;
        write!(
            f,
            "Airline: {}   Flight: {}   Flight date: {}",
            self.footer.airline, self.footer.flight, self.footer.flight_date
        )
    }
}
