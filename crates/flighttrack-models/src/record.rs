//! Provider payload schema.
//!
//! The flight-status provider returns loosely-typed JSON: any field may be
//! missing, `null`, an empty string, or occasionally of the wrong type. Every
//! field here is therefore optional, and deserialization never fails because
//! of a single odd leaf:
//!
//! * scalar leaves accept strings, numbers and booleans (stringified);
//! * nested groups that are not objects are treated as absent.
//!
//! Reading goes through the total accessors ([`FlightRecord::airline_name`],
//! [`Endpoint::gate`], …) which fold empty strings into `None`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::status::FlightStatus;

// ---------------------------------------------------------------------------
// Lenient field helpers
// ---------------------------------------------------------------------------

fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }))
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// FlightRecord
// ---------------------------------------------------------------------------

/// One flight as returned by the provider.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FlightRecord {
    /// Operating date (`YYYY-MM-DD`).
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub flight_date: Option<String>,
    /// Provider status (`scheduled`, `active`, `landed`, …).
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub flight_status: Option<String>,
    /// Alternate status field used by some provider endpoints.
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Departure side.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub departure: Option<Endpoint>,
    /// Arrival side.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub arrival: Option<Endpoint>,
    /// Operating airline.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub airline: Option<Airline>,
    /// Flight identifiers.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub flight: Option<FlightIdent>,
}

static EMPTY_ENDPOINT: Endpoint = Endpoint {
    airport: None,
    timezone: None,
    iata: None,
    icao: None,
    terminal: None,
    gate: None,
    delay: None,
    baggage: None,
    scheduled: None,
    scheduled_time: None,
    estimated: None,
    estimated_time: None,
    actual: None,
    actual_time: None,
};

impl FlightRecord {
    /// Airline name, if non-empty.
    pub fn airline_name(&self) -> Option<&str> {
        self.airline.as_ref().and_then(|a| present(a.name.as_ref()))
    }

    /// IATA flight code (`AI188`), if non-empty.
    pub fn flight_iata(&self) -> Option<&str> {
        self.flight.as_ref().and_then(|f| present(f.iata.as_ref()))
    }

    /// Bare flight number (`188`), if non-empty.
    pub fn flight_number(&self) -> Option<&str> {
        self.flight.as_ref().and_then(|f| present(f.number.as_ref()))
    }

    /// IATA code, falling back to the bare number.
    pub fn flight_identifier(&self) -> Option<&str> {
        self.flight_iata().or_else(|| self.flight_number())
    }

    /// `flight_status`, falling back to `status`.
    pub fn status_text(&self) -> Option<&str> {
        present(self.flight_status.as_ref()).or_else(|| present(self.status.as_ref()))
    }

    /// Classified status, `None` when absent or not a known provider value.
    pub fn status(&self) -> Option<FlightStatus> {
        self.status_text().and_then(FlightStatus::classify)
    }

    /// Operating date, if non-empty.
    pub fn flight_date(&self) -> Option<&str> {
        present(self.flight_date.as_ref())
    }

    /// Departure side; an empty endpoint when the provider sent none.
    pub fn departure(&self) -> &Endpoint {
        self.departure.as_ref().unwrap_or(&EMPTY_ENDPOINT)
    }

    /// Arrival side; an empty endpoint when the provider sent none.
    pub fn arrival(&self) -> &Endpoint {
        self.arrival.as_ref().unwrap_or(&EMPTY_ENDPOINT)
    }
}

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

/// Flight identifiers.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FlightIdent {
    /// IATA flight code (`AI188`).
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub iata: Option<String>,
    /// ICAO flight code (`AIC188`).
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub icao: Option<String>,
    /// Bare flight number (`188`).
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
}

/// Operating airline.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Airline {
    /// Display name (`Air India`).
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// IATA airline code (`AI`).
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub iata: Option<String>,
    /// ICAO airline code (`AIC`).
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub icao: Option<String>,
}

/// One side (departure or arrival) of a flight.
///
/// Timestamps come under two spellings depending on the provider endpoint
/// (`scheduled` / `scheduledTime`); the accessors check both.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoint {
    /// Airport name.
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub airport: Option<String>,
    /// IANA time zone of the airport.
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// IATA airport code.
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub iata: Option<String>,
    /// ICAO airport code.
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub icao: Option<String>,
    /// Terminal.
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub terminal: Option<String>,
    /// Gate.
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub gate: Option<String>,
    /// Delay in minutes.
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub delay: Option<String>,
    /// Baggage belt.
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub baggage: Option<String>,
    /// Scheduled time.
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub scheduled: Option<String>,
    /// Scheduled time (alternate spelling).
    #[serde(
        default,
        rename = "scheduledTime",
        deserialize_with = "loose_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub scheduled_time: Option<String>,
    /// Estimated time.
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub estimated: Option<String>,
    /// Estimated time (alternate spelling).
    #[serde(
        default,
        rename = "estimatedTime",
        deserialize_with = "loose_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_time: Option<String>,
    /// Actual time.
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    /// Actual time (alternate spelling).
    #[serde(
        default,
        rename = "actualTime",
        deserialize_with = "loose_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub actual_time: Option<String>,
}

impl Endpoint {
    /// Airport name, if non-empty.
    pub fn airport(&self) -> Option<&str> {
        present(self.airport.as_ref())
    }

    /// IATA airport code, if non-empty.
    pub fn iata(&self) -> Option<&str> {
        present(self.iata.as_ref())
    }

    /// Terminal, if non-empty.
    pub fn terminal(&self) -> Option<&str> {
        present(self.terminal.as_ref())
    }

    /// Gate, if non-empty.
    pub fn gate(&self) -> Option<&str> {
        present(self.gate.as_ref())
    }

    /// Delay in minutes, if non-empty.
    pub fn delay(&self) -> Option<&str> {
        present(self.delay.as_ref())
    }

    /// Baggage belt, if non-empty.
    pub fn baggage(&self) -> Option<&str> {
        present(self.baggage.as_ref())
    }

    /// Raw scheduled timestamp (`scheduled`, then `scheduledTime`).
    pub fn scheduled(&self) -> Option<&str> {
        present(self.scheduled.as_ref()).or_else(|| present(self.scheduled_time.as_ref()))
    }

    /// Raw estimated timestamp (`estimated`, then `estimatedTime`).
    pub fn estimated(&self) -> Option<&str> {
        present(self.estimated.as_ref()).or_else(|| present(self.estimated_time.as_ref()))
    }

    /// Raw actual timestamp (`actual`, then `actualTime`).
    pub fn actual(&self) -> Option<&str> {
        present(self.actual.as_ref()).or_else(|| present(self.actual_time.as_ref()))
    }
}

// ---------------------------------------------------------------------------
// Response envelope
// ---------------------------------------------------------------------------

/// Error object the provider embeds in an otherwise successful response
/// (e.g. an invalid access key).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderError {
    /// Machine-readable code (`invalid_access_key`).
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Human-readable message.
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A decoded provider response.
///
/// A missing or non-array `data` member yields no records; each array
/// element that is not an object becomes an empty record so that the
/// provider's ordering is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlightsResponse {
    /// Records in provider order.
    pub records: Vec<FlightRecord>,
    /// Error object, if the provider sent one.
    pub error: Option<ProviderError>,
}

impl FlightsResponse {
    /// Decode a response from an already-parsed JSON value.
    pub fn from_value(mut value: Value) -> Self {
        let records = match value.get_mut("data").map(Value::take) {
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| serde_json::from_value(item).unwrap_or_default())
                .collect(),
            _ => Vec::new(),
        };

        let error = value
            .get_mut("error")
            .map(Value::take)
            .and_then(|e| serde_json::from_value(e).ok());

        Self { records, error }
    }

    /// Decode a response body. Fails only when the body is not JSON at all.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_slice(bytes)?;
        Ok(Self::from_value(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_record_deserializes() {
        let record: FlightRecord = serde_json::from_value(json!({
            "flight_date": "2024-03-01",
            "flight_status": "scheduled",
            "departure": {
                "airport": "Indira Gandhi International",
                "iata": "DEL",
                "terminal": "3",
                "gate": "12",
                "delay": 15,
                "scheduled": "2024-03-01T09:05:00+00:00"
            },
            "arrival": {
                "airport": "Heathrow",
                "iata": "LHR",
                "baggage": "7",
                "scheduledTime": "2024-03-01T14:30:00+00:00"
            },
            "airline": { "name": "Air India", "iata": "AI" },
            "flight": { "iata": "AI188", "number": "188" }
        }))
        .unwrap();

        assert_eq!(record.airline_name(), Some("Air India"));
        assert_eq!(record.flight_identifier(), Some("AI188"));
        assert_eq!(record.status(), Some(FlightStatus::Scheduled));
        assert_eq!(record.departure().delay(), Some("15"));
        assert_eq!(record.departure().gate(), Some("12"));
        assert_eq!(record.arrival().scheduled(), Some("2024-03-01T14:30:00+00:00"));
        assert_eq!(record.arrival().gate(), None);
    }

    #[test]
    fn empty_strings_are_absent() {
        let record: FlightRecord = serde_json::from_value(json!({
            "flight_status": "",
            "status": "landed",
            "airline": { "name": "" },
            "flight": { "iata": "", "number": "188" },
            "departure": { "scheduled": "", "scheduledTime": "2024-03-01T09:05:00Z" }
        }))
        .unwrap();

        assert_eq!(record.airline_name(), None);
        assert_eq!(record.status_text(), Some("landed"));
        assert_eq!(record.flight_identifier(), Some("188"));
        assert_eq!(record.departure().scheduled(), Some("2024-03-01T09:05:00Z"));
    }

    #[test]
    fn odd_shapes_do_not_fail_the_record() {
        let record: FlightRecord = serde_json::from_value(json!({
            "flight_status": null,
            "departure": "not an object",
            "arrival": null,
            "airline": { "name": ["nested"] },
            "flight": { "number": 188 }
        }))
        .unwrap();

        assert_eq!(record.departure, None);
        assert_eq!(record.departure().airport(), None);
        assert_eq!(record.airline_name(), None);
        assert_eq!(record.flight_number(), Some("188"));
    }

    #[test]
    fn response_without_data_is_empty() {
        let resp = FlightsResponse::from_value(json!({ "pagination": {} }));
        assert!(resp.records.is_empty());

        let resp = FlightsResponse::from_value(json!({ "data": { "not": "a list" } }));
        assert!(resp.records.is_empty());

        let resp = FlightsResponse::from_value(json!([1, 2, 3]));
        assert!(resp.records.is_empty());
    }

    #[test]
    fn response_keeps_provider_order() {
        let resp = FlightsResponse::from_value(json!({
            "data": [
                { "flight": { "iata": "AI188" } },
                42,
                { "flight": { "iata": "AI189" } }
            ]
        }));
        assert_eq!(resp.records.len(), 3);
        assert_eq!(resp.records[0].flight_iata(), Some("AI188"));
        assert_eq!(resp.records[1], FlightRecord::default());
        assert_eq!(resp.records[2].flight_iata(), Some("AI189"));
    }

    #[test]
    fn provider_error_is_captured() {
        let resp = FlightsResponse::from_slice(
            br#"{"error":{"code":"invalid_access_key","message":"You have not supplied a valid API Access Key."}}"#,
        )
        .unwrap();
        assert!(resp.records.is_empty());
        let err = resp.error.unwrap();
        assert_eq!(err.code.as_deref(), Some("invalid_access_key"));
    }

    #[test]
    fn non_json_body_is_an_error() {
        assert!(FlightsResponse::from_slice(b"<html>502</html>").is_err());
    }
}
