//! Mock flight-status provider.
//!
//! Serves `GET /v1/flights` with the same query parameters and response
//! envelope as the real provider, backed by a handful of canned flights.
//! Used by the SDK tests and for running the CLI without an API key.
//!
//! | Query                 | Result                                        |
//! |-----------------------|-----------------------------------------------|
//! | wrong `access_key`    | `401` with a provider-style `error` object    |
//! | `flight_iata=XX500`   | `500`                                         |
//! | anything else         | `200` with the matching fixtures in `data`    |

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::info;

/// Path of the flights endpoint.
pub const FLIGHTS_PATH: &str = "/v1/flights";

/// Flight code that always answers with a server error.
pub const FAILING_FLIGHT: &str = "XX500";

const DEFAULT_LIMIT: usize = 100;

#[derive(Clone)]
struct ProviderState {
    access_key: Arc<str>,
}

/// Query string of `GET /v1/flights`.
#[derive(Deserialize, Debug)]
struct FlightsParams {
    access_key: Option<String>,
    limit: Option<usize>,
    flight_iata: Option<String>,
    flight_number: Option<String>,
}

/// Build the provider router, accepting only `access_key`.
pub fn router(access_key: impl Into<String>) -> Router {
    let state = ProviderState {
        access_key: access_key.into().into(),
    };
    Router::new()
        .route(FLIGHTS_PATH, get(flights))
        .with_state(state)
}

/// Serve `app` on an already-bound listener until the task is dropped.
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    axum::serve(listener, app).await
}

/// `GET /v1/flights`
async fn flights(
    State(state): State<ProviderState>,
    Query(params): Query<FlightsParams>,
) -> Response {
    if params.access_key.as_deref() != Some(&*state.access_key) {
        info!("rejected request with invalid access key");
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": {
                    "code": "invalid_access_key",
                    "message": "You have not supplied a valid API Access Key."
                }
            })),
        )
            .into_response();
    }

    if params
        .flight_iata
        .as_deref()
        .is_some_and(|c| c.eq_ignore_ascii_case(FAILING_FLIGHT))
    {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": { "code": "internal_error" } })),
        )
            .into_response();
    }

    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    let data: Vec<Value> = fixtures()
        .into_iter()
        .filter(|f| matches_params(f, &params))
        .take(limit)
        .collect();

    info!(
        flight_iata = params.flight_iata.as_deref().unwrap_or("-"),
        flight_number = params.flight_number.as_deref().unwrap_or("-"),
        count = data.len(),
        "flights served"
    );

    Json(json!({
        "pagination": { "limit": limit, "offset": 0, "count": data.len(), "total": data.len() },
        "data": data,
    }))
    .into_response()
}

fn flight_field<'a>(flight: &'a Value, key: &str) -> &'a str {
    flight["flight"][key].as_str().unwrap_or_default()
}

fn matches_params(flight: &Value, params: &FlightsParams) -> bool {
    if let Some(code) = &params.flight_iata {
        return flight_field(flight, "iata").eq_ignore_ascii_case(code);
    }
    if let Some(number) = &params.flight_number {
        return flight_field(flight, "number") == number.as_str();
    }
    true
}

/// Canned flights, in the order the provider would return them.
pub fn fixtures() -> Vec<Value> {
    vec![
        json!({
            "flight_date": "2024-02-29",
            "flight_status": "landed",
            "departure": {
                "airport": "Indira Gandhi International",
                "timezone": "Asia/Kolkata",
                "iata": "DEL",
                "terminal": "3",
                "gate": "14",
                "delay": 22,
                "scheduled": "2024-02-29T09:05:00+00:00",
                "estimated": "2024-02-29T09:05:00+00:00",
                "actual": "2024-02-29T09:27:00+00:00"
            },
            "arrival": {
                "airport": "Heathrow",
                "timezone": "Europe/London",
                "iata": "LHR",
                "terminal": "2",
                "baggage": "9",
                "scheduled": "2024-02-29T14:30:00+00:00",
                "estimated": "2024-02-29T14:41:00+00:00"
            },
            "airline": { "name": "Air India", "iata": "AI", "icao": "AIC" },
            "flight": { "number": "188", "iata": "AI188", "icao": "AIC188" }
        }),
        json!({
            "flight_date": "2024-03-01",
            "flight_status": "scheduled",
            "departure": {
                "airport": "Indira Gandhi International",
                "timezone": "Asia/Kolkata",
                "iata": "DEL",
                "terminal": "3",
                "gate": null,
                "delay": null,
                "scheduled": "2024-03-01T09:05:00+00:00",
                "estimated": "2024-03-01T09:05:00+00:00"
            },
            "arrival": {
                "airport": "Heathrow",
                "timezone": "Europe/London",
                "iata": "LHR",
                "terminal": "2",
                "baggage": null,
                "scheduled": "2024-03-01T14:30:00+00:00",
                "estimated": null
            },
            "airline": { "name": "Air India", "iata": "AI", "icao": "AIC" },
            "flight": { "number": "188", "iata": "AI188", "icao": "AIC188" }
        }),
        json!({
            "flight_date": "2024-03-01",
            "flight_status": "active",
            "departure": {
                "airport": "Heathrow",
                "timezone": "Europe/London",
                "iata": "LHR",
                "terminal": "5",
                "gate": "A10",
                "delay": 5,
                "scheduled": "2024-03-01T07:20:00+00:00",
                "estimated": "2024-03-01T07:25:00+00:00",
                "actual": "2024-03-01T07:25:00+00:00"
            },
            "arrival": {
                "airport": "Leonardo Da Vinci (Fiumicino)",
                "timezone": "Europe/Rome",
                "iata": "FCO",
                "terminal": "1",
                "gate": "B7",
                "baggage": "4",
                "scheduled": "2024-03-01T10:45:00+00:00",
                "estimated": "2024-03-01T10:50:00+00:00"
            },
            "airline": { "name": "British Airways", "iata": "BA", "icao": "BAW" },
            "flight": { "number": "2490", "iata": "BA2490", "icao": "BAW2490" }
        }),
        json!({
            "flight_date": "2024-03-01",
            "flight_status": "cancelled",
            "departure": {
                "airport": "San Francisco International",
                "timezone": "America/Los_Angeles",
                "iata": "SFO",
                "scheduledTime": "2024-03-01T16:10:00.000",
                "estimatedTime": ""
            },
            "arrival": {
                "airport": "Narita International",
                "timezone": "Asia/Tokyo",
                "iata": "NRT",
                "scheduledTime": "2024-03-02T19:40:00.000"
            },
            "airline": { "name": "United Airlines", "iata": "UA", "icao": "UAL" },
            "flight": { "number": "188", "iata": "UA188", "icao": "UAL188" }
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(iata: Option<&str>, number: Option<&str>) -> FlightsParams {
        FlightsParams {
            access_key: None,
            limit: None,
            flight_iata: iata.map(str::to_string),
            flight_number: number.map(str::to_string),
        }
    }

    fn matching(p: &FlightsParams) -> Vec<String> {
        fixtures()
            .iter()
            .filter(|f| matches_params(f, p))
            .map(|f| f["flight"]["iata"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn filters_by_code() {
        assert_eq!(matching(&params(Some("AI188"), None)), vec!["AI188", "AI188"]);
        assert_eq!(matching(&params(Some("ba2490"), None)), vec!["BA2490"]);
        assert!(matching(&params(Some("ZZ999"), None)).is_empty());
    }

    #[test]
    fn filters_by_number() {
        assert_eq!(
            matching(&params(None, Some("188"))),
            vec!["AI188", "AI188", "UA188"]
        );
    }

    #[test]
    fn no_filter_returns_everything() {
        assert_eq!(matching(&params(None, None)).len(), fixtures().len());
    }
}
