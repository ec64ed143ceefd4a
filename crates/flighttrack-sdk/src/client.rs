//! HTTP client for the flight-status provider.
//!
//! [`FlightStatusClient`] turns a [`SearchQuery`] into a provider request,
//! sends it, and decodes the answer. It never retries and never caches:
//! every call hits the provider.
//!
//! # Typical usage
//!
//! ```rust,no_run
//! use flighttrack_sdk::{FlightStatusClient, ProviderConfig};
//!
//! # async fn run() -> Result<(), flighttrack_sdk::SdkError> {
//! let config = ProviderConfig::from_env()?;
//! let client = FlightStatusClient::new(config)?;
//!
//! let record = client.search("AI188").await?;
//! println!("{}", flighttrack_models::format_card(&record));
//! # Ok(())
//! # }
//! ```

use flighttrack_models::{select_best, FlightRecord, FlightsResponse, SearchQuery, RESULT_LIMIT};
use reqwest::Url;
use tracing::{debug, info, warn};

use crate::config::ProviderConfig;
use crate::error::SdkError;

const ACCESS_KEY_PARAM: &str = "access_key";
const LIMIT_PARAM: &str = "limit";

/// A configured connection to the flight-status provider.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct FlightStatusClient {
    http: reqwest::Client,
    config: ProviderConfig,
}

impl FlightStatusClient {
    /// Create a client for the given provider.
    pub fn new(config: ProviderConfig) -> Result<Self, SdkError> {
        Url::parse(config.base_url())
            .map_err(|e| SdkError::Config(format!("invalid API base URL: {e}")))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self { http, config })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Query parameters for a search, access key included.
    pub fn query_params(&self, query: &SearchQuery) -> Vec<(&'static str, String)> {
        let (name, value) = query.param();
        vec![
            (ACCESS_KEY_PARAM, self.config.access_key().to_string()),
            (LIMIT_PARAM, RESULT_LIMIT.to_string()),
            (name, value.to_string()),
        ]
    }

    /// Build (but do not send) the provider request for a search.
    pub fn build_request(&self, query: &SearchQuery) -> Result<reqwest::Request, SdkError> {
        let request = self
            .http
            .get(self.config.base_url())
            .query(&self.query_params(query))
            .build()?;
        Ok(request)
    }

    /// Send a search and return every record, in provider order.
    ///
    /// A response without a usable `data` list yields an empty vector.
    pub async fn fetch(&self, query: &SearchQuery) -> Result<Vec<FlightRecord>, SdkError> {
        let request = self.build_request(query)?;
        debug!(url = %redacted(request.url()), "requesting flights");

        // Transport errors carry the URL, and with it the access key.
        let res = self
            .http
            .execute(request)
            .await
            .map_err(reqwest::Error::without_url)?;
        let status = res.status();
        if !status.is_success() {
            warn!(query = %query, status = status.as_u16(), "provider returned an error status");
            return Err(SdkError::HttpStatus(status.as_u16()));
        }

        let body = res.bytes().await.map_err(reqwest::Error::without_url)?;
        let response = FlightsResponse::from_slice(&body)?;

        if let Some(err) = &response.error {
            warn!(
                query = %query,
                code = err.code.as_deref().unwrap_or("-"),
                message = err.message.as_deref().unwrap_or("-"),
                "provider returned an error payload"
            );
        }

        info!(query = %query, count = response.records.len(), "flights received");
        Ok(response.records)
    }

    /// Validate raw input, fetch, and select the record to display.
    pub async fn search(&self, raw: &str) -> Result<FlightRecord, SdkError> {
        let query = SearchQuery::parse(raw)?;
        info!(query = %query, code = query.is_code(), "searching");

        let records = self.fetch(&query).await?;
        Ok(select_best(&records)?.clone())
    }
}

/// Copy of `url` with the access key masked, for logging.
fn redacted(url: &Url) -> Url {
    let mut url = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == ACCESS_KEY_PARAM {
                "***".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    url.query_pairs_mut().clear().extend_pairs(pairs);
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{client_for, spawn_provider, ACCESS_KEY};

    fn params(request: &reqwest::Request) -> Vec<(String, String)> {
        request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    fn offline_client() -> FlightStatusClient {
        let config = ProviderConfig::new("http://provider.test/v1/flights", "k3y").unwrap();
        FlightStatusClient::new(config).unwrap()
    }

    #[test]
    fn code_query_request() {
        let client = offline_client();
        let query = SearchQuery::parse(" ai188 ").unwrap();
        let request = client.build_request(&query).unwrap();

        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(request.url().path(), "/v1/flights");
        assert_eq!(
            params(&request),
            vec![
                ("access_key".to_string(), "k3y".to_string()),
                ("limit".to_string(), "30".to_string()),
                ("flight_iata".to_string(), "AI188".to_string()),
            ]
        );
    }

    #[test]
    fn number_query_request() {
        let client = offline_client();
        let query = SearchQuery::parse(" 188 ").unwrap();
        let params = params(&client.build_request(&query).unwrap());

        assert!(params.contains(&("flight_number".to_string(), "188".to_string())));
        assert!(!params.iter().any(|(k, _)| k == "flight_iata"));
    }

    #[test]
    fn invalid_base_url_is_a_config_error() {
        let config = ProviderConfig::new("not a url", "k3y").unwrap();
        let err = FlightStatusClient::new(config).unwrap_err();
        assert!(matches!(err, SdkError::Config(_)));
    }

    #[test]
    fn redaction_masks_only_the_key() {
        let client = offline_client();
        let query = SearchQuery::parse("AI188").unwrap();
        let request = client.build_request(&query).unwrap();
        let masked = redacted(request.url()).to_string();
        assert!(!masked.contains("k3y"));
        assert!(masked.contains("flight_iata=AI188"));
    }

    #[tokio::test]
    async fn fetch_returns_records_in_provider_order() {
        let client = client_for(&spawn_provider().await);
        let query = SearchQuery::parse("AI188").unwrap();
        let records = client.fetch(&query).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].status_text(), Some("landed"));
        assert_eq!(records[1].status_text(), Some("scheduled"));
    }

    #[tokio::test]
    async fn search_picks_the_trackable_record() {
        let client = client_for(&spawn_provider().await);
        let record = client.search("ai188").await.unwrap();
        assert_eq!(record.flight_iata(), Some("AI188"));
        assert_eq!(record.status_text(), Some("scheduled"));
    }

    #[tokio::test]
    async fn number_search_hits_the_number_filter() {
        let client = client_for(&spawn_provider().await);
        let records = client
            .fetch(&SearchQuery::parse("2490").unwrap())
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].flight_iata(), Some("BA2490"));
    }

    #[tokio::test]
    async fn unknown_flight_has_no_results() {
        let client = client_for(&spawn_provider().await);
        let err = client.search("ZZ999").await.unwrap_err();
        assert!(matches!(err, SdkError::NoResults));
        assert_eq!(err.user_message(), "No flights found");
    }

    #[tokio::test]
    async fn empty_query_is_rejected_before_any_request() {
        // Unroutable endpoint: any request would fail as a transport error.
        let config = ProviderConfig::new("http://127.0.0.1:9/v1/flights", ACCESS_KEY).unwrap();
        let client = FlightStatusClient::new(config).unwrap();
        let err = client.search("   ").await.unwrap_err();
        assert!(matches!(err, SdkError::InvalidQuery(_)));
    }

    #[tokio::test]
    async fn wrong_key_is_an_http_status_error() {
        let base = spawn_provider().await;
        let config = ProviderConfig::new(base, "wrong").unwrap();
        let client = FlightStatusClient::new(config).unwrap();

        let err = client.search("AI188").await.unwrap_err();
        assert!(matches!(err, SdkError::HttpStatus(401)));
        assert_eq!(err.user_message(), "HTTP 401");
    }

    #[tokio::test]
    async fn server_error_is_an_http_status_error() {
        let client = client_for(&spawn_provider().await);
        let err = client.search("XX500").await.unwrap_err();
        assert!(matches!(err, SdkError::HttpStatus(500)));
    }

    #[tokio::test]
    async fn unreachable_provider_is_a_transport_error() {
        let config = ProviderConfig::new("http://127.0.0.1:9/v1/flights", ACCESS_KEY).unwrap();
        let client = FlightStatusClient::new(config).unwrap();
        let err = client.search("AI188").await.unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Transport);
        assert!(!err.user_message().is_empty());
        assert!(!err.user_message().contains(ACCESS_KEY));
    }
}
