//! Mock flight-status provider, for running `flighttrack` without an API key.

use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Structured logging (controlled via RUST_LOG env var).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let port: u16 = std::env::var("MOCK_PROVIDER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(4100);
    let access_key =
        std::env::var("MOCK_PROVIDER_ACCESS_KEY").unwrap_or_else(|_| "mock-key".to_string());

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        address = %addr,
        endpoint = %format!("http://localhost:{port}{}", mock_provider::FLIGHTS_PATH),
        "mock provider listening"
    );
    mock_provider::serve(listener, mock_provider::router(access_key)).await?;
    Ok(())
}
