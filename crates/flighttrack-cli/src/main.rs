mod app_state;
mod tui;
mod ui;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use flighttrack_sdk::{DisplayState, FlightStatusClient, FlightTracker, ProviderConfig};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppController;
use crate::tui::EventHandler;
use crate::ui::tracker::TrackerApp;

#[derive(Parser, Debug)]
#[command(name = "flighttrack")]
#[command(author, version, about = "Look up the status of a flight", long_about = None)]
pub struct Cli {
    /// Provider endpoint (overrides FLIGHTTRACK_API_BASE)
    #[arg(long)]
    pub api_base: Option<String>,

    /// Provider access key (overrides FLIGHTTRACK_ACCESS_KEY)
    #[arg(long)]
    pub access_key: Option<String>,

    /// Per-request timeout in seconds (overrides FLIGHTTRACK_TIMEOUT_SECS)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up one flight and print its card
    Track {
        /// Flight code or number (ex: AI188, 188)
        query: String,

        /// Print the card as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactive search form
    Tui,
}

/// Flags win over environment variables.
fn provider_config(cli: &Cli) -> Result<ProviderConfig, flighttrack_sdk::SdkError> {
    ProviderConfig::from_vars(|key| {
        let flag = match key {
            "FLIGHTTRACK_API_BASE" => cli.api_base.clone(),
            "FLIGHTTRACK_ACCESS_KEY" => cli.access_key.clone(),
            "FLIGHTTRACK_TIMEOUT_SECS" => cli.timeout_secs.map(|s| s.to_string()),
            _ => None,
        };
        flag.or_else(|| std::env::var(key).ok())
    })
}

fn init_logging(default_directive: &str) {
    // Stdout belongs to the card (or the TUI), so logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .init();
}

async fn run_track(client: &FlightStatusClient, query: &str, json: bool) -> anyhow::Result<()> {
    let mut tracker = FlightTracker::new();
    match tracker.track(client, query).await {
        DisplayState::Result(_) => {}
        DisplayState::Error(msg) => bail!("{msg}"),
        state => bail!("search ended in unexpected state {state:?}"),
    }

    let Some(card) = tracker.card() else {
        bail!("no flight to display");
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&card)?);
    } else {
        println!("{card}");
    }
    Ok(())
}

async fn run_tui(client: FlightStatusClient) -> anyhow::Result<()> {
    let mut terminal = tui::init().context("failed to initialise terminal")?;
    let mut events = EventHandler::new(250);
    let mut app = TrackerApp::new(client, events.get_sender());

    let result = async {
        while !app.should_quit() {
            terminal.draw(|f| app.render(f))?;
            match events.next_async().await {
                Some(action) => app.update(action),
                None => break,
            }
        }
        anyhow::Ok(())
    }
    .await;

    tui::restore().context("failed to restore terminal")?;
    result
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(match cli.command {
        Commands::Track { .. } => "warn",
        Commands::Tui => "off",
    });

    let config = provider_config(&cli)?;
    let client = FlightStatusClient::new(config)?;

    match cli.command {
        Commands::Track { query, json } => run_track(&client, &query, json).await,
        Commands::Tui => run_tui(client).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_environment() {
        let cli = Cli::parse_from([
            "flighttrack",
            "--access-key",
            "from-flag",
            "--timeout-secs",
            "3",
            "track",
            "AI188",
        ]);
        let config = provider_config(&cli).unwrap();
        assert_eq!(config.access_key(), "from-flag");
        assert_eq!(config.timeout(), std::time::Duration::from_secs(3));
    }

    #[test]
    fn track_parses_json_flag() {
        let cli = Cli::parse_from(["flighttrack", "track", "188", "--json"]);
        match cli.command {
            Commands::Track { query, json } => {
                assert_eq!(query, "188");
                assert!(json);
            }
            Commands::Tui => panic!("expected track"),
        }
    }
}
