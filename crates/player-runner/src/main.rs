//! Errant Dreams Player Runner - composition root binary
//!
//! The terminal driver lives in the library half of this crate.

use anyhow::Context;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use errant_player_adapters::ClientConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "errant_player=debug,errant_player_runner=debug,errant_player_app=debug,errant_player_adapters=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Errant Dreams character creation");

    let config = ClientConfig::from_env().context("Failed to load configuration")?;
    tracing::info!(
        backend = %config.backend_url,
        timeout_ms = config.request_timeout.as_millis() as u64,
        session_file = ?config.session_file,
        "Configuration loaded"
    );

    let deps = errant_player_runner::wire(&config)?;
    errant_player_runner::run(deps, BufReader::new(tokio::io::stdin()), std::io::stdout()).await
}
