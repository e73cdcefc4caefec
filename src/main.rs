//! Analytics Collector - Binary Entry Point
//!
//! Serves the ingestion and query API over an in-memory event log.
//! Configure with `HOST` / `PORT`, log verbosity with `RUST_LOG`.

use std::sync::Arc;

use choice_analytics::api::{serve, AppState};
use choice_analytics::{CollectorResult, ServerConfig};

#[tokio::main]
async fn main() -> CollectorResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!(version = choice_analytics::VERSION, "Starting {}", choice_analytics::NAME);

    let state = Arc::new(AppState::in_memory());
    serve(&config, state).await?;

    Ok(())
}
