//! ASMAT monitor
//!
//! Runs quote-check ticks on a fixed interval until interrupted. Ticks run
//! one after another against the same record store.

use asmat::config::Config;
use asmat::core::runtime::QuoteMonitor;
use asmat::core::scheduler::TickScheduler;
use asmat::logging;
use asmat::services::FmpClient;
use asmat::store::JsonFileStore;
use dotenvy::dotenv;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = Config::from_env()?;
    info!("Starting ASMAT monitor");
    info!(environment = config.mode.as_str(), "Environment");
    info!(
        markets = ?config.markets.iter().map(|m| m.name.as_str()).collect::<Vec<_>>(),
        interval = config.quote_interval_seconds,
        threshold = config.alert_threshold,
        "Quote check: every {} seconds",
        config.quote_interval_seconds
    );

    let source = Arc::new(FmpClient::from_config(&config)?);
    let store = Arc::new(JsonFileStore::new(config.records_path.clone()));
    let monitor = Arc::new(QuoteMonitor::from_config(&config, source, store)?);

    let scheduler = TickScheduler::new(monitor, config.quote_interval_seconds)
        .map_err(|e| format!("Failed to create scheduler: {}", e))?;
    scheduler.start().await;

    info!("Monitor started, waiting for shutdown signal...");
    signal::ctrl_c().await?;
    info!("Shutting down monitor...");
    scheduler.stop().await;
    info!("Monitor stopped");

    Ok(())
}
