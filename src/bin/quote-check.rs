//! ASMAT quote check
//!
//! Runs a single quote-check tick against the configured markets and prints
//! any alerts. Intended to be invoked periodically by an external scheduler.

use asmat::config::Config;
use asmat::core::runtime::QuoteMonitor;
use asmat::logging;
use asmat::services::FmpClient;
use asmat::store::JsonFileStore;
use dotenvy::dotenv;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = Config::from_env()?;
    info!(
        environment = config.mode.as_str(),
        records = %config.records_path.display(),
        "Starting quote check"
    );

    let source = Arc::new(FmpClient::from_config(&config)?);
    let store = Arc::new(JsonFileStore::new(config.records_path.clone()));
    let monitor = QuoteMonitor::from_config(&config, source, store)?;

    let report = monitor.run_tick().await?;
    for alert in &report.alerts {
        println!("{}", alert);
    }

    Ok(())
}
