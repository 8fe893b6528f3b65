//! ASMAT data gatherer
//!
//! Archives today's minute bars for every configured ticker.

use asmat::config::Config;
use asmat::core::runtime::BarGatherer;
use asmat::logging;
use asmat::services::FmpClient;
use dotenvy::dotenv;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = Config::from_env()?;
    let source = Arc::new(FmpClient::from_config(&config)?);
    let gatherer = BarGatherer::from_config(&config, source)?;

    info!(
        environment = config.mode.as_str(),
        tickers = ?config.tickers,
        date = %gatherer.date(),
        archive = %config.archive_dir.display(),
        "Starting data gathering"
    );

    let written = gatherer.gather().await?;
    info!(files = written.len(), "Data gathering finished");

    Ok(())
}
