//! One-shot routines: a quote-check tick and a daily archive run.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{FixedOffset, NaiveDate, Utc};
use tracing::{info, warn};

use crate::alerts::AlertEngine;
use crate::archive;
use crate::config::{Config, Market};
use crate::errors::MonitorError;
use crate::models::{Alert, QuoteObservation};
use crate::services::market_data::{HistoricalBarSource, QuoteSource};
use crate::store::RecordStore;

/// What one tick produced.
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub alerts: Vec<Alert>,
    pub quotes: Vec<QuoteObservation>,
}

/// Runs quote-check ticks: fetch, load, evaluate, save.
pub struct QuoteMonitor {
    markets: Vec<Market>,
    engine: AlertEngine,
    source: Arc<dyn QuoteSource>,
    store: Arc<dyn RecordStore>,
}

impl QuoteMonitor {
    pub fn new(
        markets: Vec<Market>,
        engine: AlertEngine,
        source: Arc<dyn QuoteSource>,
        store: Arc<dyn RecordStore>,
    ) -> Self {
        Self {
            markets,
            engine,
            source,
            store,
        }
    }

    pub fn from_config(
        config: &Config,
        source: Arc<dyn QuoteSource>,
        store: Arc<dyn RecordStore>,
    ) -> Result<Self, MonitorError> {
        let markets = config.require_markets()?.to_vec();
        let engine = AlertEngine::new(config.alert_threshold, config.utc_offset);
        Ok(Self::new(markets, engine, source, store))
    }

    pub fn markets(&self) -> &[Market] {
        &self.markets
    }

    /// Run one tick. On any error nothing is written.
    pub async fn run_tick(&self) -> Result<TickReport, MonitorError> {
        let tickers: Vec<String> = self.markets.iter().map(|m| m.ticker.clone()).collect();
        let quotes = self.source.fetch_quotes(&tickers).await?;

        let records = self.store.load()?;
        let outcome = self.engine.evaluate_batch(&self.markets, &quotes, records);
        self.store.put_all(&outcome.records)?;

        if !outcome.alerts.is_empty() {
            info!(alerts = outcome.alerts.len(), "tick produced {} alert(s)", outcome.alerts.len());
        }

        Ok(TickReport {
            alerts: outcome.alerts,
            quotes,
        })
    }
}

/// Archives today's minute bars for each ticker.
pub struct BarGatherer {
    tickers: Vec<String>,
    archive_dir: PathBuf,
    source: Arc<dyn HistoricalBarSource>,
    date: NaiveDate,
}

impl BarGatherer {
    /// `date` is the day whose bars are kept.
    pub fn new(
        tickers: Vec<String>,
        archive_dir: PathBuf,
        source: Arc<dyn HistoricalBarSource>,
        date: NaiveDate,
    ) -> Self {
        Self {
            tickers,
            archive_dir,
            source,
            date,
        }
    }

    pub fn from_config(
        config: &Config,
        source: Arc<dyn HistoricalBarSource>,
    ) -> Result<Self, MonitorError> {
        Ok(Self::new(
            config.require_tickers()?.to_vec(),
            config.archive_dir.clone(),
            source,
            today(&config.utc_offset),
        ))
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Fetch, filter and write every ticker in order; the first failure aborts.
    pub async fn gather(&self) -> Result<Vec<PathBuf>, MonitorError> {
        let mut written = Vec::with_capacity(self.tickers.len());

        for ticker in &self.tickers {
            let raw = self.source.fetch_minute_bars(ticker).await?;
            let bars = archive::select_bars(raw, self.date);
            if bars.is_empty() {
                warn!(ticker = %ticker, date = %self.date, "no bars for {} on {}", ticker, self.date);
            }

            let path = archive::write_archive(&self.archive_dir, ticker, self.date, &bars)?;
            info!(
                ticker = %ticker,
                date = %self.date,
                bars = bars.len(),
                path = %path.display(),
                "{} {} data recorded",
                ticker,
                self.date
            );
            written.push(path);
        }

        Ok(written)
    }
}

/// Today's calendar date in the reference timezone.
pub fn today(offset: &FixedOffset) -> NaiveDate {
    Utc::now().with_timezone(offset).date_naive()
}
