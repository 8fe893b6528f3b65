//! Market data source interfaces.

use async_trait::async_trait;

use crate::errors::SourceError;
use crate::models::{MinuteBar, QuoteObservation};

#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch current quotes; `result[i]` corresponds to `tickers[i]`.
    async fn fetch_quotes(&self, tickers: &[String]) -> Result<Vec<QuoteObservation>, SourceError>;
}

#[async_trait]
pub trait HistoricalBarSource: Send + Sync {
    /// Fetch the full minute-bar history for `ticker`, newest first.
    async fn fetch_minute_bars(&self, ticker: &str) -> Result<Vec<MinuteBar>, SourceError>;
}
