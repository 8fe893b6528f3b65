//! Remote market data collaborators.

pub mod fmp;
pub mod market_data;

pub use fmp::FmpClient;
pub use market_data::{HistoricalBarSource, QuoteSource};
