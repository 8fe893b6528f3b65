//! Price alert evaluation.

pub mod engine;

pub use engine::{trading_date, AlertEngine, MarketUpdate, TickOutcome, Transition};
