//! ASMAT market monitor
//!
//! Polls a market-quote API, tracks per-symbol price state across invocations and
//! raises alerts when a price moves past the configured threshold. A second
//! routine archives the current day's minute bars for a list of tickers.

pub mod alerts;
pub mod archive;
pub mod config;
pub mod core;
pub mod errors;
pub mod logging;
pub mod models;
pub mod services;
pub mod store;
