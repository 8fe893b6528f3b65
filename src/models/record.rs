//! Persisted per-symbol price state

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Records keyed by market name, ordered so the persisted file is stable.
pub type RecordMap = BTreeMap<String, SymbolRecord>;

/// Tracked state for one symbol, carried across ticks.
///
/// Field names on disk match the archive files written by earlier deployments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolRecord {
    #[serde(rename = "dayOpen")]
    pub day_open: f64,
    pub price: f64,
    #[serde(rename = "lastAlertPrice")]
    pub last_alert_price: f64,
    #[serde(rename = "last_max")]
    pub last_max: f64,
    #[serde(rename = "last_min")]
    pub last_min: f64,
    /// Epoch seconds of the most recent quote.
    pub timestamp: i64,
    #[serde(rename = "lastAlertTimestamp")]
    pub last_alert_timestamp: i64,
}

impl SymbolRecord {
    /// A record for the first observation of a trading day.
    pub fn opened_at(price: f64, timestamp: i64) -> Self {
        Self {
            day_open: price,
            price,
            last_alert_price: price,
            last_max: price,
            last_min: price,
            timestamp,
            last_alert_timestamp: timestamp,
        }
    }

    /// Collapse every baseline onto `price` after an alert; `day_open` is kept.
    pub fn rebased_at(&self, price: f64, timestamp: i64) -> Self {
        Self {
            day_open: self.day_open,
            ..Self::opened_at(price, timestamp)
        }
    }
}
