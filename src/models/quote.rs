use serde::{Deserialize, Serialize};

/// One quote as returned by the quote API. Extra fields in the payload are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteObservation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    pub price: f64,
    /// Epoch seconds.
    pub timestamp: i64,
}

impl QuoteObservation {
    pub fn new(price: f64, timestamp: i64) -> Self {
        Self {
            symbol: None,
            price,
            timestamp,
        }
    }
}
