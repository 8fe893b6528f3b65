use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Minute bar from the historical chart API.
///
/// Only `date` is interpreted; OHLC and volume fields are carried through
/// verbatim so the archive matches what the API returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinuteBar {
    pub date: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl MinuteBar {
    /// Calendar date component of `date` (`"2024-03-01 15:59:00"` -> `"2024-03-01"`).
    pub fn calendar_date(&self) -> &str {
        self.date.split_whitespace().next().unwrap_or("")
    }
}
