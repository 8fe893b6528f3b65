//! Alert output model

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertDirection {
    Up,
    Down,
}

impl fmt::Display for AlertDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertDirection::Up => write!(f, "Up"),
            AlertDirection::Down => write!(f, "Down"),
        }
    }
}

/// A price move that crossed the alert threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub symbol: String,
    pub direction: AlertDirection,
    /// Signed fractional change relative to the day open (0.0034 == 0.34%).
    pub change: f64,
    pub price: f64,
    pub timestamp: i64,
}

impl Alert {
    /// Signed change as a percentage, rounded to 2 decimals.
    pub fn change_pct(&self) -> f64 {
        (self.change * 100.0 * 100.0).round() / 100.0
    }

    /// Unsigned percentage shown in the alert text; the direction carries the sign.
    pub fn magnitude_pct(&self) -> f64 {
        self.change_pct().abs()
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}%", self.symbol, self.direction, self.magnitude_pct())
    }
}
