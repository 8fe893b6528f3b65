//! Price-alert state machine.
//!
//! For each symbol the engine compares a fresh quote against the stored record
//! and decides, in order: new trading day, upward alert, downward alert, or a
//! plain update of the tracked extrema. All changes are measured as a fraction
//! of the day-open price.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use tracing::{debug, info};

use crate::config::{Market, DEFAULT_ALERT_THRESHOLD};
use crate::models::{Alert, AlertDirection, QuoteObservation, RecordMap, SymbolRecord};

/// What happened to a symbol on one tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// First observation of a new trading day; every baseline reset to the open.
    DayOpen,
    Alert(Alert),
    /// No alert; price and extrema updated.
    Updated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketUpdate {
    pub record: SymbolRecord,
    pub transition: Transition,
}

impl MarketUpdate {
    pub fn alert(&self) -> Option<&Alert> {
        match &self.transition {
            Transition::Alert(alert) => Some(alert),
            _ => None,
        }
    }
}

/// Result of evaluating a whole quote batch.
#[derive(Debug, Clone, Default)]
pub struct TickOutcome {
    pub records: RecordMap,
    pub alerts: Vec<Alert>,
}

/// Calendar date of an epoch-seconds timestamp in the reference timezone.
pub fn trading_date(timestamp: i64, offset: &FixedOffset) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp, 0).map(|utc| utc.with_timezone(offset).date_naive())
}

#[derive(Debug, Clone)]
pub struct AlertEngine {
    threshold: f64,
    offset: FixedOffset,
}

impl Default for AlertEngine {
    fn default() -> Self {
        Self::new(DEFAULT_ALERT_THRESHOLD, Utc.fix())
    }
}

impl AlertEngine {
    pub fn new(threshold: f64, offset: FixedOffset) -> Self {
        Self { threshold, offset }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    fn same_trading_day(&self, a: i64, b: i64) -> bool {
        match (trading_date(a, &self.offset), trading_date(b, &self.offset)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Compute the next record for `symbol` and at most one alert.
    ///
    /// A missing prior record is handled as the start of a new trading day.
    /// `day_open` must be positive; a zero open makes every ratio undefined.
    pub fn next_state(
        &self,
        symbol: &str,
        prior: Option<&SymbolRecord>,
        quote: &QuoteObservation,
    ) -> MarketUpdate {
        let (new_price, ts) = (quote.price, quote.timestamp);

        let prior = match prior {
            Some(p) if self.same_trading_day(quote.timestamp, p.timestamp) => p,
            _ => {
                return MarketUpdate {
                    record: SymbolRecord::opened_at(new_price, ts),
                    transition: Transition::DayOpen,
                };
            }
        };

        let change_from_last_alert = (new_price - prior.last_alert_price) / prior.day_open;
        let change_from_last_max = (new_price - prior.last_max) / prior.day_open;
        let change_from_last_min = (new_price - prior.last_min) / prior.day_open;

        if change_from_last_alert >= self.threshold || change_from_last_min >= self.threshold {
            return self.fire(
                symbol,
                prior,
                quote,
                AlertDirection::Up,
                change_from_last_alert.min(change_from_last_min),
            );
        }

        if change_from_last_alert <= -self.threshold || change_from_last_max <= -self.threshold {
            return self.fire(
                symbol,
                prior,
                quote,
                AlertDirection::Down,
                change_from_last_alert.min(change_from_last_max),
            );
        }

        MarketUpdate {
            record: SymbolRecord {
                price: new_price,
                last_max: prior.last_max.max(new_price),
                last_min: prior.last_min.min(new_price),
                timestamp: ts,
                ..prior.clone()
            },
            transition: Transition::Updated,
        }
    }

    fn fire(
        &self,
        symbol: &str,
        prior: &SymbolRecord,
        quote: &QuoteObservation,
        direction: AlertDirection,
        change: f64,
    ) -> MarketUpdate {
        MarketUpdate {
            record: prior.rebased_at(quote.price, quote.timestamp),
            transition: Transition::Alert(Alert {
                symbol: symbol.to_string(),
                direction,
                change,
                price: quote.price,
                timestamp: quote.timestamp,
            }),
        }
    }

    /// Evaluate one quote batch against the stored records.
    ///
    /// `quotes[i]` belongs to `markets[i]`. Records for markets outside the
    /// batch are carried over unchanged.
    pub fn evaluate_batch(
        &self,
        markets: &[Market],
        quotes: &[QuoteObservation],
        mut records: RecordMap,
    ) -> TickOutcome {
        let mut alerts = Vec::new();

        for (market, quote) in markets.iter().zip(quotes) {
            let update = self.next_state(&market.name, records.get(&market.name), quote);

            match &update.transition {
                Transition::DayOpen => {
                    info!(symbol = %market.name, price = quote.price, "{} open price recorded", market.name);
                }
                Transition::Alert(alert) => {
                    info!(
                        symbol = %alert.symbol,
                        direction = %alert.direction,
                        change_pct = alert.change_pct(),
                        price = alert.price,
                        "{}",
                        alert
                    );
                    alerts.push(alert.clone());
                }
                Transition::Updated => {
                    debug!(
                        symbol = %market.name,
                        price = quote.price,
                        last_max = update.record.last_max,
                        last_min = update.record.last_min,
                        "price updated for {}",
                        market.name
                    );
                }
            }

            records.insert(market.name.clone(), update.record);
        }

        TickOutcome { records, alerts }
    }
}
