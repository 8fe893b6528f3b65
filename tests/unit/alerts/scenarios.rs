//! Tick-by-tick market scenarios

use asmat::alerts::{AlertEngine, Transition};
use asmat::models::{AlertDirection, QuoteObservation, SymbolRecord};

const OPEN_TS: i64 = 1_709_303_400;

fn opening() -> SymbolRecord {
    SymbolRecord::opened_at(100.0, OPEN_TS)
}

#[test]
fn test_rise_past_threshold_fires_up_alert() {
    let engine = AlertEngine::default();
    let update = engine.next_state("SPX", Some(&opening()), &QuoteObservation::new(100.34, OPEN_TS + 60));

    let alert = update.alert().expect("up alert");
    assert_eq!(alert.direction, AlertDirection::Up);
    assert_eq!(alert.change_pct(), 0.34);
    assert_eq!(alert.to_string(), "SPX Up 0.34%");

    let r = &update.record;
    assert_eq!(r.last_alert_price, 100.34);
    assert_eq!(r.last_max, 100.34);
    assert_eq!(r.last_min, 100.34);
    assert_eq!(r.price, 100.34);
}

#[test]
fn test_drop_past_threshold_fires_down_alert() {
    let engine = AlertEngine::default();
    let update = engine.next_state("SPX", Some(&opening()), &QuoteObservation::new(99.66, OPEN_TS + 60));

    let alert = update.alert().expect("down alert");
    assert_eq!(alert.direction, AlertDirection::Down);
    assert_eq!(alert.change_pct(), -0.34);
    assert_eq!(alert.to_string(), "SPX Down 0.34%");
    assert_eq!(update.record.last_alert_price, 99.66);
    assert_eq!(update.record.last_max, 99.66);
    assert_eq!(update.record.last_min, 99.66);
}

#[test]
fn test_small_drift_only_updates_extrema() {
    let engine = AlertEngine::default();
    let update = engine.next_state("SPX", Some(&opening()), &QuoteObservation::new(100.1, OPEN_TS + 60));

    assert_eq!(update.transition, Transition::Updated);
    assert_eq!(update.record.price, 100.1);
    assert_eq!(update.record.last_max, 100.1);
    assert_eq!(update.record.last_min, 100.0);
    assert_eq!(update.record.last_alert_price, 100.0);
    assert_eq!(update.record.timestamp, OPEN_TS + 60);
    assert_eq!(update.record.last_alert_timestamp, OPEN_TS);
}

#[test]
fn test_reversal_after_peak_fires_down_from_max() {
    // Climb without crossing the threshold, then fall back: the drop from the
    // peak triggers even though the price is still near the last alert.
    let engine = AlertEngine::default();
    let mut record = opening();
    let mut alerts = Vec::new();

    for (i, price) in [100.1, 100.2, 100.3, 99.95].iter().enumerate() {
        let update = engine.next_state(
            "SPX",
            Some(&record),
            &QuoteObservation::new(*price, OPEN_TS + 60 * (i as i64 + 1)),
        );
        if let Some(alert) = update.alert() {
            alerts.push(alert.clone());
        }
        record = update.record;
    }

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].direction, AlertDirection::Down);
    assert_eq!(alerts[0].change_pct(), -0.35);
    assert_eq!(record.last_alert_price, 99.95);
}

#[test]
fn test_consecutive_alerts_measure_from_new_baseline() {
    let engine = AlertEngine::default();
    let first = engine.next_state("SPX", Some(&opening()), &QuoteObservation::new(100.4, OPEN_TS + 60));
    assert!(first.alert().is_some());

    // +0.2 from the new baseline is below the threshold
    let second = engine.next_state("SPX", Some(&first.record), &QuoteObservation::new(100.6, OPEN_TS + 120));
    assert_eq!(second.transition, Transition::Updated);

    let third = engine.next_state("SPX", Some(&second.record), &QuoteObservation::new(100.8, OPEN_TS + 180));
    let alert = third.alert().expect("second up alert");
    assert_eq!(alert.direction, AlertDirection::Up);
    assert_eq!(alert.change_pct(), 0.4);
}
