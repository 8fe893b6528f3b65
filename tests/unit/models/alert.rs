//! Unit tests for alert formatting

use asmat::models::{Alert, AlertDirection};

fn alert(direction: AlertDirection, change: f64) -> Alert {
    Alert {
        symbol: "NDX".to_string(),
        direction,
        change,
        price: 18_000.0,
        timestamp: 1_709_303_400,
    }
}

#[test]
fn test_change_pct_rounds_to_two_decimals() {
    assert_eq!(alert(AlertDirection::Up, 0.004_567).change_pct(), 0.46);
    assert_eq!(alert(AlertDirection::Down, -0.012_341).change_pct(), -1.23);
}

#[test]
fn test_display_format() {
    assert_eq!(alert(AlertDirection::Up, 0.0125).to_string(), "NDX Up 1.25%");
    assert_eq!(alert(AlertDirection::Down, -0.005).to_string(), "NDX Down 0.5%");
}

#[test]
fn test_alert_serializes_direction_name() {
    let json = serde_json::to_value(alert(AlertDirection::Down, -0.005)).unwrap();
    assert_eq!(json["direction"], "Down");
    assert_eq!(json["symbol"], "NDX");
}
