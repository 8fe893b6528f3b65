//! Shared helpers for integration tests
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use asmat::services::FmpClient;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// 2024-03-01 14:30:00 UTC
pub const OPEN_TS: i64 = 1_709_303_400;

pub fn client_for(server: &MockServer) -> Arc<FmpClient> {
    Arc::new(FmpClient::with_client(server.uri(), None, reqwest::Client::new()))
}

pub fn quote_json(symbol: &str, price: f64, timestamp: i64) -> Value {
    json!({
        "symbol": symbol,
        "name": symbol,
        "price": price,
        "changesPercentage": 0.0,
        "volume": 1000,
        "timestamp": timestamp
    })
}

pub async fn mock_quotes(server: &MockServer, tickers: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/quote/{}", tickers)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("asmat-it-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}
