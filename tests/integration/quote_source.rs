//! Integration tests for the FMP REST client

#[path = "test_utils.rs"]
mod test_utils;

use std::time::Duration;

use asmat::errors::SourceError;
use asmat::services::{FmpClient, HistoricalBarSource, QuoteSource};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use test_utils::{client_for, mock_quotes, quote_json, OPEN_TS};

#[tokio::test]
async fn fetch_quotes_preserves_request_order() {
    let server = MockServer::start().await;
    mock_quotes(
        &server,
        "SPY,QQQ",
        json!([quote_json("SPY", 510.5, OPEN_TS), quote_json("QQQ", 440.25, OPEN_TS + 1)]),
    )
    .await;

    let client = client_for(&server);
    let quotes = client
        .fetch_quotes(&["SPY".to_string(), "QQQ".to_string()])
        .await
        .expect("quotes");

    assert_eq!(quotes.len(), 2);
    assert_eq!(quotes[0].symbol.as_deref(), Some("SPY"));
    assert_eq!(quotes[0].price, 510.5);
    assert_eq!(quotes[1].price, 440.25);
    assert_eq!(quotes[1].timestamp, OPEN_TS + 1);
}

#[tokio::test]
async fn fetch_quotes_sends_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quote/AAPL"))
        .and(query_param("apikey", "demo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([quote_json("AAPL", 180.0, OPEN_TS)])))
        .mount(&server)
        .await;

    let client = FmpClient::with_client(server.uri(), Some("demo".to_string()), reqwest::Client::new());
    let quotes = client.fetch_quotes(&["AAPL".to_string()]).await.expect("quotes");
    assert_eq!(quotes[0].price, 180.0);
}

#[tokio::test]
async fn fetch_quotes_rejects_short_response() {
    let server = MockServer::start().await;
    mock_quotes(&server, "AAPL,MSFT", json!([quote_json("AAPL", 180.0, OPEN_TS)])).await;

    let err = client_for(&server)
        .fetch_quotes(&["AAPL".to_string(), "MSFT".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(err, SourceError::BadResponse(_)));
}

#[tokio::test]
async fn fetch_quotes_maps_http_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quote/AAPL"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_quotes(&["AAPL".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(err, SourceError::BadResponse(_)));
}

#[tokio::test]
async fn fetch_quotes_maps_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quote/AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Error Message": "Invalid API KEY."})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_quotes(&["AAPL".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(err, SourceError::Parse(_)));
}

#[tokio::test]
async fn fetch_quotes_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quote/AAPL"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([quote_json("AAPL", 180.0, OPEN_TS)]))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = FmpClient::with_base_url(&server.uri(), None, Duration::from_millis(50)).expect("client");
    let err = client.fetch_quotes(&["AAPL".to_string()]).await.unwrap_err();
    assert!(matches!(err, SourceError::Network(_)));
}

#[tokio::test]
async fn fetch_minute_bars_keeps_extra_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/historical-chart/1min/AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"date": "2024-03-01 09:31:00", "open": 180.1, "low": 180.0, "high": 180.4, "close": 180.3, "volume": 5400},
            {"date": "2024-03-01 09:30:00", "open": 179.9, "low": 179.8, "high": 180.2, "close": 180.1, "volume": 8100}
        ])))
        .mount(&server)
        .await;

    let bars = client_for(&server).fetch_minute_bars("AAPL").await.expect("bars");
    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0].calendar_date(), "2024-03-01");
    assert_eq!(bars[1].fields["volume"], 8100);
}
