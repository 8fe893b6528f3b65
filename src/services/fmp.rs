//! Financial Modeling Prep REST client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::errors::SourceError;
use crate::models::{MinuteBar, QuoteObservation};
use crate::services::market_data::{HistoricalBarSource, QuoteSource};

pub struct FmpClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl FmpClient {
    pub fn from_config(config: &Config) -> Result<Self, SourceError> {
        Self::with_base_url(
            &config.api_base_url,
            config.api_key.clone(),
            config.request_timeout,
        )
    }

    pub fn with_base_url(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Network(e.to_string()))?;
        Ok(Self::with_client(base_url, api_key, client))
    }

    /// Use a pre-built `reqwest::Client` (tests point this at a mock server).
    pub fn with_client(base_url: impl Into<String>, api_key: Option<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            client,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, SourceError> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, path))
            .map_err(|e| SourceError::BadResponse(format!("invalid request url: {}", e)))?;
        if let Some(key) = &self.api_key {
            url.query_pairs_mut().append_pair("apikey", key);
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, SourceError> {
        debug!(path = %url.path(), "GET");
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::BadResponse(format!("HTTP {}", status)));
        }

        resp.json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))
    }
}

#[async_trait]
impl QuoteSource for FmpClient {
    async fn fetch_quotes(&self, tickers: &[String]) -> Result<Vec<QuoteObservation>, SourceError> {
        let url = self.endpoint(&format!("quote/{}", tickers.join(",")))?;
        let quotes: Vec<QuoteObservation> = self.get_json(url).await?;

        if quotes.len() != tickers.len() {
            return Err(SourceError::BadResponse(format!(
                "expected {} quotes, got {}",
                tickers.len(),
                quotes.len()
            )));
        }

        debug!(count = quotes.len(), "fetched quotes");
        Ok(quotes)
    }
}

#[async_trait]
impl HistoricalBarSource for FmpClient {
    async fn fetch_minute_bars(&self, ticker: &str) -> Result<Vec<MinuteBar>, SourceError> {
        let url = self.endpoint(&format!("historical-chart/1min/{}", ticker))?;
        let bars: Vec<MinuteBar> = self.get_json(url).await?;
        debug!(ticker = %ticker, count = bars.len(), "fetched minute bars");
        Ok(bars)
    }
}
