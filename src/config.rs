//! Runtime configuration loaded once at startup.
//!
//! Nothing below the binaries reads the environment directly; everything
//! receives a [`Config`] (or the pieces of it it needs).

use std::path::PathBuf;
use std::time::Duration;

use chrono::FixedOffset;

use crate::errors::ConfigError;

pub const DEFAULT_ALERT_THRESHOLD: f64 = 0.0033;
pub const DEFAULT_FMP_BASE_URL: &str = "https://financialmodelingprep.com/api/v3";
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 15;
pub const DEFAULT_QUOTE_INTERVAL_SECONDS: u64 = 60;

const LOCAL_RECORDS_PATH: &str = "archive/markets_records.json";
const PRODUCTION_RECORDS_PATH: &str = "/home/ec2-user/ASMAT/archive/markets_records.json";
const LOCAL_ARCHIVE_DIR: &str = "archive/data/";
const PRODUCTION_ARCHIVE_DIR: &str = "/home/ec2-user/ASMAT/archive/data/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentMode {
    Local,
    Production,
}

impl DeploymentMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" => Some(Self::Local),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Production => "production",
        }
    }

    fn default_records_path(&self) -> &'static str {
        match self {
            Self::Local => LOCAL_RECORDS_PATH,
            Self::Production => PRODUCTION_RECORDS_PATH,
        }
    }

    fn default_archive_dir(&self) -> &'static str {
        match self {
            Self::Local => LOCAL_ARCHIVE_DIR,
            Self::Production => PRODUCTION_ARCHIVE_DIR,
        }
    }
}

/// A monitored market: `name` keys the persisted record, `ticker` is sent to the quote API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Market {
    pub name: String,
    pub ticker: String,
}

impl Market {
    pub fn new(name: impl Into<String>, ticker: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ticker: ticker.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: DeploymentMode,
    pub records_path: PathBuf,
    pub archive_dir: PathBuf,
    pub api_base_url: String,
    pub api_key: Option<String>,
    pub markets: Vec<Market>,
    pub tickers: Vec<String>,
    pub alert_threshold: f64,
    pub utc_offset: FixedOffset,
    pub request_timeout: Duration,
    pub quote_interval_seconds: u64,
}

impl Config {
    /// Build the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let version = get("VERSION").ok_or(ConfigError::MissingVar("VERSION"))?;
        let mode = DeploymentMode::parse(&version).ok_or_else(|| ConfigError::InvalidVar {
            name: "VERSION",
            reason: format!("expected 'local' or 'production', got '{}'", version),
        })?;

        let records_path = get("RECORDS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(mode.default_records_path()));
        let archive_dir = get("ARCHIVE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(mode.default_archive_dir()));

        let api_base_url = get("FMP_BASE_URL")
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_FMP_BASE_URL.to_string());
        url::Url::parse(&api_base_url).map_err(|e| ConfigError::InvalidVar {
            name: "FMP_BASE_URL",
            reason: e.to_string(),
        })?;

        let markets = get("MARKETS")
            .map(|raw| parse_markets(&raw))
            .transpose()?
            .unwrap_or_default();
        let tickers = get("TICKERS").map(|raw| split_list(&raw)).unwrap_or_default();

        let alert_threshold = match get("ALERT_THRESHOLD") {
            Some(raw) => parse_threshold(&raw)?,
            None => DEFAULT_ALERT_THRESHOLD,
        };

        let offset_hours: i32 = parse_or("MARKET_UTC_OFFSET_HOURS", get("MARKET_UTC_OFFSET_HOURS"), 0)?;
        let utc_offset =
            FixedOffset::east_opt(offset_hours * 3600).ok_or_else(|| ConfigError::InvalidVar {
                name: "MARKET_UTC_OFFSET_HOURS",
                reason: format!("{} hours is out of range", offset_hours),
            })?;

        let timeout_secs: u64 = parse_or(
            "REQUEST_TIMEOUT_SECONDS",
            get("REQUEST_TIMEOUT_SECONDS"),
            DEFAULT_REQUEST_TIMEOUT_SECONDS,
        )?;
        let quote_interval_seconds: u64 = parse_or(
            "QUOTE_INTERVAL_SECONDS",
            get("QUOTE_INTERVAL_SECONDS"),
            DEFAULT_QUOTE_INTERVAL_SECONDS,
        )?;

        Ok(Self {
            mode,
            records_path,
            archive_dir,
            api_base_url,
            api_key: get("FMP_API_KEY"),
            markets,
            tickers,
            alert_threshold,
            utc_offset,
            request_timeout: Duration::from_secs(timeout_secs),
            quote_interval_seconds,
        })
    }

    /// The quote routine cannot run without at least one market.
    pub fn require_markets(&self) -> Result<&[Market], ConfigError> {
        if self.markets.is_empty() {
            return Err(ConfigError::MissingVar("MARKETS"));
        }
        Ok(&self.markets)
    }

    pub fn require_tickers(&self) -> Result<&[String], ConfigError> {
        if self.tickers.is_empty() {
            return Err(ConfigError::MissingVar("TICKERS"));
        }
        Ok(&self.tickers)
    }
}

/// Environment name used to pick the log format, read before [`Config`] exists.
pub fn get_environment() -> String {
    std::env::var("VERSION").unwrap_or_else(|_| "local".to_string())
}

/// Parse `NAME=TICKER,...`; a bare entry uses the ticker as its own name.
pub fn parse_markets(raw: &str) -> Result<Vec<Market>, ConfigError> {
    split_list(raw)
        .into_iter()
        .map(|entry| match entry.split_once('=') {
            Some((name, ticker)) => {
                let (name, ticker) = (name.trim(), ticker.trim());
                if name.is_empty() || ticker.is_empty() {
                    return Err(ConfigError::InvalidVar {
                        name: "MARKETS",
                        reason: format!("malformed entry '{}'", entry),
                    });
                }
                Ok(Market::new(name, ticker))
            }
            None => Ok(Market::new(entry.as_str(), entry.as_str())),
        })
        .collect()
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_threshold(raw: &str) -> Result<f64, ConfigError> {
    let value: f64 = raw.trim().parse().map_err(|e: std::num::ParseFloatError| {
        ConfigError::InvalidVar {
            name: "ALERT_THRESHOLD",
            reason: e.to_string(),
        }
    })?;
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::InvalidVar {
            name: "ALERT_THRESHOLD",
            reason: format!("must be a positive number, got {}", value),
        });
    }
    Ok(value)
}

fn parse_or<T>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(v) => v.trim().parse().map_err(|e: T::Err| ConfigError::InvalidVar {
            name,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
