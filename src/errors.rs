//! Error types shared across the monitor.

use thiserror::Error;

/// Failure talking to a remote market-data API.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Failure reading or writing persisted symbol records.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("record store at {path} is corrupt: {reason}")]
    Corrupt { path: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {name}: {reason}")]
    InvalidVar { name: &'static str, reason: String },
}

/// Tick-level error. Every variant aborts the current tick.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("quote source unavailable: {0}")]
    SourceUnavailable(#[from] SourceError),

    #[error("record store unusable: {0}")]
    StoreCorrupt(#[from] StoreError),

    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("archive write failed for {path}: {source}")]
    Archive {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
