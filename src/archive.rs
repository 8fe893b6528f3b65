//! Daily minute-bar archive.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::errors::MonitorError;
use crate::models::MinuteBar;
use crate::store::json_file::{to_pretty_json, write_atomic};

/// Keep the bars dated `date`, oldest first. The API returns newest first.
pub fn select_bars(raw: Vec<MinuteBar>, date: NaiveDate) -> Vec<MinuteBar> {
    let date = date.format("%Y-%m-%d").to_string();
    raw.into_iter()
        .rev()
        .filter(|bar| bar.calendar_date() == date)
        .collect()
}

/// `{archive_dir}/{ticker}/{ticker}.{YYYY-MM-DD}`
pub fn archive_path(archive_dir: &Path, ticker: &str, date: NaiveDate) -> PathBuf {
    archive_dir
        .join(ticker)
        .join(format!("{}.{}", ticker, date.format("%Y-%m-%d")))
}

/// Write the day's bars for `ticker`, creating the ticker directory if needed.
pub fn write_archive(
    archive_dir: &Path,
    ticker: &str,
    date: NaiveDate,
    bars: &[MinuteBar],
) -> Result<PathBuf, MonitorError> {
    let path = archive_path(archive_dir, ticker, date);
    let archive_err = |source: std::io::Error| MonitorError::Archive {
        path: path.display().to_string(),
        source,
    };

    let bytes = to_pretty_json(&bars)
        .map_err(|e| archive_err(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
    write_atomic(&path, &bytes).map_err(archive_err)?;
    Ok(path)
}
