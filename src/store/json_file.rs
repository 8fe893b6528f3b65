//! JSON file record store

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::debug;

use super::RecordStore;
use crate::errors::StoreError;
use crate::models::RecordMap;

/// Serialize `value` as JSON indented with four spaces.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}

/// Write `bytes` to a sibling temp file and rename it over `path`.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);

    let mut file = fs::File::create(&tmp)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    drop(file);
    fs::rename(&tmp, path)
}

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

impl RecordStore for JsonFileStore {
    fn load(&self) -> Result<RecordMap, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.display_path(), "record store not found, starting empty");
                return Ok(RecordMap::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.display_path(),
                    source,
                })
            }
        };

        serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
            path: self.display_path(),
            reason: e.to_string(),
        })
    }

    fn put_all(&self, records: &RecordMap) -> Result<(), StoreError> {
        let bytes = to_pretty_json(records).map_err(|e| StoreError::Corrupt {
            path: self.display_path(),
            reason: e.to_string(),
        })?;
        write_atomic(&self.path, &bytes).map_err(|source| StoreError::Io {
            path: self.display_path(),
            source,
        })?;
        debug!(path = %self.display_path(), count = records.len(), "records written");
        Ok(())
    }
}
