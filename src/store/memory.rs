use std::sync::RwLock;

use super::RecordStore;
use crate::errors::StoreError;
use crate::models::RecordMap;

/// In-process store, for tests and embedding.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<RecordMap>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: RecordMap) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    fn poisoned() -> StoreError {
        StoreError::Corrupt {
            path: "<memory>".to_string(),
            reason: "lock poisoned".to_string(),
        }
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> Result<RecordMap, StoreError> {
        self.records
            .read()
            .map(|r| r.clone())
            .map_err(|_| Self::poisoned())
    }

    fn put_all(&self, records: &RecordMap) -> Result<(), StoreError> {
        let mut guard = self.records.write().map_err(|_| Self::poisoned())?;
        *guard = records.clone();
        Ok(())
    }
}
