//! Persistence for per-symbol records.
//!
//! The store is read once at the start of a tick and replaced wholesale at
//! the end. There is no locking: a single serial caller is assumed.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::errors::StoreError;
use crate::models::{RecordMap, SymbolRecord};

pub trait RecordStore: Send + Sync {
    /// Load every stored record.
    fn load(&self) -> Result<RecordMap, StoreError>;

    /// Replace the stored records with `records`.
    fn put_all(&self, records: &RecordMap) -> Result<(), StoreError>;

    fn get(&self, symbol: &str) -> Result<Option<SymbolRecord>, StoreError> {
        Ok(self.load()?.remove(symbol))
    }
}
