//! Shared data models spanning the monitor layers.

pub mod alert;
pub mod bar;
pub mod quote;
pub mod record;

pub use alert::{Alert, AlertDirection};
pub use bar::MinuteBar;
pub use quote::QuoteObservation;
pub use record::{RecordMap, SymbolRecord};
