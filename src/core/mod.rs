//! Core application primitives (tick runtime, scheduler)

pub mod runtime;
pub mod scheduler;

pub use runtime::*;
pub use scheduler::*;
