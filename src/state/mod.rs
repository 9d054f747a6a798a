//! Work item state tracking
//!
//! This module defines the per-item state machine and the aggregate
//! counts reported at the end of a run.

mod item;
mod summary;

pub use item::{ItemStatus, SkipReason, WorkItem};
pub use summary::RunSummary;
