//! Aggregate outcome counts for a harvest run

use crate::state::{ItemStatus, SkipReason};

/// Terminal outcome counts across all workers for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Articles fetched, extracted, and persisted to both sinks
    pub done: u64,

    /// Identifiers the origin answered with 404
    pub skipped_not_found: u64,

    /// Pages with no headline or no usable body text
    pub skipped_no_content: u64,

    /// Retries exhausted or persistence errors
    pub failed: u64,
}

impl RunSummary {
    /// Records one terminal status
    ///
    /// Panics in debug builds if the status is not terminal; workers only
    /// record outcomes after an item has finished.
    pub fn record(&mut self, status: ItemStatus) {
        match status {
            ItemStatus::Done => self.done += 1,
            ItemStatus::Skipped(SkipReason::NotFound) => self.skipped_not_found += 1,
            ItemStatus::Skipped(SkipReason::NoContent) => self.skipped_no_content += 1,
            ItemStatus::Failed => self.failed += 1,
            ItemStatus::Pending | ItemStatus::InProgress => {
                debug_assert!(false, "non-terminal status recorded");
            }
        }
    }

    /// Merges another worker's counts into this one
    pub fn merge(&mut self, other: &RunSummary) {
        self.done += other.done;
        self.skipped_not_found += other.skipped_not_found;
        self.skipped_no_content += other.skipped_no_content;
        self.failed += other.failed;
    }

    /// Total skipped items regardless of reason
    pub fn skipped(&self) -> u64 {
        self.skipped_not_found + self.skipped_no_content
    }

    /// Total items that reached a terminal status
    pub fn total(&self) -> u64 {
        self.done + self.skipped() + self.failed
    }
}
