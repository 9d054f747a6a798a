//! Work item status definitions
//!
//! Every seeded identifier moves through exactly one path of the state
//! machine `Pending -> InProgress -> {Done | Skipped | Failed}` and never
//! re-enters `Pending`.

use std::fmt;

/// Why an item was skipped rather than persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The origin returned HTTP 404 for this identifier
    NotFound,

    /// The page exists but had no headline or no usable body text
    NoContent,
}

/// Status of a single work item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemStatus {
    /// Seeded but not yet dequeued by any worker
    Pending,

    /// Dequeued; owned by exactly one worker
    InProgress,

    /// Fetched, extracted, and persisted to both sinks
    Done,

    /// Nothing to persist (not found at origin, or no usable content)
    Skipped(SkipReason),

    /// Retries exhausted or a persistence error occurred
    Failed,
}

impl ItemStatus {
    /// Returns true if this status ends processing for the item
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending | Self::InProgress)
    }

    /// Returns true if the item produced a persisted record
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Done => "done",
            Self::Skipped(SkipReason::NotFound) => "skipped_not_found",
            Self::Skipped(SkipReason::NoContent) => "skipped_no_content",
            Self::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// One identifier to be fetched, with its current status
///
/// A work item is created at seed time and owned by whichever worker
/// dequeued its identifier; ownership never moves between workers.
#[derive(Debug, Clone, Copy)]
pub struct WorkItem {
    pub id: i64,
    pub status: ItemStatus,
}

impl WorkItem {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            status: ItemStatus::Pending,
        }
    }

    /// Marks the item as dequeued by a worker
    pub fn begin(&mut self) {
        debug_assert!(matches!(self.status, ItemStatus::Pending));
        self.status = ItemStatus::InProgress;
    }

    /// Records the terminal status for this item
    pub fn finish(&mut self, status: ItemStatus) {
        debug_assert!(status.is_terminal());
        debug_assert!(!self.status.is_terminal());
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminality() {
        assert!(!ItemStatus::Pending.is_terminal());
        assert!(!ItemStatus::InProgress.is_terminal());

        assert!(ItemStatus::Done.is_terminal());
        assert!(ItemStatus::Skipped(SkipReason::NotFound).is_terminal());
        assert!(ItemStatus::Skipped(SkipReason::NoContent).is_terminal());
        assert!(ItemStatus::Failed.is_terminal());
    }

    #[test]
    fn test_is_success() {
        assert!(ItemStatus::Done.is_success());

        assert!(!ItemStatus::Pending.is_success());
        assert!(!ItemStatus::Skipped(SkipReason::NotFound).is_success());
        assert!(!ItemStatus::Failed.is_success());
    }

    #[test]
    fn test_work_item_lifecycle() {
        let mut item = WorkItem::new(42);
        assert_eq!(item.status, ItemStatus::Pending);

        item.begin();
        assert_eq!(item.status, ItemStatus::InProgress);

        item.finish(ItemStatus::Done);
        assert!(item.status.is_terminal());
        assert!(item.status.is_success());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ItemStatus::Done), "done");
        assert_eq!(
            format!("{}", ItemStatus::Skipped(SkipReason::NotFound)),
            "skipped_not_found"
        );
        assert_eq!(
            format!("{}", ItemStatus::Skipped(SkipReason::NoContent)),
            "skipped_no_content"
        );
        assert_eq!(format!("{}", ItemStatus::Failed), "failed");
    }
}
