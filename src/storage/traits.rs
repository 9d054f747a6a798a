//! Storage traits and error types

use crate::state::RunSummary;
use crate::storage::{ArticleRecord, RunRecord};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Article not found: {0}")]
    ArticleNotFound(i64),

    #[error("Run not found: {0}")]
    RunNotFound(i64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for the relational article sink
///
/// Implementations must be safe to call from multiple workers; the
/// reference implementation opens a short-lived connection per call so no
/// connection is ever held across a network wait.
pub trait ArticleStorage {
    /// Inserts an article row, replacing any existing row with the same id
    ///
    /// Re-running over an already-harvested identifier converges to the
    /// latest fetched values rather than failing on the primary key.
    fn upsert_article(&self, record: &ArticleRecord) -> StorageResult<()>;

    /// Fetches an article row by identifier
    fn get_article(&self, id: i64) -> StorageResult<Option<ArticleRecord>>;

    /// Returns true if a row exists for the identifier
    fn article_exists(&self, id: i64) -> StorageResult<bool>;

    /// Counts all article rows
    fn count_articles(&self) -> StorageResult<u64>;

    /// Returns per-category article counts
    fn count_by_category(&self) -> StorageResult<HashMap<String, u64>>;

    // ===== Run Management =====

    /// Creates a new run row and returns its id
    fn create_run(&self, config_hash: &str) -> StorageResult<i64>;

    /// Marks a run completed and records its final counts
    fn complete_run(&self, run_id: i64, summary: &RunSummary) -> StorageResult<()>;

    /// Gets the most recent run
    fn get_latest_run(&self) -> StorageResult<Option<RunRecord>>;
}
