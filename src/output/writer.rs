//! Dual-sink persistence for extracted articles

use crate::output::files::FileSink;
use crate::storage::{ArticleRecord, ArticleStorage, ArticleStore};
use crate::{HarvestError, Result};
use std::path::PathBuf;

/// Writes each record to the bucketed file tree and the articles table
///
/// The two writes are not transactionally coupled: a crash between them
/// can leave the file present without the row. Both sinks are idempotent
/// (rename-over for the file, upsert for the row), so re-running the same
/// identifier converges instead of failing.
pub struct PersistenceWriter {
    files: FileSink,
    store: ArticleStore,
}

impl PersistenceWriter {
    pub fn new(files: FileSink, store: ArticleStore) -> Self {
        Self { files, store }
    }

    /// Persists one record to both sinks, returning the file path
    pub fn persist(&self, record: &ArticleRecord) -> Result<PathBuf> {
        let path = self.files.write(record).map_err(HarvestError::Io)?;
        self.store.upsert_article(record)?;
        Ok(path)
    }

    pub fn store(&self) -> &ArticleStore {
        &self.store
    }
}
