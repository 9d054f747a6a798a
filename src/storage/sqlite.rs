//! SQLite storage implementation
//!
//! The store keeps only the database path; every operation opens a
//! short-lived connection and closes it on return, so no worker ever
//! holds a connection across a network wait.

use crate::state::RunSummary;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{ArticleStorage, StorageResult};
use crate::storage::{ArticleRecord, RunRecord, RunStatus};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// SQLite article store
pub struct ArticleStore {
    path: PathBuf,
}

impl ArticleStore {
    /// Opens the database at the given path and initializes the schema
    ///
    /// Schema creation happens once here, before any worker starts; the
    /// statements are idempotent so re-opening an existing database is safe.
    pub fn new(path: &Path) -> StorageResult<Self> {
        let store = Self {
            path: path.to_path_buf(),
        };
        let conn = store.open()?;
        initialize_schema(&conn)?;
        Ok(store)
    }

    fn open(&self) -> Result<Connection, rusqlite::Error> {
        let conn = Connection::open(&self.path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA busy_timeout = 5000;
        ",
        )?;
        Ok(conn)
    }
}

impl ArticleStorage for ArticleStore {
    fn upsert_article(&self, record: &ArticleRecord) -> StorageResult<()> {
        let conn = self.open()?;
        conn.execute(
            "INSERT INTO articles (id, headline, published, category, source, content)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(id) DO UPDATE SET
                 headline = excluded.headline,
                 published = excluded.published,
                 category = excluded.category,
                 source = excluded.source,
                 content = excluded.content",
            params![
                record.id,
                record.headline,
                record.published,
                record.category,
                record.source,
                record.content
            ],
        )?;
        Ok(())
    }

    fn get_article(&self, id: i64) -> StorageResult<Option<ArticleRecord>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(
            "SELECT id, headline, published, category, source, content
             FROM articles WHERE id = ?1",
        )?;

        let article = stmt
            .query_row(params![id], |row| {
                Ok(ArticleRecord {
                    id: row.get(0)?,
                    headline: row.get(1)?,
                    published: row.get(2)?,
                    category: row.get(3)?,
                    source: row.get(4)?,
                    content: row.get(5)?,
                })
            })
            .optional()?;

        Ok(article)
    }

    fn article_exists(&self, id: i64) -> StorageResult<bool> {
        let conn = self.open()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM articles WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn count_articles(&self) -> StorageResult<u64> {
        let conn = self.open()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM articles", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn count_by_category(&self) -> StorageResult<HashMap<String, u64>> {
        let conn = self.open()?;
        let mut stmt =
            conn.prepare("SELECT category, COUNT(*) FROM articles GROUP BY category")?;

        let mut counts = HashMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        for row in rows {
            let (category, count) = row?;
            counts.insert(category, count as u64);
        }

        Ok(counts)
    }

    // ===== Run Management =====

    fn create_run(&self, config_hash: &str) -> StorageResult<i64> {
        let conn = self.open()?;
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO runs (started_at, config_hash, status) VALUES (?1, ?2, ?3)",
            params![now, config_hash, RunStatus::Running.to_db_string()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn complete_run(&self, run_id: i64, summary: &RunSummary) -> StorageResult<()> {
        let conn = self.open()?;
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "UPDATE runs SET status = ?1, finished_at = ?2, done = ?3, skipped = ?4, failed = ?5
             WHERE id = ?6",
            params![
                RunStatus::Completed.to_db_string(),
                now,
                summary.done as i64,
                summary.skipped() as i64,
                summary.failed as i64,
                run_id
            ],
        )?;
        Ok(())
    }

    fn get_latest_run(&self) -> StorageResult<Option<RunRecord>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(
            "SELECT id, started_at, finished_at, config_hash, status, done, skipped, failed
             FROM runs ORDER BY id DESC LIMIT 1",
        )?;

        let run = stmt
            .query_row([], |row| {
                Ok(RunRecord {
                    id: row.get(0)?,
                    started_at: row.get(1)?,
                    finished_at: row.get(2)?,
                    config_hash: row.get(3)?,
                    status: RunStatus::from_db_string(&row.get::<_, String>(4)?)
                        .unwrap_or(RunStatus::Running),
                    summary: RunSummary {
                        done: row.get::<_, i64>(5)? as u64,
                        // Skip reasons are not broken out in the runs table
                        skipped_not_found: row.get::<_, i64>(6)? as u64,
                        skipped_no_content: 0,
                        failed: row.get::<_, i64>(7)? as u64,
                    },
                })
            })
            .optional()?;

        Ok(run)
    }
}
