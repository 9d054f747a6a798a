//! Database schema definitions
//!
//! The articles table is the stable contract read by downstream tooling
//! (date normalization, topic modeling, plotting); its columns must not
//! change shape between releases.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Harvested articles, keyed by post identifier
CREATE TABLE IF NOT EXISTS articles (
    id INTEGER PRIMARY KEY,
    headline TEXT NOT NULL,
    published TEXT NOT NULL,
    category TEXT NOT NULL,
    source TEXT NOT NULL,
    content TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_articles_category ON articles(category);

-- Track harvest runs and their final outcome counts
CREATE TABLE IF NOT EXISTS runs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    started_at TEXT NOT NULL,
    finished_at TEXT,
    config_hash TEXT NOT NULL,
    status TEXT NOT NULL,
    done INTEGER NOT NULL DEFAULT 0,
    skipped INTEGER NOT NULL DEFAULT 0,
    failed INTEGER NOT NULL DEFAULT 0
);
"#;

/// Initializes the database schema
///
/// Safe to call more than once; every statement is `IF NOT EXISTS`.
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
