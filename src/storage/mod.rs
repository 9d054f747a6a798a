//! Storage module for persisting harvested articles
//!
//! This module handles all database operations for the harvester:
//! - SQLite database initialization and schema management
//! - Article row upserts keyed by identifier
//! - Run tracking with final outcome counts

mod schema;
mod sqlite;
mod traits;

pub use schema::initialize_schema;
pub use sqlite::ArticleStore;
pub use traits::{ArticleStorage, StorageError, StorageResult};

use crate::extractor::ArticleContent;
use crate::state::RunSummary;

/// One extracted article, ready for persistence
///
/// Immutable once written; the identifier is the primary key in the
/// articles table and a record is only ever created with non-empty content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    pub id: i64,
    pub headline: String,
    pub published: String,
    pub category: String,
    pub source: String,
    pub content: String,
}

impl ArticleRecord {
    pub fn new(id: i64, content: ArticleContent) -> Self {
        Self {
            id,
            headline: content.headline,
            published: content.published,
            category: content.category,
            source: content.source,
            content: content.body,
        }
    }
}

/// Represents a harvest run
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub id: i64,
    pub started_at: String,
    pub finished_at: Option<String>,
    pub config_hash: String,
    pub status: RunStatus,
    pub summary: RunSummary,
}

/// Status of a harvest run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Running,
    Completed,
}

impl RunStatus {
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "running" => Some(Self::Running),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}
