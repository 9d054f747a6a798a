//! Bucketed article file sink
//!
//! Files land in `<root>/<bucket_lo>-<bucket_hi>/<id>_<prefix>.txt` with a
//! fixed header block followed by the body. Buckets are 10000 ids wide and
//! the headline prefix is truncated and sanitized for the filesystem.

use crate::storage::ArticleRecord;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Bucket width for grouping article files by identifier
const BUCKET_WIDTH: i64 = 10_000;

/// Maximum number of headline characters used in the file name
const HEADLINE_PREFIX_CHARS: usize = 50;

/// Returns the bucket directory name for an identifier
///
/// Identifier 273293 lands in `270000-279999`.
pub fn bucket_dir(id: i64) -> String {
    let lo = id / BUCKET_WIDTH * BUCKET_WIDTH;
    format!("{}-{}", lo, lo + BUCKET_WIDTH - 1)
}

/// Builds the file name for an article: `<id>_<sanitized headline prefix>.txt`
pub fn article_file_name(id: i64, headline: &str) -> String {
    format!("{}_{}.txt", id, sanitize_headline(headline))
}

/// Truncates the headline and replaces path-unsafe characters with `-`
///
/// Truncation counts characters, not bytes, so multi-byte scripts are
/// never split mid-character.
fn sanitize_headline(headline: &str) -> String {
    headline
        .chars()
        .take(HEADLINE_PREFIX_CHARS)
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0' => '-',
            other => other,
        })
        .collect()
}

/// Writes article files into the bucketed directory tree
pub struct FileSink {
    root: PathBuf,
}

impl FileSink {
    /// Creates a sink rooted at the given directory, creating it if absent
    ///
    /// Failure here is a configuration error and aborts the run before
    /// any worker starts.
    pub fn new(root: &Path) -> io::Result<Self> {
        fs::create_dir_all(root)?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Writes one article file and returns its final path
    ///
    /// The content goes to a temporary sibling first and is renamed into
    /// place, so a crash mid-write never leaves a partial file at the
    /// final path. An existing file for the same identifier is replaced.
    pub fn write(&self, record: &ArticleRecord) -> io::Result<PathBuf> {
        let dir = self.root.join(bucket_dir(record.id));
        fs::create_dir_all(&dir)?;

        let path = dir.join(article_file_name(record.id, &record.headline));
        let tmp_path = dir.join(format!(".{}.tmp", record.id));

        fs::write(&tmp_path, format_article(record))?;
        fs::rename(&tmp_path, &path)?;

        Ok(path)
    }
}

/// Formats the header block and body for one article file
fn format_article(record: &ArticleRecord) -> String {
    format!(
        "Title: {}\nPublished: {}\nCategory: {}\nSource: {}\n\n{}",
        record.headline, record.published, record.category, record.source, record.content
    )
}
