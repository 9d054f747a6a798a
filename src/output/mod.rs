//! Output module for the file sink and statistics reports
//!
//! This module handles:
//! - Writing article files into the bucketed directory tree
//! - Combining the file sink and the database into one persistence step
//! - Loading and printing statistics for the `--stats` mode

mod files;
pub mod stats;
mod writer;

pub use files::{article_file_name, bucket_dir, FileSink};
pub use stats::{load_statistics, print_statistics, HarvestStatistics};
pub use writer::PersistenceWriter;
