//! Statistics over a harvested archive, for the `--stats` mode

use crate::storage::{ArticleStorage, ArticleStore, RunRecord};
use crate::Result;
use std::collections::HashMap;
use std::path::Path;

/// Snapshot of the archive contents and the most recent run
#[derive(Debug)]
pub struct HarvestStatistics {
    pub total_articles: u64,
    pub by_category: HashMap<String, u64>,
    pub latest_run: Option<RunRecord>,
}

/// Loads statistics from an existing harvest database
pub fn load_statistics(database_path: &Path) -> Result<HarvestStatistics> {
    let store = ArticleStore::new(database_path)?;

    Ok(HarvestStatistics {
        total_articles: store.count_articles()?,
        by_category: store.count_by_category()?,
        latest_run: store.get_latest_run()?,
    })
}

/// Prints statistics in a human-readable format
pub fn print_statistics(stats: &HarvestStatistics) {
    println!("Harvest Statistics");
    println!("==================");
    println!("Total articles: {}", stats.total_articles);

    if !stats.by_category.is_empty() {
        println!("\nArticles by category:");
        let mut categories: Vec<_> = stats.by_category.iter().collect();
        categories.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (category, count) in categories {
            println!("  {:<30} {}", category, count);
        }
    }

    if let Some(run) = &stats.latest_run {
        println!("\nLatest run:");
        println!("  Started:  {}", run.started_at);
        match &run.finished_at {
            Some(finished) => println!("  Finished: {}", finished),
            None => println!("  Finished: (still running or interrupted)"),
        }
        println!("  Status:   {}", run.status.to_db_string());
        println!("  Done:     {}", run.summary.done);
        println!("  Skipped:  {}", run.summary.skipped());
        println!("  Failed:   {}", run.summary.failed);
    }
}
