//! Crawling engine: queue, rate limiting, fetching, and coordination
//!
//! The engine seeds one shared queue with the configured identifier range,
//! spawns the configured number of workers, and lets each worker pull
//! identifiers until the queue drains. A single rate limiter gates every
//! request regardless of worker, and transient fetch failures are retried
//! with exponential backoff before an item is recorded as failed.

mod coordinator;
mod fetcher;
mod limiter;
mod queue;

pub use coordinator::Coordinator;
pub use fetcher::{
    article_url, build_http_client, fetch_article, fetch_with_retry, FetchOutcome, RetryPolicy,
};
pub use limiter::RateLimiter;
pub use queue::WorkQueue;

use crate::config::Config;
use crate::state::RunSummary;
use crate::Result;

/// Runs a full harvest with the given configuration
pub async fn harvest(config: Config, config_hash: String) -> Result<RunSummary> {
    let coordinator = Coordinator::new(config, config_hash)?;
    coordinator.run().await
}
