//! Run coordination and the worker loop

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_with_retry, FetchOutcome, RetryPolicy};
use crate::crawler::limiter::RateLimiter;
use crate::crawler::queue::WorkQueue;
use crate::extractor::{ArticleExtractor, RisalahExtractor};
use crate::output::{FileSink, PersistenceWriter};
use crate::state::{ItemStatus, RunSummary, SkipReason, WorkItem};
use crate::storage::{ArticleRecord, ArticleStorage, ArticleStore};
use crate::{ConfigError, HarvestError, Result};
use rand::Rng;
use reqwest::Client;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// Everything a worker needs, shared behind one Arc
struct WorkerContext {
    client: Client,
    queue: WorkQueue,
    limiter: RateLimiter,
    writer: PersistenceWriter,
    extractor: RisalahExtractor,
    retry: RetryPolicy,
    base_url: String,
    jitter_min_ms: u64,
    jitter_max_ms: u64,
}

/// Coordinates a harvest run: seeds the queue, spawns the workers, and
/// records the run in the database
pub struct Coordinator {
    config: Config,
    config_hash: String,
    context: Arc<WorkerContext>,
}

impl Coordinator {
    /// Prepares all shared resources for a run
    ///
    /// Any failure here (output directory, database, HTTP client) is
    /// fatal before a single request is sent.
    pub fn new(config: Config, config_hash: String) -> Result<Self> {
        let articles_dir = Path::new(&config.output.articles_dir);
        let files = FileSink::new(articles_dir).map_err(|source| {
            HarvestError::Config(ConfigError::OutputDir {
                path: config.output.articles_dir.clone(),
                source,
            })
        })?;

        let store = ArticleStore::new(Path::new(&config.output.database_path))?;
        let client = build_http_client(&config.user_agent)?;

        let context = Arc::new(WorkerContext {
            client,
            queue: WorkQueue::seed(config.harvest.start_id, config.harvest.end_id),
            limiter: RateLimiter::new(config.harvest.min_request_interval()),
            writer: PersistenceWriter::new(files, store),
            extractor: RisalahExtractor::new(),
            retry: RetryPolicy::from_config(&config.retry),
            base_url: config.source.base_url.clone(),
            jitter_min_ms: config.harvest.jitter_min_ms,
            jitter_max_ms: config.harvest.jitter_max_ms,
        });

        Ok(Self {
            config,
            config_hash,
            context,
        })
    }

    /// Runs the harvest to completion and returns the merged summary
    pub async fn run(&self) -> Result<RunSummary> {
        let run_id = self.context.writer.store().create_run(&self.config_hash)?;

        info!(
            run_id,
            start_id = self.config.harvest.start_id,
            end_id = self.config.harvest.end_id,
            total = self.config.harvest.range_len(),
            workers = self.config.harvest.workers,
            "starting harvest run"
        );

        let mut workers = JoinSet::new();
        for worker_id in 0..self.config.harvest.workers {
            let context = Arc::clone(&self.context);
            workers.spawn(async move { worker_loop(worker_id, context).await });
        }

        let mut summary = RunSummary::default();
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(worker_summary) => summary.merge(&worker_summary),
                // A panicked worker loses its counts but the run goes on
                Err(e) => error!("worker task failed: {}", e),
            }
        }

        self.context.writer.store().complete_run(run_id, &summary)?;

        info!(
            run_id,
            done = summary.done,
            skipped = summary.skipped(),
            failed = summary.failed,
            "harvest run complete"
        );

        Ok(summary)
    }
}

/// Pulls identifiers off the queue until it drains
///
/// Every error past startup is isolated to its item: the item is recorded
/// as failed and the loop continues. Each worker keeps its own summary so
/// no counter lock is contended on the hot path.
async fn worker_loop(worker_id: u32, context: Arc<WorkerContext>) -> RunSummary {
    let mut summary = RunSummary::default();
    debug!(worker_id, "worker started");

    while let Some(id) = context.queue.dequeue() {
        let mut item = WorkItem::new(id);
        item.begin();

        let status = process_item(&context, id).await;
        item.finish(status);
        summary.record(status);

        courtesy_pause(&context).await;
    }

    debug!(worker_id, "worker finished, queue drained");
    summary
}

/// Fetches, extracts, and persists one identifier, returning its terminal
/// status
async fn process_item(context: &WorkerContext, id: i64) -> ItemStatus {
    context.limiter.acquire().await;

    let (outcome, attempts) =
        fetch_with_retry(&context.client, &context.base_url, id, &context.retry).await;

    let html = match outcome {
        FetchOutcome::Content(html) => html,
        FetchOutcome::NotFound => {
            debug!(id, "article not found");
            return ItemStatus::Skipped(SkipReason::NotFound);
        }
        FetchOutcome::Transient(reason) => {
            warn!(id, attempts, %reason, "retries exhausted");
            return ItemStatus::Failed;
        }
        FetchOutcome::Fatal(reason) => {
            warn!(id, %reason, "fetch failed");
            return ItemStatus::Failed;
        }
    };

    let content = match context.extractor.extract(&html) {
        Some(content) => content,
        None => {
            debug!(id, "page has no usable content");
            return ItemStatus::Skipped(SkipReason::NoContent);
        }
    };

    let record = ArticleRecord::new(id, content);
    match context.writer.persist(&record) {
        Ok(path) => {
            info!(id, path = %path.display(), "article persisted");
            ItemStatus::Done
        }
        Err(e) => {
            error!(id, "persistence failed: {}", e);
            ItemStatus::Failed
        }
    }
}

/// Sleeps a random courtesy interval between items
async fn courtesy_pause(context: &WorkerContext) {
    if context.jitter_max_ms == 0 {
        return;
    }

    // thread_rng is not Send; sample before the await
    let pause = {
        let mut rng = rand::thread_rng();
        Duration::from_millis(rng.gen_range(context.jitter_min_ms..=context.jitter_max_ms))
    };
    tokio::time::sleep(pause).await;
}
