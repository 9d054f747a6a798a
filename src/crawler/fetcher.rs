//! HTTP fetching with outcome classification and bounded retry

use crate::config::{RetryConfig, UserAgentConfig};
use crate::Result;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

/// Request timeout for a full article fetch
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection establishment timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of a single fetch attempt
#[derive(Debug)]
pub enum FetchOutcome {
    /// 2xx with a body; the raw HTML
    Content(String),

    /// HTTP 404: the identifier has no article, never retried
    NotFound,

    /// 5xx, 429, or a network/timeout error; worth retrying
    Transient(String),

    /// Any other failure; retrying will not help
    Fatal(String),
}

impl FetchOutcome {
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

/// Builds the shared HTTP client with the configured identity
///
/// The user agent is assembled as `name/version (+url; email)` so origin
/// operators can identify and reach us.
pub fn build_http_client(user_agent: &UserAgentConfig) -> Result<Client> {
    let ua = format!(
        "{}/{} (+{}; {})",
        user_agent.crawler_name,
        user_agent.crawler_version,
        user_agent.contact_url,
        user_agent.contact_email
    );

    let client = Client::builder()
        .user_agent(ua)
        .timeout(REQUEST_TIMEOUT)
        .connect_timeout(CONNECT_TIMEOUT)
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Builds the article URL for an identifier
pub fn article_url(base_url: &str, id: i64) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), id)
}

/// Performs one fetch attempt and classifies the result
pub async fn fetch_article(client: &Client, base_url: &str, id: i64) -> FetchOutcome {
    let url = article_url(base_url, id);
    debug!(id, %url, "fetching article");

    let response = match client.get(&url).send().await {
        Ok(response) => response,
        Err(e) => return classify_request_error(&e),
    };

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return FetchOutcome::NotFound;
    }
    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        return FetchOutcome::Transient(format!("HTTP {}", status));
    }
    if !status.is_success() {
        return FetchOutcome::Fatal(format!("HTTP {}", status));
    }

    match response.text().await {
        Ok(body) => FetchOutcome::Content(body),
        // The connection dropped mid-body; the next attempt may complete
        Err(e) => FetchOutcome::Transient(format!("body read failed: {}", e)),
    }
}

/// Maps a reqwest error to an outcome class
fn classify_request_error(error: &reqwest::Error) -> FetchOutcome {
    if error.is_builder() {
        FetchOutcome::Fatal(error.to_string())
    } else if error.is_timeout() || error.is_connect() || error.is_request() || error.is_body() {
        FetchOutcome::Transient(error.to_string())
    } else {
        FetchOutcome::Fatal(error.to_string())
    }
}

/// Backoff schedule for transient fetch failures
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            base_delay: Duration::from_millis(config.base_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
        }
    }

    /// Delay before the next attempt, after `failures` transient failures
    ///
    /// Doubles from the base per failure and clamps at the ceiling:
    /// with 4s base and 10s cap the schedule is 4s, 8s, 10s, 10s, ...
    pub fn delay_for(&self, failures: u32) -> Duration {
        debug_assert!(failures >= 1);
        let exponent = failures.saturating_sub(1).min(31);
        let delay = self.base_delay.saturating_mul(1u32 << exponent);
        delay.min(self.max_delay)
    }
}

/// Fetches an article, retrying transient failures up to the attempt limit
///
/// Returns the final outcome and the number of attempts used. Only
/// `Transient` triggers another attempt; `NotFound` and `Fatal` return
/// immediately, and a `Transient` on the last attempt is returned as-is
/// for the caller to record as a failure.
pub async fn fetch_with_retry(
    client: &Client,
    base_url: &str,
    id: i64,
    policy: &RetryPolicy,
) -> (FetchOutcome, u32) {
    let mut attempt = 1;
    loop {
        let outcome = fetch_article(client, base_url, id).await;

        if !outcome.is_transient() || attempt >= policy.max_attempts {
            return (outcome, attempt);
        }

        if let FetchOutcome::Transient(reason) = &outcome {
            let delay = policy.delay_for(attempt);
            warn!(
                id,
                attempt,
                delay_ms = delay.as_millis() as u64,
                %reason,
                "transient fetch failure, backing off"
            );
            tokio::time::sleep(delay).await;
        }

        attempt += 1;
    }
}
