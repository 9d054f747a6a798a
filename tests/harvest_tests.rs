//! Integration tests for the harvester
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full harvest cycle end-to-end.

use risalah_harvester::config::{
    Config, HarvestConfig, OutputConfig, RetryConfig, SourceConfig, UserAgentConfig,
};
use risalah_harvester::crawler::harvest;
use risalah_harvester::output::bucket_dir;
use risalah_harvester::storage::{ArticleStorage, ArticleStore, RunStatus};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointed at the mock server
///
/// Jitter is zeroed and the rate ceiling is high so tests finish quickly.
fn create_test_config(base_url: &str, start_id: i64, end_id: i64, out: &TempDir) -> Config {
    Config {
        harvest: HarvestConfig {
            start_id,
            end_id,
            workers: 2,
            requests_per_second: 500.0,
            jitter_min_ms: 0,
            jitter_max_ms: 0,
        },
        retry: RetryConfig {
            max_attempts: 3,
            base_delay_ms: 10,
            max_delay_ms: 30,
        },
        source: SourceConfig {
            base_url: format!("{}/post", base_url),
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestHarvester".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        output: OutputConfig {
            articles_dir: out.path().join("articles").to_string_lossy().into_owned(),
            database_path: out.path().join("articles.db").to_string_lossy().into_owned(),
        },
    }
}

/// Builds a complete article page in the expected layout
fn article_html(headline: &str, body: &str) -> String {
    format!(
        r#"<html><body>
        <h1 class="page-post-title">{}</h1>
        <time class="d-flex align-items-center">12 May 2021</time>
        <ol class="breadcrumb">
            <li><a href="/">Home</a></li>
            <li><a href="/news">News</a></li>
        </ol>
        <h4 class="page-post-source">Wire Agency</h4>
        <div class="p-4 bg-white"><p>{}</p></div>
        </body></html>"#,
        headline, body
    )
}

async fn mount_article(server: &MockServer, id: i64, headline: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/post/{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_html(headline, body)))
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, id: i64, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/post/{}", id)))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_harvest_mixed_outcomes() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    // id 1: a normal article
    mount_article(&server, 1, "First article", "Body of the first article.").await;

    // id 2: no article at this identifier
    mount_status(&server, 2, 404).await;

    // id 3: page exists but has no body content
    Mock::given(method("GET"))
        .and(path("/post/3"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body><h1 class="page-post-title">Empty</h1></body></html>"#,
        ))
        .mount(&server)
        .await;

    // id 4: persistent server error, retried then recorded as failed
    mount_status(&server, 4, 500).await;

    let config = create_test_config(&server.uri(), 1, 4, &out);
    let db_path = config.output.database_path.clone();
    let articles_dir = config.output.articles_dir.clone();

    let summary = harvest(config, "testhash".to_string())
        .await
        .expect("harvest failed");

    assert_eq!(summary.done, 1);
    assert_eq!(summary.skipped_not_found, 1);
    assert_eq!(summary.skipped_no_content, 1);
    assert_eq!(summary.failed, 1);

    // Article 1 landed in the bucketed file tree
    let file = std::path::Path::new(&articles_dir)
        .join(bucket_dir(1))
        .join("1_First article.txt");
    let contents = std::fs::read_to_string(&file).expect("article file missing");
    assert!(contents.starts_with("Title: First article\n"));
    assert!(contents.contains("Published: 12 May 2021\n"));
    assert!(contents.contains("Category: News\n"));
    assert!(contents.contains("Source: Wire Agency\n"));
    assert!(contents.ends_with("Body of the first article."));

    // Only article 1 reached the database
    let store = ArticleStore::new(std::path::Path::new(&db_path)).expect("failed to open DB");
    assert_eq!(store.count_articles().unwrap(), 1);
    let record = store.get_article(1).unwrap().expect("row missing");
    assert_eq!(record.headline, "First article");
    assert_eq!(record.category, "News");
    assert!(store.get_article(2).unwrap().is_none());
    assert!(store.get_article(4).unwrap().is_none());

    // The run row was completed with the final counts
    let run = store.get_latest_run().unwrap().expect("run missing");
    assert_eq!(run.status, RunStatus::Completed);
    assert_eq!(run.config_hash, "testhash");
    assert!(run.finished_at.is_some());
    assert_eq!(run.summary.done, 1);
    assert_eq!(run.summary.failed, 1);
}

#[tokio::test]
async fn test_concurrent_harvest_accounts_for_every_identifier() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    // 50 identifiers across 5 workers: 10 not found, 5 succeed after one
    // transient failure, the remaining 35 succeed immediately
    let not_found: &[i64] = &[3, 7, 13, 17, 23, 27, 33, 37, 43, 47];
    let transient: &[i64] = &[5, 15, 25, 35, 45];

    for id in 1..=50i64 {
        if not_found.contains(&id) {
            mount_status(&server, id, 404).await;
            continue;
        }
        if transient.contains(&id) {
            // One failure before the article mock below takes over
            Mock::given(method("GET"))
                .and(path(format!("/post/{}", id)))
                .respond_with(ResponseTemplate::new(500))
                .up_to_n_times(1)
                .mount(&server)
                .await;
        }
        mount_article(
            &server,
            id,
            &format!("Article {}", id),
            &format!("Body of article {}.", id),
        )
        .await;
    }

    let mut config = create_test_config(&server.uri(), 1, 50, &out);
    config.harvest.workers = 5;
    let db_path = config.output.database_path.clone();
    let articles_dir = config.output.articles_dir.clone();

    let summary = harvest(config, "testhash".to_string())
        .await
        .expect("harvest failed");

    // Every seeded identifier reached exactly one terminal status
    assert_eq!(summary.total(), 50);
    assert_eq!(summary.done, 40);
    assert_eq!(summary.skipped_not_found, 10);
    assert_eq!(summary.skipped_no_content, 0);
    assert_eq!(summary.failed, 0);

    // One row and one file per persisted identifier, nothing else
    let store = ArticleStore::new(std::path::Path::new(&db_path)).expect("failed to open DB");
    assert_eq!(store.count_articles().unwrap(), 40);

    let bucket = std::path::Path::new(&articles_dir).join(bucket_dir(1));
    let files: Vec<_> = std::fs::read_dir(&bucket)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(files.len(), 40);

    for id in 1..=50i64 {
        let expected = format!("{}_Article {}.txt", id, id);
        if not_found.contains(&id) {
            assert!(store.get_article(id).unwrap().is_none());
            assert!(!files.contains(&expected));
        } else {
            assert!(store.article_exists(id).unwrap());
            assert_eq!(files.iter().filter(|f| **f == expected).count(), 1);
        }
    }
}

#[tokio::test]
async fn test_transient_failure_then_success() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    // First two attempts fail, third succeeds; first-mounted match wins
    Mock::given(method("GET"))
        .and(path("/post/7"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    mount_article(&server, 7, "Recovered", "Took three tries.").await;

    let config = create_test_config(&server.uri(), 7, 7, &out);
    let db_path = config.output.database_path.clone();

    let summary = harvest(config, "testhash".to_string())
        .await
        .expect("harvest failed");

    assert_eq!(summary.done, 1);
    assert_eq!(summary.failed, 0);

    let store = ArticleStore::new(std::path::Path::new(&db_path)).expect("failed to open DB");
    assert!(store.article_exists(7).unwrap());
}

#[tokio::test]
async fn test_retry_attempts_are_bounded() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    // Exactly max-attempts requests, verified when the server drops
    Mock::given(method("GET"))
        .and(path("/post/9"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), 9, 9, &out);

    let summary = harvest(config, "testhash".to_string())
        .await
        .expect("harvest failed");

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.done, 0);
}

#[tokio::test]
async fn test_not_found_is_not_retried_and_leaves_no_artifacts() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    // A single request, no retries for 404
    Mock::given(method("GET"))
        .and(path("/post/5"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), 5, 5, &out);
    let db_path = config.output.database_path.clone();
    let articles_dir = config.output.articles_dir.clone();

    let summary = harvest(config, "testhash".to_string())
        .await
        .expect("harvest failed");

    assert_eq!(summary.skipped_not_found, 1);
    assert_eq!(summary.done, 0);

    // No bucket directory and no row
    let entries = std::fs::read_dir(&articles_dir).unwrap().count();
    assert_eq!(entries, 0);

    let store = ArticleStore::new(std::path::Path::new(&db_path)).expect("failed to open DB");
    assert_eq!(store.count_articles().unwrap(), 0);
}

#[tokio::test]
async fn test_client_error_is_fatal_without_retry() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    // 403 is not transient: one request, recorded as failed
    Mock::given(method("GET"))
        .and(path("/post/11"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), 11, 11, &out);

    let summary = harvest(config, "testhash".to_string())
        .await
        .expect("harvest failed");

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.skipped_not_found, 0);
}

#[tokio::test]
async fn test_rerun_converges_without_duplicates() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    mount_article(&server, 21, "Stable headline", "Same body both runs.").await;

    let config = create_test_config(&server.uri(), 21, 21, &out);
    let db_path = config.output.database_path.clone();
    let articles_dir = config.output.articles_dir.clone();

    harvest(config.clone(), "testhash".to_string())
        .await
        .expect("first harvest failed");
    harvest(config, "testhash".to_string())
        .await
        .expect("second harvest failed");

    let store = ArticleStore::new(std::path::Path::new(&db_path)).expect("failed to open DB");
    assert_eq!(store.count_articles().unwrap(), 1);

    let bucket = std::path::Path::new(&articles_dir).join(bucket_dir(21));
    assert_eq!(std::fs::read_dir(&bucket).unwrap().count(), 1);
}
