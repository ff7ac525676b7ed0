// Tests for the agent-facing browser tool

use skimmer_core::tool::{
    AgentContext, BROWSER_ENGINE, BrowserAction, BrowserTool, ScrapeLogEntry, ScrapeLogSink,
    SinkError,
};
use skimmer_core::{Browser, BrowserError, ContentKind, ScraperEndpoints};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

#[derive(Default)]
struct RecordingSink {
    entries: Mutex<Vec<ScrapeLogEntry>>,
    fail: bool,
}

impl ScrapeLogSink for RecordingSink {
    fn put_log(&self, entry: &ScrapeLogEntry) -> Result<(), SinkError> {
        self.entries.lock().unwrap().push(entry.clone());
        if self.fail {
            Err(std::io::Error::other("log store offline").into())
        } else {
            Ok(())
        }
    }
}

fn public_tool(server: &MockServer, data_dir: &Path) -> BrowserTool {
    BrowserTool::new(Browser::new(ScraperEndpoints::new("", server.uri()), data_dir, 1))
}

async fn markdown_scraper() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/markdown"))
        .respond_with(ResponseTemplate::new(200).set_body_string("# Title\n".repeat(20)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/screenshot"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    server
}

fn agent() -> AgentContext {
    AgentContext {
        parent_agent: "primary".to_string(),
        current_agent: "searcher".to_string(),
    }
}

#[test]
fn test_browser_action_deserializes() {
    let action: BrowserAction =
        serde_json::from_str(r#"{"url": "https://example.com", "action": "links"}"#).unwrap();
    assert_eq!(action.url, "https://example.com");
    assert_eq!(action.action, ContentKind::Links);
}

#[test]
fn test_unknown_action_is_rejected() {
    let result: Result<BrowserAction, _> =
        serde_json::from_str(r#"{"url": "https://example.com", "action": "pdf"}"#);
    assert!(result.is_err());
}

#[test]
fn test_tool_availability_follows_browser() {
    let data_dir = TempDir::new().unwrap();
    let unconfigured =
        BrowserTool::new(Browser::new(ScraperEndpoints::default(), data_dir.path(), 1));
    assert!(!unconfigured.is_available());

    let configured = BrowserTool::new(Browser::new(
        ScraperEndpoints::new("http://scraper-prv:8080", ""),
        data_dir.path(),
        1,
    ));
    assert!(configured.is_available());
}

#[tokio::test]
async fn test_handle_runs_action_and_logs() {
    let server = markdown_scraper().await;
    let data_dir = TempDir::new().unwrap();
    let sink = Arc::new(RecordingSink::default());
    let tool = public_tool(&server, data_dir.path())
        .with_task(Some(10), Some(20))
        .with_log_sink(sink.clone());

    let result = tool
        .handle(r#"{"url": "https://example.com", "action": "markdown"}"#, Some(&agent()))
        .await
        .unwrap();

    assert!(result.content.starts_with("# Title"));
    assert_eq!(result.screenshot, None);

    let entries = sink.entries.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].engine, BROWSER_ENGINE);
    assert_eq!(entries[0].query, "https://example.com");
    assert_eq!(entries[0].result, result.content);
    assert_eq!(entries[0].parent_agent, "primary");
    assert_eq!(entries[0].current_agent, "searcher");
    assert_eq!(entries[0].task_id, Some(10));
    assert_eq!(entries[0].subtask_id, Some(20));
}

#[tokio::test]
async fn test_handle_without_agent_context_does_not_log() {
    let server = markdown_scraper().await;
    let data_dir = TempDir::new().unwrap();
    let sink = Arc::new(RecordingSink::default());
    let tool = public_tool(&server, data_dir.path()).with_log_sink(sink.clone());

    tool.handle(r#"{"url": "https://example.com", "action": "markdown"}"#, None)
        .await
        .unwrap();

    assert!(sink.entries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_sink_failure_does_not_fail_call() {
    let server = markdown_scraper().await;
    let data_dir = TempDir::new().unwrap();
    let sink = Arc::new(RecordingSink {
        fail: true,
        ..RecordingSink::default()
    });
    let tool = public_tool(&server, data_dir.path()).with_log_sink(sink.clone());

    let result = tool
        .handle(r#"{"url": "https://example.com", "action": "markdown"}"#, Some(&agent()))
        .await;

    assert!(result.is_ok());
    assert_eq!(sink.entries.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_failed_scrape_is_not_logged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let data_dir = TempDir::new().unwrap();
    let sink = Arc::new(RecordingSink::default());
    let tool = public_tool(&server, data_dir.path()).with_log_sink(sink.clone());

    let err = tool
        .handle(r#"{"url": "https://example.com", "action": "html"}"#, Some(&agent()))
        .await
        .unwrap_err();

    assert!(matches!(err, BrowserError::Fetch(_)));
    assert!(sink.entries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_bad_arguments() {
    let data_dir = TempDir::new().unwrap();
    let tool = BrowserTool::new(Browser::new(
        ScraperEndpoints::new("", "http://scraper-pub:8080"),
        data_dir.path(),
        1,
    ));

    let err = tool.handle("{not json", None).await.unwrap_err();
    assert!(matches!(err, BrowserError::InvalidAction { .. }));
    assert!(err.to_string().contains("browser"));
}
