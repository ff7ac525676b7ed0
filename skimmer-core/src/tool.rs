// Agent-facing wrapper around Browser: decodes tool arguments and records
// successful scrapes in a log sink.

use crate::browser::{Browser, Extraction};
use crate::error::{BrowserError, Result};
use serde::{Deserialize, Serialize};
use skimmer_fetch::ContentKind;
use std::sync::Arc;
use tracing::{info, warn};

pub const BROWSER_TOOL_NAME: &str = "browser";
pub const BROWSER_ENGINE: &str = "browser";

/// Arguments an agent sends to the browser tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserAction {
    pub url: String,
    pub action: ContentKind,
}

/// Agent roles attached to a call, when the caller knows them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentContext {
    pub parent_agent: String,
    pub current_agent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeLogEntry {
    pub parent_agent: String,
    pub current_agent: String,
    pub engine: String,
    pub query: String,
    pub result: String,
    pub task_id: Option<i64>,
    pub subtask_id: Option<i64>,
}

/// Whatever a log store fails with
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Persistence for completed scrapes. Implementations live outside this crate.
pub trait ScrapeLogSink: Send + Sync {
    fn put_log(&self, entry: &ScrapeLogEntry) -> std::result::Result<(), SinkError>;
}

pub struct BrowserTool {
    browser: Browser,
    task_id: Option<i64>,
    subtask_id: Option<i64>,
    log_sink: Option<Arc<dyn ScrapeLogSink>>,
}

impl BrowserTool {
    pub fn new(browser: Browser) -> Self {
        Self {
            browser,
            task_id: None,
            subtask_id: None,
            log_sink: None,
        }
    }

    pub fn with_task(mut self, task_id: Option<i64>, subtask_id: Option<i64>) -> Self {
        self.task_id = task_id;
        self.subtask_id = subtask_id;
        self
    }

    pub fn with_log_sink(mut self, sink: Arc<dyn ScrapeLogSink>) -> Self {
        self.log_sink = Some(sink);
        self
    }

    pub fn is_available(&self) -> bool {
        self.browser.is_available()
    }

    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Run the action described by `args` (JSON). The scrape is logged only
    /// when both a sink and an agent context are present.
    pub async fn handle(&self, args: &str, agent: Option<&AgentContext>) -> Result<Extraction> {
        let action: BrowserAction =
            serde_json::from_str(args).map_err(|source| BrowserError::InvalidAction {
                tool: BROWSER_TOOL_NAME.to_string(),
                source,
            })?;

        info!("Browser tool: {} {}", action.action, action.url);
        let extraction = self.browser.extract(&action.url, action.action).await?;

        if let (Some(sink), Some(agent)) = (&self.log_sink, agent) {
            let entry = ScrapeLogEntry {
                parent_agent: agent.parent_agent.clone(),
                current_agent: agent.current_agent.clone(),
                engine: BROWSER_ENGINE.to_string(),
                query: action.url.clone(),
                result: extraction.content.clone(),
                task_id: self.task_id,
                subtask_id: self.subtask_id,
            };
            if let Err(e) = sink.put_log(&entry) {
                warn!("Failed to record scrape of {}: {}", action.url, e);
            }
        }

        Ok(extraction)
    }
}
