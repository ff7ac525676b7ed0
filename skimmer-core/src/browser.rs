use crate::config::BrowserConfig;
use crate::error::Result;
use crate::resolve::ScraperEndpoints;
use serde::{Deserialize, Serialize};
use skimmer_fetch::kind::SizeThresholds;
use skimmer_fetch::screenshot::screenshot_dir;
use skimmer_fetch::{ContentFetcher, ContentKind, ScreenshotFetcher, TransportConfig};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use url::Url;

/// Outcome of a successful extraction. The screenshot is advisory and
/// absent whenever capturing it failed for any reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub content: String,
    pub screenshot: Option<String>,
}

impl Extraction {
    /// Screenshot file name, or "" when there is none
    pub fn screenshot_name(&self) -> &str {
        self.screenshot.as_deref().unwrap_or("")
    }
}

/// Routes page extraction requests to the right scraper backend and
/// captures a screenshot alongside the content.
///
/// Holds only immutable configuration; a single `Browser` can serve any
/// number of concurrent calls.
#[derive(Debug, Clone)]
pub struct Browser {
    endpoints: ScraperEndpoints,
    data_dir: PathBuf,
    flow_id: i64,
    transport: TransportConfig,
    thresholds: SizeThresholds,
}

impl Browser {
    pub fn new(endpoints: ScraperEndpoints, data_dir: impl Into<PathBuf>, flow_id: i64) -> Self {
        Self {
            endpoints,
            data_dir: data_dir.into(),
            flow_id,
            transport: TransportConfig::default(),
            thresholds: SizeThresholds::default(),
        }
    }

    pub fn from_config(config: &BrowserConfig) -> Self {
        Self::new(config.endpoints(), config.data_dir.clone(), config.flow_id)
            .with_transport(config.transport())
            .with_thresholds(config.thresholds)
    }

    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_thresholds(mut self, thresholds: SizeThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn is_available(&self) -> bool {
        self.endpoints.is_configured()
    }

    pub fn endpoints(&self) -> &ScraperEndpoints {
        &self.endpoints
    }

    pub fn flow_id(&self) -> i64 {
        self.flow_id
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Where a screenshot returned by this browser lives on disk
    pub fn screenshot_path(&self, file_name: &str) -> PathBuf {
        screenshot_dir(&self.data_dir, self.flow_id).join(file_name)
    }

    /// Backend base URL that would serve `target`
    pub fn resolve(&self, target: &str) -> Result<Url> {
        self.endpoints.resolve(target)
    }

    pub async fn content_md(&self, target: &str) -> Result<Extraction> {
        self.extract(target, ContentKind::Markdown).await
    }

    pub async fn content_html(&self, target: &str) -> Result<Extraction> {
        self.extract(target, ContentKind::Html).await
    }

    pub async fn links(&self, target: &str) -> Result<Extraction> {
        self.extract(target, ContentKind::Links).await
    }

    /// Resolve, fetch content, then try a screenshot. Only the first two
    /// steps can fail the call.
    pub async fn extract(&self, target: &str, kind: ContentKind) -> Result<Extraction> {
        let base = self.resolve(target)?;

        let content = ContentFetcher::new(self.transport.clone(), self.thresholds)
            .fetch_content(&base, target, kind)
            .await?;

        let screenshot = ScreenshotFetcher::new(self.transport.clone(), self.thresholds.image)
            .fetch_screenshot(&base, target, &self.data_dir, self.flow_id)
            .await
            .map(|s| s.file_name);

        match screenshot {
            Some(ref name) => info!("Extracted {} of {} with screenshot {}", kind, target, name),
            None => debug!("Extracted {} of {} without screenshot", kind, target),
        }

        Ok(Extraction {
            content,
            screenshot,
        })
    }
}
