use crate::error::Result;
use crate::kind::{MIN_IMG_CONTENT_SIZE, check_size};
use crate::result::Screenshot;
use crate::transport::{TransportConfig, backend_url, get_bytes};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use url::Url;

pub const SCREENSHOT_PATH: &str = "/screenshot";
pub const SCREENSHOT_EXTENSION: &str = "png";

/// `<data_dir>/screenshots/flow-<flow_id>`
pub fn screenshot_dir(data_dir: &Path, flow_id: i64) -> PathBuf {
    data_dir.join("screenshots").join(format!("flow-{}", flow_id))
}

/// `<timestamp>_<host>_<random>.png`. The random suffix keeps names unique
/// when the same page is captured twice within one second.
pub fn screenshot_name(target: &str, now: DateTime<Utc>) -> String {
    let host = Url::parse(target)
        .ok()
        .and_then(|u| u.host_str().map(sanitize_host))
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| "page".to_string());

    let suffix = uuid::Uuid::new_v4().simple().to_string();

    format!(
        "{}_{}_{}.{}",
        now.format("%Y%m%d-%H%M%S"),
        host,
        &suffix[..8],
        SCREENSHOT_EXTENSION
    )
}

fn sanitize_host(host: &str) -> String {
    host.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Captures a page screenshot through the scraper backend. The result is
/// advisory: every failure ends up as `None` plus a warning.
#[derive(Debug, Clone)]
pub struct ScreenshotFetcher {
    transport: TransportConfig,
    min_size: usize,
}

impl ScreenshotFetcher {
    pub fn new(transport: TransportConfig, min_size: usize) -> Self {
        Self {
            transport,
            min_size,
        }
    }

    pub async fn fetch_screenshot(
        &self,
        base: &Url,
        target: &str,
        data_dir: &Path,
        flow_id: i64,
    ) -> Option<Screenshot> {
        match self.capture(base, target, data_dir, flow_id).await {
            Ok(screenshot) => {
                info!(
                    "Saved {} byte screenshot of {} as {}",
                    screenshot.size, target, screenshot.file_name
                );
                Some(screenshot)
            }
            Err(e) => {
                warn!("Screenshot of {} skipped: {}", target, e);
                None
            }
        }
    }

    /// Same as `fetch_screenshot` but keeps the failure cause.
    pub async fn capture(
        &self,
        base: &Url,
        target: &str,
        data_dir: &Path,
        flow_id: i64,
    ) -> Result<Screenshot> {
        let request_url = backend_url(base, SCREENSHOT_PATH, target, &[("fullPage", "true")]);
        let image = get_bytes(&self.transport, &request_url).await?;

        check_size("image", image.len(), self.min_size)?;

        let dir = screenshot_dir(data_dir, flow_id);
        let file_name = screenshot_name(target, Utc::now());
        let path = write_new_file(&dir, &file_name, &image).await?;

        Ok(Screenshot {
            file_name,
            path,
            size: image.len(),
        })
    }
}

impl Default for ScreenshotFetcher {
    fn default() -> Self {
        Self::new(TransportConfig::default(), MIN_IMG_CONTENT_SIZE)
    }
}

async fn write_new_file(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(dir).await?;

    let path = dir.join(file_name);
    debug!("Writing {}", path.display());

    // create_new: never clobber an earlier capture
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .await?;
    file.write_all(bytes).await?;
    file.flush().await?;

    Ok(path)
}
