use crate::error::Result;
use crate::kind::{ContentKind, SizeThresholds, check_size};
use crate::transport::{TransportConfig, backend_url, get_bytes};
use tracing::info;
use url::Url;

/// Fetches primary page content from a scraper backend. One request per
/// call, no retries.
#[derive(Debug, Clone, Default)]
pub struct ContentFetcher {
    transport: TransportConfig,
    thresholds: SizeThresholds,
}

impl ContentFetcher {
    pub fn new(transport: TransportConfig, thresholds: SizeThresholds) -> Self {
        Self {
            transport,
            thresholds,
        }
    }

    pub fn thresholds(&self) -> &SizeThresholds {
        &self.thresholds
    }

    pub async fn fetch_content(
        &self,
        base: &Url,
        target: &str,
        kind: ContentKind,
    ) -> Result<String> {
        let request_url = backend_url(base, kind.path(), target, &[]);
        let body = get_bytes(&self.transport, &request_url).await?;

        check_size(kind.as_str(), body.len(), self.thresholds.for_kind(kind))?;

        info!("Fetched {} bytes of {} for {}", body.len(), kind, target);
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
