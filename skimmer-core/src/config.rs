//! Browser configuration
//!
//! Endpoints, storage location, transport and size limits. Loaded from the
//! environment by default; the CLI layers its flags on top.

use crate::resolve::{ScraperEndpoints, parse_endpoint};
use serde::{Deserialize, Serialize};
use skimmer_fetch::kind::SizeThresholds;
use skimmer_fetch::transport::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, TransportConfig};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_DATA_DIR: &str = "./data";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {field}: {reason}")]
pub struct ConfigError {
    pub field: &'static str,
    pub reason: String,
}

impl ConfigError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Scraper reachable from inside the private network
    pub scraper_private_url: String,
    /// Scraper reachable from the public internet
    pub scraper_public_url: String,
    /// Root for persisted artifacts (screenshots)
    pub data_dir: PathBuf,
    pub flow_id: i64,
    pub proxy_url: Option<String>,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub thresholds: SizeThresholds,
}

impl BrowserConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup. Unparsable
    /// numbers fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let number = |key: &str, default: usize| {
            lookup(key)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        };

        Self {
            scraper_private_url: lookup("SCRAPER_PRIVATE_URL").unwrap_or_default(),
            scraper_public_url: lookup("SCRAPER_PUBLIC_URL").unwrap_or_default(),
            data_dir: lookup("SKIMMER_DATA_DIR")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            flow_id: lookup("SKIMMER_FLOW_ID")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.flow_id),
            proxy_url: lookup("PROXY_URL").filter(|v| !v.trim().is_empty()),
            timeout_secs: lookup("SKIMMER_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.timeout_secs),
            user_agent: lookup("SKIMMER_USER_AGENT")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.user_agent),
            thresholds: SizeThresholds {
                markdown: number("SKIMMER_MIN_MD_SIZE", defaults.thresholds.markdown),
                html: number("SKIMMER_MIN_HTML_SIZE", defaults.thresholds.html),
                links: number("SKIMMER_MIN_LINKS_SIZE", defaults.thresholds.links),
                image: number("SKIMMER_MIN_IMG_SIZE", defaults.thresholds.image),
            },
        }
    }

    /// Validate configuration values. Missing endpoints are allowed: the
    /// browser then reports itself unavailable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::new("timeout_secs", "must be at least 1"));
        }
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::new("data_dir", "must not be empty"));
        }
        if self.thresholds.image == 0 {
            return Err(ConfigError::new("thresholds.image", "must be at least 1"));
        }
        for (field, endpoint) in [
            ("scraper_private_url", &self.scraper_private_url),
            ("scraper_public_url", &self.scraper_public_url),
        ] {
            if !endpoint.trim().is_empty() {
                parse_endpoint(endpoint.trim())
                    .map_err(|e| ConfigError::new(field, e.to_string()))?;
            }
        }
        if let Some(ref proxy) = self.proxy_url {
            url::Url::parse(proxy).map_err(|e| ConfigError::new("proxy_url", e.to_string()))?;
        }
        Ok(())
    }

    pub fn endpoints(&self) -> ScraperEndpoints {
        ScraperEndpoints::new(&self.scraper_private_url, &self.scraper_public_url)
    }

    pub fn transport(&self) -> TransportConfig {
        let transport = TransportConfig::new(Duration::from_secs(self.timeout_secs))
            .with_user_agent(&self.user_agent);
        match self.proxy_url {
            Some(ref proxy) => transport.with_proxy(proxy),
            None => transport,
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            scraper_private_url: String::new(),
            scraper_public_url: String::new(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            flow_id: 0,
            proxy_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            thresholds: SizeThresholds::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = BrowserConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.endpoints().is_configured());
    }

    #[test]
    fn test_transport_carries_proxy() {
        let config = BrowserConfig {
            proxy_url: Some("http://proxy:8080".to_string()),
            timeout_secs: 7,
            ..BrowserConfig::default()
        };
        let transport = config.transport();
        assert_eq!(transport.proxy_url.as_deref(), Some("http://proxy:8080"));
        assert_eq!(transport.timeout, Duration::from_secs(7));
    }
}
