use crate::classify::{HostClass, classify_url};
use crate::error::{BrowserError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

/// Base URLs of the two scraper backends. Empty (or blank) means "not
/// configured".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScraperEndpoints {
    #[serde(default)]
    pub private: String,
    #[serde(default)]
    pub public: String,
}

impl ScraperEndpoints {
    pub fn new(private: impl Into<String>, public: impl Into<String>) -> Self {
        Self {
            private: private.into(),
            public: public.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.private_endpoint().is_some() || self.public_endpoint().is_some()
    }

    fn private_endpoint(&self) -> Option<&str> {
        Some(self.private.trim()).filter(|s| !s.is_empty())
    }

    fn public_endpoint(&self) -> Option<&str> {
        Some(self.public.trim()).filter(|s| !s.is_empty())
    }

    /// Endpoint serving `class`. A lone configured endpoint serves both
    /// classes.
    pub fn endpoint_for(&self, class: HostClass) -> Option<&str> {
        match class {
            HostClass::Private => self.private_endpoint().or(self.public_endpoint()),
            HostClass::Public => self.public_endpoint().or(self.private_endpoint()),
        }
    }

    /// Pick the backend base URL for `target`.
    ///
    /// A missing configuration is reported before the target is even
    /// looked at, so no request can be made with nothing configured.
    pub fn resolve(&self, target: &str) -> Result<Url> {
        if !self.is_configured() {
            return Err(BrowserError::NotConfigured);
        }

        let target_url = Url::parse(target).map_err(|e| BrowserError::MalformedTarget {
            url: target.to_string(),
            reason: e.to_string(),
        })?;
        let class = classify_url(&target_url).ok_or_else(|| BrowserError::MalformedTarget {
            url: target.to_string(),
            reason: "URL has no host".to_string(),
        })?;

        let endpoint = self.endpoint_for(class).ok_or(BrowserError::NotConfigured)?;
        let base = parse_endpoint(endpoint)?;

        debug!("Routing {} ({} host) via {}", target, class, endpoint);
        Ok(base)
    }
}

/// Free-standing form of [`ScraperEndpoints::resolve`].
pub fn resolve(target: &str, private_base: &str, public_base: &str) -> Result<Url> {
    ScraperEndpoints::new(private_base, public_base).resolve(target)
}

pub(crate) fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let invalid = |reason: String| BrowserError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };

    let url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_endpoint_counts_as_unset() {
        let endpoints = ScraperEndpoints::new("   ", "");
        assert!(!endpoints.is_configured());
        assert!(matches!(
            endpoints.resolve("https://example.com"),
            Err(BrowserError::NotConfigured)
        ));
    }

    #[test]
    fn test_invalid_endpoint() {
        let err = resolve("https://example.com", "", "scraper-pub:8080").unwrap_err();
        assert!(err.is_configuration(), "got: {:?}", err);

        let err = resolve("https://example.com", "", "ftp://scraper").unwrap_err();
        assert!(matches!(err, BrowserError::InvalidEndpoint { .. }));
    }
}
