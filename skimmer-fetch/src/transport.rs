use crate::error::{FetchError, Result};
use reqwest::{Client, Proxy};
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const DEFAULT_TIMEOUT_SECS: u64 = 65;
pub const DEFAULT_USER_AGENT: &str = "Skimmer/0.1 (https://github.com/trapdoorsec/skimmer)";

/// How a single backend request is carried. Every fetch builds its own
/// `Client` from this value; nothing process-wide is ever configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub proxy_url: Option<String>,
    pub user_agent: String,
}

impl TransportConfig {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            proxy_url: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn with_proxy(mut self, proxy_url: impl Into<String>) -> Self {
        let proxy_url = proxy_url.into();
        self.proxy_url = if proxy_url.trim().is_empty() {
            None
        } else {
            Some(proxy_url)
        };
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn build_client(&self) -> Result<Client> {
        let mut builder = Client::builder()
            .user_agent(&self.user_agent)
            .timeout(self.timeout)
            .connect_timeout(self.timeout / 2)
            .redirect(reqwest::redirect::Policy::limited(5));

        if let Some(ref proxy_url) = self.proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(|source| FetchError::InvalidProxy {
                url: proxy_url.clone(),
                source,
            })?;
            builder = builder.proxy(proxy);
        }

        builder.build().map_err(FetchError::ClientBuild)
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

/// Build `<scheme>://<host>[:port]<path>?<extra>&url=<target>` from a backend base.
/// Any path, query or fragment already on the base is dropped.
pub fn backend_url(base: &Url, path: &str, target: &str, extra: &[(&str, &str)]) -> Url {
    let mut url = base.clone();
    url.set_path(path);
    url.set_fragment(None);
    url.set_query(None);
    {
        let mut query = url.query_pairs_mut();
        for (key, value) in extra {
            query.append_pair(key, value);
        }
        query.append_pair("url", target);
    }
    url
}

/// Single GET against the backend. Non-2xx is a rejection; a connect
/// failure or a timeout, before or after the headers, is `Unreachable`.
pub(crate) async fn get_bytes(transport: &TransportConfig, url: &Url) -> Result<Vec<u8>> {
    let client = transport.build_client()?;

    debug!("Requesting {}", url);
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| FetchError::Unreachable {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Rejected {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    // A stall after the headers is still the backend failing to answer
    let body = response.bytes().await.map_err(|source| {
        if source.is_timeout() {
            FetchError::Unreachable {
                url: url.to_string(),
                source,
            }
        } else {
            FetchError::BodyRead {
                url: url.to_string(),
                source,
            }
        }
    })?;

    debug!("Received {} bytes from {}", body.len(), url);
    Ok(body.to_vec())
}
