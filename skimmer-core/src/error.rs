use skimmer_fetch::FetchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("no scraper endpoint configured: set a private or public scraper URL")]
    NotConfigured,

    #[error("invalid scraper endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("invalid target URL '{url}': {reason}")]
    MalformedTarget { url: String, reason: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("failed to unmarshal {tool} action arguments: {source}")]
    InvalidAction {
        tool: String,
        #[source]
        source: serde_json::Error,
    },
}

impl BrowserError {
    /// Errors that can only be fixed by changing the endpoint configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            BrowserError::NotConfigured | BrowserError::InvalidEndpoint { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, BrowserError>;
