use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("invalid proxy URL '{url}': {source}")]
    InvalidProxy {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to send request to {url}: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("scraper rejected request to {url}: status {status}")]
    Rejected { url: String, status: u16 },

    #[error("failed to read response body from {url}: {source}")]
    BodyRead {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{what} content size {size} is not greater than minimum: {threshold} bytes")]
    Incomplete {
        what: &'static str,
        size: usize,
        threshold: usize,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl FetchError {
    /// True when the backend never delivered a response: connect failure,
    /// proxy down, or a timeout at any point of the exchange.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, FetchError::Unreachable { .. })
    }

    /// Status code returned by the backend, if it answered with a non-2xx.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
