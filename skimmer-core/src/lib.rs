pub mod browser;
pub mod classify;
pub mod config;
pub mod error;
pub mod resolve;
pub mod tool;

pub use browser::{Browser, Extraction};
pub use classify::{HostClass, classify, classify_host, classify_url};
pub use config::{BrowserConfig, ConfigError};
pub use error::BrowserError;
pub use resolve::{ScraperEndpoints, resolve};
pub use tool::{
    AgentContext, BrowserAction, BrowserTool, ScrapeLogEntry, ScrapeLogSink, SinkError,
};

pub use skimmer_fetch::{ContentKind, SizeThresholds};
