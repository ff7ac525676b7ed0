pub mod error;
pub mod fetcher;
pub mod kind;
pub mod result;
pub mod screenshot;
pub mod transport;

pub use error::FetchError;
pub use fetcher::ContentFetcher;
pub use kind::{ContentKind, SizeThresholds};
pub use result::{PageLink, Screenshot, format_links_markdown, parse_links};
pub use screenshot::{ScreenshotFetcher, screenshot_dir};
pub use transport::TransportConfig;
