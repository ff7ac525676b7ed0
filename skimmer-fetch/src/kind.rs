use crate::error::{FetchError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum markdown body, in bytes, below which a scrape is considered broken.
pub const MIN_MD_CONTENT_SIZE: usize = 50;
/// Minimum raw HTML body. Stricter than markdown since markup inflates size.
pub const MIN_HTML_CONTENT_SIZE: usize = 300;
/// Minimum links payload. `[]` sits exactly on the limit and is rejected.
pub const MIN_LINKS_CONTENT_SIZE: usize = 2;
/// Minimum screenshot size. Smaller images are the scraper's placeholder/error images.
pub const MIN_IMG_CONTENT_SIZE: usize = 256;

/// What the scraper backend is asked to produce for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Markdown,
    Html,
    Links,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [
        ContentKind::Markdown,
        ContentKind::Html,
        ContentKind::Links,
    ];

    /// Backend sub-path serving this kind
    pub fn path(&self) -> &'static str {
        match self {
            ContentKind::Markdown => "/markdown",
            ContentKind::Html => "/html",
            ContentKind::Links => "/links",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Markdown => "markdown",
            ContentKind::Html => "html",
            ContentKind::Links => "links",
        }
    }

    pub fn default_threshold(&self) -> usize {
        match self {
            ContentKind::Markdown => MIN_MD_CONTENT_SIZE,
            ContentKind::Html => MIN_HTML_CONTENT_SIZE,
            ContentKind::Links => MIN_LINKS_CONTENT_SIZE,
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-kind minimum body sizes. A body whose length is at or below its
/// threshold is treated as truncated or a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeThresholds {
    pub markdown: usize,
    pub html: usize,
    pub links: usize,
    pub image: usize,
}

impl SizeThresholds {
    pub fn for_kind(&self, kind: ContentKind) -> usize {
        match kind {
            ContentKind::Markdown => self.markdown,
            ContentKind::Html => self.html,
            ContentKind::Links => self.links,
        }
    }
}

impl Default for SizeThresholds {
    fn default() -> Self {
        Self {
            markdown: MIN_MD_CONTENT_SIZE,
            html: MIN_HTML_CONTENT_SIZE,
            links: MIN_LINKS_CONTENT_SIZE,
            image: MIN_IMG_CONTENT_SIZE,
        }
    }
}

/// Reject bodies whose length does not exceed `threshold`.
pub(crate) fn check_size(what: &'static str, size: usize, threshold: usize) -> Result<()> {
    if size <= threshold {
        return Err(FetchError::Incomplete {
            what,
            size,
            threshold,
        });
    }
    Ok(())
}
