use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A screenshot that was fetched and written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screenshot {
    /// Generated file name, relative to the flow's screenshot directory
    pub file_name: String,
    pub path: PathBuf,
    pub size: usize,
}

/// One entry of the `/links` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Link")]
    pub link: String,
}

pub fn parse_links(body: &str) -> serde_json::Result<Vec<PageLink>> {
    serde_json::from_str(body)
}

/// Render links as a markdown bullet list. Untitled links use the URL as text.
pub fn format_links_markdown(links: &[PageLink]) -> String {
    let mut out = String::new();
    for link in links {
        let title = link.title.trim();
        let title = if title.is_empty() { link.link.as_str() } else { title };
        out.push_str(&format!("- [{}]({})\n", title, link.link));
    }
    out
}
