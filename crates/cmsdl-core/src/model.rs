//! Records produced by a scrape and exchanged with the relay.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of an item across re-scrapes of the same page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemKey(pub String);

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One downloadable or streamable unit of course content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentItem {
    pub key: ItemKey,
    /// Title region text exactly as shown on the page (trimmed).
    pub original_title: String,
    /// Title with any leading `N - ` ordinal removed.
    pub base_title: String,
    /// Title used in the filename (`Lecture 5`, `Tutorial 2`, or the base title).
    pub display_title: String,
    /// Lowercase parenthetical annotation, empty when absent.
    pub type_tag: String,
    pub is_streaming: bool,
    /// Absolute URL, `None` for streaming items under the exclude policy.
    pub source_url: Option<String>,
    pub filename: String,
}

impl ContentItem {
    /// True when the item belongs in week/global/filter batches.
    pub fn is_batchable(&self) -> bool {
        !self.is_streaming && self.source_url.is_some()
    }

    /// Request for the relay, if the item has a URL.
    pub fn download_request(&self) -> Option<DownloadRequest> {
        self.source_url.as_ref().map(|url| DownloadRequest {
            url: url.clone(),
            filename: self.filename.clone(),
        })
    }
}

/// A logical week of course content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekGroup {
    pub identifier: String,
    pub items: Vec<ContentItem>,
}

impl WeekGroup {
    pub fn batchable(&self) -> impl Iterator<Item = &ContentItem> {
        self.items.iter().filter(|item| item.is_batchable())
    }
}

/// URL + filename pair sent to the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRequest {
    pub url: String,
    pub filename: String,
}

/// Opaque handle returned by the host download facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DownloadId(pub u64);

impl fmt::Display for DownloadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of one relay download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Started(DownloadId),
    Failed(String),
}

impl DownloadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DownloadOutcome::Started(_))
    }
}
