//! Result of one scrape pass.

use serde::Serialize;

use super::filter::{BulkFilter, BULK_FILTERS};
use crate::model::{ContentItem, DownloadRequest, WeekGroup};

/// Why an item container produced no [`ContentItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No title region inside the item.
    MissingTitle,
    /// No resolvable link for an item that needs one.
    MissingUrl,
    /// Streaming item dropped by the `skip` policy.
    StreamingPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedItem {
    pub week: String,
    /// 1-based position of the item inside its week.
    pub position: usize,
    pub title: Option<String>,
    pub reason: SkipReason,
}

/// Snapshot of a page: weeks in document order plus what was skipped.
///
/// Each scrape builds a fresh session; nothing is shared between passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScrapeSession {
    pub weeks: Vec<WeekGroup>,
    pub skipped: Vec<SkippedItem>,
}

impl ScrapeSession {
    /// All items across weeks, in document order.
    pub fn items(&self) -> impl Iterator<Item = &ContentItem> {
        self.weeks.iter().flat_map(|w| w.items.iter())
    }

    pub fn week(&self, identifier: &str) -> Option<&WeekGroup> {
        self.weeks.iter().find(|w| w.identifier == identifier)
    }

    /// Requests for every batchable item of the course.
    pub fn batch_requests(&self) -> Vec<DownloadRequest> {
        self.items()
            .filter(|i| i.is_batchable())
            .filter_map(ContentItem::download_request)
            .collect()
    }

    /// Requests for the batchable items of one week (empty if unknown).
    pub fn week_requests(&self, identifier: &str) -> Vec<DownloadRequest> {
        self.week(identifier)
            .map(|w| w.batchable().filter_map(ContentItem::download_request).collect())
            .unwrap_or_default()
    }

    pub fn filtered_requests(&self, filter: &BulkFilter) -> Vec<DownloadRequest> {
        self.items()
            .filter(|i| filter.matches(i))
            .filter_map(ContentItem::download_request)
            .collect()
    }

    /// Filters that select at least one item on this page.
    pub fn available_filters(&self) -> Vec<&'static BulkFilter> {
        BULK_FILTERS
            .iter()
            .filter(|f| self.items().any(|i| f.matches(i)))
            .collect()
    }
}
