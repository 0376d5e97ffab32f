//! Type filters offered for bulk downloads across the whole course.

use crate::model::ContentItem;

/// A named subset of batchable items selected by type-tag keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkFilter {
    pub label: &'static str,
    pub keyword: &'static str,
}

impl BulkFilter {
    pub fn matches(&self, item: &ContentItem) -> bool {
        item.is_batchable() && item.type_tag.contains(self.keyword)
    }
}

pub const BULK_FILTERS: &[BulkFilter] = &[
    BulkFilter {
        label: "Tutorials",
        keyword: "tutorial",
    },
    BulkFilter {
        label: "Lectures",
        keyword: "lecture",
    },
    BulkFilter {
        label: "Projects/Assignments",
        keyword: "project",
    },
];

/// Looks a filter up by keyword or label, case-insensitively.
pub fn find_filter(name: &str) -> Option<&'static BulkFilter> {
    let name = name.trim();
    BULK_FILTERS
        .iter()
        .find(|f| f.keyword.eq_ignore_ascii_case(name) || f.label.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_by_keyword_or_label() {
        assert_eq!(find_filter("lecture").map(|f| f.label), Some("Lectures"));
        assert_eq!(find_filter("Tutorials").map(|f| f.keyword), Some("tutorial"));
        assert_eq!(find_filter(" PROJECT ").map(|f| f.keyword), Some("project"));
        assert!(find_filter("videos").is_none());
    }
}
