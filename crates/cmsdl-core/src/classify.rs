//! Title and type classification for a single content item.
//!
//! Works on text already pulled out of the page so the heuristics can be
//! tested without HTML.

use once_cell::sync::Lazy;
use regex::Regex;

static ORDINAL_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\s*-\s*").expect("ordinal prefix regex"));
static PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^)]+)\)").expect("parenthetical regex"));
static LECTURE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(lecture)\s*(\d+)").expect("lecture regex"));
static TUTORIAL_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(tutorial)\s*(\d+)").expect("tutorial regex"));

/// Type tag that marks an item as video regardless of its controls.
pub const STREAMING_TAG: &str = "vod";

/// Text extracted from an item's title region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleParts {
    /// Emphasized lead segment, if the region has one.
    pub lead: Option<String>,
    /// Whole region text.
    pub region_text: String,
    /// First non-empty text node following the lead.
    pub trailing_text: Option<String>,
}

/// Presence and visibility of an item's playback and download controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    /// Watch-video control present and displayed.
    pub watch_visible: bool,
    /// Download control present and displayed.
    pub download_visible: bool,
}

/// Outcome of classifying one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub base_title: String,
    pub display_title: String,
    pub type_tag: String,
    pub is_streaming: bool,
}

/// Collapses noisy numbered titles (`Lecture 5 : Intro` → `Lecture 5`).
pub struct TitleRule {
    /// Looked for in the type tag and at the start of the base title.
    pub keyword: &'static str,
    pub label: &'static str,
    pub pattern: &'static Lazy<Regex>,
}

pub static TITLE_RULES: &[TitleRule] = &[
    TitleRule {
        keyword: "lecture",
        label: "Lecture",
        pattern: &LECTURE_NUMBER,
    },
    TitleRule {
        keyword: "tutorial",
        label: "Tutorial",
        pattern: &TUTORIAL_NUMBER,
    },
];

/// Strips a leading `N - ` ordinal.
pub fn strip_ordinal(raw_title: &str) -> String {
    ORDINAL_PREFIX.replace(raw_title.trim(), "").trim().to_string()
}

/// Lowercased content of the first parenthetical in `text`, or empty.
pub fn type_tag_from(text: Option<&str>) -> String {
    text.and_then(|t| PARENTHETICAL.captures(t.trim()))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_lowercase())
        .unwrap_or_default()
}

/// Title that goes into the filename.
pub fn display_title(base_title: &str, type_tag: &str) -> String {
    let lowered = base_title.to_lowercase();
    for rule in TITLE_RULES {
        if !(type_tag.contains(rule.keyword) || lowered.starts_with(rule.keyword)) {
            continue;
        }
        if let Some(number) = rule.pattern.captures(base_title).and_then(|c| c.get(2)) {
            return format!("{} {}", rule.label, number.as_str());
        }
    }
    base_title.to_string()
}

/// True when the item is a video resource rather than a downloadable file.
pub fn is_streaming(controls: Controls, type_tag: &str) -> bool {
    (controls.watch_visible && !controls.download_visible) || type_tag == STREAMING_TAG
}

/// Classifies one item from its title text and controls.
pub fn classify(parts: &TitleParts, controls: Controls) -> Classification {
    let raw_title = parts
        .lead
        .as_deref()
        .map(str::trim)
        .unwrap_or_else(|| parts.region_text.trim());
    let base_title = strip_ordinal(raw_title);
    let type_tag = if parts.lead.is_some() {
        type_tag_from(parts.trailing_text.as_deref())
    } else {
        String::new()
    };
    let display_title = display_title(&base_title, &type_tag);
    Classification {
        is_streaming: is_streaming(controls, &type_tag),
        base_title,
        display_title,
        type_tag,
    }
}
