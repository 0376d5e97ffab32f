//! Extension choice for saved files.
//!
//! The host's download links do not always carry a real extension, so the
//! choice is an ordered rule table of observed defaults. It is a heuristic
//! and never inspects content types.

use super::path::last_path_segment;
use super::sanitize::replace_forbidden;

/// Used when no rule produces an extension.
pub const FALLBACK_EXTENSION: &str = ".file";

/// Facts about an item that the extension rules look at.
#[derive(Debug, Clone, Copy)]
pub struct ExtensionInput<'a> {
    pub source_url: Option<&'a str>,
    pub type_tag: &'a str,
    pub is_streaming: bool,
}

/// One entry of the rule table: a name (for logs/tests) and the rule itself.
pub struct ExtensionRule {
    pub name: &'static str,
    pub apply: fn(&ExtensionInput<'_>) -> Option<String>,
}

/// Rules in priority order; the first `Some` wins.
pub const EXTENSION_RULES: &[ExtensionRule] = &[
    ExtensionRule {
        name: "url-path",
        apply: from_url_path,
    },
    ExtensionRule {
        name: "streaming",
        apply: streaming_video,
    },
    ExtensionRule {
        name: "project",
        apply: project_document,
    },
    ExtensionRule {
        name: "slides-in-url",
        apply: slides_in_url,
    },
];

fn from_url_path(input: &ExtensionInput<'_>) -> Option<String> {
    let segment = last_path_segment(input.source_url?)?;
    let dot = segment.rfind('.')?;
    let ext = &segment[dot..];
    (ext.len() > 1).then(|| ext.to_string())
}

fn streaming_video(input: &ExtensionInput<'_>) -> Option<String> {
    input.is_streaming.then(|| ".mp4".to_string())
}

fn project_document(input: &ExtensionInput<'_>) -> Option<String> {
    input
        .type_tag
        .contains("project")
        .then(|| ".pdf".to_string())
}

fn slides_in_url(input: &ExtensionInput<'_>) -> Option<String> {
    let tag = input.type_tag;
    if !(tag.contains("lecture") || tag.contains("tutorial")) {
        return None;
    }
    let url = input.source_url?;
    [".pptx", ".ppt"]
        .into_iter()
        .find(|ext| url.contains(ext))
        .map(str::to_string)
}

/// Resolves the extension (with leading dot) for an item.
pub fn resolve_extension(input: &ExtensionInput<'_>) -> String {
    let ext = EXTENSION_RULES
        .iter()
        .find_map(|rule| {
            let ext = (rule.apply)(input)?;
            tracing::trace!(rule = rule.name, ext = %ext, "extension rule matched");
            Some(ext)
        })
        .unwrap_or_else(|| FALLBACK_EXTENSION.to_string());
    ext.chars().filter(|c| !c.is_whitespace()).map(replace_forbidden).collect()
}
