//! URL modeling and filename derivation.
//!
//! Absolutizes page links, sanitizes display names into filenames and picks
//! an extension for the saved file.

mod extension;
mod path;
mod resolve;
mod sanitize;
mod unique;

pub use extension::{
    resolve_extension, ExtensionInput, ExtensionRule, EXTENSION_RULES, FALLBACK_EXTENSION,
};
pub use path::last_path_segment;
pub use resolve::resolve_url;
pub use sanitize::{sanitize_filename, MAX_STEM_CHARS};
pub use unique::candidate_names;

/// Builds the final filename `"<week> - <title><ext>"`.
///
/// The stem is sanitized (and length-capped) before the extension is appended.
pub fn derive_filename(week: &str, title: &str, input: &ExtensionInput<'_>) -> String {
    let stem = sanitize_filename(&format!("{week} - {title}"));
    format!("{}{}", stem, resolve_extension(input))
}
