//! Shared utility functions used across multiple modules.

use std::sync::LazyLock;

use regex::Regex;

use crate::sanitize::strip_scripts;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("Invalid regex"));

/// Normalize optional text by trimming whitespace and removing empties.
///
/// Returns `None` when the input is `None` or the trimmed value is empty.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// One-line plain-text preview of an HTML description.
///
/// Script blocks are removed with their contents and other tags are dropped.
/// Whitespace runs collapse to a single space and the result is cut to
/// `max_chars` with a trailing ellipsis.
pub fn plain_text_preview(html: &str, max_chars: usize) -> String {
    let html = strip_scripts(html);
    let text = TAG.replace_all(&html, " ").replace("&nbsp;", " ");
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if text.chars().count() <= max_chars {
        return text;
    }
    let mut preview: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    preview.push_str("...");
    preview
}
