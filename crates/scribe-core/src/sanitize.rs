//! Description normalization and render-time sanitizing.
//!
//! Descriptions are HTML produced by a rich-text editor. They are cleaned in
//! two places: before they are written (visually empty markup collapses to
//! an empty string) and before they are rendered (script blocks removed).
//! Headings are plain text and are always escaped.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::parse_rgb;

/// Markup the editor emits for an empty document
pub const EMPTY_PARAGRAPH: &str = "<p><br></p>";

static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script.*?>.*?</script>").expect("Invalid regex"));

/// Collapse a missing, blank or empty-paragraph description to `""`.
///
/// Any other content is kept verbatim.
///
/// # Examples
///
/// ```
/// use scribe_core::sanitize::normalize_description;
///
/// assert_eq!(normalize_description(None), "");
/// assert_eq!(normalize_description(Some(" <p><br></p> ")), "");
/// assert_eq!(normalize_description(Some("<p>hi</p>")), "<p>hi</p>");
/// ```
#[must_use]
pub fn normalize_description(description: Option<&str>) -> String {
    match description {
        Some(text) if !is_visually_empty(text) => text.to_string(),
        _ => String::new(),
    }
}

fn is_visually_empty(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || trimmed == EMPTY_PARAGRAPH
}

/// Remove every `<script>...</script>` block (any case, across lines)
#[must_use]
pub fn strip_scripts(html: &str) -> String {
    SCRIPT_BLOCK.replace_all(html, "").into_owned()
}

/// Escape text for literal display inside HTML
#[must_use]
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Text color that stays readable on a given background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextColor {
    Black,
    White,
}

impl TextColor {
    pub const fn as_hex(self) -> &'static str {
        match self {
            Self::Black => "#000000",
            Self::White => "#FFFFFF",
        }
    }
}

/// Pick black or white text for a `#RRGGBB` background.
///
/// Uses relative luminance `(0.299R + 0.587G + 0.114B) / 255`: black above
/// 0.5, white otherwise. Anything that does not parse gets black text.
#[must_use]
#[allow(clippy::suboptimal_flops)]
pub fn contrast_color(background: &str) -> TextColor {
    let hex = background.trim().trim_start_matches('#');
    let Some((r, g, b)) = parse_rgb(hex) else {
        return TextColor::Black;
    };
    let (r, g, b) = (f64::from(r), f64::from(g), f64::from(b));
    let luminance = (0.299 * r + 0.587 * g + 0.114 * b) / 255.0;
    if luminance > 0.5 {
        TextColor::Black
    } else {
        TextColor::White
    }
}
