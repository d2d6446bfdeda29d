//! Note card colors

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Banner color applied to notes (and to rows that predate the column)
pub const DEFAULT_BANNER_COLOR: &str = "#FFFFE0";

/// Body color applied to notes (and to rows that predate the column)
pub const DEFAULT_BODY_COLOR: &str = "#FFFFFF";

/// A `#RRGGBB` color, stored in uppercase
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

/// Returned when a string is not a `#RRGGBB` color
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color '{0}': expected #RRGGBB")]
pub struct ParseColorError(String);

impl HexColor {
    /// The light yellow banner used when none is chosen
    #[must_use]
    pub fn default_banner() -> Self {
        Self(DEFAULT_BANNER_COLOR.to_string())
    }

    /// The white body used when none is chosen
    #[must_use]
    pub fn default_body() -> Self {
        Self(DEFAULT_BODY_COLOR.to_string())
    }

    /// Get the `#RRGGBB` representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Red, green and blue channels
    pub fn rgb(&self) -> (u8, u8, u8) {
        // Validated on construction.
        parse_rgb(&self.0[1..]).unwrap_or((0, 0, 0))
    }
}

/// Parse six hex digits (no leading `#`) into byte channels
pub(crate) fn parse_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |start: usize| u8::from_str_radix(&hex[start..start + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for HexColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.strip_prefix('#').and_then(parse_rgb) {
            Some(_) => Ok(Self(trimmed.to_ascii_uppercase())),
            None => Err(ParseColorError(s.to_string())),
        }
    }
}

impl TryFrom<String> for HexColor {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}
