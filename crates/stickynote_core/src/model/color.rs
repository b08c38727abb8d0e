//! Note background color palette.
//!
//! # Responsibility
//! - Define the closed six-entry palette notes can be painted with.
//! - Map palette entries to and from their stable hex representation.
//!
//! # Invariants
//! - Palette order is fixed; `NoteColor::PALETTE[0]` is the default.
//! - Persisted form is always the lowercase `#rrggbb` hex string.
//! - Reads are lenient: unknown persisted values fall back to the default.

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#?([0-9a-fA-F]{6})$").expect("valid hex color regex"));

/// Background color assigned to a note.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum NoteColor {
    /// Neutral paper gray.
    #[default]
    Gray,
    Yellow,
    Green,
    Blue,
    Purple,
    Red,
}

impl NoteColor {
    /// All palette entries in display order.
    pub const PALETTE: [NoteColor; 6] = [
        NoteColor::Gray,
        NoteColor::Yellow,
        NoteColor::Green,
        NoteColor::Blue,
        NoteColor::Purple,
        NoteColor::Red,
    ];

    /// Returns the persisted hex value, e.g. `#fef3c7`.
    pub fn hex(self) -> &'static str {
        match self {
            Self::Gray => "#f9fafb",
            Self::Yellow => "#fef3c7",
            Self::Green => "#dcfce7",
            Self::Blue => "#dbeafe",
            Self::Purple => "#f3e8ff",
            Self::Red => "#fee2e2",
        }
    }

    /// Returns the lowercase palette name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Gray => "gray",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Red => "red",
        }
    }

    /// Parses a palette name or a hex value (`#` optional, any case).
    ///
    /// # Errors
    /// - Returns [`ColorParseError`] when the value matches no palette entry.
    pub fn parse(value: &str) -> Result<Self, ColorParseError> {
        let trimmed = value.trim();
        if let Some(caps) = HEX_COLOR_RE.captures(trimmed) {
            let digits = caps[1].to_ascii_lowercase();
            return Self::PALETTE
                .into_iter()
                .find(|color| &color.hex()[1..] == digits.as_str())
                .ok_or_else(|| ColorParseError(trimmed.to_string()));
        }

        Self::PALETTE
            .into_iter()
            .find(|color| color.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ColorParseError(trimmed.to_string()))
    }
}

impl Display for NoteColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<NoteColor> for String {
    fn from(value: NoteColor) -> Self {
        value.hex().to_string()
    }
}

impl From<String> for NoteColor {
    fn from(value: String) -> Self {
        match Self::parse(&value) {
            Ok(color) => color,
            Err(err) => {
                warn!("event=color_decode module=model status=fallback error={err}");
                Self::default()
            }
        }
    }
}

/// Input value that does not name a palette color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError(pub String);

impl Display for ColorParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown note color `{}`; expected gray|yellow|green|blue|purple|red or a palette hex value",
            self.0
        )
    }
}

impl Error for ColorParseError {}

#[cfg(test)]
mod tests {
    use super::NoteColor;

    #[test]
    fn default_is_first_palette_entry() {
        assert_eq!(NoteColor::default(), NoteColor::PALETTE[0]);
        assert_eq!(NoteColor::default().hex(), "#f9fafb");
    }

    #[test]
    fn parse_accepts_names_and_hex_in_any_case() {
        assert_eq!(NoteColor::parse("Yellow").unwrap(), NoteColor::Yellow);
        assert_eq!(NoteColor::parse(" purple ").unwrap(), NoteColor::Purple);
        assert_eq!(NoteColor::parse("#DCFCE7").unwrap(), NoteColor::Green);
        assert_eq!(NoteColor::parse("fee2e2").unwrap(), NoteColor::Red);
    }

    #[test]
    fn parse_rejects_values_outside_palette() {
        assert!(NoteColor::parse("orange").is_err());
        assert!(NoteColor::parse("#123456").is_err());
        assert!(NoteColor::parse("").is_err());
    }

    #[test]
    fn serializes_as_hex_and_reads_unknown_values_as_default() {
        let encoded = serde_json::to_string(&NoteColor::Blue).unwrap();
        assert_eq!(encoded, "\"#dbeafe\"");

        let decoded: NoteColor = serde_json::from_str("\"#dbeafe\"").unwrap();
        assert_eq!(decoded, NoteColor::Blue);

        let unknown: NoteColor = serde_json::from_str("\"#000000\"").unwrap();
        assert_eq!(unknown, NoteColor::Gray);
    }
}
