//! Input symbols that can be bound to clips.
//!
//! A [`KeySymbol`] is independent of any windowing library: the viewer maps
//! its raw keyboard events onto these, and the registry only ever sees
//! symbols.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use flipbook_common::FlipbookError;

/// A single bindable input symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeySymbol {
    /// A printable character, stored lowercase
    Char(char),
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Space bar
    Space,
    /// Enter/Return
    Enter,
    /// Tab
    Tab,
}

impl KeySymbol {
    /// Creates a character symbol, normalising case.
    ///
    /// Whitespace and control characters are not bindable.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        if c.is_whitespace() || c.is_control() {
            return None;
        }
        c.to_lowercase().next().map(Self::Char)
    }

    /// Parses the optional key-binding field of the clip form.
    ///
    /// An empty (or all-whitespace) field means "no binding".
    pub fn parse_binding(text: &str) -> Result<Option<Self>, FlipbookError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed.parse().map(Some)
    }

    /// Name of the named-key variants, as accepted by [`FromStr`].
    #[must_use]
    fn name(self) -> Option<&'static str> {
        match self {
            Self::Char(_) => None,
            Self::Up => Some("up"),
            Self::Down => Some("down"),
            Self::Left => Some("left"),
            Self::Right => Some("right"),
            Self::Space => Some("space"),
            Self::Enter => Some("enter"),
            Self::Tab => Some("tab"),
        }
    }
}

impl FromStr for KeySymbol {
    type Err = FlipbookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Self::from_char(c).ok_or_else(|| {
                FlipbookError::invalid_clip("key binding", format!("'{c}' cannot be bound"))
            });
        }

        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "space" => Ok(Self::Space),
            "enter" | "return" => Ok(Self::Enter),
            "tab" => Ok(Self::Tab),
            _ => Err(FlipbookError::invalid_clip(
                "key binding",
                format!("'{s}' is not a single key"),
            )),
        }
    }
}

impl fmt::Display for KeySymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{c}"),
            named => f.write_str(named.name().unwrap_or_default()),
        }
    }
}
