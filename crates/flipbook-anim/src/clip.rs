//! Clip definitions.
//!
//! A [`Clip`] is one named animation loop over a row of equally sized frames.
//! Clips are only ever built through validation: [`ClipDef`] carries raw
//! signed numbers, [`ClipForm`] carries the untouched text of the "Add
//! Animation" form.

use serde::{Deserialize, Serialize};
use std::fmt;

use flipbook_common::{FlipbookError, FlipbookResult, FrameRect};

use crate::keys::KeySymbol;

/// Name of the clip played when no other clip is active.
pub const IDLE_CLIP: &str = "idle";

/// Clip names offered by the "Add Animation" form.
pub const PRESET_CLIP_NAMES: &[&str] = &[IDLE_CLIP, "walk_left", "walk_right", "walk_up", "walk_down"];

/// A validated animation clip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clip {
    name: String,
    frame_width: u32,
    frame_height: u32,
    frame_count: u32,
    row: u32,
    key_binding: Option<KeySymbol>,
}

impl Clip {
    /// Validates a raw definition.
    pub fn new(def: ClipDef) -> FlipbookResult<Self> {
        let name = def.name.trim();
        if name.is_empty() {
            return Err(FlipbookError::invalid_clip("name", "must not be empty"));
        }

        Ok(Self {
            name: name.to_string(),
            frame_width: positive("width", def.frame_width)?,
            frame_height: positive("height", def.frame_height)?,
            frame_count: positive("frames", def.frame_count)?,
            row: non_negative("row", def.row)?,
            key_binding: def.key_binding,
        })
    }

    /// Clip name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width of one frame in pixels.
    #[must_use]
    pub fn frame_width(&self) -> u32 {
        self.frame_width
    }

    /// Height of one frame in pixels.
    #[must_use]
    pub fn frame_height(&self) -> u32 {
        self.frame_height
    }

    /// Number of frames in the loop.
    #[must_use]
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Zero-based row in the sheet's frame grid.
    #[must_use]
    pub fn row(&self) -> u32 {
        self.row
    }

    /// Key that activates this clip, if any.
    #[must_use]
    pub fn key_binding(&self) -> Option<KeySymbol> {
        self.key_binding
    }

    /// Whether this is the idle clip.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.name == IDLE_CLIP
    }

    /// Source rectangle of frame `index`.
    ///
    /// Saturates instead of overflowing; a saturated rectangle never fits a
    /// real sheet, so bounds checks still reject it.
    #[must_use]
    pub fn frame_rect(&self, index: u32) -> FrameRect {
        FrameRect::new(
            index.saturating_mul(self.frame_width),
            self.row.saturating_mul(self.frame_height),
            self.frame_width,
            self.frame_height,
        )
    }

    /// One-line description used by the animation list.
    #[must_use]
    pub fn summary(&self) -> String {
        let key = self
            .key_binding
            .map(|k| k.to_string())
            .unwrap_or_default();
        format!(
            "{} ({}x{}, {} frames, Row: {}, Key: {})",
            self.name, self.frame_width, self.frame_height, self.frame_count, self.row, key
        )
    }
}

impl fmt::Display for Clip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

fn positive(field: &'static str, value: i64) -> FlipbookResult<u32> {
    if value <= 0 {
        return Err(FlipbookError::invalid_clip(
            field,
            format!("must be a positive number, got {value}"),
        ));
    }
    u32::try_from(value)
        .map_err(|_| FlipbookError::invalid_clip(field, format!("{value} is too large")))
}

fn non_negative(field: &'static str, value: i64) -> FlipbookResult<u32> {
    if value < 0 {
        return Err(FlipbookError::invalid_clip(
            field,
            format!("must not be negative, got {value}"),
        ));
    }
    u32::try_from(value)
        .map_err(|_| FlipbookError::invalid_clip(field, format!("{value} is too large")))
}

/// Unvalidated clip definition with signed fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClipDef {
    /// Clip name
    pub name: String,
    /// Frame width in pixels
    pub frame_width: i64,
    /// Frame height in pixels
    pub frame_height: i64,
    /// Number of frames
    pub frame_count: i64,
    /// Zero-based sheet row
    pub row: i64,
    /// Optional activating key
    pub key_binding: Option<KeySymbol>,
}

impl ClipDef {
    /// Creates a definition without a key binding.
    pub fn new(
        name: impl Into<String>,
        frame_width: i64,
        frame_height: i64,
        frame_count: i64,
        row: i64,
    ) -> Self {
        Self {
            name: name.into(),
            frame_width,
            frame_height,
            frame_count,
            row,
            key_binding: None,
        }
    }

    /// Sets the activating key.
    pub fn with_key(mut self, key: KeySymbol) -> Self {
        self.key_binding = Some(key);
        self
    }
}

/// Raw text of the "Add Animation" form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClipForm {
    /// Selected clip name
    pub name: String,
    /// Width field
    pub width: String,
    /// Height field
    pub height: String,
    /// Frames field
    pub frames: String,
    /// Row field
    pub row: String,
    /// Key binding field
    pub key_binding: String,
}

impl ClipForm {
    /// Parses every field into a [`ClipDef`].
    ///
    /// Numbers are only checked for being numbers here; range checks happen
    /// in [`Clip::new`].
    pub fn parse(&self) -> FlipbookResult<ClipDef> {
        Ok(ClipDef {
            name: self.name.trim().to_string(),
            frame_width: number("width", &self.width)?,
            frame_height: number("height", &self.height)?,
            frame_count: number("frames", &self.frames)?,
            row: number("row", &self.row)?,
            key_binding: KeySymbol::parse_binding(&self.key_binding)?,
        })
    }
}

fn number(field: &'static str, text: &str) -> FlipbookResult<i64> {
    text.trim().parse().map_err(|_| {
        FlipbookError::invalid_clip(
            field,
            "Invalid input format. Please enter valid numbers for width, height, frames, and row.",
        )
    })
}
