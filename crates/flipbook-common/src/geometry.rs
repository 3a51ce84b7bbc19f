//! Geometry types for sprite sheets and the frames cut out of them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pixel dimensions of a loaded sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SheetSize {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl SheetSize {
    /// Creates a new sheet size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for SheetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Source rectangle of one frame in sheet pixel space.
///
/// The far edges are computed in `u64` so a rectangle built from large
/// user-supplied values can still be compared against the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FrameRect {
    /// Left edge in pixels
    pub x: u32,
    /// Top edge in pixels
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl FrameRect {
    /// Creates a new frame rectangle.
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    #[must_use]
    pub const fn right(&self) -> u64 {
        self.x as u64 + self.width as u64
    }

    /// Exclusive bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> u64 {
        self.y as u64 + self.height as u64
    }

    /// Whether the rectangle lies fully inside `[0, width] x [0, height]`.
    #[must_use]
    pub const fn fits_within(&self, sheet: SheetSize) -> bool {
        self.right() <= sheet.width as u64 && self.bottom() <= sheet.height as u64
    }

    /// Normalized texture coordinates `(u_min, v_min, u_max, v_max)`.
    ///
    /// Returns `None` for an empty sheet.
    #[must_use]
    pub fn uv(&self, sheet: SheetSize) -> Option<[f32; 4]> {
        if sheet.width == 0 || sheet.height == 0 {
            return None;
        }
        let w = sheet.width as f32;
        let h = sheet.height as f32;
        Some([
            self.x as f32 / w,
            self.y as f32 / h,
            self.right() as f32 / w,
            self.bottom() as f32 / h,
        ])
    }
}

impl fmt::Display for FrameRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.x, self.y, self.width, self.height
        )
    }
}
