//! # Flipbook Common
//!
//! Common types and shared abstractions for Flipbook.
//!
//! This crate provides foundational types used across the Flipbook crates:
//! - Geometry types (frame rectangles, sheet sizes)
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod geometry;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::geometry::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_fits_sheet_edges() {
        let sheet = SheetSize::new(128, 64);
        assert!(FrameRect::new(96, 32, 32, 32).fits_within(sheet));
        assert!(!FrameRect::new(97, 32, 32, 32).fits_within(sheet));
        assert!(!FrameRect::new(0, 33, 32, 32).fits_within(sheet));
    }

    #[test]
    fn test_error_titles() {
        let err = FlipbookError::ClipNotFound {
            name: "idle".to_string(),
        };
        assert_eq!(err.title(), "Animation Not Found");
        assert_eq!(err.to_string(), "Animation idle not found!");
    }
}
