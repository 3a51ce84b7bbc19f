//! Error types for Flipbook.

use std::path::PathBuf;
use thiserror::Error;

use crate::geometry::{FrameRect, SheetSize};

/// Top-level error type for Flipbook operations.
///
/// None of these are fatal: the viewer surfaces each one as a single
/// notification and leaves its previous state untouched.
#[derive(Debug, Error)]
pub enum FlipbookError {
    /// A clip definition was rejected at registration time
    #[error("Invalid {field}: {reason}")]
    InvalidClip {
        /// Name of the offending field
        field: &'static str,
        /// Human-readable reason
        reason: String,
    },

    /// Lookup or removal of a clip that is not registered
    #[error("Animation {name} not found!")]
    ClipNotFound {
        /// Requested clip name
        name: String,
    },

    /// A frame rectangle does not fit inside the loaded sheet
    #[error("{}", describe_out_of_bounds(.clip, .frame_index, .rect, .sheet))]
    FrameOutOfBounds {
        /// Clip the frame belongs to
        clip: String,
        /// Frame index, when known
        frame_index: Option<u32>,
        /// The rectangle that was rejected
        rect: FrameRect,
        /// Size of the sheet it was checked against
        sheet: SheetSize,
    },

    /// The sprite sheet could not be loaded
    #[error("Failed to load image {}: {reason}", path.display())]
    ImageLoad {
        /// Path that was requested
        path: PathBuf,
        /// Decoder or filesystem message
        reason: String,
    },
}

impl FlipbookError {
    /// Creates an [`FlipbookError::InvalidClip`] error.
    pub fn invalid_clip(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidClip {
            field,
            reason: reason.into(),
        }
    }

    /// Title used when the error is shown to the user.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::InvalidClip { .. } => "Invalid Animation",
            Self::ClipNotFound { .. } => "Animation Not Found",
            Self::FrameOutOfBounds { .. } => "Frame Out Of Bounds",
            Self::ImageLoad { .. } => "Image Error",
        }
    }
}

fn describe_out_of_bounds(
    clip: &str,
    frame_index: &Option<u32>,
    rect: &FrameRect,
    sheet: &SheetSize,
) -> String {
    match frame_index {
        Some(index) => format!(
            "Frame {index} for animation '{clip}' is out of bounds. Image size: {sheet}, Rect: {rect}"
        ),
        None => format!(
            "Frame of animation '{clip}' is out of bounds. Image size: {sheet}, Rect: {rect}"
        ),
    }
}

/// Result type alias for Flipbook operations.
pub type FlipbookResult<T> = Result<T, FlipbookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_message_names_frame() {
        let err = FlipbookError::FrameOutOfBounds {
            clip: "walk_left".to_string(),
            frame_index: Some(3),
            rect: FrameRect::new(96, 32, 32, 32),
            sheet: SheetSize::new(100, 64),
        };
        assert_eq!(
            err.to_string(),
            "Frame 3 for animation 'walk_left' is out of bounds. Image size: 100x64, Rect: (96, 32, 32, 32)"
        );
    }

    #[test]
    fn test_invalid_clip_message() {
        let err = FlipbookError::invalid_clip("frames", "must be a positive number");
        assert_eq!(err.to_string(), "Invalid frames: must be a positive number");
        assert_eq!(err.title(), "Invalid Animation");
    }
}
