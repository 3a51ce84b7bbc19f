//! Pre-flight frame extraction.
//!
//! Computes every frame rectangle of a clip against a concrete sheet before
//! any of them is materialised. This runs once per "Create"; the playback
//! engine performs its own per-tick check on top.

use tracing::debug;

use flipbook_common::{FlipbookError, FlipbookResult, FrameRect, SheetSize};

use crate::clip::Clip;
use crate::registry::ClipRegistry;

/// Returns the rectangles of all frames of `clip`, in order.
///
/// Fails on the first frame that does not fit inside `sheet`.
pub fn extract_frames(sheet: SheetSize, clip: &Clip) -> FlipbookResult<Vec<FrameRect>> {
    debug!(
        "Processing animation '{}' with parameters: Width={}, Height={}, Frames={}, Row={}",
        clip.name(),
        clip.frame_width(),
        clip.frame_height(),
        clip.frame_count(),
        clip.row()
    );

    (0..clip.frame_count())
        .map(|index| {
            let rect = clip.frame_rect(index);
            if rect.fits_within(sheet) {
                Ok(rect)
            } else {
                Err(FlipbookError::FrameOutOfBounds {
                    clip: clip.name().to_string(),
                    frame_index: Some(index),
                    rect,
                    sheet,
                })
            }
        })
        .collect()
}

/// Runs [`extract_frames`] for every registered clip, in name order.
///
/// Returns the total number of frames on success.
pub fn validate_registry(registry: &ClipRegistry, sheet: SheetSize) -> FlipbookResult<usize> {
    registry
        .all_clips()
        .into_iter()
        .try_fold(0, |total, clip| {
            extract_frames(sheet, clip).map(|frames| total + frames.len())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::ClipDef;
    use proptest::prelude::*;

    fn clip(w: i64, h: i64, count: i64, row: i64) -> Clip {
        Clip::new(ClipDef::new("walk_left", w, h, count, row)).expect("valid clip")
    }

    #[test]
    fn test_extracts_row_of_frames() {
        let frames = extract_frames(SheetSize::new(128, 64), &clip(32, 32, 4, 1))
            .expect("fits the sheet");
        assert_eq!(
            frames,
            vec![
                FrameRect::new(0, 32, 32, 32),
                FrameRect::new(32, 32, 32, 32),
                FrameRect::new(64, 32, 32, 32),
                FrameRect::new(96, 32, 32, 32),
            ]
        );
    }

    #[test]
    fn test_names_first_violating_frame() {
        let err = extract_frames(SheetSize::new(100, 64), &clip(32, 32, 4, 0));
        match err {
            Err(FlipbookError::FrameOutOfBounds {
                clip,
                frame_index,
                rect,
                ..
            }) => {
                assert_eq!(clip, "walk_left");
                assert_eq!(frame_index, Some(3));
                assert_eq!(rect, FrameRect::new(96, 0, 32, 32));
            },
            other => panic!("expected out of bounds, got {other:?}"),
        }
    }

    #[test]
    fn test_row_beyond_sheet_fails_at_frame_zero() {
        let err = extract_frames(SheetSize::new(128, 64), &clip(32, 32, 2, 2));
        assert!(matches!(
            err,
            Err(FlipbookError::FrameOutOfBounds {
                frame_index: Some(0),
                ..
            })
        ));
    }

    #[test]
    fn test_validate_registry_counts_frames() {
        let mut registry = ClipRegistry::new();
        registry
            .register(ClipDef::new("idle", 32, 32, 2, 0))
            .expect("valid clip");
        registry
            .register(ClipDef::new("walk_left", 32, 32, 4, 1))
            .expect("valid clip");

        assert_eq!(validate_registry(&registry, SheetSize::new(128, 64)).ok(), Some(6));
        assert!(validate_registry(&registry, SheetSize::new(64, 64)).is_err());
    }

    proptest! {
        #[test]
        fn prop_extraction_matches_bounds(
            w in 1i64..64,
            h in 1i64..64,
            count in 1i64..16,
            row in 0i64..8,
            sheet_w in 0u32..512,
            sheet_h in 0u32..512,
        ) {
            let clip = clip(w, h, count, row);
            let fits = w * count <= i64::from(sheet_w) && (row + 1) * h <= i64::from(sheet_h);
            let result = extract_frames(SheetSize::new(sheet_w, sheet_h), &clip);

            prop_assert_eq!(result.is_ok(), fits);
            match result {
                Ok(frames) => prop_assert_eq!(frames.len() as i64, count),
                Err(FlipbookError::FrameOutOfBounds { frame_index: Some(index), .. }) => {
                    // First frame whose right edge passes the sheet, or frame 0 when the row does.
                    let expected = if (row + 1) * h > i64::from(sheet_h) {
                        0
                    } else {
                        i64::from(sheet_w) / w
                    };
                    prop_assert_eq!(i64::from(index), expected);
                },
                Err(other) => prop_assert!(false, "unexpected error {:?}", other),
            }
        }
    }
}
