//! # Flipbook Anim
//!
//! The animation core of Flipbook:
//! - Clip definitions and their validation
//! - The clip registry with key bindings
//! - The tick-driven playback engine and idle mirroring
//! - Frame extraction and sprite sheet loading

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod clip;
pub mod extract;
pub mod keys;
pub mod playback;
pub mod registry;
pub mod sheet;

pub use clip::{Clip, ClipDef, ClipForm, IDLE_CLIP, PRESET_CLIP_NAMES};
pub use extract::{extract_frames, validate_registry};
pub use keys::KeySymbol;
pub use playback::{
    Direction, Facing, PlaybackEngine, PlaybackState, RenderedFrame, Selection,
    DEFAULT_TICKS_PER_FRAME,
};
pub use registry::ClipRegistry;
pub use sheet::{load_sheet, SpriteSheet};

pub use flipbook_common::{FlipbookError, FlipbookResult, FrameRect, SheetSize};
