//! Playback engine.
//!
//! Turns the active clip and a stream of ticks into the source rectangle to
//! draw. Clip selection is a small state machine driven by discrete key-down
//! and key-up events:
//!
//! - `Idle`: nothing held; the `idle` clip plays when registered.
//! - `Held`: a key resolving to a registered clip is down; that clip plays
//!   until the same key is released.
//!
//! Every switch of the active clip restarts it from frame 0.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use flipbook_common::{FlipbookError, FlipbookResult, FrameRect, SheetSize};

use crate::clip::{Clip, IDLE_CLIP};
use crate::keys::KeySymbol;
use crate::registry::ClipRegistry;

/// Ticks each frame stays on screen unless configured otherwise.
pub const DEFAULT_TICKS_PER_FRAME: u32 = 5;

/// Horizontal orientation used by the idle mirroring rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    /// Facing left (west)
    #[default]
    Left,
    /// Facing right (east)
    Right,
}

/// Movement direction of a `walk_*` clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Walking up (north)
    Up,
    /// Walking left (west)
    Left,
    /// Walking down (south)
    Down,
    /// Walking right (east)
    Right,
}

impl Direction {
    /// All directions, in `w a s d` order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Left, Self::Down, Self::Right];

    /// Direction of a clip by naming convention.
    #[must_use]
    pub fn from_clip_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.clip_name() == name)
    }

    /// Conventional clip name for this direction.
    #[must_use]
    pub fn clip_name(self) -> &'static str {
        match self {
            Self::Up => "walk_up",
            Self::Left => "walk_left",
            Self::Down => "walk_down",
            Self::Right => "walk_right",
        }
    }

    /// Classic movement key for this direction.
    #[must_use]
    pub fn movement_key(self) -> KeySymbol {
        match self {
            Self::Up => KeySymbol::Char('w'),
            Self::Left => KeySymbol::Char('a'),
            Self::Down => KeySymbol::Char('s'),
            Self::Right => KeySymbol::Char('d'),
        }
    }

    /// Direction whose classic movement key is `key`.
    #[must_use]
    pub fn from_movement_key(key: KeySymbol) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.movement_key() == key)
    }

    /// Horizontal facing implied by this direction, if any.
    #[must_use]
    pub fn facing(self) -> Option<Facing> {
        match self {
            Self::Left => Some(Facing::Left),
            Self::Right => Some(Facing::Right),
            Self::Up | Self::Down => None,
        }
    }
}

/// Which input currently owns the active clip.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// No clip key is held
    #[default]
    Idle,
    /// A clip key is held down
    Held {
        /// Key that caused this state
        key: KeySymbol,
        /// Clip it activated
        clip: String,
        /// Direction of the clip, for `walk_*` clips
        direction: Option<Direction>,
    },
}

/// Transient playback state of one viewer session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackState {
    active_clip: Option<String>,
    frame_index: u32,
    tick_accumulator: u32,
    last_facing: Facing,
    current_facing: Facing,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(Facing::Left, Facing::Left)
    }
}

impl PlaybackState {
    /// Creates an idle state with the given facings.
    #[must_use]
    pub fn new(last_facing: Facing, current_facing: Facing) -> Self {
        Self {
            active_clip: None,
            frame_index: 0,
            tick_accumulator: 0,
            last_facing,
            current_facing,
        }
    }

    /// Name of the active clip.
    #[must_use]
    pub fn active_clip(&self) -> Option<&str> {
        self.active_clip.as_deref()
    }

    /// Index of the frame shown on the next tick.
    #[must_use]
    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    /// Ticks spent on the current frame.
    #[must_use]
    pub fn tick_accumulator(&self) -> u32 {
        self.tick_accumulator
    }

    /// Facing before the most recent horizontal move.
    #[must_use]
    pub fn last_facing(&self) -> Facing {
        self.last_facing
    }

    /// Facing of the most recent horizontal move.
    #[must_use]
    pub fn current_facing(&self) -> Facing {
        self.current_facing
    }

    fn switch_to(&mut self, clip: Option<String>) {
        debug!(
            "Active animation: {} -> {}",
            self.active_clip.as_deref().unwrap_or("none"),
            clip.as_deref().unwrap_or("none")
        );
        self.active_clip = clip;
        self.frame_index = 0;
        self.tick_accumulator = 0;
    }

    fn face(&mut self, facing: Facing) {
        self.last_facing = self.current_facing;
        self.current_facing = facing;
    }

    fn advance(&mut self, frame_count: u32, ticks_per_frame: u32) {
        self.tick_accumulator += 1;
        if self.tick_accumulator >= ticks_per_frame {
            self.tick_accumulator = 0;
            self.frame_index = (self.frame_index + 1) % frame_count.max(1);
        }
    }
}

/// The frame chosen for one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFrame {
    /// Clip the frame belongs to
    pub clip: String,
    /// Frame index within the clip
    pub frame_index: u32,
    /// Source rectangle in the sheet
    pub rect: FrameRect,
    /// Whether the content must be mirrored horizontally
    pub mirrored: bool,
}

impl RenderedFrame {
    /// Texture coordinates `(u_min, v_min, u_max, v_max)` with the horizontal
    /// pair swapped for mirrored frames.
    #[must_use]
    pub fn texture_coords(&self, sheet: SheetSize) -> Option<[f32; 4]> {
        let [u0, v0, u1, v1] = self.rect.uv(sheet)?;
        Some(if self.mirrored {
            [u1, v0, u0, v1]
        } else {
            [u0, v0, u1, v1]
        })
    }
}

/// Selects and advances the active clip.
#[derive(Debug, Clone)]
pub struct PlaybackEngine {
    ticks_per_frame: u32,
    selection: Selection,
    state: PlaybackState,
}

impl Default for PlaybackEngine {
    fn default() -> Self {
        Self::new(DEFAULT_TICKS_PER_FRAME)
    }
}

impl PlaybackEngine {
    /// Creates an idle engine. `ticks_per_frame` is at least 1.
    #[must_use]
    pub fn new(ticks_per_frame: u32) -> Self {
        Self {
            ticks_per_frame: ticks_per_frame.max(1),
            selection: Selection::Idle,
            state: PlaybackState::default(),
        }
    }

    /// Starts from the given facings.
    #[must_use]
    pub fn with_facing(mut self, last_facing: Facing, current_facing: Facing) -> Self {
        self.state.last_facing = last_facing;
        self.state.current_facing = current_facing;
        self
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Current playback state.
    #[must_use]
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Sets both facings, e.g. after the user picks the sheet's orientation.
    pub fn reset_facing(&mut self, facing: Facing) {
        self.state.last_facing = facing;
        self.state.current_facing = facing;
    }

    /// Clears the selection and active clip.
    pub fn stop(&mut self) {
        self.selection = Selection::Idle;
        self.state.switch_to(None);
    }

    /// Clip name a key resolves to.
    ///
    /// Explicit registry bindings win; unbound `w a s d` fall back to the
    /// `walk_*` clips.
    #[must_use]
    pub fn resolve_key<'r>(registry: &'r ClipRegistry, key: KeySymbol) -> Option<&'r Clip> {
        if registry.binding_for(key).is_some() {
            return registry.lookup_by_key(key);
        }
        Direction::from_movement_key(key)
            .and_then(|direction| registry.lookup_by_name(direction.clip_name()))
    }

    /// Handles a key press. Returns whether the active clip changed.
    ///
    /// Keys that resolve to no registered clip are ignored, as is a press of
    /// the key that is already held.
    pub fn key_down(&mut self, registry: &ClipRegistry, key: KeySymbol) -> bool {
        let Some(clip) = Self::resolve_key(registry, key) else {
            debug!("Key '{key}' is not bound to any animation");
            return false;
        };

        if let Selection::Held { key: held, clip: name, .. } = &self.selection {
            if *held == key && name == clip.name() {
                return false;
            }
        }

        let direction = Direction::from_clip_name(clip.name());
        if let Some(facing) = direction.and_then(Direction::facing) {
            self.state.face(facing);
        }
        self.selection = Selection::Held {
            key,
            clip: clip.name().to_string(),
            direction,
        };
        self.state.switch_to(Some(clip.name().to_string()));
        true
    }

    /// Handles a key release. Returns whether the engine went back to idle.
    ///
    /// Only the key that caused the current held state is honoured.
    pub fn key_up(&mut self, key: KeySymbol) -> bool {
        match &self.selection {
            Selection::Held { key: held, .. } if *held == key => {
                self.stop();
                true
            },
            _ => false,
        }
    }

    /// Runs one tick and returns the frame to draw.
    ///
    /// Returns `Ok(None)` when there is nothing to play. The frame index in
    /// effect at the start of the tick is the one drawn; the cadence counters
    /// then advance, so a frame stays on screen for exactly
    /// `ticks_per_frame` ticks.
    pub fn advance_and_render(
        &mut self,
        registry: &ClipRegistry,
        sheet_width: u32,
        sheet_height: u32,
    ) -> FlipbookResult<Option<RenderedFrame>> {
        let Some(clip) = self.resolve_active(registry) else {
            return Ok(None);
        };

        let frame_index = self.state.frame_index % clip.frame_count();
        let rect = clip.frame_rect(frame_index);
        let mirrored = clip.is_idle() && self.state.last_facing != self.state.current_facing;
        self.state.advance(clip.frame_count(), self.ticks_per_frame);

        let sheet = SheetSize::new(sheet_width, sheet_height);
        if !rect.fits_within(sheet) {
            return Err(FlipbookError::FrameOutOfBounds {
                clip: clip.name().to_string(),
                frame_index: Some(frame_index),
                rect,
                sheet,
            });
        }

        Ok(Some(RenderedFrame {
            clip: clip.name().to_string(),
            frame_index,
            rect,
            mirrored,
        }))
    }

    /// Active clip, falling back to `idle` when nothing (valid) is active.
    fn resolve_active<'r>(&mut self, registry: &'r ClipRegistry) -> Option<&'r Clip> {
        if let Some(name) = &self.state.active_clip {
            if let Some(clip) = registry.lookup_by_name(name) {
                return Some(clip);
            }
            warn!("Active animation '{name}' is no longer registered");
            self.stop();
        }

        let idle = registry.lookup_by_name(IDLE_CLIP)?;
        self.state.switch_to(Some(IDLE_CLIP.to_string()));
        Some(idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::ClipDef;

    const SHEET: (u32, u32) = (256, 256);

    fn registry() -> ClipRegistry {
        let mut registry = ClipRegistry::new();
        for def in [
            ClipDef::new(IDLE_CLIP, 32, 32, 2, 0),
            ClipDef::new("walk_left", 32, 32, 4, 1).with_key(KeySymbol::Char('a')),
            ClipDef::new("walk_right", 32, 32, 4, 2).with_key(KeySymbol::Char('d')),
            ClipDef::new("walk_up", 32, 32, 3, 3),
        ] {
            registry.register(def).expect("valid clip");
        }
        registry
    }

    fn tick(engine: &mut PlaybackEngine, registry: &ClipRegistry) -> RenderedFrame {
        engine
            .advance_and_render(registry, SHEET.0, SHEET.1)
            .expect("in bounds")
            .expect("a clip is playing")
    }

    #[test]
    fn test_frame_cadence() {
        let mut registry = ClipRegistry::new();
        registry
            .register(ClipDef::new(IDLE_CLIP, 16, 16, 3, 0))
            .expect("valid clip");
        let mut engine = PlaybackEngine::new(5);

        let indices: Vec<u32> = (0..15).map(|_| tick(&mut engine, &registry).frame_index).collect();
        assert_eq!(indices, [0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2]);

        // Period is frame_count * ticks_per_frame.
        assert_eq!(tick(&mut engine, &registry).frame_index, 0);
    }

    #[test]
    fn test_rect_follows_frame_and_row() {
        let registry = registry();
        let mut engine = PlaybackEngine::new(1);
        assert!(engine.key_down(&registry, KeySymbol::Char('a')));

        let rects: Vec<FrameRect> = (0..5).map(|_| tick(&mut engine, &registry).rect).collect();
        assert_eq!(rects[0], FrameRect::new(0, 32, 32, 32));
        assert_eq!(rects[3], FrameRect::new(96, 32, 32, 32));
        assert_eq!(rects[4], FrameRect::new(0, 32, 32, 32));
    }

    #[test]
    fn test_nothing_to_render_without_idle() {
        let mut registry = ClipRegistry::new();
        registry
            .register(ClipDef::new("walk_up", 32, 32, 3, 3))
            .expect("valid clip");
        let mut engine = PlaybackEngine::default();

        assert!(engine
            .advance_and_render(&registry, SHEET.0, SHEET.1)
            .expect("nothing to check")
            .is_none());
        assert_eq!(engine.state().active_clip(), None);
    }

    #[test]
    fn test_idle_is_default() {
        let registry = registry();
        let mut engine = PlaybackEngine::default();
        let frame = tick(&mut engine, &registry);
        assert_eq!(frame.clip, IDLE_CLIP);
        assert_eq!(engine.state().active_clip(), Some(IDLE_CLIP));
    }

    #[test]
    fn test_switch_resets_counters() {
        let registry = registry();
        let mut engine = PlaybackEngine::new(2);
        for _ in 0..3 {
            tick(&mut engine, &registry);
        }
        assert_eq!(engine.state().frame_index(), 1);
        assert_eq!(engine.state().tick_accumulator(), 1);

        assert!(engine.key_down(&registry, KeySymbol::Char('a')));
        assert_eq!(engine.state().frame_index(), 0);
        assert_eq!(engine.state().tick_accumulator(), 0);

        for _ in 0..5 {
            tick(&mut engine, &registry);
        }
        assert!(engine.key_up(KeySymbol::Char('a')));
        assert_eq!(engine.state().active_clip(), None);
        assert_eq!(engine.state().frame_index(), 0);
        assert_eq!(engine.state().tick_accumulator(), 0);
        assert_eq!(engine.selection(), &Selection::Idle);
    }

    #[test]
    fn test_key_up_of_other_key_is_ignored() {
        let registry = registry();
        let mut engine = PlaybackEngine::default();
        assert!(engine.key_down(&registry, KeySymbol::Char('a')));
        assert!(engine.key_down(&registry, KeySymbol::Char('d')));

        assert!(!engine.key_up(KeySymbol::Char('a')));
        assert_eq!(engine.state().active_clip(), Some("walk_right"));

        assert!(engine.key_up(KeySymbol::Char('d')));
        assert_eq!(engine.state().active_clip(), None);
    }

    #[test]
    fn test_repeated_key_down_keeps_position() {
        let registry = registry();
        let mut engine = PlaybackEngine::new(1);
        engine.key_down(&registry, KeySymbol::Char('a'));
        tick(&mut engine, &registry);
        tick(&mut engine, &registry);

        assert!(!engine.key_down(&registry, KeySymbol::Char('a')));
        assert_eq!(engine.state().frame_index(), 2);
    }

    #[test]
    fn test_unbound_movement_key_falls_back_to_walk_clip() {
        let registry = registry();
        let mut engine = PlaybackEngine::default();

        assert!(engine.key_down(&registry, KeySymbol::Char('w')));
        assert_eq!(
            engine.selection(),
            &Selection::Held {
                key: KeySymbol::Char('w'),
                clip: "walk_up".to_string(),
                direction: Some(Direction::Up),
            }
        );

        // 's' falls back to walk_down, which is not registered.
        assert!(!engine.key_down(&registry, KeySymbol::Char('s')));
        assert!(!engine.key_down(&registry, KeySymbol::Char('x')));
        assert_eq!(engine.state().active_clip(), Some("walk_up"));
    }

    #[test]
    fn test_dangling_binding_does_not_fall_back() {
        let mut registry = registry();
        registry.unregister("walk_left").expect("registered");
        let mut engine = PlaybackEngine::default();
        assert!(!engine.key_down(&registry, KeySymbol::Char('a')));
    }

    #[test]
    fn test_idle_mirroring() {
        let registry = registry();

        let mut engine = PlaybackEngine::default().with_facing(Facing::Left, Facing::Right);
        assert!(tick(&mut engine, &registry).mirrored);

        let mut engine = PlaybackEngine::default().with_facing(Facing::Right, Facing::Right);
        assert!(!tick(&mut engine, &registry).mirrored);
    }

    #[test]
    fn test_walk_clips_are_never_mirrored() {
        let registry = registry();
        let mut engine = PlaybackEngine::default().with_facing(Facing::Left, Facing::Right);
        engine.key_down(&registry, KeySymbol::Char('d'));
        assert!(!tick(&mut engine, &registry).mirrored);
    }

    #[test]
    fn test_facing_tracks_horizontal_moves() {
        let registry = registry();
        let mut engine = PlaybackEngine::default();
        engine.reset_facing(Facing::Right);

        engine.key_down(&registry, KeySymbol::Char('a'));
        engine.key_up(KeySymbol::Char('a'));
        assert_eq!(engine.state().last_facing(), Facing::Right);
        assert_eq!(engine.state().current_facing(), Facing::Left);
        assert!(tick(&mut engine, &registry).mirrored);

        // Vertical moves leave the facings alone.
        engine.key_down(&registry, KeySymbol::Char('w'));
        engine.key_up(KeySymbol::Char('w'));
        assert_eq!(engine.state().current_facing(), Facing::Left);

        engine.key_down(&registry, KeySymbol::Char('a'));
        engine.key_up(KeySymbol::Char('a'));
        assert_eq!(engine.state().last_facing(), Facing::Left);
        assert!(!tick(&mut engine, &registry).mirrored);
    }

    #[test]
    fn test_out_of_bounds_is_reported_and_playback_continues() {
        let registry = registry();
        let mut engine = PlaybackEngine::new(1);
        engine.key_down(&registry, KeySymbol::Char('a'));

        // 100px wide: frames 0-2 fit, frame 3 (x = 96) does not.
        for expected in 0..3 {
            let frame = engine
                .advance_and_render(&registry, 100, 64)
                .expect("in bounds")
                .expect("playing");
            assert_eq!(frame.frame_index, expected);
        }
        let err = engine.advance_and_render(&registry, 100, 64);
        match err {
            Err(FlipbookError::FrameOutOfBounds { rect, sheet, .. }) => {
                assert_eq!(rect, FrameRect::new(96, 32, 32, 32));
                assert_eq!(sheet, SheetSize::new(100, 64));
            },
            other => panic!("expected out of bounds, got {other:?}"),
        }
        assert_eq!(engine.state().frame_index(), 0);
    }

    #[test]
    fn test_unregistered_active_clip_falls_back_to_idle() {
        let mut registry = registry();
        let mut engine = PlaybackEngine::default();
        engine.key_down(&registry, KeySymbol::Char('a'));
        registry.unregister("walk_left").expect("registered");

        let frame = tick(&mut engine, &registry);
        assert_eq!(frame.clip, IDLE_CLIP);
        assert_eq!(engine.selection(), &Selection::Idle);
    }

    #[test]
    fn test_mirrored_texture_coords() {
        let frame = RenderedFrame {
            clip: IDLE_CLIP.to_string(),
            frame_index: 0,
            rect: FrameRect::new(0, 0, 32, 32),
            mirrored: true,
        };
        assert_eq!(
            frame.texture_coords(SheetSize::new(64, 64)),
            Some([0.5, 0.0, 0.0, 0.5])
        );
    }

    #[test]
    fn test_direction_conventions() {
        assert_eq!(Direction::from_clip_name("walk_right"), Some(Direction::Right));
        assert_eq!(Direction::from_clip_name(IDLE_CLIP), None);
        assert_eq!(Direction::from_movement_key(KeySymbol::Char('s')), Some(Direction::Down));
        assert_eq!(Direction::Up.facing(), None);
    }
}
