//! Viewer session.
//!
//! Everything the window shows, minus the window: the clip registry, the
//! playback engine, the chosen and loaded sprite sheets and the queue of
//! pending notifications. Every failure ends up as one [`Notice`]; the
//! session state is left as it was before the failing action.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use flipbook_anim::{
    load_sheet, validate_registry, ClipForm, ClipRegistry, Facing, FlipbookError, FlipbookResult,
    PlaybackEngine, RenderedFrame, SpriteSheet,
};

use crate::config::ViewerConfig;
use crate::input::KeyAction;

/// A message waiting to be acknowledged by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Window title
    pub title: String,
    /// Body text
    pub message: String,
}

impl Notice {
    /// Creates a notice.
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

impl From<&FlipbookError> for Notice {
    fn from(err: &FlipbookError) -> Self {
        Self::new(err.title(), err.to_string())
    }
}

/// One row of the animation list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipRow {
    /// Clip name
    pub name: String,
    /// Text shown in the list
    pub summary: String,
}

/// State of one viewer window.
#[derive(Debug)]
pub struct ViewerSession {
    registry: ClipRegistry,
    engine: PlaybackEngine,
    /// Image picked with "Upload Image", loaded on "Create"
    selected_image: Option<PathBuf>,
    /// Sheet currently being previewed
    sheet: Option<SpriteSheet>,
    /// Bumped whenever `sheet` is replaced
    sheet_generation: u64,
    /// Frame chosen by the most recent tick
    current_frame: Option<RenderedFrame>,
    /// Identity of the last per-tick failure, reported once
    last_tick_error: Option<String>,
    /// Largest sheet side the GPU can hold as one texture
    max_texture_side: Option<u32>,
    notices: VecDeque<Notice>,
}

impl ViewerSession {
    /// Creates an empty session using the playback settings of `config`.
    #[must_use]
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            registry: ClipRegistry::new(),
            engine: PlaybackEngine::new(config.ticks_per_frame)
                .with_facing(Facing::Left, config.start_facing),
            selected_image: None,
            sheet: None,
            sheet_generation: 0,
            current_frame: None,
            last_tick_error: None,
            max_texture_side: None,
            notices: VecDeque::new(),
        }
    }

    /// Playback engine.
    #[must_use]
    pub fn engine(&self) -> &PlaybackEngine {
        &self.engine
    }

    /// Image chosen for the next "Create".
    #[must_use]
    pub fn selected_image(&self) -> Option<&Path> {
        self.selected_image.as_deref()
    }

    /// Sheet currently being previewed.
    #[must_use]
    pub fn sheet(&self) -> Option<&SpriteSheet> {
        self.sheet.as_ref()
    }

    /// Counter identifying the current sheet, for texture caching.
    #[must_use]
    pub fn sheet_generation(&self) -> u64 {
        self.sheet_generation
    }

    /// Frame to draw, if any.
    #[must_use]
    pub fn current_frame(&self) -> Option<&RenderedFrame> {
        self.current_frame.as_ref()
    }

    /// Rows for the animation list, sorted by name.
    #[must_use]
    pub fn clip_rows(&self) -> Vec<ClipRow> {
        self.registry
            .all_clips()
            .into_iter()
            .map(|clip| ClipRow {
                name: clip.name().to_string(),
                summary: clip.summary(),
            })
            .collect()
    }

    /// Oldest unacknowledged notice.
    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    /// Acknowledges the oldest notice.
    pub fn dismiss_notice(&mut self) {
        self.notices.pop_front();
    }

    fn notify(&mut self, notice: Notice) {
        warn!("{}: {}", notice.title, notice.message);
        self.notices.push_back(notice);
    }

    fn report(&mut self, err: &FlipbookError) {
        self.notify(Notice::from(err));
    }

    /// Limits the sheets "Create" accepts to what the renderer can upload.
    pub fn set_max_texture_side(&mut self, side: u32) {
        self.max_texture_side = Some(side);
    }

    /// Remembers the image for the next "Create".
    pub fn select_image(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        info!("Image selected: {}", path.display());
        self.selected_image = Some(path);
    }

    /// Loads the selected image and checks every registered clip against it.
    ///
    /// On success the new sheet replaces the previous one, playback restarts
    /// with both facings set to `facing`, and the total frame count is
    /// returned. On failure a notice is queued and the previous sheet stays.
    pub fn create(&mut self, facing: Facing) -> Option<usize> {
        let Some(path) = self.selected_image.clone() else {
            self.notify(Notice::new(
                "Error",
                "No image uploaded. Please upload an image first.",
            ));
            return None;
        };

        let loaded = load_sheet(&path).and_then(|sheet| {
            self.check_texture_size(&sheet)?;
            let total = validate_registry(&self.registry, sheet.size())?;
            Ok((sheet, total))
        });
        let (sheet, total) = match loaded {
            Ok(loaded) => loaded,
            Err(e) => {
                self.report(&e);
                return None;
            },
        };
        info!("Total frames loaded: {total}");

        self.sheet = Some(sheet);
        self.sheet_generation += 1;
        self.engine.reset_facing(facing);
        self.engine.stop();
        self.current_frame = None;
        self.last_tick_error = None;
        Some(total)
    }

    fn check_texture_size(&self, sheet: &SpriteSheet) -> FlipbookResult<()> {
        match self.max_texture_side {
            Some(limit) if sheet.width() > limit || sheet.height() > limit => {
                Err(FlipbookError::ImageLoad {
                    path: sheet.path().to_path_buf(),
                    reason: format!(
                        "image is {}, larger than the {limit}px texture limit",
                        sheet.size()
                    ),
                })
            },
            _ => Ok(()),
        }
    }

    /// Registers a clip from the "Add Animation" form.
    ///
    /// Returns false, with a notice queued, when the form is rejected.
    pub fn add_clip(&mut self, form: &ClipForm) -> bool {
        let result = form.parse().and_then(|def| self.registry.register(def).map(|_| ()));
        match result {
            Ok(()) => true,
            Err(e) => {
                self.report(&e);
                false
            },
        }
    }

    /// Removes a clip picked in the animation list.
    pub fn remove_clip(&mut self, name: Option<&str>) -> bool {
        let Some(name) = name else {
            self.notify(Notice::new("Error", "No item selected to remove."));
            return false;
        };
        match self.registry.unregister(name) {
            Ok(_) => true,
            Err(e) => {
                self.report(&e);
                false
            },
        }
    }

    /// Forwards a key transition to the playback engine.
    pub fn handle_key(&mut self, action: KeyAction) {
        match action {
            KeyAction::Pressed(key) => {
                self.engine.key_down(&self.registry, key);
            },
            KeyAction::Released(key) => {
                self.engine.key_up(key);
            },
        }
    }

    /// Runs one playback tick against the loaded sheet.
    ///
    /// Without a sheet nothing plays. A failing tick leaves the viewport
    /// blank; a failure is reported once and stays quiet until a tick
    /// succeeds or a different failure shows up.
    pub fn tick(&mut self) {
        let Some(sheet) = &self.sheet else {
            self.current_frame = None;
            return;
        };

        match self
            .engine
            .advance_and_render(&self.registry, sheet.width(), sheet.height())
        {
            Ok(frame) => {
                self.current_frame = frame;
                self.last_tick_error = None;
            },
            Err(e) => {
                self.current_frame = None;
                let key = tick_failure_key(&e);
                if self.last_tick_error.as_deref() != Some(key.as_str()) {
                    self.report(&e);
                    self.last_tick_error = Some(key);
                }
            },
        }
    }
}

/// Identity of a tick failure; out-of-bounds frames of one clip count as
/// one failure whichever frame index tripped it.
fn tick_failure_key(err: &FlipbookError) -> String {
    match err {
        FlipbookError::FrameOutOfBounds { clip, .. } => format!("{}: {clip}", err.title()),
        other => other.to_string(),
    }
}
