//! Viewer user interface.
//!
//! egui panels over a [`ViewerSession`]: the menu panel on the left, the
//! black viewport filling the rest, the "Add Animation" dialog and the
//! notification window on top.

mod clip_dialog;
mod menu_panel;
mod notice;
mod viewport;

pub use clip_dialog::ClipDialog;
pub use menu_panel::{MenuAction, MenuPanel};
pub use notice::show_notice;
pub use viewport::Viewport;

use flipbook_anim::Facing;
use tracing::debug;

use crate::config::ViewerConfig;
use crate::session::ViewerSession;

/// Image extensions offered by the file picker.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// All panels of the viewer window.
#[derive(Debug)]
pub struct ViewerUi {
    menu: MenuPanel,
    dialog: ClipDialog,
    viewport: Viewport,
}

impl ViewerUi {
    /// Creates the UI with the configured start facing selected.
    #[must_use]
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            menu: MenuPanel::new(config.start_facing),
            dialog: ClipDialog::default(),
            viewport: Viewport::default(),
        }
    }

    /// Orientation currently selected in the menu panel.
    #[must_use]
    pub fn facing(&self) -> Facing {
        self.menu.facing()
    }

    /// Draws one frame of UI and applies the user's actions to `session`.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        session: &mut ViewerSession,
        config: &ViewerConfig,
        fps: Option<f32>,
    ) {
        let rows = session.clip_rows();
        if let Some(action) = self.menu.show(ctx, &rows, session.selected_image()) {
            self.apply(action, session);
        }

        self.viewport.show(ctx, session, config, fps);

        if let Some(form) = self.dialog.show(ctx) {
            if session.add_clip(&form) {
                self.dialog.close();
            }
        }

        if let Some(notice) = session.notice().cloned() {
            if show_notice(ctx, &notice) {
                session.dismiss_notice();
            }
        }
    }

    fn apply(&mut self, action: MenuAction, session: &mut ViewerSession) {
        debug!("Menu action: {action:?}");
        match action {
            MenuAction::Create => {
                session.create(self.menu.facing());
            },
            MenuAction::UploadImage => {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Image files", IMAGE_EXTENSIONS)
                    .set_title("Open Image File")
                    .pick_file()
                {
                    session.select_image(path);
                }
            },
            MenuAction::AddAnimation => self.dialog.open(),
            MenuAction::RemoveAnimation => {
                if session.remove_clip(self.menu.selected()) {
                    self.menu.clear_selection();
                }
            },
        }
    }
}
