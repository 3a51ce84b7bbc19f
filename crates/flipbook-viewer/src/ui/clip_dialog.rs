//! "Add Animation" dialog.

use flipbook_anim::{ClipForm, IDLE_CLIP, PRESET_CLIP_NAMES};

/// Modal-style form for defining a clip.
#[derive(Debug, Default)]
pub struct ClipDialog {
    /// Whether the dialog is visible
    open: bool,
    /// Text entered so far
    form: ClipForm,
}

impl ClipDialog {
    /// Shows the dialog with an empty form.
    pub fn open(&mut self) {
        self.form = ClipForm {
            name: IDLE_CLIP.to_string(),
            ..ClipForm::default()
        };
        self.open = true;
    }

    /// Hides the dialog.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Whether the dialog is visible.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Draws the dialog. Returns a copy of the form when OK is pressed.
    ///
    /// The dialog stays open after OK; the caller closes it once the clip
    /// has been accepted.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<ClipForm> {
        if !self.is_open() {
            return None;
        }

        let mut submitted = None;
        let mut cancelled = false;
        let form = &mut self.form;

        egui::Window::new("Add Animation")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                egui::Grid::new("clip_form")
                    .num_columns(2)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Name:");
                        egui::ComboBox::from_id_salt("clip_name")
                            .selected_text(form.name.as_str())
                            .show_ui(ui, |ui| {
                                for name in PRESET_CLIP_NAMES {
                                    ui.selectable_value(&mut form.name, (*name).to_string(), *name);
                                }
                            });
                        ui.end_row();

                        for (label, value) in [
                            ("Width:", &mut form.width),
                            ("Height:", &mut form.height),
                            ("Frames:", &mut form.frames),
                            ("Row:", &mut form.row),
                            ("Key Binding:", &mut form.key_binding),
                        ] {
                            ui.label(label);
                            ui.text_edit_singleline(value);
                            ui.end_row();
                        }
                    });

                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() {
                        submitted = Some(form.clone());
                    }
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                });
            });

        if cancelled {
            self.close();
        }
        submitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_resets_form() {
        let mut dialog = ClipDialog::default();
        assert!(!dialog.is_open());

        dialog.form.width = "32".to_string();
        dialog.open();
        assert!(dialog.is_open());
        assert_eq!(dialog.form.name, IDLE_CLIP);
        assert!(dialog.form.width.is_empty());

        dialog.close();
        assert!(!dialog.is_open());
    }

    #[test]
    fn test_closed_dialog_submits_nothing() {
        let ctx = egui::Context::default();
        let mut dialog = ClipDialog::default();
        let mut submitted = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            submitted = dialog.show(ctx);
        });
        assert!(submitted.is_none());
    }
}
