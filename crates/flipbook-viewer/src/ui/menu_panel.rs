//! Left-hand menu panel.

use egui::{RichText, ScrollArea};
use std::path::Path;

use flipbook_anim::Facing;

use crate::session::ClipRow;

/// Width of the menu panel in points.
const PANEL_WIDTH: f32 = 240.0;

/// A button pressed in the menu panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Load the chosen image and validate all clips
    Create,
    /// Pick an image file
    UploadImage,
    /// Open the "Add Animation" dialog
    AddAnimation,
    /// Remove the selected animation
    RemoveAnimation,
}

/// Menu panel state.
#[derive(Debug)]
pub struct MenuPanel {
    /// Orientation the idle art is drawn in
    facing: Facing,
    /// Name of the selected list row
    selected: Option<String>,
}

impl MenuPanel {
    /// Creates a panel with the given orientation preselected.
    #[must_use]
    pub fn new(facing: Facing) -> Self {
        Self {
            facing,
            selected: None,
        }
    }

    /// Selected orientation.
    #[must_use]
    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Selected clip name.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Clears the list selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Draws the panel and returns the button pressed, if any.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        rows: &[ClipRow],
        image: Option<&Path>,
    ) -> Option<MenuAction> {
        if let Some(selected) = &self.selected {
            if !rows.iter().any(|row| &row.name == selected) {
                self.selected = None;
            }
        }

        let mut action = None;

        egui::SidePanel::left("menu_panel")
            .exact_width(PANEL_WIDTH)
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(8.0);

                ui.label(RichText::new("Orientation").strong());
                ui.horizontal(|ui| {
                    ui.radio_value(&mut self.facing, Facing::Left, "Left");
                    ui.radio_value(&mut self.facing, Facing::Right, "Right");
                });
                ui.separator();

                if ui.button("Upload Image").clicked() {
                    action = Some(MenuAction::UploadImage);
                }
                let file_name = image
                    .and_then(Path::file_name)
                    .map_or_else(|| "No image selected".to_string(), |n| n.to_string_lossy().into_owned());
                ui.small(file_name);
                ui.separator();

                ui.label(RichText::new("Animations").strong());
                ScrollArea::vertical()
                    .max_height(ui.available_height() - 80.0)
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        for row in rows {
                            let is_selected = self.selected.as_deref() == Some(row.name.as_str());
                            if ui.selectable_label(is_selected, row.summary.as_str()).clicked() {
                                self.selected = Some(row.name.clone());
                            }
                        }
                    });

                ui.horizontal(|ui| {
                    if ui.button("+ Add Animation").clicked() {
                        action = Some(MenuAction::AddAnimation);
                    }
                    if ui.button("- Remove Animation").clicked() {
                        action = Some(MenuAction::RemoveAnimation);
                    }
                });
                ui.separator();

                if ui
                    .add_sized([ui.available_width(), 28.0], egui::Button::new("Create"))
                    .clicked()
                {
                    action = Some(MenuAction::Create);
                }
            });

        action
    }
}
