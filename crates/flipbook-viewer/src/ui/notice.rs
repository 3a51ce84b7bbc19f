//! Notification window.

use crate::session::Notice;

/// Draws `notice` centred over the viewer. Returns true once OK is pressed.
pub fn show_notice(ctx: &egui::Context, notice: &Notice) -> bool {
    let mut acknowledged = false;

    egui::Window::new(notice.title.as_str())
        .id(egui::Id::new("flipbook_notice"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            ui.set_max_width(360.0);
            ui.label(notice.message.as_str());
            ui.add_space(6.0);
            ui.vertical_centered(|ui| {
                if ui.button("OK").clicked() {
                    acknowledged = true;
                }
            });
        });

    acknowledged
}
