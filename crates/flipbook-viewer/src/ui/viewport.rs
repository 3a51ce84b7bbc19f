//! Black preview area where the current frame is drawn.

use egui::{pos2, vec2, Align2, Color32, ColorImage, FontId, Pos2, Rect, TextureHandle, TextureOptions};

use flipbook_anim::{RenderedFrame, SheetSize};

use crate::config::ViewerConfig;
use crate::session::ViewerSession;

/// Sheet texture uploaded to egui, tagged with the sheet it came from.
struct SheetTexture {
    generation: u64,
    handle: TextureHandle,
}

/// Viewport panel state.
#[derive(Default)]
pub struct Viewport {
    texture: Option<SheetTexture>,
}

impl std::fmt::Debug for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Viewport")
            .field("generation", &self.texture.as_ref().map(|t| t.generation))
            .finish()
    }
}

impl Viewport {
    /// Draws the viewport into the remaining space of `ctx`.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        session: &ViewerSession,
        config: &ViewerConfig,
        fps: Option<f32>,
    ) {
        self.sync_texture(ctx, session);

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::BLACK))
            .show(ctx, |ui| {
                let origin = ui.max_rect().min;
                let painter = ui.painter();

                if let (Some(frame), Some(sheet), Some(texture)) =
                    (session.current_frame(), session.sheet(), &self.texture)
                {
                    if let Some(uv) = uv_rect(frame, sheet.size()) {
                        painter.image(
                            texture.handle.id(),
                            target_rect(origin, frame, config),
                            uv,
                            Color32::WHITE,
                        );
                    }
                }

                if let Some(fps) = fps {
                    let clip = session.engine().state().active_clip().unwrap_or("-");
                    painter.text(
                        origin + vec2(8.0, 8.0),
                        Align2::LEFT_TOP,
                        format!("{fps:.0} FPS  {clip}"),
                        FontId::monospace(12.0),
                        Color32::LIGHT_GREEN,
                    );
                }
            });
    }

    /// Uploads the session's sheet when it changed since the last upload.
    fn sync_texture(&mut self, ctx: &egui::Context, session: &ViewerSession) {
        let Some(sheet) = session.sheet() else {
            self.texture = None;
            return;
        };
        let generation = session.sheet_generation();
        if self.texture.as_ref().is_some_and(|t| t.generation == generation) {
            return;
        }

        let size = [sheet.width() as usize, sheet.height() as usize];
        let image = ColorImage::from_rgba_unmultiplied(size, sheet.pixels().as_raw());
        let handle = ctx.load_texture(
            sheet.path().to_string_lossy(),
            image,
            TextureOptions::NEAREST,
        );
        self.texture = Some(SheetTexture { generation, handle });
    }
}

/// Screen rectangle of the frame: anchored at the configured point and
/// scaled by `render_scale`.
fn target_rect(origin: Pos2, frame: &RenderedFrame, config: &ViewerConfig) -> Rect {
    let size = vec2(frame.rect.width as f32, frame.rect.height as f32) * config.render_scale;
    Rect::from_min_size(origin + vec2(config.anchor_x, config.anchor_y), size)
}

/// Texture coordinates of the frame; mirrored frames swap left and right.
fn uv_rect(frame: &RenderedFrame, sheet: SheetSize) -> Option<Rect> {
    let [u0, v0, u1, v1] = frame.texture_coords(sheet)?;
    Some(Rect::from_min_max(pos2(u0, v0), pos2(u1, v1)))
}
