//! Sprite sheet loading.

use image::RgbaImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use flipbook_common::{FlipbookError, FlipbookResult, SheetSize};

/// A decoded RGBA sprite sheet.
///
/// Pixels are shared, so clones are cheap.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    path: PathBuf,
    pixels: Arc<RgbaImage>,
}

/// Loads and decodes a sprite sheet from disk.
pub fn load_sheet(path: impl AsRef<Path>) -> FlipbookResult<SpriteSheet> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(FlipbookError::ImageLoad {
            path: path.to_path_buf(),
            reason: "file does not exist".to_string(),
        });
    }

    let pixels = image::open(path)
        .map_err(|e| FlipbookError::ImageLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?
        .into_rgba8();

    info!(
        "Loaded sprite sheet {} ({}x{})",
        path.display(),
        pixels.width(),
        pixels.height()
    );
    Ok(SpriteSheet::from_image(path, pixels))
}

impl SpriteSheet {
    /// Wraps already decoded pixels.
    pub fn from_image(path: impl Into<PathBuf>, pixels: RgbaImage) -> Self {
        Self {
            path: path.into(),
            pixels: Arc::new(pixels),
        }
    }

    /// Path the sheet was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sheet dimensions.
    #[must_use]
    pub fn size(&self) -> SheetSize {
        SheetSize::new(self.pixels.width(), self.pixels.height())
    }

    /// Sheet width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Sheet height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Full decoded image.
    #[must_use]
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}
