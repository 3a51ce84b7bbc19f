//! Viewer configuration.
//!
//! Window, playback cadence and viewport settings. Loaded from and saved to
//! `flipbook.toml` in the platform config directory.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use flipbook_anim::{Facing, DEFAULT_TICKS_PER_FRAME};

/// Configuration file name.
const CONFIG_FILE: &str = "flipbook.toml";

/// Viewer configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    // === Window Settings ===
    /// Window width in pixels
    pub window_width: u32,
    /// Window height in pixels
    pub window_height: u32,
    /// Enable VSync
    pub vsync: bool,

    // === Playback Settings ===
    /// Ticks each animation frame stays on screen
    pub ticks_per_frame: u32,
    /// Playback ticks per second
    pub target_tick_rate_hz: u32,
    /// Facing the idle art is drawn in
    pub start_facing: Facing,

    // === Viewport Settings ===
    /// Horizontal draw anchor inside the viewport
    pub anchor_x: f32,
    /// Vertical draw anchor inside the viewport
    pub anchor_y: f32,
    /// Sprite magnification
    pub render_scale: f32,

    // === Debug Settings ===
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 600,
            vsync: true,

            ticks_per_frame: DEFAULT_TICKS_PER_FRAME,
            target_tick_rate_hz: 30,
            start_facing: Facing::Left,

            anchor_x: 200.0,
            anchor_y: 250.0,
            render_scale: 1.0,

            show_fps: false,
        }
    }
}

impl ViewerConfig {
    /// Load configuration from the default file location.
    /// Returns default config if file doesn't exist.
    pub fn load() -> Self {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        let mut contents = String::new();
        if let Err(e) =
            fs::File::open(path).and_then(|mut file| file.read_to_string(&mut contents))
        {
            warn!("Failed to read config file: {e}");
            return Self::default();
        }

        match toml::from_str(&contents) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            },
            Err(e) => {
                warn!("Failed to parse config file: {e}");
                Self::default()
            },
        }
    }

    /// Save configuration to the default file location.
    pub fn save(&self) -> io::Result<()> {
        self.save_to(Self::config_path())
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut file = fs::File::create(path)?;
        file.write_all(contents.as_bytes())?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Get the default configuration file path.
    fn config_path() -> PathBuf {
        if let Some(config_dir) = dirs_config_path() {
            config_dir.join("flipbook").join(CONFIG_FILE)
        } else {
            PathBuf::from(CONFIG_FILE)
        }
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        // Window size
        self.window_width = self.window_width.clamp(400, 7680);
        self.window_height = self.window_height.clamp(300, 4320);

        // Playback
        self.ticks_per_frame = self.ticks_per_frame.clamp(1, 120);
        self.target_tick_rate_hz = self.target_tick_rate_hz.clamp(1, 240);

        // Viewport
        self.anchor_x = finite_or(self.anchor_x, 200.0).clamp(0.0, 4096.0);
        self.anchor_y = finite_or(self.anchor_y, 250.0).clamp(0.0, 4096.0);
        self.render_scale = finite_or(self.render_scale, 1.0).clamp(0.25, 16.0);
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Get platform-specific config directory.
fn dirs_config_path() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Application Support"))
    }

    #[cfg(target_os = "windows")]
    {
        std::env::var("APPDATA").ok().map(PathBuf::from)
    }

    #[cfg(target_os = "linux")]
    {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var("HOME")
                    .ok()
                    .map(|h| PathBuf::from(h).join(".config"))
            })
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
    {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ViewerConfig::default();
        assert_eq!(config.window_width, 800);
        assert_eq!(config.window_height, 600);
        assert_eq!(config.ticks_per_frame, 5);
        assert_eq!(config.target_tick_rate_hz, 30);
        assert_eq!((config.anchor_x, config.anchor_y), (200.0, 250.0));
        assert_eq!(config.start_facing, Facing::Left);
    }

    #[test]
    fn test_config_validation() {
        let mut config = ViewerConfig::default();
        config.window_width = 100;
        config.ticks_per_frame = 0;
        config.target_tick_rate_hz = 10_000;
        config.render_scale = f32::NAN;
        config.anchor_x = -5.0;

        config.validate();

        assert_eq!(config.window_width, 400);
        assert_eq!(config.ticks_per_frame, 1);
        assert_eq!(config.target_tick_rate_hz, 240);
        assert!((config.render_scale - 1.0).abs() < f32::EPSILON);
        assert_eq!(config.anchor_x, 0.0);
    }

    #[test]
    fn test_config_save_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("flipbook.toml");

        let mut config = ViewerConfig::default();
        config.window_width = 1024;
        config.start_facing = Facing::Right;
        config.show_fps = true;

        config.save_to(&config_path).expect("Failed to save config");

        let loaded = ViewerConfig::load_from(&config_path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_load_missing_file() {
        let config = ViewerConfig::load_from("/nonexistent/path/flipbook.toml");
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn test_config_malformed_file_uses_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("flipbook.toml");
        fs::write(&config_path, "window_width = \"wide\"").expect("write config");

        assert_eq!(ViewerConfig::load_from(&config_path), ViewerConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("flipbook.toml");
        fs::write(&config_path, "start_facing = \"right\"\nticks_per_frame = 3\n")
            .expect("write config");

        let config = ViewerConfig::load_from(&config_path);
        assert_eq!(config.start_facing, Facing::Right);
        assert_eq!(config.ticks_per_frame, 3);
        assert_eq!(config.window_width, 800);
    }
}
