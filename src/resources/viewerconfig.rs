//! Viewer configuration resource.
//!
//! Settings loaded from an INI file. Every value has a safe default so the
//! viewer starts even when the file is missing.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 200
//! height = 200
//! target_fps = 60
//!
//! [assets]
//! public_url = ./public
//!
//! [scene]
//! scale = 2.0
//! duration_unit_ms = 20
//! shadow_fill = ffffff
//! time_scale = 1.0
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use raylib::prelude::Color;
use std::path::PathBuf;

const DEFAULT_WINDOW_WIDTH: u32 = 200;
const DEFAULT_WINDOW_HEIGHT: u32 = 200;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_PUBLIC_URL: &str = ".";
const DEFAULT_SCALE: f32 = 2.0;
/// Milliseconds per duration unit of `AnimData`.
pub const DEFAULT_DURATION_UNIT_MS: u32 = 20;
const DEFAULT_SHADOW_FILL: u32 = 0xffffff;
const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Viewer configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct ViewerConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Root under which `maps/{dungeon}.png` is looked up.
    pub public_url: String,
    /// Scale applied to the background and both sprites.
    pub scale: f32,
    /// Milliseconds per `AnimData` duration unit.
    pub duration_unit_ms: u32,
    /// Solid fill color of the shadow sprite, as `0xRRGGBB`.
    pub shadow_fill: u32,
    /// Playback speed multiplier applied to the frame delta.
    pub time_scale: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewerConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            public_url: DEFAULT_PUBLIC_URL.to_string(),
            scale: DEFAULT_SCALE,
            duration_unit_ms: DEFAULT_DURATION_UNIT_MS,
            shadow_fill: DEFAULT_SHADOW_FILL,
            time_scale: DEFAULT_TIME_SCALE,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let text = std::fs::read_to_string(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.load_from_str(&text)?;

        info!(
            "Loaded config: {}x{} window, fps={}, public_url={}, scale={}, unit={}ms, time_scale={}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.public_url,
            self.scale,
            self.duration_unit_ms,
            self.time_scale
        );

        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }

        // [assets] section
        if let Some(url) = config.get("assets", "public_url") {
            self.public_url = url.trim_end_matches('/').to_string();
        }

        // [scene] section
        if let Some(scale) = config.getfloat("scene", "scale").ok().flatten() {
            if scale > 0.0 {
                self.scale = scale as f32;
            }
        }
        if let Some(unit) = config.getuint("scene", "duration_unit_ms").ok().flatten() {
            self.duration_unit_ms = unit as u32;
        }
        if let Some(time_scale) = config.getfloat("scene", "time_scale").ok().flatten() {
            if time_scale > 0.0 {
                self.time_scale = time_scale as f32;
            }
        }
        if let Some(fill) = config.get("scene", "shadow_fill") {
            let hex = fill.trim_start_matches('#').trim_start_matches("0x");
            if let Ok(rgb) = u32::from_str_radix(hex, 16) {
                self.shadow_fill = rgb & 0xffffff;
            }
        }
    }

    /// Path of the background image for `dungeon`.
    pub fn map_path(&self, dungeon: &str) -> String {
        format!("{}/maps/{}.png", self.public_url, dungeon)
    }

    /// The shadow fill as an opaque raylib color.
    pub fn shadow_fill_color(&self) -> Color {
        Color::new(
            ((self.shadow_fill >> 16) & 0xff) as u8,
            ((self.shadow_fill >> 8) & 0xff) as u8,
            (self.shadow_fill & 0xff) as u8,
            255,
        )
    }
}
