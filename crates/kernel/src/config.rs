//! Engine configuration, loaded once at startup from JSON.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use volition_common::{ColorArgb, Vec2i};

/// Errors from loading or validating an [`EngineConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Render settings. The user-facing half; values the rasterizer derives at
/// runtime (pixel format, clip rectangles) live with the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSpec {
    pub limit_fps: bool,
    pub render_solid: bool,
    pub backface_removal: bool,
    pub post_processing: bool,
    pub render_ui: bool,
    pub render_scale: f32,
    pub target_fps: u32,
    pub target_fixed_fps: u32,
    pub max_mip_maps: u32,
    pub post_process_color_correction: Vec3,
    pub debug_text_position: Vec2i,
    pub debug_text_color: ColorArgb,
}

impl RenderSpec {
    pub const DEFAULT_COLOR_CORRECTION: Vec3 = Vec3::ONE;
    pub const DEFAULT_DEBUG_TEXT_COLOR: ColorArgb = ColorArgb::from_xrgb(0xDD, 0xCC, 0xDD);
    /// Largest scaled frame edge, in pixels, a config may ask for.
    pub const MAX_FRAME_DIMENSION: u32 = 16_384;

    /// Fixed simulation step in milliseconds.
    pub fn fixed_delta_time(&self) -> f32 {
        1000.0 / self.target_fixed_fps as f32
    }

    /// Frame budget in milliseconds when fps limiting is on.
    pub fn frame_delta_time(&self) -> f32 {
        1000.0 / self.target_fps as f32
    }
}

impl Default for RenderSpec {
    fn default() -> Self {
        Self {
            limit_fps: false,
            render_solid: true,
            backface_removal: true,
            post_processing: true,
            render_ui: true,
            render_scale: 1.0,
            target_fps: 60,
            target_fixed_fps: 60,
            max_mip_maps: 8,
            post_process_color_correction: Self::DEFAULT_COLOR_CORRECTION,
            debug_text_position: Vec2i::ZERO,
            debug_text_color: Self::DEFAULT_DEBUG_TEXT_COLOR,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowMode {
    Fullscreen,
    Borderless,
    #[default]
    Windowed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSpec {
    pub name: String,
    pub desired_size: Vec2i,
    pub mode: WindowMode,
}

impl WindowSpec {
    pub fn aspect_ratio(&self) -> f32 {
        self.desired_size.x as f32 / self.desired_size.y.max(1) as f32
    }
}

impl Default for WindowSpec {
    fn default() -> Self {
        Self {
            name: "Volition".into(),
            desired_size: Vec2i::new(640, 480),
            mode: WindowMode::Windowed,
        }
    }
}

/// Top-level configuration owned by the [`World`](crate::World).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub render: RenderSpec,
    pub window: WindowSpec,
}

impl EngineConfig {
    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file on disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&data)?;
        tracing::info!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.render.target_fps == 0 || self.render.target_fixed_fps == 0 {
            return Err(ConfigError::Invalid("target fps must be non-zero".into()));
        }
        let scale = self.render.render_scale;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "render scale must be positive and finite, got {scale}"
            )));
        }
        let size = self.window.desired_size;
        if size.x <= 0 || size.y <= 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be positive, got {size:?}"
            )));
        }
        let max = f64::from(RenderSpec::MAX_FRAME_DIMENSION);
        let scaled_x = f64::from(size.x) * f64::from(scale);
        let scaled_y = f64::from(size.y) * f64::from(scale);
        if scaled_x > max || scaled_y > max {
            return Err(ConfigError::Invalid(format!(
                "scaled frame {scaled_x:.0}x{scaled_y:.0} exceeds {max} pixels per edge"
            )));
        }
        Ok(())
    }
}
