use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use volition_common::ColorArgb;

/// Stable index of a material in the world's material list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MaterialId(pub u32);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShadeMode {
    Emissive,
    #[default]
    Flat,
    Gouraud,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Material {
    pub name: String,
    pub color: ColorArgb,
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    pub power: f32,
    pub shade_mode: ShadeMode,
    pub two_sided: bool,
    /// Non-opaque materials are drawn through the alpha interpolator.
    pub alpha: u8,
    pub texture: Option<PathBuf>,
    initialized: bool,
}

impl Material {
    pub fn init(&mut self) {
        *self = Self {
            name: "default".into(),
            color: ColorArgb::WHITE,
            ambient: 1.0,
            diffuse: 1.0,
            specular: 0.0,
            power: 1.0,
            alpha: 0xFF,
            initialized: true,
            ..Self::default()
        };
    }

    /// Drops the texture binding. Safe to call twice.
    pub fn destroy(&mut self) {
        if let Some(texture) = self.texture.take() {
            tracing::debug!(material = %self.name, texture = %texture.display(), "texture released");
        }
        self.initialized = false;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_transparent(&self) -> bool {
        self.alpha < 0xFF
    }
}
