use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};
use volition_common::ColorArgb;

/// Stable index of a light in the world's light list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LightId(pub u32);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightType {
    #[default]
    Ambient,
    Infinite,
    Point,
    Spot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub kind: LightType,
    pub active: bool,
    pub color: ColorArgb,
    pub intensity: f32,
    pub position: Vec4,
    pub direction: Vec4,
    /// Constant, linear, quadratic attenuation terms.
    pub attenuation: Vec3,
    /// Inner/outer cone angles in degrees, spot lights only.
    pub spot_angles: (f32, f32),
}

impl Default for Light {
    fn default() -> Self {
        Self {
            kind: LightType::Ambient,
            active: false,
            color: ColorArgb::BLACK,
            intensity: 0.0,
            position: Vec4::W,
            direction: Vec4::new(0.0, 0.0, 1.0, 1.0),
            attenuation: Vec3::X,
            spot_angles: (0.0, 0.0),
        }
    }
}

impl Light {
    pub fn init(&mut self, kind: LightType) {
        *self = Self {
            kind,
            active: true,
            color: ColorArgb::WHITE,
            intensity: 1.0,
            ..Self::default()
        };
        match kind {
            LightType::Ambient => {
                self.intensity = 0.25;
            }
            LightType::Infinite => {
                self.direction = Vec4::new(0.0, -1.0, 0.0, 1.0);
            }
            LightType::Point => {
                self.attenuation = Vec3::new(1.0, 0.001, 0.0);
            }
            LightType::Spot => {
                self.direction = Vec4::new(0.0, -1.0, 0.0, 1.0);
                self.attenuation = Vec3::new(1.0, 0.001, 0.0);
                self.spot_angles = (30.0, 45.0);
            }
        }
    }

    pub fn destroy(&mut self) {
        *self = Self::default();
    }
}
