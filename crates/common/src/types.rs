use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// A 32-bit packed pixel laid out as `0xAARRGGBB`.
///
/// Frame buffers are plain `u32` slices; `ColorArgb` is `repr(transparent)`
/// so a buffer can be viewed as `[ColorArgb]` without copying.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct ColorArgb(pub u32);

impl ColorArgb {
    pub const BLACK: Self = Self::from_xrgb(0, 0, 0);
    pub const WHITE: Self = Self::from_xrgb(0xFF, 0xFF, 0xFF);

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Opaque color; the alpha byte is forced to `0xFF`.
    pub const fn from_xrgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_argb(0xFF, r, g, b)
    }

    #[inline]
    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    /// View a raw `u32` frame buffer as packed colors.
    pub fn cast_buffer_mut(buffer: &mut [u32]) -> &mut [ColorArgb] {
        bytemuck::cast_slice_mut(buffer)
    }
}

impl std::fmt::Display for ColorArgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.a(), self.r(), self.g(), self.b())
    }
}

/// Integer 2D vector used for screen positions and window sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vec2i {
    pub x: i32,
    pub y: i32,
}

impl Vec2i {
    pub const ZERO: Self = Self::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Sub for Vec2i {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::AddAssign for Vec2i {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_unpack_in_argb_order() {
        let c = ColorArgb::from_argb(0x11, 0x22, 0x33, 0x44);
        assert_eq!(c.0, 0x1122_3344);
        assert_eq!((c.a(), c.r(), c.g(), c.b()), (0x11, 0x22, 0x33, 0x44));
    }

    #[test]
    fn xrgb_is_opaque() {
        let c = ColorArgb::from_xrgb(0xDD, 0xCC, 0xDD);
        assert_eq!(c.a(), 0xFF);
        assert_eq!(c.0, 0xFFDD_CCDD);
    }

    #[test]
    fn raw_buffer_casts_without_copy() {
        let mut raw = vec![0u32; 4];
        let colors = ColorArgb::cast_buffer_mut(&mut raw);
        colors[2] = ColorArgb::WHITE;
        assert_eq!(raw[2], 0xFFFF_FFFF);
    }

    #[test]
    fn vec2i_arithmetic() {
        let mut a = Vec2i::new(3, 4);
        a += Vec2i::new(1, 1);
        assert_eq!(a - Vec2i::new(4, 5), Vec2i::ZERO);
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(ColorArgb::from_xrgb(1, 2, 3).to_string(), "#FF010203");
    }
}
