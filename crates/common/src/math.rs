//! Vector helpers on top of `glam`.
//!
//! Homogeneous points keep `w = 1` through every operation here; callers that
//! need a projective divide do it explicitly.

use glam::{Vec3, Vec4};

/// Lengths below this are treated as the zero vector.
pub const EPSILON_5: f32 = 1e-5;

/// Unit vector in the direction of `v`, or zero when `|v| < EPSILON_5`.
#[inline]
pub fn normalized(v: Vec3) -> Vec3 {
    let len = v.length();
    if len < EPSILON_5 {
        return Vec3::ZERO;
    }
    v * (1.0 / len)
}

/// Normalizes in place; near-zero vectors are left untouched.
#[inline]
pub fn normalize_in_place(v: &mut Vec3) {
    let len = v.length();
    if len < EPSILON_5 {
        return;
    }
    *v *= 1.0 / len;
}

/// Normalizes the xyz part of a homogeneous point, `w` forced to 1.
/// Near-zero input yields `(0, 0, 0, 1)`.
#[inline]
pub fn normalized_point(p: Vec4) -> Vec4 {
    let n = normalized(p.truncate());
    n.extend(1.0)
}

/// Divides the xyz part of a homogeneous point by `scalar`, `w` forced to 1.
#[inline]
pub fn div_point(p: Vec4, scalar: f32) -> Vec4 {
    let inv = 1.0 / scalar;
    Vec4::new(p.x * inv, p.y * inv, p.z * inv, 1.0)
}

/// Folds an angle in degrees into `[0, 360)`.
///
/// Uses a truncating remainder, so negative input is shifted up by one turn.
/// A tiny negative remainder can round to exactly 360 after the shift; that
/// case folds to 0. Non-finite input has no meaningful angle and maps to 0.
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let mut a = angle % 360.0;
    if a < 0.0 {
        a += 360.0;
    }
    if a >= 360.0 {
        a = 0.0;
    }
    a
}
