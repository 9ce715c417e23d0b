//! Vector helpers on top of `glam::Vec2`.
//!
//! Addition, scaling, dot products and magnitudes come straight from glam;
//! this module only adds the pieces the collision code needs on top.

use glam::Vec2;

/// Unit vector pointing along `v`.
///
/// Falls back to `Vec2::Y` for a zero (or non-finite) vector so coincident
/// centers still produce a usable contact normal.
#[inline]
pub fn unit_normal(v: Vec2) -> Vec2 {
    v.try_normalize().unwrap_or(Vec2::Y)
}

/// Unit tangent for a unit normal: the normal rotated a quarter turn, `(-y, x)`.
#[inline]
pub fn tangent(normal: Vec2) -> Vec2 {
    normal.perp()
}

/// Component-wise scale, used for offsets that follow a transform's scale.
#[inline]
pub fn scale_by(v: Vec2, scale: Vec2) -> Vec2 {
    v * scale
}
