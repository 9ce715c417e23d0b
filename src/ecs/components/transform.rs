//! Transform components for ECS entities.

use glam::Vec2;

/// Spatial transform. Shapes do not rotate, so only position and scale are kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    /// Per-axis scale. Colliders follow it through `collider_scale_system`.
    pub scale: Vec2,
}

impl Transform {
    /// Create an identity transform.
    pub fn identity() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: Vec2::ONE,
        }
    }

    /// Create a transform from a position.
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            scale: Vec2::ONE,
        }
    }

    /// Create a transform from a position and a per-axis scale.
    pub fn from_position_scale(position: Vec2, scale: Vec2) -> Self {
        Self { position, scale }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Marker for entities the physics tick must ignore entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Disabled;
