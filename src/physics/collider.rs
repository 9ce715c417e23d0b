//! World-space rectangles for collider shapes.

use glam::Vec2;

use crate::ecs::components::physics::{Collider, ColliderShape};

/// Axis-aligned bounding box in world space (y-down: `min.y` is the top edge).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Rectangle of the given full size centered on `center`.
    #[inline]
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Test whether two rectangles overlap. Touching edges count as overlapping.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    /// Closest point on or inside the rectangle, clamping each axis independently.
    #[inline]
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }
}

impl Collider {
    /// Shape center in world space: the owner's position plus the collider offset.
    #[inline]
    pub fn world_center(&self, position: Vec2) -> Vec2 {
        position + self.offset()
    }

    /// World rectangle of the collider.
    ///
    /// A circle yields its `2r x 2r` bounding square, which is the box that
    /// stands in for the circle when a circle/box pair is resolved.
    pub fn world_aabb(&self, position: Vec2) -> Aabb {
        let center = self.world_center(position);
        match *self.shape() {
            ColliderShape::Box { size } => Aabb::from_center_size(center, size),
            ColliderShape::Circle { radius } => {
                Aabb::from_center_size(center, Vec2::splat(radius * 2.0))
            }
        }
    }

    /// World rectangle of the tolerance hitbox, for box colliders only.
    pub fn tolerance_aabb(&self, position: Vec2) -> Option<Aabb> {
        self.tolerance_size()
            .map(|size| Aabb::from_center_size(self.world_center(position), size))
    }
}
