//! Contact data structures for collision response.

use glam::Vec2;

use crate::ecs::components::physics::RigidBody;

use super::collider::Aabb;

/// Which edge of the acting box struck the other box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOrientation {
    Top,
    Bottom,
    Left,
    Right,
}

impl HitOrientation {
    /// Classify a box hit from the Minkowski sum of the two rectangles.
    ///
    /// `dx` runs from A to B while `dy` runs from B to A. Comparisons are
    /// strict, so an exact diagonal tie falls through to the `else` branch.
    pub fn between(a: &Aabb, b: &Aabb) -> Self {
        let size_a = a.size();
        let size_b = b.size();
        let width = 0.5 * (size_a.x + size_b.x);
        let height = 0.5 * (size_a.y + size_b.y);

        let center_a = a.center();
        let center_b = b.center();
        let dx = center_b.x - center_a.x;
        let dy = center_a.y - center_b.y;

        let wy = width * dy;
        let hx = height * dx;

        if wy > hx {
            if wy > -hx {
                HitOrientation::Top
            } else {
                HitOrientation::Left
            }
        } else if wy > -hx {
            HitOrientation::Right
        } else {
            HitOrientation::Bottom
        }
    }

    /// True when the impact axis is y.
    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, HitOrientation::Top | HitOrientation::Bottom)
    }

    /// Per-axis sign flip: -1 on the axis of impact, +1 on the other.
    #[inline]
    pub fn sign_flip(self) -> Vec2 {
        if self.is_vertical() {
            Vec2::new(1.0, -1.0)
        } else {
            Vec2::new(-1.0, 1.0)
        }
    }
}

/// Resolution snapshot of one side of a pair.
///
/// The tick copies entity state in, resolves, and writes it back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub rigid_body: Option<RigidBody>,
}

/// Two entities that overlapped during the current tick.
///
/// `entity_a` is the acting side: the one that was integrated and, if it has
/// a rigid body, pushed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionPair {
    pub entity_a: hecs::Entity,
    pub entity_b: hecs::Entity,
}

impl CollisionPair {
    /// Same two entities, in either order.
    #[inline]
    pub fn same_entities(&self, other: &CollisionPair) -> bool {
        (self.entity_a == other.entity_a && self.entity_b == other.entity_b)
            || (self.entity_a == other.entity_b && self.entity_b == other.entity_a)
    }
}
