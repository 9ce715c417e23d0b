//! Narrowphase collision detection: pairwise overlap tests for boxes and circles.

use glam::Vec2;

use crate::ecs::components::physics::{Collider, ColliderShape};

use super::collider::Aabb;

/// Unordered shape pair, used to pick the detector and resolver for a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapePair {
    BoxBox,
    CircleCircle,
    /// One circle and one box, in either order.
    CircleBox,
}

impl ShapePair {
    pub fn classify(a: &ColliderShape, b: &ColliderShape) -> Self {
        match (a, b) {
            (ColliderShape::Box { .. }, ColliderShape::Box { .. }) => ShapePair::BoxBox,
            (ColliderShape::Circle { .. }, ColliderShape::Circle { .. }) => {
                ShapePair::CircleCircle
            }
            (ColliderShape::Circle { .. }, ColliderShape::Box { .. })
            | (ColliderShape::Box { .. }, ColliderShape::Circle { .. }) => ShapePair::CircleBox,
        }
    }
}

/// Box-box test on world rectangles. Touching edges count as a hit.
#[inline]
pub fn box_box(aabb_a: &Aabb, aabb_b: &Aabb) -> bool {
    aabb_a.overlaps(aabb_b)
}

/// Circle-circle test. Tangent circles do not collide.
#[inline]
pub fn circle_circle(center_a: Vec2, radius_a: f32, center_b: Vec2, radius_b: f32) -> bool {
    let radius_sum = radius_a + radius_b;
    (center_b - center_a).length_squared() < radius_sum * radius_sum
}

/// Circle-box test against the closest point on (or inside) the box.
#[inline]
pub fn circle_box(center: Vec2, radius: f32, aabb: &Aabb) -> bool {
    let closest = aabb.closest_point(center);
    (closest - center).length_squared() < radius * radius
}

/// Box-box test on the enlarged tolerance hitboxes.
///
/// Flags near-contact for rest detection; resolution does not consume it.
/// Returns false unless both colliders are boxes.
pub fn tolerance_overlap(
    collider_a: &Collider,
    position_a: Vec2,
    collider_b: &Collider,
    position_b: Vec2,
) -> bool {
    match (
        collider_a.tolerance_aabb(position_a),
        collider_b.tolerance_aabb(position_b),
    ) {
        (Some(a), Some(b)) => box_box(&a, &b),
        _ => false,
    }
}

/// Detect overlap between two colliders, dispatching on the shape pair.
pub fn detect_collision(
    collider_a: &Collider,
    position_a: Vec2,
    collider_b: &Collider,
    position_b: Vec2,
) -> bool {
    match (*collider_a.shape(), *collider_b.shape()) {
        (ColliderShape::Box { .. }, ColliderShape::Box { .. }) => box_box(
            &collider_a.world_aabb(position_a),
            &collider_b.world_aabb(position_b),
        ),
        (ColliderShape::Circle { radius: ra }, ColliderShape::Circle { radius: rb }) => {
            circle_circle(
                collider_a.world_center(position_a),
                ra,
                collider_b.world_center(position_b),
                rb,
            )
        }
        (ColliderShape::Circle { radius }, ColliderShape::Box { .. }) => circle_box(
            collider_a.world_center(position_a),
            radius,
            &collider_b.world_aabb(position_b),
        ),
        (ColliderShape::Box { .. }, ColliderShape::Circle { radius }) => circle_box(
            collider_b.world_center(position_b),
            radius,
            &collider_a.world_aabb(position_a),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn boxed(w: f32, h: f32) -> Collider {
        Collider::boxed(w, h).unwrap()
    }

    fn circle(r: f32) -> Collider {
        Collider::circle(r).unwrap()
    }

    #[test]
    fn test_classify() {
        let b = *boxed(1.0, 1.0).shape();
        let c = *circle(1.0).shape();
        assert_eq!(ShapePair::classify(&b, &b), ShapePair::BoxBox);
        assert_eq!(ShapePair::classify(&c, &c), ShapePair::CircleCircle);
        assert_eq!(ShapePair::classify(&c, &b), ShapePair::CircleBox);
        assert_eq!(ShapePair::classify(&b, &c), ShapePair::CircleBox);
    }

    #[test]
    fn test_box_box_intersection() {
        let a = boxed(10.0, 10.0);
        let b = boxed(10.0, 10.0);
        assert!(detect_collision(&a, Vec2::new(10.0, 0.0), &b, Vec2::new(15.0, 0.0)));
        assert!(!detect_collision(&a, Vec2::ZERO, &b, Vec2::new(15.0, 0.0)));
    }

    #[test]
    fn test_box_box_touching_edges_collide() {
        let a = boxed(10.0, 10.0);
        let b = boxed(10.0, 10.0);
        assert!(detect_collision(&a, Vec2::ZERO, &b, Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn test_circle_circle_boundary() {
        let a = circle(5.0);
        let b = circle(5.0);
        assert!(!detect_collision(&a, Vec2::ZERO, &b, Vec2::new(10.0, 0.0)));
        assert!(detect_collision(&a, Vec2::ZERO, &b, Vec2::new(9.99, 0.0)));
    }

    #[test]
    fn test_circle_box_corner_and_face() {
        let c = circle(2.0);
        let b = boxed(10.0, 10.0);

        // Face contact on the right side of the box
        assert!(detect_collision(&c, Vec2::new(6.5, 0.0), &b, Vec2::ZERO));
        assert!(!detect_collision(&c, Vec2::new(7.5, 0.0), &b, Vec2::ZERO));

        // Near a corner the bounding square would overlap but the circle does not
        assert!(!detect_collision(&c, Vec2::new(6.8, 6.8), &b, Vec2::ZERO));
        assert!(detect_collision(&c, Vec2::new(6.0, 6.0), &b, Vec2::ZERO));
    }

    #[test]
    fn test_circle_inside_box() {
        let c = circle(1.0);
        let b = boxed(10.0, 10.0);
        assert!(detect_collision(&c, Vec2::new(1.0, 1.0), &b, Vec2::ZERO));
    }

    #[test]
    fn test_box_circle_order_is_irrelevant() {
        let c = circle(2.0);
        let b = boxed(10.0, 10.0);
        let pc = Vec2::new(6.5, 0.0);
        assert_eq!(
            detect_collision(&c, pc, &b, Vec2::ZERO),
            detect_collision(&b, Vec2::ZERO, &c, pc)
        );
    }

    #[test]
    fn test_circle_offset_is_respected() {
        let c = circle(1.0).with_offset(Vec2::new(20.0, 0.0));
        let other = circle(1.0);
        assert!(detect_collision(&c, Vec2::ZERO, &other, Vec2::new(21.0, 0.0)));
        assert!(!detect_collision(&c, Vec2::ZERO, &other, Vec2::new(1.0, 0.0)));
    }

    #[test]
    fn test_tolerance_overlap() {
        let a = boxed(10.0, 10.0);
        let b = boxed(10.0, 10.0);
        // 4 units apart: real boxes miss, tolerance boxes (20x20) overlap
        let pa = Vec2::ZERO;
        let pb = Vec2::new(14.0, 0.0);
        assert!(!detect_collision(&a, pa, &b, pb));
        assert!(tolerance_overlap(&a, pa, &b, pb));
        assert!(!tolerance_overlap(&a, pa, &b, Vec2::new(25.0, 0.0)));
        assert!(!tolerance_overlap(&a, pa, &circle(5.0), pb));
    }

    proptest! {
        #[test]
        fn prop_box_box_symmetric(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0,
            bx in -100.0f32..100.0, by in -100.0f32..100.0,
            aw in 0.0f32..50.0, ah in 0.0f32..50.0,
            bw in 0.0f32..50.0, bh in 0.0f32..50.0,
        ) {
            let a = boxed(aw, ah);
            let b = boxed(bw, bh);
            let pa = Vec2::new(ax, ay);
            let pb = Vec2::new(bx, by);
            prop_assert_eq!(
                detect_collision(&a, pa, &b, pb),
                detect_collision(&b, pb, &a, pa)
            );
        }

        #[test]
        fn prop_circle_circle_symmetric(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0,
            bx in -100.0f32..100.0, by in -100.0f32..100.0,
            ra in 0.0f32..50.0, rb in 0.0f32..50.0,
        ) {
            let pa = Vec2::new(ax, ay);
            let pb = Vec2::new(bx, by);
            prop_assert_eq!(
                circle_circle(pa, ra, pb, rb),
                circle_circle(pb, rb, pa, ra)
            );
        }
    }
}
