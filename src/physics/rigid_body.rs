//! Rigid body integration functions.

use glam::Vec2;

use crate::ecs::components::physics::RigidBody;
use crate::ecs::components::transform::Transform;

/// Advance one body by `dt`: position first, then gravity.
///
/// Gravity is only accumulated while the squared speed is below
/// `terminal_speed²`. A body already at or above terminal speed is left as
/// is rather than slowed down.
pub fn integrate_motion(
    transform: &mut Transform,
    rb: &mut RigidBody,
    gravity: Vec2,
    terminal_speed: f32,
    dt: f32,
) {
    transform.position += rb.velocity * dt;

    if rb.gravity_enabled && rb.velocity.length_squared() < terminal_speed * terminal_speed {
        rb.velocity += gravity * rb.gravity_scale * dt;
    }
}

/// Integrate the listed entities that carry both a transform and a rigid body.
///
/// Entities missing either component are skipped.
pub fn integrate_bodies(
    world: &mut hecs::World,
    entities: &[hecs::Entity],
    gravity: Vec2,
    terminal_speed: f32,
    dt: f32,
) -> usize {
    let mut integrated = 0;
    for &entity in entities {
        if let Ok((transform, rb)) = world.query_one_mut::<(&mut Transform, &mut RigidBody)>(entity)
        {
            integrate_motion(transform, rb, gravity, terminal_speed, dt);
            integrated += 1;
        }
    }
    integrated
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const GRAVITY: Vec2 = Vec2::new(0.0, 500.0);

    #[test]
    fn test_free_fall() {
        let mut transform = Transform::from_position(Vec2::ZERO);
        let mut rb = RigidBody::new(1.0).unwrap().with_gravity(1.0).unwrap();

        let dt = 1.0 / 60.0;
        for _ in 0..60 {
            integrate_motion(&mut transform, &mut rb, GRAVITY, 800.0, dt);
        }

        // y-down: the body falls toward positive y
        assert!(
            transform.position.y > 0.0,
            "Body should have fallen: y = {}",
            transform.position.y
        );
        assert!(rb.velocity.y > 0.0);
        assert_eq!(transform.position.x, 0.0);
    }

    #[test]
    fn test_position_uses_velocity_before_gravity() {
        let mut transform = Transform::from_position(Vec2::ZERO);
        let mut rb = RigidBody::new(1.0)
            .unwrap()
            .with_velocity(Vec2::new(100.0, 0.0))
            .with_gravity(1.0)
            .unwrap();

        integrate_motion(&mut transform, &mut rb, GRAVITY, 800.0, 0.1);

        let eps = 1e-5;
        assert!((transform.position - Vec2::new(10.0, 0.0)).length() < eps);
        assert!((rb.velocity.y - 50.0).abs() < eps);
    }

    #[test]
    fn test_terminal_speed_stops_gravity() {
        let mut transform = Transform::identity();
        let mut rb = RigidBody::new(1.0)
            .unwrap()
            .with_velocity(Vec2::new(0.0, 800.0))
            .with_gravity(1.0)
            .unwrap();

        integrate_motion(&mut transform, &mut rb, GRAVITY, 800.0, 0.1);
        assert_eq!(rb.velocity, Vec2::new(0.0, 800.0));

        // Above terminal speed the body keeps its speed, it is not clamped down
        rb.velocity = Vec2::new(0.0, 1200.0);
        integrate_motion(&mut transform, &mut rb, GRAVITY, 800.0, 0.1);
        assert_eq!(rb.velocity, Vec2::new(0.0, 1200.0));

        rb.velocity = Vec2::new(0.0, 799.0);
        integrate_motion(&mut transform, &mut rb, GRAVITY, 800.0, 0.1);
        assert!(rb.velocity.y > 799.0);
    }

    #[test]
    fn test_integrate_bodies_skips_missing_components() {
        let mut world = hecs::World::new();
        let moving = world.spawn((
            Transform::identity(),
            RigidBody::new(1.0)
                .unwrap()
                .with_velocity(Vec2::new(1.0, 2.0)),
        ));
        let bare = world.spawn((Transform::identity(),));

        let count = integrate_bodies(&mut world, &[moving, bare], GRAVITY, 800.0, 1.0);
        assert_eq!(count, 1);

        let transform = world.get::<&Transform>(moving).unwrap();
        assert_eq!(transform.position, Vec2::new(1.0, 2.0));
    }

    proptest! {
        #[test]
        fn prop_no_gravity_keeps_velocity(
            vx in -1000.0f32..1000.0,
            vy in -1000.0f32..1000.0,
            dt in 0.0f32..1.0,
            scale in 0.0f32..5.0,
            enabled in any::<bool>(),
        ) {
            let mut transform = Transform::identity();
            let mut rb = RigidBody::new(1.0).unwrap().with_velocity(Vec2::new(vx, vy));
            if enabled {
                // Enabled but with zero scale
                rb = rb.with_gravity(0.0).unwrap();
            } else {
                rb.gravity_scale = scale;
            }

            integrate_motion(&mut transform, &mut rb, GRAVITY, 800.0, dt);

            prop_assert_eq!(rb.velocity, Vec2::new(vx, vy));
            prop_assert_eq!(transform.position, Vec2::new(vx, vy) * dt);
        }
    }
}
