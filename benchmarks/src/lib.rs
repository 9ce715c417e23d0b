//! Shared setup helpers for rebound2d benchmarks.
//!
//! ## Running
//!
//! Wall-clock (criterion):
//!   cargo bench --manifest-path benchmarks/Cargo.toml --bench physics
//!
//! iai-callgrind (instruction counts, requires valgrind):
//!   cargo install iai-callgrind-runner
//!   cargo bench --manifest-path benchmarks/Cargo.toml --bench physics_iai
//!
//! Filter by group:
//!   cargo bench --manifest-path benchmarks/Cargo.toml --bench physics -- broadphase

use glam::Vec2;
use rebound2d::ecs::components::physics::{Collider, RigidBody};
use rebound2d::ecs::components::transform::Transform;
use rebound2d::physics::{PhysicsConfig, PhysicsWorld};

// ---------------------------------------------------------------------------
// Basic scenes
// ---------------------------------------------------------------------------

fn grid_position(i: usize, cols: usize, spacing: f32) -> Vec2 {
    Vec2::new((i % cols) as f32 * spacing, (i / cols) as f32 * spacing)
}

fn grid_cols(n: usize) -> usize {
    ((n as f32).sqrt().ceil() as usize).max(1)
}

/// Spawn `n` moving circles in a grid so neighbours overlap.
pub fn setup_circle_world(n: usize) -> hecs::World {
    let mut world = hecs::World::new();
    let cols = grid_cols(n);

    for i in 0..n {
        world.spawn((
            Transform::from_position(grid_position(i, cols, 15.0)),
            RigidBody::new(1.0)
                .expect("valid mass")
                .with_velocity(Vec2::new(10.0, 0.0)),
            Collider::circle(10.0).expect("valid radius"),
        ));
    }
    world
}

/// Mixed scene: half moving circles, half static boxes.
pub fn setup_mixed_world(n: usize) -> hecs::World {
    let mut world = hecs::World::new();
    let cols = grid_cols(n);

    for i in 0..n {
        let position = grid_position(i, cols, 15.0);
        if i % 2 == 0 {
            world.spawn((
                Transform::from_position(position),
                RigidBody::new(1.0).expect("valid mass"),
                Collider::circle(10.0).expect("valid radius"),
            ));
        } else {
            world.spawn((
                Transform::from_position(position),
                Collider::boxed(10.0, 10.0).expect("valid extent"),
            ));
        }
    }
    world
}

/// Sparse scene: bodies spread far apart (no overlaps).
pub fn setup_sparse_world(n: usize) -> hecs::World {
    let mut world = hecs::World::new();
    let cols = grid_cols(n);

    for i in 0..n {
        world.spawn((
            Transform::from_position(grid_position(i, cols, 100.0)),
            RigidBody::new(1.0).expect("valid mass"),
            Collider::boxed(10.0, 10.0).expect("valid extent"),
        ));
    }
    world
}

/// Floor + `n` falling bodies above it (mixed circles/boxes).
pub fn setup_scene(n: usize) -> (hecs::World, PhysicsWorld) {
    let mut world = hecs::World::new();
    let cols = grid_cols(n);

    world.spawn((
        Transform::from_position(Vec2::new(cols as f32 * 10.0, 400.0)),
        Collider::boxed(cols as f32 * 40.0, 20.0)
            .expect("valid extent")
            .with_restitution(0.3)
            .expect("valid restitution"),
    ));

    for i in 0..n {
        let position = grid_position(i, cols, 20.0);
        let body = RigidBody::new(1.0)
            .and_then(|rb| rb.with_gravity(1.0))
            .expect("valid rigid body");
        let collider = if i % 2 == 0 {
            Collider::circle(8.0).expect("valid radius")
        } else {
            Collider::boxed(16.0, 16.0).expect("valid extent")
        };
        world.spawn((Transform::from_position(position), body, collider));
    }

    (world, PhysicsWorld::new(PhysicsConfig::default()))
}

/// Run `frames` fixed steps, spawning `spawn_per_frame` boxes at the top each frame.
pub fn run_rain(
    world: &mut hecs::World,
    physics: &mut PhysicsWorld,
    frames: usize,
    spawn_per_frame: usize,
) {
    for frame in 0..frames {
        for k in 0..spawn_per_frame {
            let x = ((frame * spawn_per_frame + k) % 32) as f32 * 12.0;
            world.spawn((
                Transform::from_position(Vec2::new(x, 0.0)),
                RigidBody::new(1.0)
                    .and_then(|rb| rb.with_gravity(1.0))
                    .expect("valid rigid body"),
                Collider::boxed(10.0, 10.0).expect("valid extent"),
            ));
        }
        physics.step(world, 1.0 / 60.0);
    }
}

/// Empty world with only the floor, for `run_rain`.
pub fn setup_rain_scene() -> (hecs::World, PhysicsWorld) {
    let mut world = hecs::World::new();
    world.spawn((
        Transform::from_position(Vec2::new(192.0, 400.0)),
        Collider::boxed(400.0, 20.0).expect("valid extent"),
    ));
    (world, PhysicsWorld::new(PhysicsConfig::default()))
}
