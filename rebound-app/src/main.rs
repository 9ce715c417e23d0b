use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use glam::Vec2;
use rebound2d::ecs::components::physics::{Collider, RigidBody};
use rebound2d::ecs::components::script::{CollisionScript, Scripts};
use rebound2d::ecs::components::transform::Transform;
use rebound2d::ecs::systems::collider_scale_system;
use rebound2d::physics::{PhysicsConfig, PhysicsWorld};
use tracing_subscriber::EnvFilter;

const FRAME_TIME: f64 = 1.0 / 60.0;
const FRAMES: usize = 180;

/// Counts how often the player touched the pickup zone.
struct PickupCounter(Arc<AtomicUsize>);

impl CollisionScript for PickupCounter {
    fn collision_event(&mut self, _other: hecs::Entity, other_collider: &Collider) {
        if other_collider.is_trigger {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn collision_exit_event(&mut self, other: hecs::Entity, _other_collider: Option<&Collider>) {
        tracing::info!(?other, "left contact");
    }
}

struct Playground {
    player: hecs::Entity,
    ball: hecs::Entity,
    pickups: Arc<AtomicUsize>,
}

impl Playground {
    fn init(world: &mut hecs::World) -> anyhow::Result<Self> {
        // Floor and walls
        world.spawn((
            Transform::from_position(Vec2::new(200.0, 310.0)),
            Collider::boxed(400.0, 20.0)?.with_restitution(0.2)?,
        ));
        world.spawn((
            Transform::from_position(Vec2::new(-10.0, 150.0)),
            Collider::boxed(20.0, 300.0)?.with_restitution(0.8)?,
        ));
        world.spawn((
            Transform::from_position_scale(Vec2::new(410.0, 150.0), Vec2::new(1.0, 2.0)),
            Collider::boxed(20.0, 150.0)?.with_restitution(0.8)?,
        ));

        // Pickup zone in the player's path
        world.spawn((
            Transform::from_position(Vec2::new(200.0, 280.0)),
            Collider::boxed(40.0, 40.0)?.as_trigger(),
        ));

        let pickups = Arc::new(AtomicUsize::new(0));
        let player = world.spawn((
            Transform::from_position(Vec2::new(40.0, 200.0)),
            RigidBody::new(1.0)?
                .with_velocity(Vec2::new(150.0, 0.0))
                .with_gravity(1.0)?,
            Collider::boxed(20.0, 20.0)?.with_surface_friction(0.9)?,
            Scripts::new().with(PickupCounter(pickups.clone())),
        ));

        let ball = world.spawn((
            Transform::from_position(Vec2::new(300.0, 50.0)),
            RigidBody::new(0.5)?
                .with_velocity(Vec2::new(-80.0, 0.0))
                .with_gravity(1.0)?,
            Collider::circle(10.0)?,
        ));

        collider_scale_system(world);

        Ok(Self {
            player,
            ball,
            pickups,
        })
    }

    fn report(&self, world: &hecs::World, frame: usize) -> anyhow::Result<()> {
        let player = world.get::<&Transform>(self.player)?.position;
        let ball = world.get::<&Transform>(self.ball)?.position;
        tracing::info!(
            frame,
            player_x = player.x,
            player_y = player.y,
            ball_x = ball.x,
            ball_y = ball.y,
            "positions"
        );
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = PhysicsConfig {
        collision_exit_events: true,
        ..PhysicsConfig::default()
    };
    let mut physics = PhysicsWorld::try_new(config)?;
    let mut world = hecs::World::new();
    let playground = Playground::init(&mut world)?;

    for frame in 0..FRAMES {
        physics.step(&mut world, FRAME_TIME);
        if frame % 30 == 0 {
            playground.report(&world, frame)?;
        }
    }

    tracing::info!(
        pickups = playground.pickups.load(Ordering::Relaxed),
        "simulation finished"
    );
    Ok(())
}
