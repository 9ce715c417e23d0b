//! 2D collision detection and resolution with a per-tick driver.
//!
//! # Architecture
//!
//! Each call to [`PhysicsWorld::process`] runs one tick:
//!
//! 1. Clear the collision queue
//! 2. Integrate motion of every eligible body (gravity with terminal speed)
//! 3. Enumerate unordered candidate pairs (brute-force all pairs)
//! 4. Narrowphase overlap test dispatched on the shape pair
//! 5. Resolve non-trigger overlaps when the acting side has a rigid body
//! 6. Dispatch collision (and optionally exit) callbacks to scripts

pub mod broadphase;
pub mod collider;
pub mod contact;
pub mod narrowphase;
pub mod rigid_body;
pub mod solver;

use glam::Vec2;

use crate::ecs::components::physics::{Collider, RigidBody};
use crate::ecs::components::script::Scripts;
use crate::ecs::components::transform::Transform;
use crate::error::PhysicsError;

use self::broadphase::AllPairs;
use self::contact::{Body, CollisionPair};
use self::narrowphase::detect_collision;

/// How far the acting body is pushed out of an overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionCorrection {
    /// Half the penetration depth, leaving the rest for later ticks.
    #[default]
    Half,
    /// The whole penetration depth.
    Full,
}

impl PositionCorrection {
    #[inline]
    pub fn fraction(self) -> f32 {
        match self {
            PositionCorrection::Half => 0.5,
            PositionCorrection::Full => 1.0,
        }
    }
}

/// Configuration for the physics simulation.
#[derive(Debug, Clone)]
pub struct PhysicsConfig {
    /// Gravity vector, y-down. Default: (0, 500).
    pub gravity: Vec2,
    /// Gravity stops accumulating at this speed. Default: 800.
    pub terminal_speed: f32,
    /// Speeds below this on the impact axis are zeroed against static colliders. Default: 10.
    pub velocity_epsilon: f32,
    /// Depth of positional correction. Default: half.
    pub position_correction: PositionCorrection,
    /// Apply restitution to circle/circle responses. Default: false.
    pub circle_restitution: bool,
    /// Fire `collision_exit_event` for pairs that stopped overlapping. Default: false.
    pub collision_exit_events: bool,
    /// Fixed timestep for [`PhysicsWorld::step`] in seconds. Default: 1/60.
    pub fixed_timestep: f64,
    /// Maximum number of ticks per [`PhysicsWorld::step`]. Default: 4.
    pub max_substeps: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 500.0),
            terminal_speed: 800.0,
            velocity_epsilon: 10.0,
            position_correction: PositionCorrection::Half,
            circle_restitution: false,
            collision_exit_events: false,
            fixed_timestep: 1.0 / 60.0,
            max_substeps: 4,
        }
    }
}

impl PhysicsConfig {
    /// Reject values the tick cannot work with.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !self.gravity.is_finite() {
            return Err(PhysicsError::InvalidConfig("gravity must be finite"));
        }
        if !self.terminal_speed.is_finite() || self.terminal_speed < 0.0 {
            return Err(PhysicsError::InvalidConfig(
                "terminal speed must be finite and >= 0",
            ));
        }
        if !self.velocity_epsilon.is_finite() || self.velocity_epsilon < 0.0 {
            return Err(PhysicsError::InvalidConfig(
                "velocity epsilon must be finite and >= 0",
            ));
        }
        if !self.fixed_timestep.is_finite() || self.fixed_timestep <= 0.0 {
            return Err(PhysicsError::InvalidConfig(
                "fixed timestep must be finite and > 0",
            ));
        }
        if self.max_substeps == 0 {
            return Err(PhysicsError::InvalidConfig("max substeps must be >= 1"));
        }
        Ok(())
    }
}

/// Where the tick driver currently is.
///
/// A completed tick always ends in `Idle`. Any other value means the last
/// tick was cut short, e.g. by a panicking collision script, and names the
/// stage it stopped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TickPhase {
    #[default]
    Idle,
    Integrating,
    Scanning,
    Dispatching,
}

/// The physics world: owns the per-tick collision queue.
#[derive(Debug)]
pub struct PhysicsWorld {
    config: PhysicsConfig,
    accumulator: f64,
    broadphase: AllPairs,
    collisions: Vec<CollisionPair>,
    previous_collisions: Vec<CollisionPair>,
    phase: TickPhase,
}

impl PhysicsWorld {
    /// Create a new physics world with the given configuration.
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            accumulator: 0.0,
            broadphase: AllPairs::new(),
            collisions: Vec::new(),
            previous_collisions: Vec::new(),
            phase: TickPhase::Idle,
        }
    }

    /// Create a new physics world after validating the configuration.
    pub fn try_new(config: PhysicsConfig) -> Result<Self, PhysicsError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Collisions recorded by the most recent tick, in detection order.
    pub fn collisions(&self) -> &[CollisionPair] {
        &self.collisions
    }

    /// Diagnostic: the stage the driver is in, see [`TickPhase`].
    pub fn phase(&self) -> TickPhase {
        self.phase
    }

    fn enter_phase(&mut self, phase: TickPhase) {
        tracing::trace!(?phase, "tick phase");
        self.phase = phase;
    }

    /// Step the simulation forward by `delta_time` seconds of frame time.
    ///
    /// Runs whole ticks of `fixed_timestep` from an accumulator, at most
    /// `max_substeps` per call. Returns the number of ticks run.
    pub fn step(&mut self, world: &mut hecs::World, delta_time: f64) -> u32 {
        self.accumulator += delta_time;

        let mut substeps = 0u32;
        while self.accumulator >= self.config.fixed_timestep && substeps < self.config.max_substeps
        {
            self.process(world, self.config.fixed_timestep as f32);
            self.accumulator -= self.config.fixed_timestep;
            substeps += 1;
        }

        // Clamp accumulator to avoid spiral of death
        if self.accumulator > self.config.fixed_timestep * self.config.max_substeps as f64 {
            self.accumulator = 0.0;
        }

        substeps
    }

    /// Run one tick of `dt` seconds over every entity in `world`.
    pub fn process(&mut self, world: &mut hecs::World, dt: f32) {
        let _span = tracing::debug_span!("physics_tick", dt).entered();

        if self.config.collision_exit_events {
            std::mem::swap(&mut self.previous_collisions, &mut self.collisions);
        }
        self.collisions.clear();

        // 1. Integrate motion
        self.enter_phase(TickPhase::Integrating);
        let entries = self.broadphase.collect_entries(world);
        let moving: Vec<hecs::Entity> = entries
            .iter()
            .filter(|entry| entry.eligible && entry.has_rigid_body)
            .map(|entry| entry.entity)
            .collect();
        rigid_body::integrate_bodies(
            world,
            &moving,
            self.config.gravity,
            self.config.terminal_speed,
            dt,
        );

        // 2. Scan candidate pairs
        self.enter_phase(TickPhase::Scanning);
        let pairs = self.broadphase.find_pairs(&entries);
        for &(entity_a, entity_b) in &pairs {
            if self.scan_pair(world, entity_a, entity_b) {
                self.collisions.push(CollisionPair { entity_a, entity_b });
            }
        }

        // 3. Notify scripts
        self.enter_phase(TickPhase::Dispatching);
        for pair in &self.collisions {
            dispatch_collision(world, pair);
        }
        if self.config.collision_exit_events {
            for pair in &self.previous_collisions {
                if !self.collisions.iter().any(|c| c.same_entities(pair)) {
                    dispatch_exit(world, pair);
                }
            }
        }

        self.enter_phase(TickPhase::Idle);
        tracing::debug!(
            entities = entries.len(),
            integrated = moving.len(),
            pairs = pairs.len(),
            collisions = self.collisions.len(),
            "physics tick complete"
        );
    }

    /// Detect and, where allowed, resolve one pair. Returns whether they overlap.
    fn scan_pair(
        &self,
        world: &mut hecs::World,
        entity_a: hecs::Entity,
        entity_b: hecs::Entity,
    ) -> bool {
        let (Some((mut body_a, collider_a)), Some((mut body_b, collider_b))) =
            (snapshot(world, entity_a), snapshot(world, entity_b))
        else {
            return false;
        };

        if !detect_collision(&collider_a, body_a.position, &collider_b, body_b.position) {
            return false;
        }
        tracing::trace!(?entity_a, ?entity_b, "collision detected");

        if body_a.rigid_body.is_some() && !collider_b.is_trigger {
            solver::resolve_collision(
                &mut body_a,
                &collider_a,
                &mut body_b,
                &collider_b,
                &self.config,
            );
            write_back(world, entity_a, &body_a, true);
            write_back(world, entity_b, &body_b, false);
        }

        true
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

/// Copy the state needed for resolution out of the world.
fn snapshot(world: &hecs::World, entity: hecs::Entity) -> Option<(Body, Collider)> {
    let position = world.get::<&Transform>(entity).ok()?.position;
    let collider = *world.get::<&Collider>(entity).ok()?;
    let rigid_body = world.get::<&RigidBody>(entity).ok().map(|rb| *rb);
    Some((
        Body {
            position,
            rigid_body,
        },
        collider,
    ))
}

/// Store resolved velocity, and position for the acting side.
fn write_back(world: &mut hecs::World, entity: hecs::Entity, body: &Body, acting: bool) {
    if acting {
        if let Ok(mut transform) = world.get::<&mut Transform>(entity) {
            transform.position = body.position;
        }
    }
    if let (Some(resolved), Ok(mut rb)) = (body.rigid_body, world.get::<&mut RigidBody>(entity)) {
        rb.velocity = resolved.velocity;
    }
}

fn dispatch_collision(world: &hecs::World, pair: &CollisionPair) {
    let collider_a = world.get::<&Collider>(pair.entity_a).ok().map(|c| *c);
    let collider_b = world.get::<&Collider>(pair.entity_b).ok().map(|c| *c);

    if let Some(collider_b) = collider_b {
        if let Ok(mut scripts) = world.get::<&mut Scripts>(pair.entity_a) {
            scripts.notify_collision(pair.entity_b, &collider_b);
        }
    }
    if let Some(collider_a) = collider_a {
        if let Ok(mut scripts) = world.get::<&mut Scripts>(pair.entity_b) {
            scripts.notify_collision(pair.entity_a, &collider_a);
        }
    }
}

fn dispatch_exit(world: &hecs::World, pair: &CollisionPair) {
    let collider_a = world.get::<&Collider>(pair.entity_a).ok().map(|c| *c);
    let collider_b = world.get::<&Collider>(pair.entity_b).ok().map(|c| *c);

    if let Ok(mut scripts) = world.get::<&mut Scripts>(pair.entity_a) {
        scripts.notify_exit(pair.entity_b, collider_b.as_ref());
    }
    if let Ok(mut scripts) = world.get::<&mut Scripts>(pair.entity_b) {
        scripts.notify_exit(pair.entity_a, collider_a.as_ref());
    }
    tracing::trace!(entity_a = ?pair.entity_a, entity_b = ?pair.entity_b, "collision exit");
}
