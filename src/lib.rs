//! rebound2d
//!
//! The collision detection and resolution core of a per-frame 2D simulation
//! loop, built on glam and a hecs ECS.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **math** - Vector helpers on top of `glam::Vec2`
//! 2. **error** - Construction-time validation errors
//! 3. **ecs** - hecs components (transform, rigid body, collider, scripts) and systems (feature = "ecs")
//! 4. **physics** - Integration, collision detection, resolution and the tick driver (feature = "physics")
//!
//! Coordinates are y-down: gravity defaults to `(0, 500)` and a box's "top"
//! edge is its minimum y.

pub mod error;
pub mod math;

#[cfg(feature = "ecs")]
pub mod ecs;

#[cfg(feature = "physics")]
pub mod physics;

pub use error::PhysicsError;

#[cfg(feature = "ecs")]
pub use ecs::prelude::*;

#[cfg(feature = "physics")]
pub use physics::{PhysicsConfig, PhysicsWorld, PositionCorrection, TickPhase};

// Re-export glam and hecs for convenience
pub use glam;
#[cfg(feature = "ecs")]
pub use hecs;
