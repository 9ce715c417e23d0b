//! Entity Component System integration with hecs.
//!
//! A simulation entity is a hecs entity whose capability slots are optional
//! components: [`Transform`](components::Transform),
//! [`Collider`](components::Collider), [`RigidBody`](components::RigidBody),
//! [`Scripts`](components::Scripts) and the [`Disabled`](components::Disabled)
//! marker.

pub mod components;
pub mod systems;

pub mod prelude {
    pub use super::components::*;
    pub use super::systems::collider_scale_system;
}
