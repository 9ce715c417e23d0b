//! ECS systems (collider scale propagation).

pub mod transform;

pub use transform::collider_scale_system;
