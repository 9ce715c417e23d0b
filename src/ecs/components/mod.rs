//! ECS components (transform, physics, scripts).

pub mod physics;
pub mod script;
pub mod transform;

pub use physics::*;
pub use script::*;
pub use transform::*;
