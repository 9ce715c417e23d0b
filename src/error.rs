//! Construction-time validation errors.

use thiserror::Error;

/// Errors raised when building physics components or configuration.
///
/// The simulation tick itself never fails; invalid values are rejected here,
/// before they can reach the resolver.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// Mass must be finite and strictly positive.
    #[error("invalid mass {0}: must be finite and > 0")]
    InvalidMass(f32),
    /// Gravity scale must be finite and non-negative.
    #[error("invalid gravity scale {0}: must be finite and >= 0")]
    InvalidGravityScale(f32),
    /// Circle radius must be finite and non-negative.
    #[error("invalid radius {0}: must be finite and >= 0")]
    InvalidRadius(f32),
    /// Box extent must be finite and non-negative on both axes.
    #[error("invalid box extent {width}x{height}")]
    InvalidExtent { width: f32, height: f32 },
    /// Restitution and surface friction live in [0, 1].
    #[error("invalid {name} {value}: must be within [0, 1]")]
    InvalidCoefficient { name: &'static str, value: f32 },
    /// A configuration value is out of range.
    #[error("invalid physics config: {0}")]
    InvalidConfig(&'static str),
}
