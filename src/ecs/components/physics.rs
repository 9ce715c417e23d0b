//! Physics components for ECS entities.

use glam::Vec2;

use crate::error::PhysicsError;
use crate::math::scale_by;

/// Margin added to each axis of a box to form its tolerance hitbox.
pub const TOLERANCE_MARGIN: f32 = 10.0;

/// Rigid body component.
///
/// Bodies are non-rotating particles with extent; only linear state is kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidBody {
    pub velocity: Vec2,
    mass: f32,
    /// Multiplier applied to the world gravity vector.
    pub gravity_scale: f32,
    pub gravity_enabled: bool,
}

impl RigidBody {
    /// Create a rigid body at rest with the given mass and gravity switched off.
    pub fn new(mass: f32) -> Result<Self, PhysicsError> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(PhysicsError::InvalidMass(mass));
        }
        Ok(Self {
            velocity: Vec2::ZERO,
            mass,
            gravity_scale: 0.0,
            gravity_enabled: false,
        })
    }

    /// Set the initial velocity.
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Enable gravity with the given scale.
    pub fn with_gravity(mut self, gravity_scale: f32) -> Result<Self, PhysicsError> {
        if !gravity_scale.is_finite() || gravity_scale < 0.0 {
            return Err(PhysicsError::InvalidGravityScale(gravity_scale));
        }
        self.gravity_scale = gravity_scale;
        self.gravity_enabled = true;
        Ok(self)
    }

    /// Mass, always finite and > 0.
    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }
}

/// Collider shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    /// Axis-aligned rectangle, `size` is the full width and height.
    Box { size: Vec2 },
    Circle { radius: f32 },
}

impl ColliderShape {
    /// The shape with its extent multiplied by the absolute value of `scale`.
    ///
    /// Circles scale their radius by the x component only.
    pub fn scaled(&self, scale: Vec2) -> Self {
        match *self {
            ColliderShape::Box { size } => ColliderShape::Box {
                size: scale_by(size, scale.abs()),
            },
            ColliderShape::Circle { radius } => ColliderShape::Circle {
                radius: radius * scale.x.abs(),
            },
        }
    }
}

/// Collision detection component.
///
/// `shape` and `offset` are derived from the originals and the owning
/// transform's scale (see [`Collider::apply_scale`]); they are never set
/// directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    shape: ColliderShape,
    original_shape: ColliderShape,
    offset: Vec2,
    original_offset: Vec2,
    restitution: f32,
    surface_friction: f32,
    /// If true, generates collision events but no physics response.
    pub is_trigger: bool,
    /// Lets a collider without a rigid body act as the moving side of a pair.
    pub treat_as_dynamic: bool,
}

impl Collider {
    fn from_shape(shape: ColliderShape) -> Self {
        Self {
            shape,
            original_shape: shape,
            offset: Vec2::ZERO,
            original_offset: Vec2::ZERO,
            restitution: 0.0,
            surface_friction: 1.0,
            is_trigger: false,
            treat_as_dynamic: false,
        }
    }

    /// Create a box collider of the given width and height.
    pub fn boxed(width: f32, height: f32) -> Result<Self, PhysicsError> {
        if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
            return Err(PhysicsError::InvalidExtent { width, height });
        }
        Ok(Self::from_shape(ColliderShape::Box {
            size: Vec2::new(width, height),
        }))
    }

    /// Create a circle collider.
    pub fn circle(radius: f32) -> Result<Self, PhysicsError> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(PhysicsError::InvalidRadius(radius));
        }
        Ok(Self::from_shape(ColliderShape::Circle { radius }))
    }

    /// Set the unscaled offset from the owning transform.
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.original_offset = offset;
        self.offset = offset;
        self
    }

    /// Set restitution: 0 is inelastic, 1 perfectly elastic.
    pub fn with_restitution(mut self, restitution: f32) -> Result<Self, PhysicsError> {
        self.restitution = unit_coefficient("restitution", restitution)?;
        Ok(self)
    }

    /// Set surface friction: 1 is frictionless, 0 brings the other body to a halt.
    pub fn with_surface_friction(mut self, surface_friction: f32) -> Result<Self, PhysicsError> {
        self.surface_friction = unit_coefficient("surface friction", surface_friction)?;
        Ok(self)
    }

    /// Mark the collider as a trigger.
    pub fn as_trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    /// Treat the collider as dynamic even without a rigid body.
    pub fn as_dynamic(mut self) -> Self {
        self.treat_as_dynamic = true;
        self
    }

    /// Rescale shape and offset from their originals.
    pub fn apply_scale(&mut self, scale: Vec2) {
        self.shape = self.original_shape.scaled(scale);
        self.offset = scale_by(self.original_offset, scale);
    }

    #[inline]
    pub fn shape(&self) -> &ColliderShape {
        &self.shape
    }

    #[inline]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    #[inline]
    pub fn original_offset(&self) -> Vec2 {
        self.original_offset
    }

    #[inline]
    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    #[inline]
    pub fn surface_friction(&self) -> f32 {
        self.surface_friction
    }

    /// Size of the tolerance hitbox, for box colliders only.
    pub fn tolerance_size(&self) -> Option<Vec2> {
        match self.shape {
            ColliderShape::Box { size } => Some(size + Vec2::splat(TOLERANCE_MARGIN)),
            ColliderShape::Circle { .. } => None,
        }
    }
}

fn unit_coefficient(name: &'static str, value: f32) -> Result<f32, PhysicsError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(PhysicsError::InvalidCoefficient { name, value })
    }
}
