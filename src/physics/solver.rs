//! Collision response: positional correction and velocity response.
//!
//! Only the acting body (`a`) is pushed out of the overlap. Velocities are
//! updated on both sides when both carry a rigid body.

use glam::Vec2;

use crate::ecs::components::physics::{Collider, ColliderShape};
use crate::math::{tangent, unit_normal};

use super::collider::Aabb;
use super::contact::{Body, HitOrientation};
use super::narrowphase::ShapePair;
use super::PhysicsConfig;

/// Resolve a confirmed overlap between `a` (acting) and `b`.
///
/// Circle/box pairs are resolved as box/box with the circle's bounding square
/// standing in for the circle. Returns the box hit orientation, or `None` for
/// circle/circle pairs.
pub fn resolve_collision(
    a: &mut Body,
    collider_a: &Collider,
    b: &mut Body,
    collider_b: &Collider,
    config: &PhysicsConfig,
) -> Option<HitOrientation> {
    match ShapePair::classify(collider_a.shape(), collider_b.shape()) {
        ShapePair::BoxBox | ShapePair::CircleBox => {
            let aabb_a = collider_a.world_aabb(a.position);
            let aabb_b = collider_b.world_aabb(b.position);
            Some(resolve_box_box(
                a, &aabb_a, collider_a, b, &aabb_b, collider_b, config,
            ))
        }
        ShapePair::CircleCircle => {
            resolve_circle_circle(a, collider_a, b, collider_b, config);
            None
        }
    }
}

/// Box/box response.
///
/// The axis of impact takes the other collider's restitution, the orthogonal
/// axis its surface friction, and the impact axis is then inverted.
pub fn resolve_box_box(
    a: &mut Body,
    aabb_a: &Aabb,
    collider_a: &Collider,
    b: &mut Body,
    aabb_b: &Aabb,
    collider_b: &Collider,
    config: &PhysicsConfig,
) -> HitOrientation {
    let orientation = HitOrientation::between(aabb_a, aabb_b);
    let fraction = config.position_correction.fraction();

    match orientation {
        HitOrientation::Top => {
            let delta = aabb_b.bottom() - aabb_a.top();
            a.position.y += delta * fraction;
        }
        HitOrientation::Bottom => {
            let delta = aabb_a.bottom() - aabb_b.top();
            a.position.y -= delta * fraction;
        }
        HitOrientation::Left => {
            let delta = aabb_b.right() - aabb_a.left();
            a.position.x += delta * fraction;
        }
        HitOrientation::Right => {
            let delta = aabb_a.right() - aabb_b.left();
            a.position.x -= delta * fraction;
        }
    }

    let flip = orientation.sign_flip();

    if let Some(rb_a) = a.rigid_body.as_mut() {
        rb_a.velocity = surface_response(rb_a.velocity, orientation, collider_b) * flip;
    }

    match b.rigid_body.as_mut() {
        Some(rb_b) => {
            rb_b.velocity = surface_response(rb_b.velocity, orientation, collider_a) * flip;
        }
        None => {
            // Resting contact against a body that never moves: kill the
            // leftover normal speed so the acting body does not vibrate.
            if let Some(rb_a) = a.rigid_body.as_mut() {
                suppress_jitter(&mut rb_a.velocity, orientation, config.velocity_epsilon);
            }
        }
    }

    tracing::trace!(?orientation, "resolved box contact");
    orientation
}

/// Scale a velocity by the struck surface's restitution (impact axis) and
/// surface friction (orthogonal axis).
#[inline]
fn surface_response(velocity: Vec2, orientation: HitOrientation, surface: &Collider) -> Vec2 {
    if orientation.is_vertical() {
        Vec2::new(
            velocity.x * surface.surface_friction(),
            velocity.y * surface.restitution(),
        )
    } else {
        Vec2::new(
            velocity.x * surface.restitution(),
            velocity.y * surface.surface_friction(),
        )
    }
}

#[inline]
fn suppress_jitter(velocity: &mut Vec2, orientation: HitOrientation, epsilon: f32) {
    if orientation.is_vertical() {
        if velocity.y.abs() < epsilon {
            velocity.y = 0.0;
        }
    } else if velocity.x.abs() < epsilon {
        velocity.x = 0.0;
    }
}

/// Circle/circle response.
///
/// Normal velocity components are exchanged with the 1-D elastic formula,
/// tangential components pass through. A circle without a rigid body acts as
/// an immovable wall (the infinite-mass limit of the same formula).
pub fn resolve_circle_circle(
    a: &mut Body,
    collider_a: &Collider,
    b: &mut Body,
    collider_b: &Collider,
    config: &PhysicsConfig,
) {
    let (ColliderShape::Circle { radius: radius_a }, ColliderShape::Circle { radius: radius_b }) =
        (*collider_a.shape(), *collider_b.shape())
    else {
        return;
    };

    let center_a = collider_a.world_center(a.position);
    let center_b = collider_b.world_center(b.position);
    let distance = center_b - center_a;
    let normal = unit_normal(distance);
    let tangent = tangent(normal);

    let overlap = (radius_a + radius_b - distance.length()) * config.position_correction.fraction();
    a.position -= normal * overlap;

    let Some(rb_a) = a.rigid_body.as_mut() else {
        return;
    };

    let normal_a = rb_a.velocity.dot(normal);
    let tangent_a = rb_a.velocity.dot(tangent);

    match b.rigid_body.as_mut() {
        Some(rb_b) => {
            let normal_b = rb_b.velocity.dot(normal);
            let tangent_b = rb_b.velocity.dot(tangent);

            let new_normal_a = elastic_velocity_1d(normal_a, rb_a.mass(), normal_b, rb_b.mass());
            let new_normal_b = elastic_velocity_1d(normal_b, rb_b.mass(), normal_a, rb_a.mass());

            rb_a.velocity = normal * new_normal_a + tangent * tangent_a;
            rb_b.velocity = normal * new_normal_b + tangent * tangent_b;

            if config.circle_restitution {
                rb_a.velocity *= collider_b.restitution();
                rb_b.velocity *= collider_a.restitution();
            }
        }
        None => {
            rb_a.velocity = normal * -normal_a + tangent * tangent_a;
            if config.circle_restitution {
                rb_a.velocity *= collider_b.restitution();
            }
        }
    }

    tracing::trace!(overlap, "resolved circle contact");
}

/// Post-collision velocity of body A in a 1-D elastic collision.
#[inline]
pub fn elastic_velocity_1d(vel_a: f32, mass_a: f32, vel_b: f32, mass_b: f32) -> f32 {
    (vel_a * (mass_a - mass_b) + 2.0 * mass_b * vel_b) / (mass_a + mass_b)
}
