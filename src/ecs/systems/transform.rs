//! Transform scale propagation to colliders.

use crate::ecs::components::physics::Collider;
use crate::ecs::components::transform::Transform;

/// Rescale every collider from its original extent and offset by the owning
/// entity's transform scale.
///
/// Run after gameplay code changes a scale and before the physics tick.
pub fn collider_scale_system(world: &mut hecs::World) {
    for (_, (transform, collider)) in world.query_mut::<(&Transform, &mut Collider)>() {
        collider.apply_scale(transform.scale);
    }
}
