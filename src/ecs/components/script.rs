//! Script callbacks that receive collision notifications.

use super::physics::Collider;

/// Receiver of collision notifications attached to an entity.
///
/// Scripts observe collisions; they take no part in resolution.
pub trait CollisionScript: Send + Sync + 'static {
    /// Called once per tick for every overlap the entity takes part in,
    /// triggers included.
    fn collision_event(&mut self, other: hecs::Entity, other_collider: &Collider);

    /// Called when a pair that overlapped last tick no longer does.
    ///
    /// `other_collider` is `None` when the other entity lost its collider or
    /// was despawned. Only fires when collision exit events are enabled.
    fn collision_exit_event(&mut self, _other: hecs::Entity, _other_collider: Option<&Collider>) {}
}

/// Scripts attached to an entity, notified in insertion order.
#[derive(Default)]
pub struct Scripts(pub Vec<Box<dyn CollisionScript>>);

impl Scripts {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Attach one more script.
    pub fn with(mut self, script: impl CollisionScript) -> Self {
        self.0.push(Box::new(script));
        self
    }

    pub(crate) fn notify_collision(&mut self, other: hecs::Entity, other_collider: &Collider) {
        for script in &mut self.0 {
            script.collision_event(other, other_collider);
        }
    }

    pub(crate) fn notify_exit(&mut self, other: hecs::Entity, other_collider: Option<&Collider>) {
        for script in &mut self.0 {
            script.collision_exit_event(other, other_collider);
        }
    }
}

impl std::fmt::Debug for Scripts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scripts").field("len", &self.0.len()).finish()
    }
}
