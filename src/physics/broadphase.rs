//! Broadphase: brute-force all-pairs candidate enumeration.

use crate::ecs::components::physics::{Collider, RigidBody};
use crate::ecs::components::transform::{Disabled, Transform};

/// An entity taking part in the physics tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicsEntry {
    pub entity: hecs::Entity,
    pub has_rigid_body: bool,
    /// May act: has a rigid body or a collider flagged `treat_as_dynamic`.
    pub eligible: bool,
    pub is_trigger: bool,
}

impl PhysicsEntry {
    /// Whether this entry gets pushed out and bounced when it acts against `other`.
    #[inline]
    pub fn can_resolve_against(&self, other: &PhysicsEntry) -> bool {
        self.has_rigid_body && !other.is_trigger
    }
}

/// All-pairs broadphase (O(n^2) pair-wise scan).
#[derive(Debug, Default, Clone, Copy)]
pub struct AllPairs;

impl AllPairs {
    pub fn new() -> Self {
        Self
    }

    /// Collect every enabled entity with a transform and a collider, in
    /// ascending entity id order.
    pub fn collect_entries(&self, world: &hecs::World) -> Vec<PhysicsEntry> {
        let mut entries: Vec<PhysicsEntry> = world
            .query::<hecs::Without<(&Transform, &Collider, Option<&RigidBody>), &Disabled>>()
            .iter()
            .map(|(entity, (_, collider, rb))| PhysicsEntry {
                entity,
                has_rigid_body: rb.is_some(),
                eligible: rb.is_some() || collider.treat_as_dynamic,
                is_trigger: collider.is_trigger,
            })
            .collect();

        entries.sort_by_key(|entry| entry.entity.id());
        entries
    }

    /// Every unordered pair with at least one eligible side, exactly once.
    ///
    /// The acting side comes first. A side that can resolve against the
    /// other is preferred, the earlier entry winning when both can. When
    /// neither can, the earlier eligible entry acts. Pairs where neither side
    /// may act are skipped.
    pub fn find_pairs(&self, entries: &[PhysicsEntry]) -> Vec<(hecs::Entity, hecs::Entity)> {
        let mut pairs = Vec::new();

        for i in 0..entries.len() {
            for j in (i + 1)..entries.len() {
                let a = &entries[i];
                let b = &entries[j];

                if a.can_resolve_against(b) {
                    pairs.push((a.entity, b.entity));
                } else if b.can_resolve_against(a) {
                    pairs.push((b.entity, a.entity));
                } else if a.eligible {
                    pairs.push((a.entity, b.entity));
                } else if b.eligible {
                    pairs.push((b.entity, a.entity));
                }
            }
        }

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn spawn_box(world: &mut hecs::World, x: f32) -> hecs::Entity {
        world.spawn((
            Transform::from_position(Vec2::new(x, 0.0)),
            Collider::boxed(1.0, 1.0).unwrap(),
        ))
    }

    #[test]
    fn test_entries_skip_disabled_and_incomplete() {
        let mut world = hecs::World::new();

        let kept = spawn_box(&mut world, 0.0);
        let disabled = spawn_box(&mut world, 1.0);
        world.insert_one(disabled, Disabled).unwrap();
        world.spawn((Transform::identity(),));
        world.spawn((Collider::circle(1.0).unwrap(),));

        let entries = AllPairs::new().collect_entries(&world);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entity, kept);
        assert!(!entries[0].eligible);
    }

    #[test]
    fn test_eligibility() {
        let mut world = hecs::World::new();

        let rigid = world.spawn((
            Transform::identity(),
            Collider::boxed(1.0, 1.0).unwrap(),
            RigidBody::new(1.0).unwrap(),
        ));
        let dynamic_collider = world.spawn((
            Transform::identity(),
            Collider::boxed(1.0, 1.0).unwrap().as_dynamic(),
        ));

        let entries = AllPairs::new().collect_entries(&world);
        let find = |e| *entries.iter().find(|entry| entry.entity == e).unwrap();

        assert!(find(rigid).eligible && find(rigid).has_rigid_body);
        assert!(find(dynamic_collider).eligible && !find(dynamic_collider).has_rigid_body);
    }

    #[test]
    fn test_static_static_skipped() {
        let mut world = hecs::World::new();
        spawn_box(&mut world, 0.0);
        spawn_box(&mut world, 0.5);

        let broadphase = AllPairs::new();
        let entries = broadphase.collect_entries(&world);
        assert!(broadphase.find_pairs(&entries).is_empty());
    }

    #[test]
    fn test_pairs_are_unordered_and_acting_first() {
        let mut world = hecs::World::new();

        let wall = spawn_box(&mut world, 0.0);
        let body = world.spawn((
            Transform::identity(),
            Collider::circle(1.0).unwrap(),
            RigidBody::new(1.0).unwrap(),
        ));
        let other = world.spawn((
            Transform::identity(),
            Collider::circle(1.0).unwrap(),
            RigidBody::new(1.0).unwrap(),
        ));

        let broadphase = AllPairs::new();
        let entries = broadphase.collect_entries(&world);
        let pairs = broadphase.find_pairs(&entries);

        // wall/body, wall/other, body/other
        assert_eq!(pairs.len(), 3);
        assert!(pairs.contains(&(body, wall)));
        assert!(pairs.contains(&(other, wall)));
        assert!(pairs.contains(&(body, other)));
    }

    #[test]
    fn test_rigid_body_acts_over_earlier_dynamic_collider() {
        let mut world = hecs::World::new();

        let sensor_box = world.spawn((
            Transform::identity(),
            Collider::boxed(1.0, 1.0).unwrap().as_dynamic(),
        ));
        let body = world.spawn((
            Transform::identity(),
            Collider::boxed(1.0, 1.0).unwrap(),
            RigidBody::new(1.0).unwrap(),
        ));

        let broadphase = AllPairs::new();
        let entries = broadphase.collect_entries(&world);
        assert_eq!(broadphase.find_pairs(&entries), vec![(body, sensor_box)]);
    }

    #[test]
    fn test_trigger_body_acts_in_either_order() {
        for trigger_first in [true, false] {
            let mut world = hecs::World::new();
            let spawn_trigger = |world: &mut hecs::World| {
                world.spawn((
                    Transform::identity(),
                    Collider::boxed(1.0, 1.0).unwrap().as_trigger(),
                    RigidBody::new(1.0).unwrap(),
                ))
            };
            let spawn_solid = |world: &mut hecs::World| {
                world.spawn((
                    Transform::identity(),
                    Collider::boxed(1.0, 1.0).unwrap(),
                    RigidBody::new(1.0).unwrap(),
                ))
            };

            let (trigger, solid) = if trigger_first {
                let t = spawn_trigger(&mut world);
                (t, spawn_solid(&mut world))
            } else {
                let s = spawn_solid(&mut world);
                (spawn_trigger(&mut world), s)
            };

            let broadphase = AllPairs::new();
            let entries = broadphase.collect_entries(&world);
            assert_eq!(
                broadphase.find_pairs(&entries),
                vec![(trigger, solid)],
                "trigger_first = {}",
                trigger_first
            );
        }
    }

    #[test]
    fn test_two_triggers_fall_back_to_first_eligible() {
        let mut world = hecs::World::new();
        let zone = world.spawn((
            Transform::identity(),
            Collider::boxed(1.0, 1.0).unwrap().as_trigger(),
        ));
        let body = world.spawn((
            Transform::identity(),
            Collider::boxed(1.0, 1.0).unwrap().as_trigger(),
            RigidBody::new(1.0).unwrap(),
        ));

        let broadphase = AllPairs::new();
        let entries = broadphase.collect_entries(&world);
        assert_eq!(broadphase.find_pairs(&entries), vec![(body, zone)]);
    }
}
