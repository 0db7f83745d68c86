//! Collision event data handed over by the collision-detection step.

use glam::Vec3;

/// A single contact between the two participants, in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactPoint {
    /// Contact point on the first body.
    pub point_on_body1: Vec3,
    /// Contact point on the second body.
    pub point_on_body2: Vec3,
    /// Unit normal pointing from body 1 toward body 2.
    pub normal: Vec3,
}

impl ContactPoint {
    pub fn new(point_on_body1: Vec3, point_on_body2: Vec3, normal: Vec3) -> Self {
        Self {
            point_on_body1,
            point_on_body2,
            normal,
        }
    }
}

/// A collision between two entities, consumed once by the resolver.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionEvent {
    pub entity1: hecs::Entity,
    pub entity2: hecs::Entity,
    contacts: Vec<ContactPoint>,
}

impl CollisionEvent {
    /// Build an event from a non-empty contact list.
    ///
    /// # Panics
    /// If `contacts` is empty.
    pub fn new(entity1: hecs::Entity, entity2: hecs::Entity, contacts: Vec<ContactPoint>) -> Self {
        assert!(
            !contacts.is_empty(),
            "collision event between {:?} and {:?} has no contacts",
            entity1,
            entity2
        );
        Self {
            entity1,
            entity2,
            contacts,
        }
    }

    pub fn contacts(&self) -> &[ContactPoint] {
        &self.contacts
    }

    /// Mean of all contact normals (not renormalized).
    pub fn average_normal(&self) -> Vec3 {
        self.contacts.iter().map(|c| c.normal).sum::<Vec3>() / self.contacts.len() as f32
    }

    /// Mean contact point on each body.
    pub fn average_points(&self) -> (Vec3, Vec3) {
        let count = self.contacts.len() as f32;
        let (sum1, sum2) = self
            .contacts
            .iter()
            .fold((Vec3::ZERO, Vec3::ZERO), |(a, b), c| {
                (a + c.point_on_body1, b + c.point_on_body2)
            });
        (sum1 / count, sum2 / count)
    }
}
