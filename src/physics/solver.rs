//! Single-contact impulse resolution for collision events.

use glam::{Mat3, Vec3};

use crate::ecs::components::physics::RigidBody;
use crate::ecs::components::transform::Transform;

use super::contact::CollisionEvent;

/// Fully elastic.
pub const DEFAULT_RESTITUTION: f32 = 1.0;

/// Snapshot of the body state the impulse formula needs.
struct RbData {
    is_static: bool,
    inv_mass: f32,
    inv_inertia: Mat3,
    linear_velocity: Vec3,
    angular_velocity: Vec3,
    center_of_mass: Vec3,
}

impl RbData {
    fn read(world: &hecs::World, entity: hecs::Entity) -> Option<Self> {
        let rb = world.get::<&RigidBody>(entity).ok()?;
        let transform = world.get::<&Transform>(entity).ok()?;
        Some(Self {
            is_static: rb.is_static(),
            inv_mass: rb.inverse_mass,
            inv_inertia: rb.inverse_inertia_world,
            linear_velocity: rb.linear_velocity,
            angular_velocity: rb.angular_velocity,
            // Center of mass is stored with the body scale already applied
            center_of_mass: transform.position + transform.rotation * rb.center_of_mass,
        })
    }
}

/// Resolve one collision event by adding an impulse to both bodies' force
/// and torque accumulators.
///
/// All contacts are averaged into one representative contact. The impulse
/// reaches the velocities on the next integrator pass. Returns the impulse
/// applied to the first body, or `None` when the event was skipped because a
/// participant has no rigid body, both participants are static, or neither
/// side has any inverse mass or inertia.
pub fn resolve_collision(
    world: &mut hecs::World,
    event: &CollisionEvent,
    restitution: f32,
) -> Option<Vec3> {
    let (Some(a), Some(b)) = (
        RbData::read(world, event.entity1),
        RbData::read(world, event.entity2),
    ) else {
        tracing::trace!(
            entity1 = ?event.entity1,
            entity2 = ?event.entity2,
            "collision participant has no rigid body, skipping"
        );
        return None;
    };

    if a.is_static && b.is_static {
        tracing::trace!(
            entity1 = ?event.entity1,
            entity2 = ?event.entity2,
            "collision between static bodies, skipping"
        );
        return None;
    }

    let normal = event.average_normal();
    let (point1, point2) = event.average_points();

    let r1 = point1 - a.center_of_mass;
    let r2 = point2 - b.center_of_mass;
    let r1_cross_n = r1.cross(normal);
    let r2_cross_n = r2.cross(normal);

    let closing = (a.linear_velocity - b.linear_velocity).dot(normal)
        + a.angular_velocity.dot(r1_cross_n)
        - b.angular_velocity.dot(r2_cross_n);

    let inv_mass_sum = a.inv_mass
        + b.inv_mass
        + r1_cross_n.dot(a.inv_inertia * r1_cross_n)
        + r2_cross_n.dot(b.inv_inertia * r2_cross_n);

    if inv_mass_sum <= 0.0 {
        tracing::trace!(
            entity1 = ?event.entity1,
            entity2 = ?event.entity2,
            "collision between massless bodies, skipping"
        );
        return None;
    }

    let j = -(1.0 + restitution) * closing / inv_mass_sum;
    let impulse = normal * j;

    if !a.is_static {
        apply_impulse(world, event.entity1, impulse, a.inv_inertia * r1.cross(impulse));
    }
    if !b.is_static {
        apply_impulse(world, event.entity2, -impulse, b.inv_inertia * r2.cross(-impulse));
    }

    tracing::debug!(
        entity1 = ?event.entity1,
        entity2 = ?event.entity2,
        contacts = event.contacts().len(),
        magnitude = j,
        "resolved collision"
    );

    Some(impulse)
}

fn apply_impulse(world: &mut hecs::World, entity: hecs::Entity, force: Vec3, torque: Vec3) {
    if let Ok(mut rb) = world.get::<&mut RigidBody>(entity) {
        rb.apply_force(force);
        rb.apply_torque(torque);
    }
}
