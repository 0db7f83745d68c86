//! World-space inverse inertia.

use glam::{Mat3, Quat, Vec3};

use crate::ecs::components::physics::RigidBody;
use crate::ecs::components::transform::Transform;

/// Rotate a diagonal local inverse inertia tensor into world space: `R * diag * R^T`.
#[inline]
pub fn world_inverse_inertia(local_inverse: Vec3, rotation: Quat) -> Mat3 {
    let r = Mat3::from_quat(rotation);
    r * Mat3::from_diagonal(local_inverse) * r.transpose()
}

/// Refresh `inverse_inertia_world` for every body, static ones included.
pub fn update_world_inertia(world: &mut hecs::World) {
    for (_, (rb, transform)) in world.query_mut::<(&mut RigidBody, &Transform)>() {
        rb.inverse_inertia_world = world_inverse_inertia(rb.local_inverse_inertia, transform.rotation);
    }
}
