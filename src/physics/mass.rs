//! Whole-body mass properties derived from a set of colliders.
//!
//! Each collider contributes its mass, its position-weighted mass to the
//! center of mass, and its own-frame inertia tensor rotated into body space
//! and shifted to the center of mass with the parallel-axis theorem. Only
//! the diagonal of the summed tensor is kept.

use glam::{Mat3, Vec3};

use crate::ecs::components::physics::{Collider, RigidBodyType};

/// Mass assigned to static bodies.
pub const STATIC_MASS: f32 = f32::MAX;

/// Mass, center of mass and diagonal inertia for a rigid body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassProperties {
    pub mass: f32,
    pub inverse_mass: f32,
    /// Center of mass in body-local space.
    pub center_of_mass: Vec3,
    /// Diagonal of the inertia tensor about the center of mass.
    pub local_inertia: Vec3,
    pub local_inverse_inertia: Vec3,
}

impl MassProperties {
    pub const ZERO: Self = Self {
        mass: 0.0,
        inverse_mass: 0.0,
        center_of_mass: Vec3::ZERO,
        local_inertia: Vec3::ZERO,
        local_inverse_inertia: Vec3::ZERO,
    };
}

/// Per-axis reciprocal, with zero standing in for degenerate axes.
#[inline]
pub fn inverse_or_zero(v: Vec3) -> Vec3 {
    Vec3::new(recip_or_zero(v.x), recip_or_zero(v.y), recip_or_zero(v.z))
}

#[inline]
fn recip_or_zero(v: f32) -> f32 {
    if v != 0.0 {
        1.0 / v
    } else {
        0.0
    }
}

/// Inertia of a point mass at offset `d`: `m * (|d|^2 * I - d d^T)`.
#[inline]
pub fn parallel_axis(mass: f32, d: Vec3) -> Mat3 {
    let outer = Mat3::from_cols(d * d.x, d * d.y, d * d.z);
    (Mat3::IDENTITY * d.length_squared() - outer) * mass
}

/// Derive mass properties for a body made of `colliders`.
///
/// `body_scale` is the scale of the owning entity's transform. It multiplies
/// both the collider shapes and their local offsets.
pub fn compute_mass_properties(
    colliders: &[Collider],
    body_scale: Vec3,
    body_type: RigidBodyType,
) -> MassProperties {
    let total_mass: f32 = colliders.iter().map(|c| c.mass).sum();

    let center_of_mass = if total_mass != 0.0 {
        colliders
            .iter()
            .map(|c| c.transform.position * body_scale * c.mass)
            .sum::<Vec3>()
            / total_mass
    } else {
        Vec3::ZERO
    };

    let mut tensor = Mat3::ZERO;
    for collider in colliders {
        let shape = collider
            .shape
            .scaled(collider.transform.scale * body_scale);
        let own = Mat3::from_diagonal(shape.inertia(collider.mass));

        let rotation = Mat3::from_quat(collider.transform.rotation);
        let rotated = rotation * own * rotation.transpose();

        let offset = collider.transform.position * body_scale - center_of_mass;
        tensor += rotated + parallel_axis(collider.mass, offset);
    }

    let local_inertia = Vec3::new(tensor.x_axis.x, tensor.y_axis.y, tensor.z_axis.z);

    let props = match body_type {
        RigidBodyType::Dynamic => MassProperties {
            mass: total_mass,
            inverse_mass: recip_or_zero(total_mass),
            center_of_mass,
            local_inertia,
            local_inverse_inertia: inverse_or_zero(local_inertia),
        },
        RigidBodyType::Static => MassProperties {
            mass: STATIC_MASS,
            inverse_mass: 0.0,
            center_of_mass,
            local_inertia,
            local_inverse_inertia: Vec3::ZERO,
        },
    };

    tracing::debug!(
        colliders = colliders.len(),
        mass = props.mass,
        center_of_mass = ?props.center_of_mass,
        inertia = ?props.local_inertia,
        "derived mass properties"
    );

    props
}
