//! Rigid body integration functions.

use glam::{Quat, Vec3};

use crate::ecs::components::physics::{ColliderSet, RigidBody};
use crate::ecs::components::transform::{GlobalTransform, Transform};

use super::inertia::update_world_inertia;

/// Per-step simulation inputs, passed explicitly into every pass.
#[derive(Debug, Clone, Copy)]
pub struct StepContext {
    /// Step length in seconds.
    pub dt: f32,
    pub gravity: Vec3,
    pub gravity_enabled: bool,
}

impl StepContext {
    pub fn new(dt: f32, gravity: Vec3, gravity_enabled: bool) -> Self {
        Self {
            dt,
            gravity,
            gravity_enabled,
        }
    }
}

/// Fraction of a velocity contribution kept over `dt`.
///
/// `damping` is clamped to [0, 1] first, since the fields on [`RigidBody`]
/// can be written directly.
#[inline]
pub fn damping_factor(damping: f32, dt: f32) -> f32 {
    (1.0 - damping.clamp(0.0, 1.0)).powf(dt).clamp(0.0, 1.0)
}

/// Advance every simulated body by one step with semi-implicit Euler.
///
/// Simulated bodies are entities with a [`RigidBody`], a [`Transform`] and a
/// [`ColliderSet`]. The world inverse inertia is refreshed for all bodies
/// first; static bodies are then left untouched. Velocities are updated
/// before the pose, and the pose uses the new velocities. Force and torque
/// accumulators are cleared afterwards.
pub fn integrate(world: &mut hecs::World, ctx: &StepContext) {
    update_world_inertia(world);

    let dt = ctx.dt;
    for (_, (rb, transform)) in
        world.query_mut::<hecs::With<(&mut RigidBody, &mut Transform), &ColliderSet>>()
    {
        if rb.is_static() {
            continue;
        }

        let linear_factor = damping_factor(rb.linear_damping, dt);
        let angular_factor = damping_factor(rb.angular_damping, dt);

        if ctx.gravity_enabled {
            rb.linear_velocity += dt * ctx.gravity * linear_factor;
        }
        rb.linear_velocity += rb.inverse_mass * rb.external_force * linear_factor;
        // Torque arriving here is already scaled by the inverse inertia.
        rb.angular_velocity += rb.external_torque * angular_factor;

        transform.position += rb.linear_velocity * dt;
        transform.rotation = integrate_rotation(transform.rotation, rb.angular_velocity, dt);

        rb.external_force = Vec3::ZERO;
        rb.external_torque = Vec3::ZERO;
    }
}

/// First-order quaternion update `q += 0.5 * dt * (omega, 0) * q`, renormalized.
#[inline]
pub fn integrate_rotation(rotation: Quat, angular_velocity: Vec3, dt: f32) -> Quat {
    let omega = Quat::from_xyzw(angular_velocity.x, angular_velocity.y, angular_velocity.z, 0.0);
    let spin = omega * rotation * (0.5 * dt);
    Quat::from_xyzw(
        rotation.x + spin.x,
        rotation.y + spin.y,
        rotation.z + spin.z,
        rotation.w + spin.w,
    )
    .normalize()
}

/// Synchronize `GlobalTransform` from `Transform`.
pub fn sync_transforms(world: &mut hecs::World) {
    for (_, (transform, global)) in world.query_mut::<(&Transform, &mut GlobalTransform)>() {
        global.0 = transform.to_matrix();
    }
}
