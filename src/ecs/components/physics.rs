//! Physics components for ECS entities.

use glam::{Mat3, Vec3};

use crate::physics::mass::MassProperties;

use super::transform::Transform;

/// Rigid body type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigidBodyType {
    /// Affected by gravity, forces and collisions.
    Dynamic,
    /// Infinite mass. Never moved by the integrator.
    Static,
}

/// Rigid body component.
///
/// Mass and inertia fields are filled in from the entity's colliders by
/// [`RigidBody::set_mass_properties`]; the bridge in [`crate::ecs::bridge`]
/// does this when a body is spawned or its geometry changes.
#[derive(Debug, Clone)]
pub struct RigidBody {
    pub body_type: RigidBodyType,
    /// Mass in kilograms.
    pub mass: f32,
    /// Zero for static bodies and massless dynamic bodies.
    pub inverse_mass: f32,
    /// Center of mass in the body's local space, with the body scale applied.
    pub center_of_mass: Vec3,
    /// Diagonal of the local inertia tensor about the center of mass.
    pub local_inertia: Vec3,
    /// Per-axis inverse of `local_inertia` (zero on degenerate axes).
    pub local_inverse_inertia: Vec3,
    /// World-space inverse inertia tensor, refreshed every step from the orientation.
    pub inverse_inertia_world: Mat3,
    /// World-space linear velocity.
    pub linear_velocity: Vec3,
    /// World-space angular velocity.
    pub angular_velocity: Vec3,
    /// Force accumulated for the next step. Cleared after integration.
    pub external_force: Vec3,
    /// Torque accumulated for the next step. Cleared after integration.
    pub external_torque: Vec3,
    /// Linear damping in [0, 1].
    pub linear_damping: f32,
    /// Angular damping in [0, 1].
    pub angular_damping: f32,
}

impl RigidBody {
    /// Create a new dynamic rigid body with no damping and zero velocity.
    pub fn new_dynamic() -> Self {
        Self {
            body_type: RigidBodyType::Dynamic,
            mass: 0.0,
            inverse_mass: 0.0,
            center_of_mass: Vec3::ZERO,
            local_inertia: Vec3::ZERO,
            local_inverse_inertia: Vec3::ZERO,
            inverse_inertia_world: Mat3::ZERO,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            external_force: Vec3::ZERO,
            external_torque: Vec3::ZERO,
            linear_damping: 0.0,
            angular_damping: 0.0,
        }
    }

    /// Create a new static rigid body.
    ///
    /// Damping is saturated and all motion state is zeroed so the body stays
    /// put even if it is ever handed to code that ignores the static flag.
    pub fn new_static() -> Self {
        Self {
            body_type: RigidBodyType::Static,
            linear_damping: 1.0,
            angular_damping: 1.0,
            ..Self::new_dynamic()
        }
    }

    /// Set linear and angular damping, clamped into [0, 1].
    pub fn with_damping(mut self, linear: f32, angular: f32) -> Self {
        self.linear_damping = linear.clamp(0.0, 1.0);
        self.angular_damping = angular.clamp(0.0, 1.0);
        self
    }

    /// Set the initial linear velocity. Ignored for static bodies.
    pub fn with_linear_velocity(mut self, velocity: Vec3) -> Self {
        if !self.is_static() {
            self.linear_velocity = velocity;
        }
        self
    }

    /// Set the initial angular velocity. Ignored for static bodies.
    pub fn with_angular_velocity(mut self, velocity: Vec3) -> Self {
        if !self.is_static() {
            self.angular_velocity = velocity;
        }
        self
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.body_type == RigidBodyType::Static
    }

    /// Add a force (or impulse) to be applied on the next integrator pass.
    pub fn apply_force(&mut self, force: Vec3) {
        self.external_force += force;
    }

    /// Add a torque to be applied on the next integrator pass.
    ///
    /// The integrator adds accumulated torque to angular velocity directly,
    /// so callers are expected to pre-multiply by the inverse inertia tensor.
    pub fn apply_torque(&mut self, torque: Vec3) {
        self.external_torque += torque;
    }

    /// Copy derived mass properties onto the body.
    pub fn set_mass_properties(&mut self, props: &MassProperties) {
        self.mass = props.mass;
        self.inverse_mass = props.inverse_mass;
        self.center_of_mass = props.center_of_mass;
        self.local_inertia = props.local_inertia;
        self.local_inverse_inertia = props.local_inverse_inertia;
        if self.is_static() {
            self.inverse_inertia_world = Mat3::ZERO;
        }
    }
}

/// Collider shape, expressed in the collider's own frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    Sphere {
        radius: f32,
    },
    Box {
        half_extents: Vec3,
    },
    /// Capsule aligned with the local Y axis. `height` is the length of the
    /// cylindrical section between the two cap centres.
    Capsule {
        radius: f32,
        height: f32,
    },
}

/// A single collision volume attached to a body.
#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    pub shape: ColliderShape,
    /// Transform relative to the owning body.
    pub transform: Transform,
    /// Mass contributed to the body, in kilograms.
    pub mass: f32,
}

impl Collider {
    pub fn new(shape: ColliderShape, transform: Transform, mass: f32) -> Self {
        Self {
            shape,
            transform,
            mass,
        }
    }

    /// Create a collider whose mass is its (collider-scaled) volume times `density`.
    pub fn with_density(shape: ColliderShape, transform: Transform, density: f32) -> Self {
        let mass = shape.scaled(transform.scale).volume() * density;
        Self::new(shape, transform, mass)
    }
}

/// Collision geometry component. An entity carrying this and a [`RigidBody`]
/// takes part in the simulation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColliderSet {
    pub colliders: Vec<Collider>,
}

impl ColliderSet {
    pub fn new(colliders: Vec<Collider>) -> Self {
        Self { colliders }
    }

    /// Convenience for the common single-collider body.
    pub fn single(collider: Collider) -> Self {
        Self {
            colliders: vec![collider],
        }
    }
}
