//! Rein rigid-body dynamics
//!
//! Mass properties from collider geometry, semi-implicit Euler integration and
//! impulse-based collision resolution on top of a hecs world.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **ecs** - Components (transform, rigid body, colliders) and the bridge that
//!    spawns simulated bodies with derived mass properties
//! 2. **physics** - Shape volume/inertia, mass aggregation, world-space inertia,
//!    the integrator, the collision resolver and the fixed-step [`PhysicsWorld`]
//!
//! Contact generation is left to an external collision-detection step, which
//! feeds [`CollisionEvent`]s into [`PhysicsWorld::queue_collision`].

pub mod ecs;
pub mod physics;

pub use ecs::prelude::*;

pub use physics::collider::ShapeError;
pub use physics::mass::{compute_mass_properties, MassProperties};
pub use physics::{CollisionEvent, ContactPoint, PhysicsConfig, PhysicsWorld, StepContext};

// Re-export glam and hecs for convenience
pub use glam;
pub use hecs;
