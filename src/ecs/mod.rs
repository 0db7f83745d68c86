//! Entity Component System integration with hecs.

pub mod bridge;
pub mod components;

pub mod prelude {
    pub use super::bridge::{attach_body, recompute_mass_properties, spawn_body, PhysicsError};
    pub use super::components::*;
}
