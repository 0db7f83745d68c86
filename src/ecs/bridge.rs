//! Bridge between collider geometry and simulated ECS entities.
//!
//! These helpers are the only place mass properties are derived, so a body
//! that went through them always carries values consistent with its colliders.

use thiserror::Error;

use crate::ecs::components::physics::{Collider, ColliderSet, RigidBody};
use crate::ecs::components::transform::{GlobalTransform, Transform};
use crate::physics::collider::ShapeError;
use crate::physics::inertia::world_inverse_inertia;
use crate::physics::mass::compute_mass_properties;

/// Failure to create or update a simulated body.
#[derive(Debug, Error)]
pub enum PhysicsError {
    #[error("entity does not exist")]
    NoSuchEntity,
    #[error("entity has no {0} component")]
    MissingComponent(&'static str),
    #[error("collider {index} is invalid")]
    InvalidShape {
        index: usize,
        #[source]
        source: ShapeError,
    },
    #[error("collider {index} mass must be finite and non-negative, got {mass}")]
    InvalidMass { index: usize, mass: f32 },
}

impl From<hecs::NoSuchEntity> for PhysicsError {
    fn from(_: hecs::NoSuchEntity) -> Self {
        PhysicsError::NoSuchEntity
    }
}

fn validate(colliders: &[Collider]) -> Result<(), PhysicsError> {
    for (index, collider) in colliders.iter().enumerate() {
        if !(collider.mass.is_finite() && collider.mass >= 0.0) {
            return Err(PhysicsError::InvalidMass {
                index,
                mass: collider.mass,
            });
        }
        collider
            .shape
            .validate()
            .map_err(|source| PhysicsError::InvalidShape { index, source })?;
    }
    Ok(())
}

/// Derive mass properties and the initial world inverse inertia for `body`.
fn prepare(body: &mut RigidBody, colliders: &[Collider], transform: &Transform) {
    let props = compute_mass_properties(colliders, transform.scale, body.body_type);
    body.set_mass_properties(&props);
    body.inverse_inertia_world =
        world_inverse_inertia(body.local_inverse_inertia, transform.rotation);
}

/// Spawn a simulated body.
///
/// Creates an entity with Transform, GlobalTransform, ColliderSet and
/// RigidBody components, with mass properties derived from `colliders`.
pub fn spawn_body(
    world: &mut hecs::World,
    transform: Transform,
    colliders: Vec<Collider>,
    mut body: RigidBody,
) -> Result<hecs::Entity, PhysicsError> {
    validate(&colliders)?;
    prepare(&mut body, &colliders, &transform);

    let global = GlobalTransform::from(&transform);
    Ok(world.spawn((transform, global, ColliderSet::new(colliders), body)))
}

/// Turn an existing entity with a Transform into a simulated body.
///
/// # Panics
/// If the entity already has a RigidBody.
pub fn attach_body(
    world: &mut hecs::World,
    entity: hecs::Entity,
    colliders: Vec<Collider>,
    mut body: RigidBody,
) -> Result<(), PhysicsError> {
    assert!(
        !world.satisfies::<&RigidBody>(entity)?,
        "entity {:?} already has a RigidBody",
        entity
    );
    validate(&colliders)?;

    let transform = *world
        .get::<&Transform>(entity)
        .map_err(|_| PhysicsError::MissingComponent("Transform"))?;
    prepare(&mut body, &colliders, &transform);

    world.insert(entity, (ColliderSet::new(colliders), body))?;
    if !world.satisfies::<&GlobalTransform>(entity)? {
        world.insert_one(entity, GlobalTransform::from(&transform))?;
    }
    Ok(())
}

/// Re-derive a body's mass properties after its colliders or scale changed.
///
/// Velocities and accumulators are left as they are.
pub fn recompute_mass_properties(
    world: &mut hecs::World,
    entity: hecs::Entity,
) -> Result<(), PhysicsError> {
    let (body, colliders, transform) = world
        .query_one_mut::<(&mut RigidBody, &ColliderSet, &Transform)>(entity)
        .map_err(|e| match e {
            hecs::QueryOneError::NoSuchEntity => PhysicsError::NoSuchEntity,
            hecs::QueryOneError::Unsatisfied => {
                PhysicsError::MissingComponent("RigidBody, ColliderSet or Transform")
            }
        })?;

    validate(&colliders.colliders)?;
    prepare(body, &colliders.colliders, transform);
    Ok(())
}
