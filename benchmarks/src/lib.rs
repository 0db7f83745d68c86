//! Shared setup helpers for rein-rigid benchmarks.
//!
//! ## Running
//!
//!   cargo bench --manifest-path benchmarks/Cargo.toml --bench physics
//!
//! Filter by group:
//!   cargo bench --manifest-path benchmarks/Cargo.toml --bench physics -- resolver

use glam::{Quat, Vec3};
use rein_rigid::ecs::bridge::spawn_body;
use rein_rigid::ecs::components::physics::{Collider, ColliderShape, RigidBody};
use rein_rigid::ecs::components::transform::Transform;
use rein_rigid::physics::{CollisionEvent, ContactPoint, PhysicsConfig, PhysicsWorld};

/// A body built from `parts` colliders of alternating shape around the origin.
pub fn compound_colliders(parts: usize) -> Vec<Collider> {
    (0..parts)
        .map(|i| {
            let angle = i as f32 * 0.7;
            let offset = Vec3::new(angle.cos(), (i % 3) as f32 * 0.5, angle.sin()) * 2.0;
            let shape = match i % 3 {
                0 => ColliderShape::Sphere { radius: 0.5 },
                1 => ColliderShape::Box {
                    half_extents: Vec3::new(0.5, 0.25, 1.0),
                },
                _ => ColliderShape::Capsule {
                    radius: 0.3,
                    height: 1.0,
                },
            };
            let transform = Transform {
                position: offset,
                rotation: Quat::from_rotation_y(angle),
                scale: Vec3::ONE,
            };
            Collider::new(shape, transform, 1.0 + i as f32)
        })
        .collect()
}

/// Spawn `n` dynamic spheres in a grid, each spinning and drifting.
pub fn setup_sphere_world(n: usize) -> (hecs::World, Vec<hecs::Entity>) {
    let mut world = hecs::World::new();
    let cols = (n as f32).sqrt().ceil() as usize;

    let entities = (0..n)
        .map(|i| {
            let pos = Vec3::new((i % cols) as f32 * 1.5, 0.0, (i / cols) as f32 * 1.5);
            let body = RigidBody::new_dynamic()
                .with_damping(0.01, 0.01)
                .with_linear_velocity(Vec3::new(0.1, 0.0, -0.1))
                .with_angular_velocity(Vec3::new(0.0, 1.0, 0.5));
            spawn_body(
                &mut world,
                Transform::from_position(pos),
                vec![Collider::new(
                    ColliderShape::Sphere { radius: 0.5 },
                    Transform::identity(),
                    1.0,
                )],
                body,
            )
            .expect("sphere parameters are valid")
        })
        .collect();

    (world, entities)
}

/// A sphere world plus a physics world with one collision queued per neighbouring pair.
pub fn setup_collision_scene(n: usize) -> (hecs::World, PhysicsWorld) {
    let (world, entities) = setup_sphere_world(n);
    let mut physics = PhysicsWorld::new(PhysicsConfig::default());

    for pair in entities.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let pa = world.get::<&Transform>(a).map(|t| t.position).unwrap_or_default();
        let pb = world.get::<&Transform>(b).map(|t| t.position).unwrap_or_default();
        let normal = (pb - pa).normalize_or_zero();
        let mid = (pa + pb) * 0.5;
        physics.queue_collision(CollisionEvent::new(
            a,
            b,
            vec![
                ContactPoint::new(mid, mid, normal),
                ContactPoint::new(mid + Vec3::Y * 0.1, mid + Vec3::Y * 0.1, normal),
            ],
        ));
    }

    (world, physics)
}
