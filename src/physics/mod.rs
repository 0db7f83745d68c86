//! CPU rigid-body dynamics: mass properties, integration and impulse resolution.
//!
//! # Architecture
//!
//! Mass properties are derived once per body from its colliders
//! ([`mass::compute_mass_properties`]) and again whenever its geometry
//! changes. Every fixed step then runs:
//!
//! 1. Resolve queued collision events (impulses go into force/torque accumulators)
//! 2. Refresh world-space inverse inertia
//! 3. Integrate velocities, then poses (semi-implicit Euler)
//! 4. Clear force accumulators
//! 5. Synchronize transforms
//!
//! Contact generation is not done here. The collision-detection step hands
//! [`CollisionEvent`]s to [`PhysicsWorld::queue_collision`], and they are
//! resolved in arrival order before the next integration.

pub mod collider;
pub mod contact;
pub mod inertia;
pub mod mass;
pub mod rigid_body;
pub mod solver;

use std::collections::VecDeque;

use glam::Vec3;

pub use self::contact::{CollisionEvent, ContactPoint};
pub use self::rigid_body::StepContext;

use self::solver::{resolve_collision, DEFAULT_RESTITUTION};

/// Configuration for the physics simulation.
#[derive(Debug, Clone)]
pub struct PhysicsConfig {
    /// Gravity vector. Default: (0, -9.81, 0).
    pub gravity: Vec3,
    /// Whether gravity is applied at all. Default: true.
    pub gravity_enabled: bool,
    /// Fixed timestep for physics updates in seconds. Default: 1/60.
    pub fixed_timestep: f64,
    /// Maximum number of sub-steps per frame. Default: 4.
    pub max_substeps: u32,
    /// Coefficient of restitution used by the collision resolver. Default: 1.0.
    pub restitution: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            gravity_enabled: true,
            fixed_timestep: 1.0 / 60.0,
            max_substeps: 4,
            restitution: DEFAULT_RESTITUTION,
        }
    }
}

/// The main physics world managing simulation state.
pub struct PhysicsWorld {
    config: PhysicsConfig,
    accumulator: f64,
    pending: VecDeque<CollisionEvent>,
}

impl PhysicsWorld {
    /// Create a new physics world with the given configuration.
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            accumulator: 0.0,
            pending: VecDeque::new(),
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.config.gravity = gravity;
    }

    pub fn set_gravity_enabled(&mut self, enabled: bool) {
        self.config.gravity_enabled = enabled;
    }

    /// Hand a collision event over for resolution before the next integration.
    pub fn queue_collision(&mut self, event: CollisionEvent) {
        self.pending.push_back(event);
    }

    /// Number of collision events waiting for the next step.
    pub fn pending_collisions(&self) -> usize {
        self.pending.len()
    }

    /// Step the physics simulation forward by `delta_time` seconds.
    ///
    /// Uses a fixed timestep accumulator to ensure deterministic simulation.
    pub fn step(&mut self, world: &mut hecs::World, delta_time: f64) {
        self.accumulator += delta_time;

        let mut substeps = 0u32;
        while self.accumulator >= self.config.fixed_timestep && substeps < self.config.max_substeps
        {
            self.fixed_step(world, self.config.fixed_timestep as f32);
            self.accumulator -= self.config.fixed_timestep;
            substeps += 1;
        }

        // Clamp accumulator to avoid spiral of death
        if self.accumulator > self.config.fixed_timestep * self.config.max_substeps as f64 {
            tracing::warn!(
                dropped = self.accumulator,
                "physics fell behind, dropping accumulated time"
            );
            self.accumulator = 0.0;
        }
    }

    /// Run exactly one step of `dt` seconds.
    pub fn fixed_step(&mut self, world: &mut hecs::World, dt: f32) {
        // 1. Collision impulses land in the accumulators first
        while let Some(event) = self.pending.pop_front() {
            resolve_collision(world, &event, self.config.restitution);
        }

        // 2-4. Inertia refresh, integration, accumulator reset
        let ctx = StepContext::new(dt, self.config.gravity, self.config.gravity_enabled);
        rigid_body::integrate(world, &ctx);

        // 5. Synchronize transforms
        rigid_body::sync_transforms(world);
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::bridge::spawn_body;
    use crate::ecs::components::physics::{Collider, ColliderShape, RigidBody};
    use crate::ecs::components::transform::{GlobalTransform, Transform};
    use glam::{Mat3, Mat4};

    fn sphere(radius: f32, mass: f32) -> Vec<Collider> {
        vec![Collider::new(
            ColliderShape::Sphere { radius },
            Transform::identity(),
            mass,
        )]
    }

    #[test]
    fn test_physics_world_free_fall_scenario() {
        let mut world = hecs::World::new();
        let mut physics = PhysicsWorld::new(PhysicsConfig {
            gravity: Vec3::new(0.0, -9.8, 0.0),
            ..PhysicsConfig::default()
        });

        let entity = spawn_body(
            &mut world,
            Transform::identity(),
            sphere(1.0, 1.0),
            RigidBody::new_dynamic(),
        )
        .unwrap();
        assert_eq!(world.get::<&RigidBody>(entity).unwrap().inverse_mass, 1.0);

        physics.fixed_step(&mut world, 1.0 / 60.0);

        let rb = world.get::<&RigidBody>(entity).unwrap();
        let transform = world.get::<&Transform>(entity).unwrap();
        assert!((rb.linear_velocity.y - (-0.163_333)).abs() < 1e-5);
        assert!((transform.position.y - (-0.002_722)).abs() < 1e-5);

        let global = world.get::<&GlobalTransform>(entity).unwrap();
        assert_eq!(global.0, Mat4::from_translation(transform.position));
    }

    #[test]
    fn test_step_accumulates_fixed_substeps() {
        let mut world = hecs::World::new();
        let mut physics = PhysicsWorld::default();

        let entity = spawn_body(
            &mut world,
            Transform::from_position(Vec3::new(0.0, 10.0, 0.0)),
            sphere(0.5, 1.0),
            RigidBody::new_dynamic(),
        )
        .unwrap();

        // Half a timestep does nothing yet
        physics.step(&mut world, 1.0 / 120.0);
        assert_eq!(world.get::<&Transform>(entity).unwrap().position.y, 10.0);

        // Simulate ~1 second
        for _ in 0..60 {
            physics.step(&mut world, 1.0 / 60.0);
        }

        let transform = world.get::<&Transform>(entity).unwrap();
        assert!(
            transform.position.y < 10.0,
            "Body should have fallen: y = {}",
            transform.position.y
        );
    }

    #[test]
    fn test_step_drops_time_when_far_behind() {
        let mut world = hecs::World::new();
        let mut physics = PhysicsWorld::default();
        physics.set_gravity_enabled(false);

        let entity = spawn_body(
            &mut world,
            Transform::identity(),
            sphere(0.5, 1.0),
            RigidBody::new_dynamic().with_linear_velocity(Vec3::X),
        )
        .unwrap();

        // Ten steps worth of time, capped at four sub-steps
        physics.step(&mut world, 10.0 / 60.0);

        let x = world.get::<&Transform>(entity).unwrap().position.x;
        assert!((x - 4.0 / 60.0).abs() < 1e-5, "x = {}", x);
    }

    #[test]
    fn test_queued_collision_applies_on_next_step() {
        let mut world = hecs::World::new();
        let mut physics = PhysicsWorld::default();
        physics.set_gravity_enabled(false);

        let a = spawn_body(
            &mut world,
            Transform::from_position(Vec3::new(-1.0, 0.0, 0.0)),
            sphere(1.0, 1.0),
            RigidBody::new_dynamic().with_linear_velocity(Vec3::new(1.0, 0.0, 0.0)),
        )
        .unwrap();
        let b = spawn_body(
            &mut world,
            Transform::from_position(Vec3::new(1.0, 0.0, 0.0)),
            sphere(1.0, 1.0),
            RigidBody::new_dynamic().with_linear_velocity(Vec3::new(-1.0, 0.0, 0.0)),
        )
        .unwrap();

        physics.queue_collision(CollisionEvent::new(
            a,
            b,
            vec![ContactPoint::new(Vec3::ZERO, Vec3::ZERO, Vec3::X)],
        ));
        assert_eq!(physics.pending_collisions(), 1);

        physics.fixed_step(&mut world, 1.0 / 60.0);
        assert_eq!(physics.pending_collisions(), 0);

        let va = world.get::<&RigidBody>(a).unwrap().linear_velocity;
        let vb = world.get::<&RigidBody>(b).unwrap().linear_velocity;
        assert!((va - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-5, "va = {:?}", va);
        assert!((vb - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-5, "vb = {:?}", vb);

        let rb = world.get::<&RigidBody>(a).unwrap();
        assert_eq!(rb.external_force, Vec3::ZERO);
    }

    #[test]
    fn test_ball_bounces_off_static_ground() {
        let mut world = hecs::World::new();
        let mut physics = PhysicsWorld::default();
        physics.set_gravity_enabled(false);

        let ball = spawn_body(
            &mut world,
            Transform::from_position(Vec3::new(0.0, 1.0, 0.0)),
            sphere(1.0, 1.0),
            RigidBody::new_dynamic().with_linear_velocity(Vec3::new(0.0, -2.0, 0.0)),
        )
        .unwrap();
        let ground = spawn_body(
            &mut world,
            Transform::from_position(Vec3::new(0.0, -0.5, 0.0)),
            vec![Collider::new(
                ColliderShape::Box {
                    half_extents: Vec3::new(50.0, 0.5, 50.0),
                },
                Transform::identity(),
                100.0,
            )],
            RigidBody::new_static(),
        )
        .unwrap();

        physics.queue_collision(CollisionEvent::new(
            ball,
            ground,
            vec![ContactPoint::new(Vec3::ZERO, Vec3::ZERO, Vec3::NEG_Y)],
        ));
        physics.fixed_step(&mut world, 1.0 / 60.0);

        let rb = world.get::<&RigidBody>(ball).unwrap();
        assert!((rb.linear_velocity - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-5);

        let ground_rb = world.get::<&RigidBody>(ground).unwrap();
        let ground_transform = world.get::<&Transform>(ground).unwrap();
        assert_eq!(ground_rb.inverse_mass, 0.0);
        assert_eq!(ground_rb.inverse_inertia_world, Mat3::ZERO);
        assert_eq!(ground_transform.position, Vec3::new(0.0, -0.5, 0.0));
    }

    #[test]
    fn test_set_gravity_changes_fall_direction() {
        let mut world = hecs::World::new();
        let mut physics = PhysicsWorld::default();
        physics.set_gravity(Vec3::new(6.0, 0.0, 0.0));
        assert_eq!(physics.config().gravity, Vec3::new(6.0, 0.0, 0.0));

        let entity = spawn_body(
            &mut world,
            Transform::identity(),
            sphere(0.5, 1.0),
            RigidBody::new_dynamic(),
        )
        .unwrap();

        physics.fixed_step(&mut world, 1.0 / 60.0);

        let rb = world.get::<&RigidBody>(entity).unwrap();
        assert!((rb.linear_velocity - Vec3::new(0.1, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_physics_config_default() {
        let config = PhysicsConfig::default();
        assert_eq!(config.gravity, Vec3::new(0.0, -9.81, 0.0));
        assert!(config.gravity_enabled);
        assert!((config.fixed_timestep - 1.0 / 60.0).abs() < 1e-10);
        assert_eq!(config.max_substeps, 4);
        assert_eq!(config.restitution, 1.0);
    }
}
