//! # Collision Engine
//!
//! A small component-based rigid-body collision and response engine.
//!
//! ## Features
//!
//! - **ECS Registry**: Entities with at most one component per type
//! - **Transform Hierarchy**: Parent chains with lazily cached world transforms
//! - **Colliders**: Spheres, boxes and capsules with AABB broad phase
//! - **Rigid Bodies**: Linear integration, impulses and positional correction
//! - **Raycasting**: Closest-hit queries against colliders
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use collision_engine::prelude::*;
//!
//! let mut world = World::new();
//!
//! let ground = world.create_named_entity("Ground");
//! world.add_component(ground, TransformComponent::from_position(Vec3::new(0.0, -1.0, 0.0)));
//! world.add_component(ground, ColliderComponent::cuboid(Vec3::new(25.0, 1.0, 25.0)).as_static());
//!
//! let ball = world.create_named_entity("Ball");
//! world.add_component(ball, TransformComponent::from_position(Vec3::new(0.0, 5.0, 0.0)));
//! world.add_component(ball, ColliderComponent::sphere(0.5));
//! world.add_component(ball, RigidBodyComponent::new());
//!
//! let mut physics = PhysicsSystem::new(PhysicsConfig::default());
//! physics.initialize();
//! for _ in 0..600 {
//!     physics.update(&mut world, 1.0 / 60.0);
//! }
//! println!("ball rests at {:?}", world.world_position(ball));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod core;
pub mod config;
pub mod foundation;
pub mod ecs;
pub mod physics;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        core::config::{ApplicationConfig, EngineConfig, PhysicsConfig},
        config::{Config, ConfigError},
        foundation::math::{Quat, Transform, Vec3},
        ecs::{Component, EcsError, Entity, System, World},
        ecs::components::{ColliderComponent, RigidBodyComponent, TransformComponent},
        physics::{
            ColliderShape, CollisionInfo, CollisionLayers, PhysicsError, PhysicsStats,
            PhysicsSystem, RayHit, TriggerEvent,
        },
    };
}
