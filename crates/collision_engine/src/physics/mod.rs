//! Physics: collision detection, contact response and integration
//!
//! [`PhysicsSystem`] drives one step over a [`World`](crate::ecs::World);
//! the geometry it relies on lives in [`collision`].

pub mod collision;
pub mod collision_layers;
pub mod error;
pub mod physics_system;

#[cfg(test)]
mod tests;

pub use collision::{Aabb, ColliderShape, CollisionInfo, Contact, Ray, RayHit, ShapeKind, WorldShape};
pub use collision_layers::CollisionLayers;
pub use error::PhysicsError;
pub use physics_system::{CollisionPair, PhysicsStats, PhysicsSystem, TriggerEvent};
