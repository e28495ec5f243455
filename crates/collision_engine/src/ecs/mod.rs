//! Entity-Component-System implementation
//!
//! Provides the entity/component registry and the components the physics
//! pipeline reads and writes.

pub mod world;
pub mod entity;
pub mod component;
pub mod storage;
pub mod system;
pub mod error;
pub mod hierarchy;
pub mod components;

pub use world::World;
pub use entity::Entity;
pub use component::{Component, ComponentBase};
pub use system::System;
pub use error::EcsError;
