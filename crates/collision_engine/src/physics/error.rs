//! Errors reported by the strict physics APIs

use crate::ecs::Entity;

/// Physics errors
///
/// The default physics entry points tolerate these conditions (returning no
/// hit, clamping, or using the origin); the `try_` variants report them.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// A direction vector had (near) zero length
    #[error("direction vector has zero length")]
    ZeroDirection,
    
    /// Shape dimensions were not strictly positive and finite
    #[error("invalid collider shape: {0}")]
    InvalidShape(String),
    
    /// Mass was not strictly positive and finite
    #[error("invalid mass {0}: must be positive and finite")]
    InvalidMass(f32),
    
    /// A collider's entity has no transform to place it in the world
    #[error("{0} has a collider but no transform")]
    MissingTransform(Entity),
}
