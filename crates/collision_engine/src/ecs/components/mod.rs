//! ECS Components module
//!
//! Components consumed by the physics pipeline: spatial transforms,
//! colliders and rigid bodies.

pub mod transform;
pub mod collider;
pub mod rigid_body;

pub use transform::TransformComponent;
pub use collider::ColliderComponent;
pub use rigid_body::{contact_impulse, RigidBodyComponent, BodyState, MIN_MASS};
