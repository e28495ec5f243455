//! Collision geometry: shapes, bounds, rays and the narrow phase

pub mod bounds;
pub mod contact;
pub mod narrow_phase;
pub mod primitives;
pub mod shape;

pub use bounds::Aabb;
pub use contact::{CollisionInfo, Contact};
pub use primitives::{intersect_ray_sphere, Ray, RayHit, RayIntersection};
pub use shape::{ColliderShape, ShapeKind, WorldShape, MIN_EXTENT};
