//! Collider shapes
//!
//! [`ColliderShape`] is the local description stored on a collider;
//! [`WorldShape`] is that shape placed by a world transform for one step of
//! testing. Sphere radii and box/capsule dimensions are world-space units:
//! the transform contributes position and orientation, not scale.

use log::warn;

use super::bounds::{rotated_extents, Aabb};
use super::contact::Contact;
use super::narrow_phase;
use super::primitives::{intersect_ray_sphere, Ray, RayIntersection};
use crate::foundation::math::{Quat, Transform, Vec3};
use crate::physics::PhysicsError;

/// Smallest size a tolerant constructor will clamp a dimension to
pub const MIN_EXTENT: f32 = 1e-4;

/// Discriminant of a shape, used to index the narrow-phase dispatch table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Sphere
    Sphere,
    /// Oriented box
    Box,
    /// Capsule aligned with local Y
    Capsule,
}

impl ShapeKind {
    /// Number of shape kinds
    pub const COUNT: usize = 3;
    
    /// Row/column in the dispatch table
    pub const fn index(self) -> usize {
        match self {
            Self::Sphere => 0,
            Self::Box => 1,
            Self::Capsule => 2,
        }
    }
}

/// Collision shape in local terms
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    /// Sphere of the given radius
    Sphere {
        /// Radius
        radius: f32,
    },
    /// Box with the given half extents along its local axes
    Box {
        /// Half size along local X, Y and Z
        half_extents: Vec3,
    },
    /// Capsule along local Y
    Capsule {
        /// Radius of the caps and the cylinder
        radius: f32,
        /// Total height, caps included
        height: f32,
    },
}

impl ColliderShape {
    /// Sphere shape; non-positive radii are clamped to [`MIN_EXTENT`]
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere { radius: clamp_extent(radius, "sphere radius") }
    }
    
    /// Box shape; non-positive half extents are clamped to [`MIN_EXTENT`]
    pub fn cuboid(half_extents: Vec3) -> Self {
        Self::Box {
            half_extents: Vec3::new(
                clamp_extent(half_extents.x, "box half extent"),
                clamp_extent(half_extents.y, "box half extent"),
                clamp_extent(half_extents.z, "box half extent"),
            ),
        }
    }
    
    /// Capsule shape; non-positive sizes are clamped to [`MIN_EXTENT`]
    pub fn capsule(radius: f32, height: f32) -> Self {
        Self::Capsule {
            radius: clamp_extent(radius, "capsule radius"),
            height: clamp_extent(height, "capsule height"),
        }
    }
    
    /// Sphere shape, rejecting invalid radii
    pub fn try_sphere(radius: f32) -> Result<Self, PhysicsError> {
        let shape = Self::Sphere { radius };
        shape.validate()?;
        Ok(shape)
    }
    
    /// Box shape, rejecting invalid half extents
    pub fn try_cuboid(half_extents: Vec3) -> Result<Self, PhysicsError> {
        let shape = Self::Box { half_extents };
        shape.validate()?;
        Ok(shape)
    }
    
    /// Capsule shape, rejecting invalid sizes
    pub fn try_capsule(radius: f32, height: f32) -> Result<Self, PhysicsError> {
        let shape = Self::Capsule { radius, height };
        shape.validate()?;
        Ok(shape)
    }
    
    /// Check that every dimension is positive and finite
    pub fn validate(&self) -> Result<(), PhysicsError> {
        let dimensions: Vec<(f32, &str)> = match *self {
            Self::Sphere { radius } => vec![(radius, "radius")],
            Self::Box { half_extents } => vec![
                (half_extents.x, "half extent x"),
                (half_extents.y, "half extent y"),
                (half_extents.z, "half extent z"),
            ],
            Self::Capsule { radius, height } => vec![(radius, "radius"), (height, "height")],
        };
        for (value, name) in dimensions {
            if !(value.is_finite() && value > 0.0) {
                return Err(PhysicsError::InvalidShape(format!("{name} must be positive, got {value}")));
            }
        }
        Ok(())
    }
    
    /// Shape discriminant
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Sphere { .. } => ShapeKind::Sphere,
            Self::Box { .. } => ShapeKind::Box,
            Self::Capsule { .. } => ShapeKind::Capsule,
        }
    }
    
    /// Place this shape in the world using a world transform
    pub fn to_world(&self, transform: &Transform) -> WorldShape {
        let center = transform.position;
        match *self {
            Self::Sphere { radius } => WorldShape::Sphere { center, radius },
            Self::Box { half_extents } => WorldShape::Box {
                center,
                half_extents,
                rotation: transform.rotation,
            },
            Self::Capsule { radius, height } => WorldShape::Capsule {
                center,
                radius,
                height,
                rotation: transform.rotation,
            },
        }
    }
}

fn clamp_extent(value: f32, what: &str) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        warn!("{what} {value} is not positive; clamping to {MIN_EXTENT}");
        MIN_EXTENT
    }
}

/// World-space collision shape (temporary, for one step of testing)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldShape {
    /// World-space sphere
    Sphere {
        /// Center
        center: Vec3,
        /// Radius
        radius: f32,
    },
    /// World-space oriented box
    Box {
        /// Center
        center: Vec3,
        /// Half size along the box's own axes
        half_extents: Vec3,
        /// Orientation
        rotation: Quat,
    },
    /// World-space capsule
    Capsule {
        /// Center
        center: Vec3,
        /// Radius
        radius: f32,
        /// Total height, caps included
        height: f32,
        /// Orientation (the capsule runs along rotated +Y)
        rotation: Quat,
    },
}

impl WorldShape {
    /// Shape discriminant
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Sphere { .. } => ShapeKind::Sphere,
            Self::Box { .. } => ShapeKind::Box,
            Self::Capsule { .. } => ShapeKind::Capsule,
        }
    }
    
    /// Get center position
    pub fn center(&self) -> Vec3 {
        match *self {
            Self::Sphere { center, .. } | Self::Box { center, .. } | Self::Capsule { center, .. } => center,
        }
    }
    
    /// Conservative world bounds for the broad phase
    pub fn bounds(&self) -> Aabb {
        match *self {
            Self::Sphere { center, radius } => {
                Aabb::from_center_extents(center, Vec3::new(radius, radius, radius))
            }
            Self::Box { center, half_extents, rotation } => {
                Aabb::from_oriented(center, half_extents, &rotation)
            }
            Self::Capsule { center, radius, height, rotation } => {
                let half_extents = Vec3::new(radius, (height * 0.5).max(radius), radius);
                Aabb::from_center_extents(center, rotated_extents(half_extents, &rotation))
            }
        }
    }
    
    /// Test if this shape intersects with another shape (touching counts)
    pub fn intersects(&self, other: &WorldShape) -> bool {
        self.contact(other).is_some()
    }
    
    /// Exact contact with another shape, normal pointing from `self` to `other`
    pub fn contact(&self, other: &WorldShape) -> Option<Contact> {
        narrow_phase::contact(self, other)
    }
    
    /// Test ray intersection with this collision shape
    ///
    /// Capsules are treated as spheres of the capsule radius, matching the
    /// narrow phase.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<RayIntersection> {
        match *self {
            Self::Sphere { center, radius } | Self::Capsule { center, radius, .. } => {
                intersect_ray_sphere(ray, center, radius)
            }
            Self::Box { center, half_extents, rotation } => {
                let inverse = rotation.inverse();
                let local_origin = inverse * (ray.origin - center);
                let local_direction = inverse * ray.direction;
                let local_bounds = Aabb::from_center_extents(Vec3::zeros(), half_extents);
                let (distance, local_normal) = local_bounds.intersect_ray(local_origin, local_direction)?;
                Some(RayIntersection {
                    distance,
                    point: ray.point_at(distance),
                    normal: rotation * local_normal,
                })
            }
        }
    }
}
