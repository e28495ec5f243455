//! Rays and ray-cast results

use crate::ecs::Entity;
use crate::foundation::math::{Vec3, EPSILON};
use crate::physics::PhysicsError;

/// A ray for ray casting
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The unit direction of the ray
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray, normalizing `direction`
    ///
    /// Fails with [`PhysicsError::ZeroDirection`] for a (near) zero direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Result<Self, PhysicsError> {
        let length = direction.magnitude();
        if !length.is_finite() || length < EPSILON {
            return Err(PhysicsError::ZeroDirection);
        }
        Ok(Self {
            origin,
            direction: direction / length,
        })
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Where a ray met a shape, before it is tied to an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayIntersection {
    /// Distance from the ray origin
    pub distance: f32,
    /// World-space hit point
    pub point: Vec3,
    /// Outward surface normal at the hit point
    pub normal: Vec3,
}

/// Result of a ray cast against the world's colliders
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// The entity whose collider was hit
    pub entity: Entity,
    /// The distance from the ray origin to the hit point
    pub distance: f32,
    /// The point of intersection in world space
    pub point: Vec3,
    /// The surface normal at the intersection point
    pub normal: Vec3,
}

/// Analytic ray/sphere intersection
///
/// Returns the nearest non-negative root; a ray starting inside the sphere
/// reports where it leaves.
pub fn intersect_ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<RayIntersection> {
    // Solve |origin + t*direction - center|^2 = radius^2 with |direction| = 1
    let oc = ray.origin - center;
    let b = oc.dot(&ray.direction);
    let c = oc.dot(&oc) - radius * radius;
    
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    
    let sqrt_discriminant = discriminant.sqrt();
    let t1 = -b - sqrt_discriminant;
    let t2 = -b + sqrt_discriminant;
    
    let t = if t1 >= 0.0 {
        t1
    } else if t2 >= 0.0 {
        t2
    } else {
        return None;
    };
    
    let point = ray.point_at(t);
    let offset = point - center;
    let normal = if offset.magnitude_squared() > EPSILON * EPSILON {
        offset.normalize()
    } else {
        -ray.direction
    };
    
    Some(RayIntersection { distance: t, point, normal })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    
    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, -5.0, 0.0)).unwrap();
        assert_relative_eq!(ray.direction, Vec3::new(0.0, -1.0, 0.0));
        assert_relative_eq!(ray.point_at(2.0), Vec3::new(0.0, -2.0, 0.0));
    }
    
    #[test]
    fn test_zero_direction_rejected() {
        assert_eq!(
            Ray::new(Vec3::zeros(), Vec3::zeros()).unwrap_err(),
            PhysicsError::ZeroDirection
        );
    }
    
    #[test]
    fn test_ray_sphere_from_above() {
        let ray = Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, -1.0, 0.0)).unwrap();
        let hit = intersect_ray_sphere(&ray, Vec3::zeros(), 1.0).unwrap();
        
        assert_relative_eq!(hit.distance, 9.0, epsilon = 1e-5);
        assert_relative_eq!(hit.point, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(hit.normal, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-5);
    }
    
    #[test]
    fn test_ray_sphere_inside_and_behind() {
        let inside = Ray::new(Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0)).unwrap();
        let hit = intersect_ray_sphere(&inside, Vec3::zeros(), 2.0).unwrap();
        assert_relative_eq!(hit.distance, 2.0, epsilon = 1e-5);
        
        let away = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)).unwrap();
        assert!(intersect_ray_sphere(&away, Vec3::zeros(), 1.0).is_none());
    }
}
