//! Axis-aligned bounding boxes for broad-phase pruning

use crate::foundation::math::{Quat, Vec3};

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }
    
    /// Create an AABB centered at a point with given half extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }
    
    /// Tightest AABB around a box with the given half extents and rotation
    pub fn from_oriented(center: Vec3, half_extents: Vec3, rotation: &Quat) -> Self {
        let extents = rotated_extents(half_extents, rotation);
        Self::from_center_extents(center, extents)
    }
    
    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
    
    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }
    
    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }
    
    /// Check if this AABB intersects another AABB (touching counts)
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y &&
        self.min.z <= other.max.z && self.max.z >= other.min.z
    }
    
    /// Ray/box slab test
    ///
    /// Returns the entry distance and the outward normal of the face that
    /// was hit. A ray starting inside reports its exit face instead.
    pub fn intersect_ray(&self, origin: Vec3, direction: Vec3) -> Option<(f32, Vec3)> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut enter_axis = 0;
        let mut exit_axis = 0;
        
        for axis in 0..3 {
            if direction[axis].abs() < f32::EPSILON {
                // Parallel to this slab: must already be between the planes
                if origin[axis] < self.min[axis] || origin[axis] > self.max[axis] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / direction[axis];
            let t1 = (self.min[axis] - origin[axis]) * inv;
            let t2 = (self.max[axis] - origin[axis]) * inv;
            let (near, far) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
            if near > t_enter {
                t_enter = near;
                enter_axis = axis;
            }
            if far < t_exit {
                t_exit = far;
                exit_axis = axis;
            }
            if t_enter > t_exit {
                return None;
            }
        }
        
        if t_exit < 0.0 {
            return None;
        }
        
        let (distance, axis, sign) = if t_enter >= 0.0 {
            (t_enter, enter_axis, -direction[enter_axis].signum())
        } else {
            (t_exit, exit_axis, direction[exit_axis].signum())
        };
        let mut normal = Vec3::zeros();
        normal[axis] = sign;
        Some((distance, normal))
    }
}

/// Half extents of the AABB enclosing a rotated box
pub(crate) fn rotated_extents(half_extents: Vec3, rotation: &Quat) -> Vec3 {
    let matrix = rotation.to_rotation_matrix();
    let abs = matrix.matrix().abs();
    abs * half_extents
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;
    
    #[test]
    fn test_intersects_touching_and_separate() {
        let a = Aabb::from_center_extents(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        let touching = Aabb::from_center_extents(Vec3::new(2.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        let apart = Aabb::from_center_extents(Vec3::new(2.1, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        
        assert!(a.intersects(&touching));
        assert!(!a.intersects(&apart));
    }
    
    #[test]
    fn test_rotated_extents_grow() {
        let rotation = Quat::from_axis_angle(&Vec3::z_axis(), PI / 4.0);
        let bounds = Aabb::from_oriented(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0), &rotation);
        
        assert_relative_eq!(bounds.extents().x, 2.0_f32.sqrt(), epsilon = 1e-5);
        assert_relative_eq!(bounds.extents().z, 1.0, epsilon = 1e-5);
    }
    
    #[test]
    fn test_ray_slab_hit_and_miss() {
        let bounds = Aabb::from_center_extents(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        
        let (distance, normal) = bounds
            .intersect_ray(Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, -1.0, 0.0))
            .unwrap();
        assert_relative_eq!(distance, 9.0);
        assert_eq!(normal, Vec3::new(0.0, 1.0, 0.0));
        
        assert!(bounds.intersect_ray(Vec3::new(3.0, 10.0, 0.0), Vec3::new(0.0, -1.0, 0.0)).is_none());
        assert!(bounds.intersect_ray(Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, 1.0, 0.0)).is_none());
    }
}
