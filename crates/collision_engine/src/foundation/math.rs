//! Math utilities and types
//!
//! Provides fundamental math types for 3D simulation. All coordinates follow
//! Y-up right-handed conventions: forward is -Z, right is +X, up is +Y.

pub use nalgebra::{
    Vector3,
    Matrix3, Matrix4,
    Quaternion,
    Unit,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Tolerance used for degenerate-geometry checks
pub const EPSILON: f32 = 1e-6;

/// Canonical forward axis (-Z)
pub fn forward_axis() -> Vec3 {
    Vec3::new(0.0, 0.0, -1.0)
}

/// Canonical right axis (+X)
pub fn right_axis() -> Vec3 {
    Vec3::new(1.0, 0.0, 0.0)
}

/// Canonical up axis (+Y)
pub fn up_axis() -> Vec3 {
    Vec3::new(0.0, 1.0, 0.0)
}

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,
    
    /// Rotation quaternion
    pub rotation: Quat,
    
    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }
    
    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
    
    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }
    
    /// Convert to a transformation matrix (TRS order)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
    
    /// Apply this transform to a point: scale, then rotate, then translate
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.rotation * self.scale.component_mul(&point)
    }
    
    /// Apply this transform to a direction (no translation)
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.rotation * self.scale.component_mul(&vector)
    }
    
    /// Compose this (parent) transform with a child's local transform
    ///
    /// The child is scaled, then rotated, then translated by the parent.
    pub fn combine(&self, other: &Transform) -> Transform {
        Transform {
            position: self.position + self.rotation * (self.scale.component_mul(&other.position)),
            rotation: self.rotation * other.rotation,
            scale: self.scale.component_mul(&other.scale),
        }
    }
    
    /// Map a world point back into this transform's local space
    ///
    /// Zero scale components map to zero instead of infinity.
    pub fn inverse_transform_point(&self, point: Vec3) -> Vec3 {
        self.inverse_transform_vector(point - self.position)
    }
    
    /// Map a world direction back into this transform's local space
    pub fn inverse_transform_vector(&self, vector: Vec3) -> Vec3 {
        let invert = |s: f32| if s.abs() > EPSILON { 1.0 / s } else { 0.0 };
        let inv_scale = Vec3::new(invert(self.scale.x), invert(self.scale.y), invert(self.scale.z));
        inv_scale.component_mul(&(self.rotation.inverse() * vector))
    }
}

/// Build a rotation whose forward axis (-Z) points along `direction`
///
/// Returns `None` when `direction` is too short to define an orientation.
/// A degenerate `up` (parallel to the direction) is replaced by another
/// canonical axis.
pub fn look_rotation(direction: Vec3, up: Vec3) -> Option<Quat> {
    if direction.magnitude_squared() < EPSILON * EPSILON {
        return None;
    }
    let forward = direction.normalize();
    let mut up = if up.magnitude_squared() < EPSILON * EPSILON { up_axis() } else { up.normalize() };
    if forward.cross(&up).magnitude_squared() < EPSILON {
        up = if forward.x.abs() < 0.9 { right_axis() } else { Vec3::new(0.0, 0.0, 1.0) };
    }
    
    let right = forward.cross(&up).normalize();
    let true_up = right.cross(&forward);
    
    // Columns are the rotated basis: right (+X), up (+Y), back (+Z)
    let rotation_matrix = Mat3::from_columns(&[right, true_up, -forward]);
    Some(Quat::from_matrix(&rotation_matrix))
}

/// Arbitrary unit axis used when two points coincide
pub fn fallback_axis() -> Vec3 {
    up_axis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;
    
    #[test]
    fn test_combine_scale_rotate_translate() {
        let parent = Transform {
            position: Vec3::new(1.0, 0.0, 0.0),
            rotation: Quat::from_axis_angle(&Vec3::y_axis(), PI / 2.0),
            scale: Vec3::new(2.0, 2.0, 2.0),
        };
        let child = Transform::from_position(Vec3::new(0.0, 0.0, 1.0));
        
        let combined = parent.combine(&child);
        
        // (0,0,1) scaled to (0,0,2), rotated 90° about Y to (2,0,0), then translated
        assert_relative_eq!(combined.position, Vec3::new(3.0, 0.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(combined.scale, Vec3::new(2.0, 2.0, 2.0), epsilon = 1e-6);
    }
    
    #[test]
    fn test_inverse_round_trip() {
        let transform = Transform {
            position: Vec3::new(2.0, 3.0, 1.0),
            rotation: Quat::from_axis_angle(&Vec3::y_axis(), 0.785),
            scale: Vec3::new(2.0, 0.5, 3.0),
        };
        let point = Vec3::new(0.3, -1.2, 4.0);
        
        let there = transform.transform_point(point);
        let back = transform.inverse_transform_point(there);
        
        assert_relative_eq!(back, point, epsilon = 1e-4);
    }
    
    #[test]
    fn test_transform_point_matches_matrix() {
        let transform = Transform {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Quat::from_axis_angle(&Vec3::x_axis(), 0.5),
            scale: Vec3::new(1.0, 2.0, 3.0),
        };
        let point = Vec3::new(1.0, 1.0, 1.0);
        let via_matrix = transform.to_matrix().transform_point(&Point3::from(point));
        
        assert_relative_eq!(transform.transform_point(point), via_matrix.coords, epsilon = 1e-5);
    }
    
    #[test]
    fn test_look_rotation_points_forward_axis() {
        let direction = Vec3::new(-0.7, -1.0, 0.3);
        let rotation = look_rotation(direction, up_axis()).unwrap();
        
        assert_relative_eq!(rotation * forward_axis(), direction.normalize(), epsilon = 1e-5);
    }
    
    #[test]
    fn test_look_rotation_degenerate_inputs() {
        assert!(look_rotation(Vec3::zeros(), up_axis()).is_none());
        
        // Straight up with an up vector of +Y still yields a valid rotation
        let rotation = look_rotation(Vec3::new(0.0, 5.0, 0.0), up_axis()).unwrap();
        assert_relative_eq!(rotation * forward_axis(), up_axis(), epsilon = 1e-5);
    }
}
