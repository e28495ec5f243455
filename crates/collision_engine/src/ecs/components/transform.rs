//! Transform component for the ECS system
//!
//! Stores the LOCAL position, rotation and scale of an entity plus an
//! optional parent entity. The world-space transform is cached and
//! recomputed lazily: any local mutation marks the cache dirty, and the
//! cache also remembers the parent world transform it was built from, so a
//! moved ancestor invalidates it too. World-space queries live on
//! [`World`](crate::ecs::World) (see [`crate::ecs::hierarchy`]) because they
//! need to walk the parent chain.

use std::cell::Cell;

use crate::ecs::{Component, ComponentBase, Entity};
use crate::foundation::math::{Transform, Vec3, Quat};

/// World transform cached together with the parent transform it came from
#[derive(Debug, Clone, Copy, PartialEq)]
struct WorldCache {
    parent_world: Transform,
    world: Transform,
}

/// ECS Transform component
///
/// All coordinates follow Y-up right-handed conventions.
#[derive(Debug, Clone)]
pub struct TransformComponent {
    base: ComponentBase,
    position: Vec3,
    rotation: Quat,
    scale: Vec3,
    parent: Option<Entity>,
    dirty: Cell<bool>,
    cache: Cell<Option<WorldCache>>,
}

impl Component for TransformComponent {
    fn base(&self) -> &ComponentBase {
        &self.base
    }
    
    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self::from_transform(Vec3::zeros(), Quat::identity(), Vec3::new(1.0, 1.0, 1.0))
    }
}

impl TransformComponent {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }
    
    /// Create from position only
    pub fn from_position(position: Vec3) -> Self {
        Self::default().with_position(position)
    }
    
    /// Create from position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self::default().with_position(position).with_rotation(rotation)
    }
    
    /// Create from position, rotation and scale
    pub fn from_transform(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            base: ComponentBase::new(),
            position,
            rotation,
            scale,
            parent: None,
            dirty: Cell::new(true),
            cache: Cell::new(None),
        }
    }
    
    /// Builder pattern: Set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.set_position(position);
        self
    }
    
    /// Builder pattern: Set rotation from quaternion
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.set_rotation(rotation);
        self
    }
    
    /// Builder pattern: Set rotation from Euler angles (radians, XYZ order)
    pub fn with_rotation_euler(self, x: f32, y: f32, z: f32) -> Self {
        self.with_rotation(Quat::from_euler_angles(x, y, z))
    }
    
    /// Builder pattern: Set scale (uniform)
    pub fn with_uniform_scale(self, scale: f32) -> Self {
        self.with_scale(Vec3::new(scale, scale, scale))
    }
    
    /// Builder pattern: Set scale (non-uniform)
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.set_scale(scale);
        self
    }
    
    /// Local position relative to the parent
    pub fn position(&self) -> Vec3 {
        self.position
    }
    
    /// Local rotation relative to the parent
    pub fn rotation(&self) -> Quat {
        self.rotation
    }
    
    /// Local scale relative to the parent
    pub fn scale(&self) -> Vec3 {
        self.scale
    }
    
    /// Parent entity, if any
    pub fn parent(&self) -> Option<Entity> {
        self.parent
    }
    
    /// Set local position
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.mark_dirty();
    }
    
    /// Set local rotation
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
        self.mark_dirty();
    }
    
    /// Set local scale
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.mark_dirty();
    }
    
    /// Move by `delta` in the parent's space
    pub fn translate(&mut self, delta: Vec3) {
        self.set_position(self.position + delta);
    }
    
    /// Rotate by `delta` about the transform's own axes
    pub fn rotate(&mut self, delta: Quat) {
        self.set_rotation(self.rotation * delta);
    }
    
    /// Rotate by Euler angles (radians, XYZ order) about the transform's own axes
    pub fn rotate_euler(&mut self, x: f32, y: f32, z: f32) {
        self.rotate(Quat::from_euler_angles(x, y, z));
    }
    
    /// Local TRS as a plain math transform
    pub fn local_transform(&self) -> Transform {
        Transform {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
        }
    }
    
    /// Whether the cached world transform must be rebuilt on next read
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }
    
    /// Force the world transform to be recomputed on next read
    pub fn mark_dirty(&self) {
        self.dirty.set(true);
    }
    
    /// Reparent without any hierarchy check; callers go through
    /// [`World::set_parent`](crate::ecs::World::set_parent)
    pub(crate) fn set_parent_unchecked(&mut self, parent: Option<Entity>) {
        self.parent = parent;
        self.mark_dirty();
    }
    
    /// World transform given the parent's world transform
    ///
    /// Returns the cache when it is clean and was built from the same
    /// parent transform; otherwise recomputes and refreshes the cache.
    pub(crate) fn resolve_world(&self, parent_world: &Transform) -> Transform {
        if !self.dirty.get() {
            if let Some(cache) = self.cache.get() {
                if cache.parent_world == *parent_world {
                    return cache.world;
                }
            }
        }
        
        let world = parent_world.combine(&self.local_transform());
        self.cache.set(Some(WorldCache {
            parent_world: *parent_world,
            world,
        }));
        self.dirty.set(false);
        world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;
    
    #[test]
    fn test_transform_identity() {
        let transform = TransformComponent::identity();
        
        assert_eq!(transform.position(), Vec3::zeros());
        assert_relative_eq!(transform.rotation(), Quat::identity(), epsilon = 1e-6);
        assert_eq!(transform.scale(), Vec3::new(1.0, 1.0, 1.0));
        assert!(transform.parent().is_none());
    }
    
    #[test]
    fn test_mutations_mark_dirty() {
        let transform = TransformComponent::from_position(Vec3::new(1.0, 2.0, 3.0));
        let world = transform.resolve_world(&Transform::identity());
        assert_eq!(world.position, Vec3::new(1.0, 2.0, 3.0));
        assert!(!transform.is_dirty());
        
        let mut transform = transform;
        transform.translate(Vec3::new(1.0, 0.0, 0.0));
        assert!(transform.is_dirty());
        assert_eq!(transform.position(), Vec3::new(2.0, 2.0, 3.0));
        
        transform.resolve_world(&Transform::identity());
        transform.rotate(Quat::from_axis_angle(&Vec3::y_axis(), PI / 2.0));
        assert!(transform.is_dirty());
        
        transform.resolve_world(&Transform::identity());
        transform.set_scale(Vec3::new(2.0, 2.0, 2.0));
        assert!(transform.is_dirty());
    }
    
    #[test]
    fn test_cache_invalidated_by_parent_change() {
        let child = TransformComponent::from_position(Vec3::new(0.0, 0.0, 1.0));
        let parent_a = Transform::from_position(Vec3::new(1.0, 0.0, 0.0));
        let parent_b = Transform::from_position(Vec3::new(5.0, 0.0, 0.0));
        
        assert_relative_eq!(child.resolve_world(&parent_a).position, Vec3::new(1.0, 0.0, 1.0));
        assert_relative_eq!(child.resolve_world(&parent_b).position, Vec3::new(5.0, 0.0, 1.0));
    }
    
    #[test]
    fn test_rotate_is_relative() {
        let mut transform = TransformComponent::identity();
        let quarter = Quat::from_axis_angle(&Vec3::y_axis(), PI / 2.0);
        transform.rotate(quarter);
        transform.rotate(quarter);
        
        let rotated = transform.rotation() * Vec3::new(1.0, 0.0, 0.0);
        assert_relative_eq!(rotated, Vec3::new(-1.0, 0.0, 0.0), epsilon = 1e-5);
    }
}
