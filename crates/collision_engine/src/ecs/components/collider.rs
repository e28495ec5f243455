//! Collider component
//!
//! Binds a [`ColliderShape`] to an entity. The shape is placed in the world
//! by the entity's world transform each physics step.

use crate::ecs::{Component, ComponentBase};
use crate::foundation::math::{Transform, Vec3};
use crate::physics::collision::{Aabb, ColliderShape, WorldShape};
use crate::physics::CollisionLayers;

/// Component that gives an entity a collision shape
#[derive(Debug, Clone)]
pub struct ColliderComponent {
    base: ComponentBase,
    
    shape: ColliderShape,
    
    /// Report overlaps only, never respond physically
    pub is_trigger: bool,
    
    /// Scenery that never moves; static pairs are never tested against each other
    pub is_static: bool,
    
    /// Collision layer tag
    pub layer: CollisionLayers,
}

impl Component for ColliderComponent {
    fn base(&self) -> &ComponentBase {
        &self.base
    }
    
    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }
}

impl ColliderComponent {
    /// Create a new collider with default settings
    pub fn new(shape: ColliderShape) -> Self {
        Self {
            base: ComponentBase::new(),
            shape,
            is_trigger: false,
            is_static: false,
            layer: CollisionLayers::default(),
        }
    }
    
    /// Sphere collider
    pub fn sphere(radius: f32) -> Self {
        Self::new(ColliderShape::sphere(radius))
    }
    
    /// Box collider
    pub fn cuboid(half_extents: Vec3) -> Self {
        Self::new(ColliderShape::cuboid(half_extents))
    }
    
    /// Capsule collider along local Y; `height` includes both caps
    pub fn capsule(radius: f32, height: f32) -> Self {
        Self::new(ColliderShape::capsule(radius, height))
    }
    
    /// Mark this as a trigger volume
    pub fn as_trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }
    
    /// Mark this as static scenery
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }
    
    /// Put the collider on a layer
    pub fn with_layer(mut self, layer: CollisionLayers) -> Self {
        self.layer = layer;
        self
    }
    
    /// Local shape
    pub fn shape(&self) -> &ColliderShape {
        &self.shape
    }
    
    /// Replace the local shape
    pub fn set_shape(&mut self, shape: ColliderShape) {
        self.shape = shape;
    }
    
    /// Shape placed by `world_transform`
    pub fn world_shape(&self, world_transform: &Transform) -> WorldShape {
        self.shape.to_world(world_transform)
    }
    
    /// Broad-phase bounds under `world_transform`
    pub fn world_bounds(&self, world_transform: &Transform) -> Aabb {
        self.world_shape(world_transform).bounds()
    }
}
