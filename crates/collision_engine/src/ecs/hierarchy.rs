//! World-space transform queries and parenting
//!
//! Transforms form a forest addressed by entity: each
//! [`TransformComponent`] may name a parent entity. Reparenting is checked
//! so the forest never contains a cycle. A transform whose parent has been
//! destroyed (or lost its transform) behaves as a root, and an entity with
//! no transform at all reports the identity transform.

use log::warn;

use super::components::TransformComponent;
use super::{EcsError, Entity, World};
use crate::foundation::math::{self, Quat, Transform, Vec3};

impl World {
    /// Set or clear the parent of `child`
    ///
    /// Both entities must hold a [`TransformComponent`]; a parent that is
    /// `child` itself or one of its descendants is rejected.
    pub fn set_parent(&mut self, child: Entity, parent: Option<Entity>) -> Result<(), EcsError> {
        self.require_component::<TransformComponent>(child)?;
        
        if let Some(parent) = parent {
            if parent == child {
                return Err(EcsError::SelfParent(child));
            }
            self.require_component::<TransformComponent>(parent)?;
            if self.ancestors(parent).any(|ancestor| ancestor == child) {
                warn!("rejected reparent of {child} under {parent}: cycle");
                return Err(EcsError::HierarchyCycle { child, parent });
            }
        }
        
        if let Some(transform) = self.get_component_mut::<TransformComponent>(child) {
            transform.set_parent_unchecked(parent);
        }
        Ok(())
    }
    
    /// Parent of `entity` in the transform hierarchy
    pub fn parent_of(&self, entity: Entity) -> Option<Entity> {
        self.get_component::<TransformComponent>(entity)?.parent()
    }
    
    /// Direct children of `entity`, in id order
    pub fn children(&self, entity: Entity) -> Vec<Entity> {
        self.query_components::<TransformComponent>()
            .into_iter()
            .filter(|(_, transform)| transform.parent() == Some(entity))
            .map(|(child, _)| child)
            .collect()
    }
    
    /// World transform of `entity`, identity if it has no transform
    pub fn world_transform(&self, entity: Entity) -> Transform {
        self.try_world_transform(entity).unwrap_or_default()
    }
    
    /// World transform of `entity`, failing if it has no transform
    pub fn try_world_transform(&self, entity: Entity) -> Result<Transform, EcsError> {
        let storage = self.storage::<TransformComponent>().ok_or(EcsError::MissingComponent {
            entity,
            component: std::any::type_name::<TransformComponent>(),
        })?;
        self.require_component::<TransformComponent>(entity)?;
        
        // Collect the chain leaf-to-root, then resolve root-to-leaf so every
        // ancestor refreshes its cache before its child reads it.
        let mut chain: Vec<&TransformComponent> = Vec::new();
        let mut current = Some(entity);
        while let Some(node) = current {
            let Some(transform) = storage.get(node) else {
                break;
            };
            if chain.len() >= storage.len() {
                warn!("transform hierarchy above {entity} is cyclic; truncating");
                break;
            }
            chain.push(transform);
            current = transform.parent();
        }
        
        let world = chain
            .iter()
            .rev()
            .fold(Transform::identity(), |parent_world, transform| transform.resolve_world(&parent_world));
        Ok(world)
    }
    
    /// World-space position of `entity`
    pub fn world_position(&self, entity: Entity) -> Vec3 {
        self.world_transform(entity).position
    }
    
    /// World-space rotation of `entity`
    pub fn world_rotation(&self, entity: Entity) -> Quat {
        self.world_transform(entity).rotation
    }
    
    /// World-space scale of `entity`
    pub fn world_scale(&self, entity: Entity) -> Vec3 {
        self.world_transform(entity).scale
    }
    
    /// World-space forward direction (-Z rotated)
    pub fn forward(&self, entity: Entity) -> Vec3 {
        self.world_rotation(entity) * math::forward_axis()
    }
    
    /// World-space right direction (+X rotated)
    pub fn right(&self, entity: Entity) -> Vec3 {
        self.world_rotation(entity) * math::right_axis()
    }
    
    /// World-space up direction (+Y rotated)
    pub fn up(&self, entity: Entity) -> Vec3 {
        self.world_rotation(entity) * math::up_axis()
    }
    
    /// Rotate `entity` so its forward axis points at the world-space `target`
    ///
    /// The local rotation is solved against the parent's world rotation.
    /// Returns false (and changes nothing) when the entity has no transform
    /// or the target coincides with its position.
    pub fn look_at(&mut self, entity: Entity, target: Vec3, up: Vec3) -> bool {
        if !self.has_component::<TransformComponent>(entity) {
            return false;
        }
        let direction = target - self.world_position(entity);
        let Some(desired) = math::look_rotation(direction, up) else {
            warn!("look_at on {entity} ignored: target coincides with position");
            return false;
        };
        let parent_rotation = self
            .parent_of(entity)
            .map_or_else(Quat::identity, |parent| self.world_rotation(parent));
        
        if let Some(transform) = self.get_component_mut::<TransformComponent>(entity) {
            transform.set_rotation(parent_rotation.inverse() * desired);
        }
        true
    }
    
    /// Move `entity` by a world-space offset
    ///
    /// The offset is converted into the parent's space first, so children
    /// of rotated or scaled parents move by exactly `delta` in the world.
    pub fn translate_world(&mut self, entity: Entity, delta: Vec3) {
        let local_delta = match self.parent_of(entity) {
            Some(parent) => self.world_transform(parent).inverse_transform_vector(delta),
            None => delta,
        };
        if let Some(transform) = self.get_component_mut::<TransformComponent>(entity) {
            transform.translate(local_delta);
        }
    }
    
    fn ancestors(&self, entity: Entity) -> impl Iterator<Item = Entity> + '_ {
        let limit = self.component_count::<TransformComponent>();
        std::iter::successors(Some(entity), move |&node| self.parent_of(node)).take(limit + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;
    
    fn spawn(world: &mut World, position: Vec3) -> Entity {
        let entity = world.create_entity();
        world.add_component(entity, TransformComponent::from_position(position));
        entity
    }
    
    #[test]
    fn test_root_world_equals_local() {
        let mut world = World::new();
        let entity = world.create_entity();
        let rotation = Quat::from_axis_angle(&Vec3::x_axis(), 0.3);
        world.add_component(entity, TransformComponent::from_transform(
            Vec3::new(1.0, 2.0, 3.0),
            rotation,
            Vec3::new(2.0, 1.0, 0.5),
        ));
        
        let world_transform = world.world_transform(entity);
        assert_eq!(world_transform.position, Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(world_transform.rotation, rotation, epsilon = 1e-6);
        assert_eq!(world_transform.scale, Vec3::new(2.0, 1.0, 0.5));
    }
    
    #[test]
    fn test_child_composes_parent() {
        let mut world = World::new();
        let parent = world.create_entity();
        world.add_component(parent, TransformComponent::from_transform(
            Vec3::new(1.0, 0.0, 0.0),
            Quat::from_axis_angle(&Vec3::y_axis(), PI / 2.0),
            Vec3::new(2.0, 2.0, 2.0),
        ));
        let child = spawn(&mut world, Vec3::new(0.0, 0.0, 1.0));
        world.set_parent(child, Some(parent)).unwrap();
        
        // (0,0,1) scaled to (0,0,2), rotated about Y to (2,0,0), translated by (1,0,0)
        assert_relative_eq!(world.world_position(child), Vec3::new(3.0, 0.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(world.world_scale(child), Vec3::new(2.0, 2.0, 2.0), epsilon = 1e-6);
    }
    
    #[test]
    fn test_moving_parent_moves_child() {
        let mut world = World::new();
        let parent = spawn(&mut world, Vec3::zeros());
        let child = spawn(&mut world, Vec3::new(0.0, 1.0, 0.0));
        world.set_parent(child, Some(parent)).unwrap();
        assert_relative_eq!(world.world_position(child), Vec3::new(0.0, 1.0, 0.0));
        
        world
            .get_component_mut::<TransformComponent>(parent)
            .unwrap()
            .set_position(Vec3::new(5.0, 0.0, 0.0));
        
        assert_relative_eq!(world.world_position(child), Vec3::new(5.0, 1.0, 0.0));
    }
    
    #[test]
    fn test_cycles_rejected() {
        let mut world = World::new();
        let a = spawn(&mut world, Vec3::zeros());
        let b = spawn(&mut world, Vec3::zeros());
        let c = spawn(&mut world, Vec3::zeros());
        world.set_parent(b, Some(a)).unwrap();
        world.set_parent(c, Some(b)).unwrap();
        
        assert_eq!(world.set_parent(a, Some(c)), Err(EcsError::HierarchyCycle { child: a, parent: c }));
        assert_eq!(world.set_parent(a, Some(a)), Err(EcsError::SelfParent(a)));
        assert_eq!(world.children(a), vec![b]);
        
        world.set_parent(c, None).unwrap();
        assert!(world.parent_of(c).is_none());
    }
    
    #[test]
    fn test_missing_transform_defaults_to_identity() {
        let mut world = World::new();
        let bare = world.create_entity();
        
        assert_eq!(world.world_position(bare), Vec3::zeros());
        assert!(world.try_world_transform(bare).is_err());
        assert!(world.set_parent(bare, None).is_err());
    }
    
    #[test]
    fn test_destroyed_parent_makes_child_root() {
        let mut world = World::new();
        let parent = spawn(&mut world, Vec3::new(10.0, 0.0, 0.0));
        let child = spawn(&mut world, Vec3::new(1.0, 0.0, 0.0));
        world.set_parent(child, Some(parent)).unwrap();
        assert_relative_eq!(world.world_position(child), Vec3::new(11.0, 0.0, 0.0));
        
        world.destroy(parent);
        
        assert_relative_eq!(world.world_position(child), Vec3::new(1.0, 0.0, 0.0));
    }
    
    #[test]
    fn test_direction_vectors() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.add_component(entity, TransformComponent::from_position_rotation(
            Vec3::zeros(),
            Quat::from_axis_angle(&Vec3::y_axis(), PI / 2.0),
        ));
        
        assert_relative_eq!(world.forward(entity), Vec3::new(-1.0, 0.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(world.right(entity), Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-5);
        assert_relative_eq!(world.up(entity), Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-5);
    }
    
    #[test]
    fn test_look_at_under_rotated_parent() {
        let mut world = World::new();
        let parent = world.create_entity();
        world.add_component(parent, TransformComponent::from_position_rotation(
            Vec3::zeros(),
            Quat::from_axis_angle(&Vec3::y_axis(), 0.7),
        ));
        let child = spawn(&mut world, Vec3::new(0.0, 0.0, 5.0));
        world.set_parent(child, Some(parent)).unwrap();
        let target = Vec3::new(3.0, 1.0, -2.0);
        
        assert!(world.look_at(child, target, math::up_axis()));
        
        let expected = (target - world.world_position(child)).normalize();
        assert_relative_eq!(world.forward(child), expected, epsilon = 1e-4);
        
        // Looking at our own position is a no-op
        let position = world.world_position(child);
        assert!(!world.look_at(child, position, math::up_axis()));
    }
    
    #[test]
    fn test_translate_world_under_scaled_parent() {
        let mut world = World::new();
        let parent = world.create_entity();
        world.add_component(parent, TransformComponent::identity().with_uniform_scale(2.0));
        let child = spawn(&mut world, Vec3::new(1.0, 0.0, 0.0));
        world.set_parent(child, Some(parent)).unwrap();
        let before = world.world_position(child);
        
        world.translate_world(child, Vec3::new(0.0, 1.0, 0.0));
        
        assert_relative_eq!(world.world_position(child) - before, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-5);
    }
}
