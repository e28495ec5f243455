//! Per-type component storage
//!
//! Every component type gets its own [`ComponentStorage`], keyed by entity
//! and ordered by entity id so iteration (and therefore a physics step) is
//! deterministic. The world keeps the storages type-erased behind
//! [`AnyStorage`].

use std::any::Any;
use std::collections::BTreeMap;

use super::{Component, Entity};

/// Typed component storage: at most one `T` per entity
pub struct ComponentStorage<T: Component> {
    components: BTreeMap<Entity, T>,
}

impl<T: Component> ComponentStorage<T> {
    /// Create an empty storage
    pub fn new() -> Self {
        Self {
            components: BTreeMap::new(),
        }
    }
    
    /// Attach `component` to `entity`, detaching and returning any previous one
    pub fn insert(&mut self, entity: Entity, mut component: T) -> Option<T> {
        component.on_attach(entity);
        let mut previous = self.components.insert(entity, component)?;
        previous.on_detach();
        Some(previous)
    }
    
    /// Detach and return the component of `entity`
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let mut component = self.components.remove(&entity)?;
        component.on_detach();
        Some(component)
    }
    
    /// Component of `entity`
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.components.get(&entity)
    }
    
    /// Component of `entity` (mutable)
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.components.get_mut(&entity)
    }
    
    /// Whether `entity` holds a component of this type
    pub fn contains(&self, entity: Entity) -> bool {
        self.components.contains_key(&entity)
    }
    
    /// Number of stored components
    pub fn len(&self) -> usize {
        self.components.len()
    }
    
    /// Whether the storage is empty
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
    
    /// Iterate `(entity, component)` in entity-id order
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.components.iter().map(|(&entity, component)| (entity, component))
    }
    
    /// Iterate `(entity, component)` mutably in entity-id order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.components.iter_mut().map(|(&entity, component)| (entity, component))
    }
}

impl<T: Component> Default for ComponentStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Type-erased view of a [`ComponentStorage`] used by the world
pub(crate) trait AnyStorage {
    /// Detach and drop the component of `entity`; false if it had none
    fn remove_entity(&mut self, entity: Entity) -> bool;
    
    /// Run [`Component::update`] on every enabled component
    fn update_enabled(&mut self, delta_time: f32);
    
    fn as_any(&self) -> &dyn Any;
    
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> AnyStorage for ComponentStorage<T> {
    fn remove_entity(&mut self, entity: Entity) -> bool {
        self.remove(entity).is_some()
    }
    
    fn update_enabled(&mut self, delta_time: f32) {
        for component in self.components.values_mut() {
            if component.is_enabled() {
                component.update(delta_time);
            }
        }
    }
    
    fn as_any(&self) -> &dyn Any {
        self
    }
    
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
