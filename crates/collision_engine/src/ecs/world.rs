//! ECS World implementation
//!
//! The world is the registry every system receives by reference. It owns
//! its entity id counter, so several worlds can coexist without sharing
//! hidden state.

use std::any::{type_name, TypeId};
use std::collections::{BTreeMap, HashMap};

use log::{debug, warn};

use super::entity::EntityRecord;
use super::storage::{AnyStorage, ComponentStorage};
use super::{Component, EcsError, Entity};

/// ECS World containing all entities and components
pub struct World {
    next_entity_id: u32,
    entities: BTreeMap<Entity, EntityRecord>,
    component_storages: HashMap<TypeId, Box<dyn AnyStorage>>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self {
            next_entity_id: 0,
            entities: BTreeMap::new(),
            component_storages: HashMap::new(),
        }
    }
    
    /// Create a new entity with a generated name
    pub fn create_entity(&mut self) -> Entity {
        let name = format!("Entity {}", self.next_entity_id);
        self.create_named_entity(name)
    }
    
    /// Create a new entity with the given name
    pub fn create_named_entity(&mut self, name: impl Into<String>) -> Entity {
        let entity = Entity::new(self.next_entity_id);
        self.next_entity_id += 1;
        self.entities.insert(entity, EntityRecord {
            name: name.into(),
            active: true,
        });
        entity
    }
    
    /// Whether `entity` exists and has not been destroyed
    pub fn is_active(&self, entity: Entity) -> bool {
        self.entities.get(&entity).is_some_and(|record| record.active)
    }
    
    /// Name given to `entity` at creation
    pub fn entity_name(&self, entity: Entity) -> Option<&str> {
        self.entities.get(&entity).map(|record| record.name.as_str())
    }
    
    /// Number of active entities
    pub fn entity_count(&self) -> usize {
        self.entities.values().filter(|record| record.active).count()
    }
    
    /// Iterate over all active entities in creation order
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities
            .iter()
            .filter(|(_, record)| record.active)
            .map(|(&entity, _)| entity)
    }
    
    /// Add a component to an entity
    ///
    /// Any existing component of the same type is detached and returned.
    /// Adding to an unknown or destroyed entity is ignored (the component is
    /// dropped); use [`World::try_add_component`] to detect that.
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> Option<T> {
        match self.try_add_component(entity, component) {
            Ok(previous) => previous,
            Err(error) => {
                warn!("add_component::<{}> ignored: {error}", type_name::<T>());
                None
            }
        }
    }
    
    /// Add a component, failing if the entity is not active
    pub fn try_add_component<T: Component>(&mut self, entity: Entity, component: T) -> Result<Option<T>, EcsError> {
        if !self.is_active(entity) {
            return Err(EcsError::NoSuchEntity(entity));
        }
        let previous = self.storage_mut_or_insert::<T>().insert(entity, component);
        if previous.is_some() {
            debug!("{entity}: replaced existing {}", type_name::<T>());
        }
        Ok(previous)
    }
    
    /// Get a component from an entity
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.storage::<T>()?.get(entity)
    }
    
    /// Get a mutable component from an entity
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.storage_mut::<T>()?.get_mut(entity)
    }
    
    /// Get a component, reporting why it is unavailable
    pub fn require_component<T: Component>(&self, entity: Entity) -> Result<&T, EcsError> {
        if !self.is_active(entity) {
            return Err(EcsError::NoSuchEntity(entity));
        }
        self.get_component::<T>(entity).ok_or(EcsError::MissingComponent {
            entity,
            component: type_name::<T>(),
        })
    }
    
    /// Whether `entity` holds a `T`
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.storage::<T>().is_some_and(|storage| storage.contains(entity))
    }
    
    /// Remove a component from an entity, returning false if none existed
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> bool {
        self.take_component::<T>(entity).is_some()
    }
    
    /// Remove and return a component from an entity
    pub fn take_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.storage_mut::<T>()?.remove(entity)
    }
    
    /// All entities currently holding a `T`, enabled or not, in id order
    pub fn query_entities<T: Component>(&self) -> Vec<Entity> {
        self.storage::<T>()
            .map(|storage| storage.iter().map(|(entity, _)| entity).collect())
            .unwrap_or_default()
    }
    
    /// All `T` components with their owners, enabled or not, in id order
    pub fn query_components<T: Component>(&self) -> Vec<(Entity, &T)> {
        self.storage::<T>()
            .map(|storage| storage.iter().collect())
            .unwrap_or_default()
    }
    
    /// All `T` components with their owners (mutable), in id order
    pub fn query_components_mut<T: Component>(&mut self) -> Vec<(Entity, &mut T)> {
        self.storage_mut::<T>()
            .map(|storage| storage.iter_mut().collect())
            .unwrap_or_default()
    }
    
    /// Number of `T` components in the world
    pub fn component_count<T: Component>(&self) -> usize {
        self.storage::<T>().map_or(0, ComponentStorage::len)
    }
    
    /// Destroy an entity: detach every component and mark it inactive
    ///
    /// Destroying an unknown or already destroyed entity is a no-op.
    pub fn destroy(&mut self, entity: Entity) {
        let Some(record) = self.entities.get_mut(&entity) else {
            return;
        };
        if !record.active {
            return;
        }
        record.active = false;
        
        let mut removed = 0;
        for storage in self.component_storages.values_mut() {
            if storage.remove_entity(entity) {
                removed += 1;
            }
        }
        debug!("{entity} destroyed, {removed} component(s) detached");
    }
    
    /// Run the per-frame hook of every enabled component
    pub fn update(&mut self, delta_time: f32) {
        for storage in self.component_storages.values_mut() {
            storage.update_enabled(delta_time);
        }
    }
    
    /// Typed storage for `T`, if any component of that type was ever added
    pub(crate) fn storage<T: Component>(&self) -> Option<&ComponentStorage<T>> {
        self.component_storages
            .get(&TypeId::of::<T>())?
            .as_any()
            .downcast_ref::<ComponentStorage<T>>()
    }
    
    fn storage_mut<T: Component>(&mut self) -> Option<&mut ComponentStorage<T>> {
        self.component_storages
            .get_mut(&TypeId::of::<T>())?
            .as_any_mut()
            .downcast_mut::<ComponentStorage<T>>()
    }
    
    fn storage_mut_or_insert<T: Component>(&mut self) -> &mut ComponentStorage<T> {
        self.component_storages
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(ComponentStorage::<T>::new()))
            .as_any_mut()
            .downcast_mut::<ComponentStorage<T>>()
            .unwrap_or_else(|| unreachable!("storage registered under the TypeId of another type"))
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::ComponentBase;
    
    #[derive(Debug, Default)]
    struct Health {
        base: ComponentBase,
        points: i32,
        ticks: u32,
    }
    
    impl Health {
        fn new(points: i32) -> Self {
            Self { points, ..Default::default() }
        }
    }
    
    impl Component for Health {
        fn base(&self) -> &ComponentBase {
            &self.base
        }
        
        fn base_mut(&mut self) -> &mut ComponentBase {
            &mut self.base
        }
        
        fn update(&mut self, _delta_time: f32) {
            self.ticks += 1;
        }
    }
    
    #[derive(Debug, Default)]
    struct Tag {
        base: ComponentBase,
    }
    
    impl Component for Tag {
        fn base(&self) -> &ComponentBase {
            &self.base
        }
        
        fn base_mut(&mut self) -> &mut ComponentBase {
            &mut self.base
        }
    }
    
    #[test]
    fn test_entity_ids_are_per_world() {
        let mut first = World::new();
        let mut second = World::new();
        
        let a = first.create_entity();
        let b = first.create_named_entity("player");
        let c = second.create_entity();
        
        assert_eq!(a.id(), 0);
        assert_eq!(b.id(), 1);
        assert_eq!(c.id(), 0);
        assert_eq!(first.entity_name(b), Some("player"));
        assert_eq!(first.entity_count(), 2);
    }
    
    #[test]
    fn test_add_attaches_and_replaces() {
        let mut world = World::new();
        let entity = world.create_entity();
        
        assert!(world.add_component(entity, Health::new(10)).is_none());
        assert_eq!(world.get_component::<Health>(entity).unwrap().entity(), Some(entity));
        
        let previous = world.add_component(entity, Health::new(20)).unwrap();
        assert_eq!(previous.points, 10);
        assert_eq!(previous.entity(), None, "replaced component must be detached");
        assert_eq!(world.get_component::<Health>(entity).unwrap().points, 20);
        assert_eq!(world.component_count::<Health>(), 1);
    }
    
    #[test]
    fn test_remove_reports_absence() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.add_component(entity, Tag::default());
        
        assert!(world.remove_component::<Tag>(entity));
        assert!(!world.remove_component::<Tag>(entity));
        assert!(!world.remove_component::<Health>(entity));
        assert!(!world.has_component::<Tag>(entity));
    }
    
    #[test]
    fn test_queries_include_disabled_components() {
        let mut world = World::new();
        let a = world.create_entity();
        let b = world.create_entity();
        let c = world.create_entity();
        world.add_component(a, Health::new(1));
        world.add_component(c, Health::new(3));
        world.add_component(b, Tag::default());
        world.get_component_mut::<Health>(c).unwrap().set_enabled(false);
        
        assert_eq!(world.query_entities::<Health>(), vec![a, c]);
        let points: Vec<i32> = world
            .query_components::<Health>()
            .into_iter()
            .map(|(_, health)| health.points)
            .collect();
        assert_eq!(points, vec![1, 3]);
    }
    
    #[test]
    fn test_destroy_detaches_everything() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.add_component(entity, Health::new(5));
        world.add_component(entity, Tag::default());
        
        world.destroy(entity);
        
        assert!(!world.is_active(entity));
        assert!(world.get_component::<Health>(entity).is_none());
        assert!(world.query_entities::<Tag>().is_empty());
        assert_eq!(world.entity_count(), 0);
        
        // Destroyed entities refuse new components
        assert!(world.add_component(entity, Tag::default()).is_none());
        assert_eq!(
            world.try_add_component(entity, Tag::default()).unwrap_err(),
            EcsError::NoSuchEntity(entity)
        );
    }
    
    #[test]
    fn test_require_component_errors() {
        let mut world = World::new();
        let entity = world.create_entity();
        
        match world.require_component::<Health>(entity) {
            Err(EcsError::MissingComponent { entity: missing, .. }) => assert_eq!(missing, entity),
            other => panic!("unexpected result: {other:?}"),
        }
    }
    
    #[test]
    fn test_update_runs_enabled_components_only() {
        let mut world = World::new();
        let a = world.create_entity();
        let b = world.create_entity();
        world.add_component(a, Health::new(1));
        world.add_component(b, Health::new(1));
        world.get_component_mut::<Health>(b).unwrap().set_enabled(false);
        
        world.update(0.016);
        world.update(0.016);
        
        assert_eq!(world.get_component::<Health>(a).unwrap().ticks, 2);
        assert_eq!(world.get_component::<Health>(b).unwrap().ticks, 0);
    }
}
