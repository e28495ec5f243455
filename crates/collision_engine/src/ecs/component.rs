//! Component trait and shared component state

use std::any::Any;

use super::Entity;

/// State every component carries: its owner and an enabled flag
///
/// The owner is a non-owning back-reference set by the world when the
/// component is attached and cleared when it is detached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentBase {
    entity: Option<Entity>,
    enabled: bool,
}

impl ComponentBase {
    /// Create a detached, enabled component base
    pub fn new() -> Self {
        Self {
            entity: None,
            enabled: true,
        }
    }
    
    /// Owning entity, if attached
    pub fn entity(&self) -> Option<Entity> {
        self.entity
    }
    
    /// Whether the component participates in updates
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for ComponentBase {
    fn default() -> Self {
        Self::new()
    }
}

/// Capability shared by everything that can be attached to an entity
///
/// Implementors only provide access to their [`ComponentBase`]; attach,
/// detach and enable handling come for free. Override [`Component::update`]
/// for per-frame behaviour.
pub trait Component: Any {
    /// Shared component state
    fn base(&self) -> &ComponentBase;
    
    /// Shared component state (mutable)
    fn base_mut(&mut self) -> &mut ComponentBase;
    
    /// Owning entity, `None` while detached
    fn entity(&self) -> Option<Entity> {
        self.base().entity
    }
    
    /// Whether the component is enabled
    fn is_enabled(&self) -> bool {
        self.base().enabled
    }
    
    /// Enable or disable the component
    fn set_enabled(&mut self, enabled: bool) {
        self.base_mut().enabled = enabled;
    }
    
    /// Called by the world when the component is attached to `entity`
    fn on_attach(&mut self, entity: Entity) {
        self.base_mut().entity = Some(entity);
    }
    
    /// Called by the world when the component is removed or replaced
    fn on_detach(&mut self) {
        self.base_mut().entity = None;
    }
    
    /// Per-frame hook, run by [`World::update`](super::World::update) on enabled components
    fn update(&mut self, _delta_time: f32) {}
}
