//! System trait for per-frame processing of entities and components

use super::World;

/// System trait for processing entities and components
pub trait System {
    /// Human-readable system name for logging
    fn name(&self) -> &'static str;
    
    /// Run the system for one frame
    fn run(&mut self, world: &mut World, delta_time: f32);
}
