//! Entity implementation

use std::fmt;

/// Entity identifier
///
/// Ids are handed out by a [`World`](super::World) and never reused by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity {
    id: u32,
}

impl Entity {
    /// Create a new entity with the given ID
    pub(super) fn new(id: u32) -> Self {
        Self { id }
    }
    
    /// Get the entity ID
    pub fn id(&self) -> u32 {
        self.id
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.id)
    }
}

/// Bookkeeping the world keeps for every entity it created
#[derive(Debug, Clone)]
pub(crate) struct EntityRecord {
    pub name: String,
    pub active: bool,
}
