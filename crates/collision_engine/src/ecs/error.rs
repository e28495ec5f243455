//! Errors reported by the strict registry and hierarchy APIs

use super::Entity;

/// Registry and hierarchy errors
///
/// The tolerant APIs never return these; they substitute safe defaults
/// instead. The `try_`/`require_` variants surface them.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// Entity was never created or has been destroyed
    #[error("{0} does not exist or has been destroyed")]
    NoSuchEntity(Entity),
    
    /// Entity exists but lacks the requested component
    #[error("{entity} has no {component} component")]
    MissingComponent {
        /// Entity that was queried
        entity: Entity,
        /// Type name of the missing component
        component: &'static str,
    },
    
    /// Reparenting would create a loop in the transform hierarchy
    #[error("making {parent} the parent of {child} would create a cycle")]
    HierarchyCycle {
        /// Entity being reparented
        child: Entity,
        /// Requested parent
        parent: Entity,
    },
    
    /// An entity cannot be its own parent
    #[error("{0} cannot be its own parent")]
    SelfParent(Entity),
}
