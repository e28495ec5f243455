//! # Core Engine Module
//!
//! Shared abstractions that the other subsystems depend on.
//!
//! ## Organization
//!
//! - **Config**: Settings for the engine and the physics pipeline

pub mod config;

// Re-export commonly used config types
pub use config::{
    ApplicationConfig,
    EngineConfig,
    PhysicsConfig,
};
pub use crate::config::{Config, ConfigError, ConfigFormat};
