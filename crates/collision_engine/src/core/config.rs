//! # Unified Configuration System
//!
//! Configuration structures for engine behavior and the physics pipeline.
//! Every structure is serializable (TOML or RON through [`Config`]) and
//! validates its own values.

use serde::{Serialize, Deserialize};

use crate::config::{Config, ConfigError};
use crate::foundation::math::Vec3;

/// # Physics Configuration
///
/// Tunables for the collision pipeline and rigid-body integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity acceleration applied to gravity-affected bodies (units/s²)
    pub gravity: Vec3,
    /// Fraction of the penetration removed by positional correction each step
    pub correction_percent: f32,
    /// Penetration tolerated before positional correction kicks in
    pub penetration_slop: f32,
    /// Raycast against boxes and capsules too (spheres only when false)
    pub raycast_all_shapes: bool,
}

impl PhysicsConfig {
    /// Create a physics configuration with Earth gravity
    pub fn new() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            correction_percent: 0.8,
            penetration_slop: 0.01,
            raycast_all_shapes: false,
        }
    }
    
    /// Set gravity
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }
    
    /// Set positional correction parameters
    pub fn with_correction(mut self, percent: f32, slop: f32) -> Self {
        self.correction_percent = percent;
        self.penetration_slop = slop;
        self
    }
    
    /// Enable or disable box and capsule raycasting
    pub fn with_raycast_all_shapes(mut self, enabled: bool) -> Self {
        self.raycast_all_shapes = enabled;
        self
    }
    
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.gravity.iter().all(|c| c.is_finite()) {
            return Err(ConfigError::Invalid("gravity must be finite".to_string()));
        }
        if !(0.0..=1.0).contains(&self.correction_percent) {
            return Err(ConfigError::Invalid(format!(
                "correction_percent must be within [0, 1], got {}",
                self.correction_percent
            )));
        }
        if !self.penetration_slop.is_finite() || self.penetration_slop < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "penetration_slop must be non-negative, got {}",
                self.penetration_slop
            )));
        }
        Ok(())
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Engine Configuration
///
/// Core engine behavior configuration: logging and debug features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level for the engine
    pub log_level: String,
    /// Whether to enable debug features
    pub debug_mode: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            debug_mode: cfg!(debug_assertions),
        }
    }
    
    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
    
    /// Enable debug mode
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug_mode = enabled;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration that encompasses all engine subsystems.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Physics pipeline configuration
    pub physics: PhysicsConfig,
}

impl ApplicationConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.physics.validate()
    }
}

impl Config for ApplicationConfig {}
