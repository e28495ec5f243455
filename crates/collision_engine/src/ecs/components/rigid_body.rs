//! Rigid body component
//!
//! Linear dynamics only: velocity, a per-step acceleration accumulator,
//! drag and restitution. Bodies never rotate in response to contacts.

use log::warn;

use crate::ecs::{Component, ComponentBase};
use crate::foundation::math::Vec3;
use crate::physics::collision::CollisionInfo;
use crate::physics::PhysicsError;

/// Smallest mass a body can have; lower values are clamped up to it
pub const MIN_MASS: f32 = 1e-3;

/// Snapshot of the response-relevant state of a body
///
/// Both bodies of a contact are read just before that contact is resolved,
/// so the impulse is computed once from the same state for both sides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    /// Linear velocity
    pub velocity: Vec3,
    /// Inverse mass, zero for kinematic bodies
    pub inverse_mass: f32,
    /// Restitution
    pub bounciness: f32,
    /// Kinematic flag
    pub is_kinematic: bool,
}

/// Component for entities moved by the physics step
#[derive(Debug, Clone)]
pub struct RigidBodyComponent {
    base: ComponentBase,
    
    /// Linear velocity in units per second
    pub velocity: Vec3,
    
    acceleration: Vec3,
    mass: f32,
    drag: f32,
    bounciness: f32,
    
    /// Whether gravity is added during integration
    pub use_gravity: bool,
    
    /// Kinematic bodies are never moved by the physics step
    pub is_kinematic: bool,
}

impl Component for RigidBodyComponent {
    fn base(&self) -> &ComponentBase {
        &self.base
    }
    
    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }
}

impl Default for RigidBodyComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBodyComponent {
    /// Create a dynamic body of mass 1 affected by gravity
    pub fn new() -> Self {
        Self {
            base: ComponentBase::new(),
            velocity: Vec3::zeros(),
            acceleration: Vec3::zeros(),
            mass: 1.0,
            drag: 0.0,
            bounciness: 0.0,
            use_gravity: true,
            is_kinematic: false,
        }
    }
    
    /// Create a kinematic body
    pub fn kinematic() -> Self {
        Self {
            is_kinematic: true,
            use_gravity: false,
            ..Self::new()
        }
    }
    
    /// Builder: mass (clamped to [`MIN_MASS`])
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.set_mass(mass);
        self
    }
    
    /// Builder: initial velocity
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }
    
    /// Builder: drag factor
    pub fn with_drag(mut self, drag: f32) -> Self {
        self.set_drag(drag);
        self
    }
    
    /// Builder: restitution
    pub fn with_bounciness(mut self, bounciness: f32) -> Self {
        self.set_bounciness(bounciness);
        self
    }
    
    /// Builder: gravity flag
    pub fn with_gravity(mut self, use_gravity: bool) -> Self {
        self.use_gravity = use_gravity;
        self
    }
    
    /// Mass
    pub fn mass(&self) -> f32 {
        self.mass
    }
    
    /// Set mass; zero, negative or non-finite values are clamped to [`MIN_MASS`]
    pub fn set_mass(&mut self, mass: f32) {
        if mass.is_finite() && mass >= MIN_MASS {
            self.mass = mass;
        } else {
            warn!("mass {mass} is invalid; clamping to {MIN_MASS}");
            self.mass = MIN_MASS;
        }
    }
    
    /// Set mass, rejecting values the tolerant setter would clamp
    pub fn try_set_mass(&mut self, mass: f32) -> Result<(), PhysicsError> {
        if !(mass.is_finite() && mass >= MIN_MASS) {
            return Err(PhysicsError::InvalidMass(mass));
        }
        self.mass = mass;
        Ok(())
    }
    
    /// Drag factor
    pub fn drag(&self) -> f32 {
        self.drag
    }
    
    /// Set drag, clamped to 0..=1
    pub fn set_drag(&mut self, drag: f32) {
        self.drag = if drag.is_nan() { 0.0 } else { drag.clamp(0.0, 1.0) };
    }
    
    /// Restitution
    pub fn bounciness(&self) -> f32 {
        self.bounciness
    }
    
    /// Set restitution, clamped to 0..=1
    pub fn set_bounciness(&mut self, bounciness: f32) {
        self.bounciness = if bounciness.is_nan() { 0.0 } else { bounciness.clamp(0.0, 1.0) };
    }
    
    /// Acceleration accumulated since the last integration
    pub fn accumulated_acceleration(&self) -> Vec3 {
        self.acceleration
    }
    
    /// Apply a force for the next integration step
    pub fn add_force(&mut self, force: Vec3) {
        self.acceleration += force / self.mass;
    }
    
    /// Add acceleration for the next integration step
    pub fn add_acceleration(&mut self, acceleration: Vec3) {
        self.acceleration += acceleration;
    }
    
    /// Change velocity immediately by `impulse / mass`
    pub fn add_impulse(&mut self, impulse: Vec3) {
        if !self.is_dynamic() {
            return;
        }
        self.velocity += impulse / self.mass;
    }
    
    /// Inverse mass, zero for kinematic bodies
    pub fn inverse_mass(&self) -> f32 {
        if self.is_kinematic {
            0.0
        } else {
            1.0 / self.mass
        }
    }
    
    /// Whether the physics step moves this body
    pub fn is_dynamic(&self) -> bool {
        self.is_enabled() && !self.is_kinematic
    }
    
    /// Response-relevant state
    pub fn snapshot(&self) -> BodyState {
        BodyState {
            velocity: self.velocity,
            inverse_mass: if self.is_dynamic() { self.inverse_mass() } else { 0.0 },
            bounciness: self.bounciness,
            is_kinematic: !self.is_dynamic(),
        }
    }
    
    /// Apply physics integration step and return the displacement
    ///
    /// Adds gravity when enabled, applies the accumulator, damps by drag and
    /// clears the accumulator. Disabled and kinematic bodies do not move.
    pub fn integrate(&mut self, delta_time: f32, gravity: Vec3) -> Vec3 {
        if !self.is_dynamic() {
            self.acceleration = Vec3::zeros();
            return Vec3::zeros();
        }
        
        let mut acceleration = self.acceleration;
        if self.use_gravity {
            acceleration += gravity;
        }
        self.velocity += acceleration * delta_time;
        
        if self.drag > 0.0 {
            self.velocity *= (1.0 - self.drag * delta_time).max(0.0);
        }
        
        self.acceleration = Vec3::zeros();
        self.velocity * delta_time
    }
    
    /// Respond to a contact seen from this body's side
    ///
    /// `info.normal` points from this body towards the other collider and
    /// `impulse` is the pair's impulse magnitude from [`contact_impulse`].
    /// `other` is the other side's body, `None` for static scenery; it only
    /// decides how the positional correction is shared. Applies the impulse
    /// to this body and returns the correction to move it by.
    pub fn handle_collision(
        &mut self,
        info: &CollisionInfo,
        other: Option<&BodyState>,
        impulse: f32,
        correction_percent: f32,
        penetration_slop: f32,
    ) -> Vec3 {
        if !self.is_dynamic() || !info.has_collision() {
            return Vec3::zeros();
        }
        let normal = info.normal;
        let other_dynamic = other.is_some_and(|body| !body.is_kinematic);
        
        let share = if other_dynamic { 0.5 } else { 1.0 };
        let depth = (info.penetration - penetration_slop).max(0.0);
        
        self.velocity -= normal * impulse * self.inverse_mass();
        -normal * depth * correction_percent * share
    }
}

/// Impulse magnitude for one contact
///
/// `a` and `b` are the bodies on the `collider_a` and `collider_b` sides
/// (`None` for scenery). Body A receives `-normal * j` and body B
/// `+normal * j`, scaled by their inverse masses. Separating pairs and pairs
/// with no movable side get zero. Restitution is the average of both
/// bodies, or the lone body's own value against scenery.
pub fn contact_impulse(info: &CollisionInfo, a: Option<&BodyState>, b: Option<&BodyState>) -> f32 {
    let inverse_mass_sum = a.map_or(0.0, |body| body.inverse_mass) + b.map_or(0.0, |body| body.inverse_mass);
    if inverse_mass_sum <= 0.0 || !info.has_collision() {
        return 0.0;
    }
    
    let velocity_a = a.map_or_else(Vec3::zeros, |body| body.velocity);
    let velocity_b = b.map_or_else(Vec3::zeros, |body| body.velocity);
    let relative_velocity = (velocity_b - velocity_a).dot(&info.normal);
    if relative_velocity >= 0.0 {
        return 0.0;
    }
    
    let restitution = match (a, b) {
        (Some(a), Some(b)) => (a.bounciness + b.bounciness) * 0.5,
        (Some(body), None) | (None, Some(body)) => body.bounciness,
        (None, None) => 0.0,
    };
    -(1.0 + restitution) * relative_velocity / inverse_mass_sum
}
