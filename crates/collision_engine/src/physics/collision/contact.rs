//! Contact records produced by the narrow phase

use crate::ecs::Entity;
use crate::foundation::math::Vec3;

/// Raw shape-vs-shape contact, before it is tied to entities
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// World-space contact point
    pub point: Vec3,
    /// Unit normal pointing from the first shape towards the second
    pub normal: Vec3,
    /// Overlap along the normal; zero when the shapes only touch
    pub penetration: f32,
}

impl Contact {
    /// The same contact seen from the other shape
    pub fn mirrored(self) -> Self {
        Self {
            normal: -self.normal,
            ..self
        }
    }
}

/// Per-step contact record between two colliders
///
/// Created fresh every step and discarded after the response pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionInfo {
    /// Entity owning the first collider
    pub collider_a: Entity,
    /// Entity owning the second collider
    pub collider_b: Entity,
    /// World-space contact point
    pub contact_point: Vec3,
    /// Unit normal pointing from A towards B (zero when not colliding)
    pub normal: Vec3,
    /// Overlap along the normal (positive only when overlapping)
    pub penetration: f32,
}

impl CollisionInfo {
    /// Build a record from a narrow-phase result
    pub fn from_contact(collider_a: Entity, collider_b: Entity, contact: Option<Contact>) -> Self {
        match contact {
            Some(contact) => Self {
                collider_a,
                collider_b,
                contact_point: contact.point,
                normal: contact.normal,
                penetration: contact.penetration.max(0.0),
            },
            None => Self::none(collider_a, collider_b),
        }
    }
    
    /// Record for a pair that does not collide
    pub fn none(collider_a: Entity, collider_b: Entity) -> Self {
        Self {
            collider_a,
            collider_b,
            contact_point: Vec3::zeros(),
            normal: Vec3::zeros(),
            penetration: 0.0,
        }
    }
    
    /// Whether the colliders actually overlap
    pub fn has_collision(&self) -> bool {
        self.penetration > 0.0
    }
    
    /// The same record from B's point of view: roles swapped, normal negated
    pub fn mirrored(&self) -> Self {
        Self {
            collider_a: self.collider_b,
            collider_b: self.collider_a,
            contact_point: self.contact_point,
            normal: -self.normal,
            penetration: self.penetration,
        }
    }
}
