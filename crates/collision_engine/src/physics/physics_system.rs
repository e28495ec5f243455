//! Physics step orchestration
//!
//! Each [`PhysicsSystem::update`] runs, in order:
//!
//! 1. clear the previous step's contacts
//! 2. broad phase: pairwise AABB tests over every enabled collider
//! 3. narrow phase: exact contacts for the surviving pairs
//! 4. response: trigger notifications, or impulses and positional
//!    correction on the rigid bodies involved
//! 5. integration of every dynamic rigid body
//!
//! The system owns no entity data; it reads and writes the [`World`] it is
//! handed and only remembers contact bookkeeping between steps.

use std::collections::HashSet;

use log::{debug, info, warn};

use crate::core::PhysicsConfig;
use crate::ecs::components::{contact_impulse, BodyState, ColliderComponent, RigidBodyComponent, TransformComponent};
use crate::ecs::{Component, Entity, System, World};
use crate::foundation::math::Vec3;
use crate::physics::collision::{Aabb, CollisionInfo, Ray, RayHit, ShapeKind, WorldShape};
use crate::physics::PhysicsError;

/// Unordered pair of colliding entities (smaller id first)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollisionPair {
    /// Entity with the smaller id
    pub entity_a: Entity,
    /// Entity with the larger id
    pub entity_b: Entity,
}

impl CollisionPair {
    /// Create a new collision pair (always stores smaller entity ID first for consistency)
    pub fn new(entity_a: Entity, entity_b: Entity) -> Self {
        if entity_a.id() <= entity_b.id() {
            Self { entity_a, entity_b }
        } else {
            Self { entity_a: entity_b, entity_b: entity_a }
        }
    }
    
    /// Whether `entity` is one of the pair
    pub fn contains(&self, entity: Entity) -> bool {
        self.entity_a == entity || self.entity_b == entity
    }
}

/// A trigger collider overlapped another collider during the last step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEvent {
    /// The trigger collider
    pub trigger: Entity,
    /// The collider inside it
    pub other: Entity,
}

/// Counters describing the current simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhysicsStats {
    /// Collider components in the world
    pub collider_count: usize,
    /// Rigid body components in the world
    pub rigid_body_count: usize,
    /// Overlapping pairs found by the last step
    pub active_collision_count: usize,
}

/// Collider placed in the world for one step
struct PlacedCollider {
    entity: Entity,
    shape: WorldShape,
    bounds: Aabb,
    is_trigger: bool,
    is_static: bool,
}

/// Overlapping pair found by the narrow phase
#[derive(Debug, Clone, Copy)]
struct ActiveContact {
    info: CollisionInfo,
    a_is_trigger: bool,
    b_is_trigger: bool,
}

impl ActiveContact {
    fn is_trigger(&self) -> bool {
        self.a_is_trigger || self.b_is_trigger
    }
}

/// Rigid-body collision and response system
pub struct PhysicsSystem {
    config: PhysicsConfig,
    contacts: Vec<ActiveContact>,
    trigger_events: Vec<TriggerEvent>,
    current_pairs: HashSet<CollisionPair>,
    previous_pairs: HashSet<CollisionPair>,
}

impl PhysicsSystem {
    /// Create a physics system with the given configuration
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            contacts: Vec::new(),
            trigger_events: Vec::new(),
            current_pairs: HashSet::new(),
            previous_pairs: HashSet::new(),
        }
    }
    
    /// Reset contact bookkeeping before the first step
    pub fn initialize(&mut self) {
        self.clear_state();
        info!("Physics system initialized (gravity {:?})", self.config.gravity);
    }
    
    /// Drop all contact bookkeeping
    pub fn cleanup(&mut self) {
        self.clear_state();
        info!("Physics system cleaned up");
    }
    
    fn clear_state(&mut self) {
        self.contacts.clear();
        self.trigger_events.clear();
        self.current_pairs.clear();
        self.previous_pairs.clear();
    }
    
    /// Current configuration
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }
    
    /// Replace the configuration
    pub fn set_config(&mut self, config: PhysicsConfig) {
        self.config = config;
    }
    
    /// Gravity applied to gravity-affected bodies
    pub fn gravity(&self) -> Vec3 {
        self.config.gravity
    }
    
    /// Set gravity
    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.config.gravity = gravity;
    }
    
    /// Advance the simulation by `delta_time` seconds
    ///
    /// Negative or non-finite steps are ignored.
    pub fn update(&mut self, world: &mut World, delta_time: f32) {
        if !delta_time.is_finite() || delta_time < 0.0 {
            warn!("Ignoring physics step with invalid delta time {delta_time}");
            return;
        }
        
        self.contacts.clear();
        self.trigger_events.clear();
        std::mem::swap(&mut self.current_pairs, &mut self.previous_pairs);
        self.current_pairs.clear();
        
        let colliders = Self::place_colliders(world);
        let candidates = Self::broad_phase(&colliders);
        self.narrow_phase(&colliders, &candidates);
        self.resolve_contacts(world);
        self.integrate(world, delta_time);
        
        debug!(
            "Physics step {delta_time:.4}s: {} colliders, {} candidate pairs, {} contacts",
            colliders.len(),
            candidates.len(),
            self.contacts.len()
        );
    }
    
    /// Every enabled collider in its world placement, in entity id order
    fn place_colliders(world: &World) -> Vec<PlacedCollider> {
        world
            .query_components::<ColliderComponent>()
            .into_iter()
            .filter(|(_, collider)| collider.is_enabled())
            .map(|(entity, collider)| {
                if !world.has_component::<TransformComponent>(entity) {
                    debug!("{entity} has a collider but no transform; placing it at the origin");
                }
                let shape = collider.world_shape(&world.world_transform(entity));
                PlacedCollider {
                    entity,
                    bounds: shape.bounds(),
                    shape,
                    is_trigger: collider.is_trigger,
                    is_static: collider.is_static,
                }
            })
            .collect()
    }
    
    /// Index pairs whose bounds overlap; static-static pairs are skipped
    fn broad_phase(colliders: &[PlacedCollider]) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, a) in colliders.iter().enumerate() {
            for (j, b) in colliders.iter().enumerate().skip(i + 1) {
                if a.is_static && b.is_static {
                    continue;
                }
                if a.bounds.intersects(&b.bounds) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }
    
    fn narrow_phase(&mut self, colliders: &[PlacedCollider], candidates: &[(usize, usize)]) {
        for &(i, j) in candidates {
            let (a, b) = (&colliders[i], &colliders[j]);
            let info = CollisionInfo::from_contact(a.entity, b.entity, a.shape.contact(&b.shape));
            if !info.has_collision() {
                continue;
            }
            self.current_pairs.insert(CollisionPair::new(a.entity, b.entity));
            self.contacts.push(ActiveContact {
                info,
                a_is_trigger: a.is_trigger,
                b_is_trigger: b.is_trigger,
            });
        }
    }
    
    fn resolve_contacts(&mut self, world: &mut World) {
        let percent = self.config.correction_percent;
        let slop = self.config.penetration_slop;
        let mut corrections: Vec<(Entity, Vec3)> = Vec::new();
        
        for contact in &self.contacts {
            let info = contact.info;
            
            if contact.is_trigger() {
                if contact.a_is_trigger {
                    self.trigger_events.push(TriggerEvent { trigger: info.collider_a, other: info.collider_b });
                }
                if contact.b_is_trigger {
                    self.trigger_events.push(TriggerEvent { trigger: info.collider_b, other: info.collider_a });
                }
                debug!("Trigger overlap between {} and {}", info.collider_a, info.collider_b);
                continue;
            }
            
            // Read both bodies as left by earlier contacts, then apply one
            // equal and opposite impulse to the pair
            let state_a = Self::body_state(world, info.collider_a);
            let state_b = Self::body_state(world, info.collider_b);
            let impulse = contact_impulse(&info, state_a.as_ref(), state_b.as_ref());
            
            if let Some(body) = world.get_component_mut::<RigidBodyComponent>(info.collider_a) {
                let correction = body.handle_collision(&info, state_b.as_ref(), impulse, percent, slop);
                corrections.push((info.collider_a, correction));
            }
            let mirrored = info.mirrored();
            if let Some(body) = world.get_component_mut::<RigidBodyComponent>(info.collider_b) {
                let correction = body.handle_collision(&mirrored, state_a.as_ref(), impulse, percent, slop);
                corrections.push((info.collider_b, correction));
            }
        }
        
        for (entity, correction) in corrections {
            if correction != Vec3::zeros() {
                world.translate_world(entity, correction);
            }
        }
    }
    
    fn body_state(world: &World, entity: Entity) -> Option<BodyState> {
        world
            .get_component::<RigidBodyComponent>(entity)
            .map(RigidBodyComponent::snapshot)
    }
    
    fn integrate(&self, world: &mut World, delta_time: f32) {
        let gravity = self.config.gravity;
        let displacements: Vec<(Entity, Vec3)> = world
            .query_components_mut::<RigidBodyComponent>()
            .into_iter()
            .map(|(entity, body)| (entity, body.integrate(delta_time, gravity)))
            .filter(|(_, displacement)| *displacement != Vec3::zeros())
            .collect();
        
        for (entity, displacement) in displacements {
            world.translate_world(entity, displacement);
        }
    }
    
    /// Closest collider hit by a ray within `max_distance`
    ///
    /// Only sphere colliders are tested unless
    /// [`PhysicsConfig::raycast_all_shapes`] is set. A zero-length direction
    /// yields no hit.
    pub fn raycast(&self, world: &World, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        match self.try_raycast(world, origin, direction, max_distance) {
            Ok(hit) => hit,
            Err(err) => {
                warn!("Raycast rejected: {err}");
                None
            }
        }
    }
    
    /// Closest collider hit by a ray, failing on a zero-length direction
    pub fn try_raycast(
        &self,
        world: &World,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Result<Option<RayHit>, PhysicsError> {
        let ray = Ray::new(origin, direction)?;
        if max_distance.is_nan() {
            return Ok(None);
        }
        let mut closest: Option<RayHit> = None;
        
        for (entity, collider) in world.query_components::<ColliderComponent>() {
            if !collider.is_enabled() {
                continue;
            }
            if !self.config.raycast_all_shapes && collider.shape().kind() != ShapeKind::Sphere {
                continue;
            }
            
            let shape = collider.world_shape(&world.world_transform(entity));
            let Some(hit) = shape.intersect_ray(&ray) else {
                continue;
            };
            if hit.distance > max_distance {
                continue;
            }
            if closest.map_or(true, |best| hit.distance < best.distance) {
                closest = Some(RayHit {
                    entity,
                    distance: hit.distance,
                    point: hit.point,
                    normal: hit.normal,
                });
            }
        }
        
        Ok(closest)
    }
    
    /// World placement of `entity`'s collider; origin if it has no transform
    pub fn world_shape(world: &World, entity: Entity) -> Option<WorldShape> {
        let collider = world.get_component::<ColliderComponent>(entity)?;
        Some(collider.world_shape(&world.world_transform(entity)))
    }
    
    /// World placement of `entity`'s collider, failing without a transform
    pub fn try_world_shape(world: &World, entity: Entity) -> Result<Option<WorldShape>, PhysicsError> {
        let Some(collider) = world.get_component::<ColliderComponent>(entity) else {
            return Ok(None);
        };
        let transform = world
            .try_world_transform(entity)
            .map_err(|_| PhysicsError::MissingTransform(entity))?;
        Ok(Some(collider.world_shape(&transform)))
    }
    
    /// Contact record between the colliders of `a` and `b`
    ///
    /// The pair is always evaluated with the smaller entity id first and
    /// mirrored for the other order, so swapping `a` and `b` flips the
    /// normal. `None` when either entity has no collider.
    pub fn collision_info(world: &World, a: Entity, b: Entity) -> Option<CollisionInfo> {
        if b < a {
            return Self::collision_info(world, b, a).map(|info| info.mirrored());
        }
        let shape_a = Self::world_shape(world, a)?;
        let shape_b = Self::world_shape(world, b)?;
        Some(CollisionInfo::from_contact(a, b, shape_a.contact(&shape_b)))
    }
    
    /// Whether the colliders of `a` and `b` touch or overlap
    pub fn intersects(world: &World, a: Entity, b: Entity) -> bool {
        match (Self::world_shape(world, a), Self::world_shape(world, b)) {
            (Some(shape_a), Some(shape_b)) => shape_a.intersects(&shape_b),
            _ => false,
        }
    }
    
    /// Overlapping pairs found by the last step (triggers included)
    pub fn contacts(&self) -> Vec<CollisionInfo> {
        self.contacts.iter().map(|contact| contact.info).collect()
    }
    
    /// Trigger overlaps found by the last step
    pub fn trigger_events(&self) -> &[TriggerEvent] {
        &self.trigger_events
    }
    
    /// Whether `a` and `b` overlapped during the last step
    pub fn is_colliding(&self, a: Entity, b: Entity) -> bool {
        self.current_pairs.contains(&CollisionPair::new(a, b))
    }
    
    /// Pairs that started overlapping during the last step, sorted
    pub fn collisions_entered(&self) -> Vec<CollisionPair> {
        let mut pairs: Vec<_> = self.current_pairs.difference(&self.previous_pairs).copied().collect();
        pairs.sort_unstable();
        pairs
    }
    
    /// Pairs that stopped overlapping during the last step, sorted
    pub fn collisions_exited(&self) -> Vec<CollisionPair> {
        let mut pairs: Vec<_> = self.previous_pairs.difference(&self.current_pairs).copied().collect();
        pairs.sort_unstable();
        pairs
    }
    
    /// Collider and body counts plus the last step's contact count
    pub fn stats(&self, world: &World) -> PhysicsStats {
        PhysicsStats {
            collider_count: world.component_count::<ColliderComponent>(),
            rigid_body_count: world.component_count::<RigidBodyComponent>(),
            active_collision_count: self.contacts.len(),
        }
    }
}

impl Default for PhysicsSystem {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

impl System for PhysicsSystem {
    fn name(&self) -> &'static str {
        "PhysicsSystem"
    }
    
    fn run(&mut self, world: &mut World, delta_time: f32) {
        self.update(world, delta_time);
    }
}
