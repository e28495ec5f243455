//! Scenario tests driving full physics steps over a world


use crate::core::PhysicsConfig;
use crate::ecs::components::{ColliderComponent, RigidBodyComponent, TransformComponent};
use crate::ecs::{Entity, World};
use crate::foundation::math::Vec3;

const STEP: f32 = 1.0 / 60.0;

fn zero_gravity() -> PhysicsConfig {
    PhysicsConfig::default().with_gravity(Vec3::zeros())
}

fn spawn_collider(world: &mut World, position: Vec3, collider: ColliderComponent) -> Entity {
    let entity = world.create_entity();
    world.add_component(entity, TransformComponent::from_position(position));
    world.add_component(entity, collider);
    entity
}

fn spawn_ball(world: &mut World, position: Vec3, radius: f32, body: RigidBodyComponent) -> Entity {
    let entity = spawn_collider(world, position, ColliderComponent::sphere(radius));
    world.add_component(entity, body);
    entity
}

fn spawn_ground(world: &mut World) -> Entity {
    spawn_collider(
        world,
        Vec3::new(0.0, -1.0, 0.0),
        ColliderComponent::cuboid(Vec3::new(25.0, 1.0, 25.0)).as_static(),
    )
}

fn velocity(world: &World, entity: Entity) -> Vec3 {
    world
        .get_component::<RigidBodyComponent>(entity)
        .map_or_else(Vec3::zeros, |body| body.velocity)
}
