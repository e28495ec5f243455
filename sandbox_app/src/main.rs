//! Physics sandbox
//!
//! Drops a sphere onto a static ground box and steps the simulation at a
//! fixed rate, logging the sphere height while it settles.
//!
//! Usage: `physics_sandbox [config.toml|config.ron]`

use std::process::ExitCode;

use collision_engine::foundation::logging;
use collision_engine::prelude::*;
use log::{debug, error, info};

const FIXED_STEP: f32 = 1.0 / 60.0;
const SIMULATED_SECONDS: f32 = 5.0;
const REPORT_EVERY: u32 = 30;

#[derive(Debug, thiserror::Error)]
enum SandboxError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    
    #[error("scene setup failed: {0}")]
    Scene(#[from] EcsError),
}

struct Scene {
    ground: Entity,
    ball: Entity,
}

fn load_config() -> Result<ApplicationConfig, ConfigError> {
    let config = match std::env::args().nth(1) {
        Some(path) => ApplicationConfig::load_from_file(path)?,
        None => ApplicationConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn build_scene(world: &mut World) -> Result<Scene, SandboxError> {
    let ground = world.create_named_entity("Ground");
    world.try_add_component(ground, TransformComponent::from_position(Vec3::new(0.0, -1.0, 0.0)))?;
    world.try_add_component(
        ground,
        ColliderComponent::cuboid(Vec3::new(25.0, 1.0, 25.0))
            .as_static()
            .with_layer(CollisionLayers::ENVIRONMENT),
    )?;
    
    let ball = world.create_named_entity("Ball");
    world.try_add_component(ball, TransformComponent::from_position(Vec3::new(0.0, 5.0, 0.0)))?;
    world.try_add_component(ball, ColliderComponent::sphere(0.5))?;
    world.try_add_component(ball, RigidBodyComponent::new().with_mass(1.0))?;
    
    Ok(Scene { ground, ball })
}

fn run(config: &ApplicationConfig) -> Result<(), SandboxError> {
    let mut world = World::new();
    let scene = build_scene(&mut world)?;
    
    let mut physics = PhysicsSystem::new(config.physics.clone());
    physics.initialize();
    
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let steps = (SIMULATED_SECONDS / FIXED_STEP).round() as u32;
    
    for step in 1..=steps {
        physics.update(&mut world, FIXED_STEP);
        
        for pair in physics.collisions_entered() {
            debug!("Contact began: {} / {}", pair.entity_a, pair.entity_b);
        }
        
        if step % REPORT_EVERY == 0 {
            let height = world.world_position(scene.ball).y;
            info!("t = {:.2}s  ball height = {height:.4}", step as f32 * FIXED_STEP);
        }
        if config.engine.debug_mode && physics.is_colliding(scene.ball, scene.ground) {
            debug!("step {step}: ball resting on ground");
        }
    }
    
    let stats = physics.stats(&world);
    info!(
        "Finished: {} colliders, {} rigid bodies, {} active contacts, ball at {:?}",
        stats.collider_count,
        stats.rigid_body_count,
        stats.active_collision_count,
        world.world_position(scene.ball)
    );
    
    physics.cleanup();
    Ok(())
}

fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            logging::init_with_level("info");
            error!("{}", SandboxError::from(err));
            return ExitCode::FAILURE;
        }
    };
    logging::init_with_level(&config.engine.log_level);
    info!("Starting physics sandbox");
    
    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
