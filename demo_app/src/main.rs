//! Bouncing boxes demo
//!
//! Runs the engine headless: a handful of boxes fall inside four immovable
//! walls and bounce off them and each other. Positions are logged once per
//! simulated second. Pass a `.toml` or `.ron` engine config as the first
//! argument to override the defaults.

use arcade_engine::config::Config;
use arcade_engine::foundation::logging;
use arcade_engine::physics::collide_group_group;
use arcade_engine::prelude::*;
use rand::Rng;

const BALLS: usize = 8;
const BALL_SIZE: f64 = 16.0;
const WALL: f64 = 20.0;
const TICKS: usize = 300;
const GRAVITY: f64 = 200.0;

fn load_config() -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load_from_file(path)?,
        None => EngineConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

/// Four immovable walls around the stage
fn build_walls(world: &mut World, width: f64, height: f64) -> NodeId {
    let walls = world.create_group("walls");
    let sides = [
        ("top", 0.0, -WALL, width, WALL),
        ("bottom", 0.0, height, width, WALL),
        ("left", -WALL, 0.0, WALL, height),
        ("right", width, 0.0, WALL, height),
    ];
    for (name, x, y, w, h) in sides {
        let wall = world.spawn(name, SpriteFactory::box_components(x, y, w, h));
        world.add_component(wall, Box::new(ArcadePhysics::immovable()));
        world.add_child(walls, wall);
    }
    walls
}

fn build_balls(world: &mut World, width: f64, height: f64) -> NodeId {
    let mut rng = rand::thread_rng();
    let balls = world.create_group("balls");
    for index in 0..BALLS {
        let x = rng.gen_range(0.0..width - BALL_SIZE);
        let y = rng.gen_range(0.0..height / 2.0);
        let ball = world.spawn(&format!("ball-{index}"), SpriteFactory::box_components(x, y, BALL_SIZE, BALL_SIZE));

        let mut body = ArcadePhysics::new()
            .with_velocity(rng.gen_range(-150.0..150.0), rng.gen_range(-50.0..50.0))
            .with_material(1.0, rng.gen_range(0.6..0.95));
        body.acceleration = Vec2::new(0.0, GRAVITY);
        world.add_component(ball, Box::new(body));

        let bounces = world.component::<ArcadePhysics>(ball).map(|body| body.collided.clone());
        if let Some(signal) = bounces {
            let name = format!("ball-{index}");
            if let Err(error) = signal.add(
                &listener(move |hit: &arcade_engine::physics::Collision| {
                    log::trace!("{name} hit {:?}", hit.other);
                }),
                0,
            ) {
                log::warn!("Could not watch ball-{index} collisions: {error}");
            }
        }
        world.add_child(balls, ball);
    }
    balls
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    logging::init_with_level(&config.log_level);
    log::info!("Starting bounce demo on a {}x{} stage", config.stage.width, config.stage.height);

    let (width, height) = (config.stage.width, config.stage.height);
    let mut world = World::new(&config);
    let state = world.create_state("play");
    world
        .create_layer(state, "sprites", BackendKind::Canvas)
        .ok_or("canvas layer unavailable")?;

    let walls = build_walls(&mut world, width, height);
    let balls = build_balls(&mut world, width, height);
    world.add_to_state(state, walls);
    world.add_to_state(state, balls);

    let mut styles = StyleBatch::new();
    let ticks_per_second = (1.0 / arcade_engine::physics::UPDATE_INTERVAL).round() as usize;
    for tick in 1..=TICKS {
        world.update_state(state);
        collide_group_group(&mut world, balls, walls);
        collide_group_group(&mut world, balls, balls);
        world.render_state(state, &mut styles);

        if tick % ticks_per_second == 0 {
            let resting = world.call_all::<ArcadePhysics, bool>(balls, |body| body.on_floor());
            let resting = resting.into_iter().filter(|&on_floor| on_floor).count();
            log::info!("t={}s: {resting}/{BALLS} balls resting", tick / ticks_per_second);
            for child in world.group(balls).map(|group| group.children().to_vec()).unwrap_or_default() {
                if let Some(node) = world.node(child) {
                    let core = node.core();
                    log::debug!(
                        "  {} at ({:.1}, {:.1})",
                        core.name(),
                        core.x().unwrap_or_default(),
                        core.y().unwrap_or_default()
                    );
                }
            }
        }
    }

    log::info!("Bounce demo finished after {TICKS} ticks");
    Ok(())
}
