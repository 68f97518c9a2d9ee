//! Headless demo: a pawn runs across a floor, jumps and slides along a wall.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use clap::Parser;
use log::info;
use pawn_movement::{
    init_logging, CollisionShape, CollisionWorld, ControlInput, MovementConfig, PawnCollider,
    PawnController, PawnMovement, PawnMovementPlugin, Surface, WorldBounds,
};

const JUMP_SPEED: f32 = 600.0;
const JUMP_FRAME: u32 = 30;
const RUN_INPUT: f32 = 2000.0;

/// Runs a pawn across a small headless scene and logs what happens.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// JSON movement config; defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 240)]
    ticks: u32,
    /// Seconds per frame
    #[arg(short, long, default_value_t = 1.0 / 60.0)]
    step: f32,
}

#[derive(Component)]
struct DemoPawn;

fn drive_pawn(
    mut frame: Local<u32>,
    mut pawns: Query<(&mut ControlInput, &mut PawnMovement), With<DemoPawn>>,
) {
    *frame += 1;
    for (mut input, mut movement) in &mut pawns {
        input.add_input(Vec3::X * RUN_INPUT);
        if *frame == JUMP_FRAME && movement.is_touching_floor() {
            let velocity = movement.velocity();
            movement.set_velocity(velocity + Vec3::Z * JUMP_SPEED);
            info!("jump");
        }
    }
}

fn build_scene() -> CollisionWorld {
    CollisionWorld::new()
        .with_surface(Surface::floor(0.0))
        .with_surface(Surface::new(
            Vec3::new(-1.0, 1.0, 0.0),
            Vec3::new(1500.0, 0.0, 0.0),
        ))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    ensure!(
        args.step.is_finite() && args.step > 0.0,
        "--step must be a positive number of seconds"
    );

    let config = args.config.as_deref().map_or_else(
        || Ok(MovementConfig::default()),
        |path| MovementConfig::load(path).with_context(|| format!("loading {}", path.display())),
    )?;

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
            args.step,
        )))
        .insert_resource(build_scene())
        .insert_resource(WorldBounds {
            enabled: true,
            kill_z: -1000.0,
        })
        .add_plugins(PawnMovementPlugin)
        .add_systems(Update, drive_pawn.before(pawn_movement::pawn_movement_system));

    let pawn = app
        .world_mut()
        .spawn((
            DemoPawn,
            PawnMovement::new(config),
            Transform::from_xyz(0.0, 0.0, 200.0),
            PawnController::default(),
            ControlInput::default(),
            PawnCollider::new(CollisionShape::Capsule {
                radius: 34.0,
                half_height: 88.0,
            }),
        ))
        .id();

    for _ in 0..args.ticks {
        app.update();
    }

    let location = app
        .world()
        .get::<Transform>(pawn)
        .context("demo pawn lost its transform")?
        .translation;
    let movement = app
        .world()
        .get::<PawnMovement>(pawn)
        .context("demo pawn lost its movement")?;
    info!(
        "after {} frames: location {location:?}, velocity {:?}, on floor: {}",
        args.ticks,
        movement.velocity(),
        movement.is_touching_floor()
    );
    Ok(())
}
