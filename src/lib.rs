//! Kinematic pawn movement.
//!
//! [`PawnMovement`] integrates control input and gravity into velocity,
//! moves the pawn through a host-provided collision world with sliding and
//! penetration recovery, and reports apex, landing and leaving-the-floor
//! transitions. Hosts plug in through the traits in [`host`]; the
//! [`movement_sync`] module provides a ready-made Bevy host backed by the
//! half-space [`CollisionWorld`].
pub mod bounds;
pub mod collision;
pub mod components;
pub mod config;
pub mod constants;
pub mod events;
pub mod floor;
pub mod host;
pub mod logging;
pub mod movement;
pub mod movement_sync;
pub mod slide;
pub mod vector_math;
pub mod velocity;
pub mod world;
pub use constants::*;

// Re-export commonly used items
pub use bounds::kill_plane_rescue_speed;
pub use collision::{CollisionChannel, CollisionShape, HitResult, PawnId, SweepQuery};
pub use components::{ComponentVelocity, ControlInput, PawnCollider, PawnController};
pub use config::{ConfigError, MovementConfig, MovementLimits, MovementTuning};
pub use events::{MovementEvent, MovementEvents};
pub use floor::{floor_trace_distance, is_walkable_floor, surface_angle_degrees};
pub use host::{
    Controller, ControllerRole, HostWorld, MovementContext, PawnOwner, UpdatedComponent,
    WorldBounds,
};
pub use logging::init as init_logging;
pub use movement::PawnMovement;
pub use movement_sync::{
    pawn_movement_system, ApexReached, Landed, LeftFloor, MovementPaused, PawnMovementPlugin,
};
pub use vector_math::safe_normal;
pub use velocity::{apply_control_input, correct_velocity, is_exceeding_max_speed};
pub use world::{CollisionWorld, SceneQueries, Surface};
