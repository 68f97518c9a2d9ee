//! Bevy integration for the pawn movement integrator.
//!
//! This module re-exports the plugin, events and the movement system that
//! drive [`crate::PawnMovement`] from Bevy ECS. Entities are adapted to the
//! integrator's host traits for the duration of each tick.

mod host;
mod plugin;
mod systems;

pub use host::{EcsComponent, EcsPawn};
pub use plugin::{ApexReached, Landed, LeftFloor, MovementPaused, PawnMovementPlugin};
pub use systems::pawn_movement_system;
