//! Bevy plugin wiring pawn movement into the schedule.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::{debug, info};

use crate::host::WorldBounds;
use crate::world::CollisionWorld;

use super::pawn_movement_system;

/// While set, every pawn skips its movement update.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default, Deref, DerefMut)]
pub struct MovementPaused(pub bool);

/// Raised when a pawn's vertical velocity turns from rising to falling.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApexReached {
    /// Pawn that peaked.
    pub entity: Entity,
}

/// Raised when a pawn finds floor after being airborne.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landed {
    /// Pawn that landed.
    pub entity: Entity,
}

/// Raised when a pawn loses the floor it stood on.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeftFloor {
    /// Pawn that left the floor.
    pub entity: Entity,
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_apex(event: On<ApexReached>) {
    debug!("pawn {} reached its apex", event.event().entity);
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_landed(event: On<Landed>) {
    info!("pawn {} landed", event.event().entity);
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_left_floor(event: On<LeftFloor>) {
    info!("pawn {} left the floor", event.event().entity);
}

/// Bevy plugin ticking every [`crate::PawnMovement`] in `Update`.
///
/// Inserts default [`CollisionWorld`], [`WorldBounds`] and [`MovementPaused`]
/// resources unless the app already provides them.
#[derive(Default)]
pub struct PawnMovementPlugin;

impl Plugin for PawnMovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CollisionWorld>()
            .init_resource::<WorldBounds>()
            .init_resource::<MovementPaused>();

        app.add_observer(log_apex)
            .add_observer(log_landed)
            .add_observer(log_left_floor);

        app.add_systems(Update, pawn_movement_system);
    }
}
