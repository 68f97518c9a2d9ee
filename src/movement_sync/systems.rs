//! The system advancing every pawn once per frame.

use bevy::prelude::*;
use log::trace;

use crate::collision::PawnId;
use crate::components::{ComponentVelocity, ControlInput, PawnCollider, PawnController};
use crate::events::MovementEvent;
use crate::host::{MovementContext, WorldBounds};
use crate::movement::PawnMovement;
use crate::world::{CollisionWorld, SceneQueries};

use super::{ApexReached, Landed, LeftFloor, MovementPaused};

type PawnQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static mut PawnMovement,
        &'static mut Transform,
        Option<&'static PawnController>,
        Option<&'static mut ControlInput>,
        Option<&'static PawnCollider>,
        Option<&'static mut ComponentVelocity>,
    ),
>;

/// Ticks every [`PawnMovement`] with this frame's delta time.
///
/// Notifications raised by a tick are triggered as [`ApexReached`],
/// [`Landed`] and [`LeftFloor`] events carrying the pawn's entity.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems take resources by value."
)]
pub fn pawn_movement_system(
    mut commands: Commands,
    time: Res<Time>,
    collision: Res<CollisionWorld>,
    bounds: Res<WorldBounds>,
    paused: Res<MovementPaused>,
    mut pawns: PawnQuery,
) {
    let scene = SceneQueries {
        collision: &collision,
        bounds: *bounds,
        paused: **paused,
    };
    let delta_time = time.delta_secs();

    for (entity, mut movement, mut transform, controller, input, collider, velocity) in &mut pawns {
        let id = PawnId(entity.to_bits());
        let settings = collider.copied().unwrap_or_default();
        let mut scratch_input = ControlInput::default();
        let mut pawn = super::EcsPawn {
            id,
            controller: controller.map(|c| **c),
            input: input.map_or(&mut scratch_input, Mut::into_inner),
            collider: settings,
        };
        let mut component = super::EcsComponent {
            transform: &mut *transform,
            collider: settings,
            owner: id,
            collision: &collision,
            velocity: velocity.map(Mut::into_inner),
        };

        let events = movement.tick(
            delta_time,
            MovementContext::new(&scene, &mut pawn, &mut component),
        );
        for event in events {
            trace!("pawn {entity} raised {event:?}");
            match event {
                MovementEvent::ApexReached => commands.trigger(ApexReached { entity }),
                MovementEvent::Landed => commands.trigger(Landed { entity }),
                MovementEvent::LeftFloor => commands.trigger(LeftFloor { entity }),
            }
        }
    }
}
