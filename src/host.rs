//! Traits through which the integrator reaches its host.
//!
//! The integrator never owns world, pawn or transform state. A host lends
//! all three for the duration of one [`crate::PawnMovement::tick`] call via
//! [`MovementContext`].

use bevy::prelude::Resource;
use glam::{Quat, Vec3};

use crate::collision::{CollisionChannel, CollisionShape, HitResult, PawnId, SweepQuery};

/// What kind of agent drives a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerRole {
    /// Human-driven controller.
    Player,
    /// AI controller.
    Ai {
        /// Whether the AI is currently following a navigation path.
        following_path: bool,
    },
}

/// Snapshot of the controller possessing a pawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controller {
    /// Whether this execution context has authority over the pawn.
    pub is_local: bool,
    /// Who drives the controller.
    pub role: ControllerRole,
}

impl Controller {
    /// A local, human-driven controller.
    #[must_use]
    pub const fn local_player() -> Self {
        Self {
            is_local: true,
            role: ControllerRole::Player,
        }
    }

    /// A local AI controller.
    #[must_use]
    pub const fn local_ai(following_path: bool) -> Self {
        Self {
            is_local: true,
            role: ControllerRole::Ai { following_path },
        }
    }

    /// A replicated proxy of a controller owned elsewhere.
    #[must_use]
    pub const fn remote(role: ControllerRole) -> Self {
        Self {
            is_local: false,
            role,
        }
    }

    /// Whether pending input should be integrated into velocity.
    ///
    /// Players always integrate input. AI controllers integrate it unless
    /// they are following a path, which `use_acceleration_for_paths`
    /// overrides.
    #[must_use]
    pub const fn integrates_input(&self, use_acceleration_for_paths: bool) -> bool {
        match self.role {
            ControllerRole::Player => true,
            ControllerRole::Ai { following_path } => !following_path || use_acceleration_for_paths,
        }
    }
}

/// World bounds settings exposed by the host.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct WorldBounds {
    /// Whether bounds checks run at all.
    pub enabled: bool,
    /// Height of the lethal lower plane.
    pub kill_z: f32,
}

/// World-level queries: pause state, bounds and shape sweeps.
#[cfg_attr(test, mockall::automock)]
pub trait HostWorld {
    /// Whether this tick's update should be skipped entirely.
    fn should_skip_update(&self, delta_time: f32) -> bool;

    /// Current world bounds settings.
    fn world_bounds(&self) -> WorldBounds;

    /// Nearest blocking hit for the sweep, if any.
    fn sweep_single(&self, query: &SweepQuery) -> Option<HitResult>;
}

/// The pawn that owns the movement integrator.
#[cfg_attr(test, mockall::automock)]
pub trait PawnOwner {
    /// Stable identity used to ignore the pawn in its own queries.
    fn id(&self) -> PawnId;

    /// Controller possessing the pawn, if any.
    fn controller(&self) -> Option<Controller>;

    /// Input accumulated since the last consumption.
    fn pending_input_vector(&self) -> Vec3;

    /// Clears the input accumulator, returning what it held.
    fn consume_input_vector(&mut self) -> Vec3;

    /// Shape of the pawn's root primitive, if it has one.
    fn root_collision_shape(&self) -> Option<CollisionShape>;

    /// Reacts to a blocking hit during movement.
    fn handle_impact(&mut self, _hit: &HitResult, _delta_time: f32, _move_delta: Vec3) {}
}

/// The transform the integrator moves.
#[cfg_attr(test, mockall::automock)]
pub trait UpdatedComponent {
    /// World-space location.
    fn location(&self) -> Vec3;

    /// World-space orientation.
    fn rotation(&self) -> Quat;

    /// Whether the component takes part in collision queries.
    fn is_query_collision_enabled(&self) -> bool;

    /// Channel the component's collision lives on.
    fn collision_channel(&self) -> CollisionChannel;

    /// Moves the component by `delta`, stopping at the first blocking hit
    /// when `sweep` is set.
    fn move_component(&mut self, delta: Vec3, rotation: Quat, sweep: bool) -> HitResult;

    /// Pushes the component out of overlapping geometry.
    ///
    /// Returns `true` if the component was moved.
    fn resolve_penetration(&mut self, adjustment: Vec3, hit: &HitResult, rotation: Quat)
        -> bool;

    /// Publishes the velocity computed for this tick.
    fn set_component_velocity(&mut self, velocity: Vec3);
}

/// Host state lent to the integrator for one tick.
pub struct MovementContext<'a> {
    /// World queries.
    pub world: &'a dyn HostWorld,
    /// Owning pawn, absent if it has been destroyed.
    pub pawn: Option<&'a mut dyn PawnOwner>,
    /// Moved transform, absent if the pawn has none.
    pub component: Option<&'a mut dyn UpdatedComponent>,
}

impl<'a> MovementContext<'a> {
    /// Bundles a world, a pawn and its component.
    #[must_use]
    pub fn new(
        world: &'a dyn HostWorld,
        pawn: &'a mut dyn PawnOwner,
        component: &'a mut dyn UpdatedComponent,
    ) -> Self {
        Self {
            world,
            pawn: Some(pawn),
            component: Some(component),
        }
    }
}
