//! ECS components describing a movable pawn.
//! A pawn entity carries a [`crate::PawnMovement`], a `Transform`, and the components below.
use bevy::prelude::*;
use glam::Vec3;

use crate::collision::{CollisionChannel, CollisionShape};
use crate::host::Controller;

/// Controller currently possessing the pawn.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Deref, DerefMut)]
pub struct PawnController(pub Controller);

impl Default for PawnController {
    fn default() -> Self {
        Self(Controller::local_player())
    }
}

/// Input accumulated since the integrator last consumed it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Deref, DerefMut)]
pub struct ControlInput(pub Vec3);

impl ControlInput {
    /// Adds `input` to the accumulator.
    ///
    /// Several systems may contribute during one frame; the integrator sees
    /// their sum.
    pub fn add_input(&mut self, input: Vec3) {
        self.0 += input;
    }

    /// Clears the accumulator, returning what it held.
    pub fn consume(&mut self) -> Vec3 {
        std::mem::take(&mut self.0)
    }
}

/// Collision settings of the pawn's root primitive.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PawnCollider {
    /// Root primitive, or `None` for a pawn without collision.
    pub shape: Option<CollisionShape>,
    /// Channel the primitive lives on.
    pub channel: CollisionChannel,
    /// Whether the primitive takes part in queries.
    pub query_enabled: bool,
}

impl PawnCollider {
    /// A queryable collider on the pawn channel.
    #[must_use]
    pub const fn new(shape: CollisionShape) -> Self {
        Self {
            shape: Some(shape),
            channel: CollisionChannel::Pawn,
            query_enabled: true,
        }
    }
}

impl Default for PawnCollider {
    fn default() -> Self {
        Self {
            shape: None,
            channel: CollisionChannel::Pawn,
            query_enabled: true,
        }
    }
}

/// Velocity last published by the integrator for this pawn's transform.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Deref, DerefMut)]
pub struct ComponentVelocity(pub Vec3);
