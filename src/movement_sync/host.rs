//! Adapters exposing ECS data through the integrator's host traits.

use bevy::prelude::Transform;
use glam::{Quat, Vec3};
use log::trace;

use crate::collision::{CollisionChannel, CollisionShape, HitResult, PawnId};
use crate::components::{ComponentVelocity, ControlInput, PawnCollider};
use crate::host::{Controller, PawnOwner, UpdatedComponent};
use crate::world::CollisionWorld;

/// A pawn entity viewed as a [`PawnOwner`].
pub struct EcsPawn<'a> {
    /// Identity derived from the entity.
    pub id: PawnId,
    /// Possessing controller, if any.
    pub controller: Option<Controller>,
    /// Pending input.
    pub input: &'a mut ControlInput,
    /// Root collider settings.
    pub collider: PawnCollider,
}

impl PawnOwner for EcsPawn<'_> {
    fn id(&self) -> PawnId {
        self.id
    }

    fn controller(&self) -> Option<Controller> {
        self.controller
    }

    fn pending_input_vector(&self) -> Vec3 {
        **self.input
    }

    fn consume_input_vector(&mut self) -> Vec3 {
        self.input.consume()
    }

    fn root_collision_shape(&self) -> Option<CollisionShape> {
        self.collider.shape
    }

    fn handle_impact(&mut self, hit: &HitResult, _delta_time: f32, _move_delta: Vec3) {
        trace!("pawn {:?} blocked by surface {:?}", self.id, hit.normal);
    }
}

/// A pawn's `Transform` moved through a [`CollisionWorld`].
pub struct EcsComponent<'a> {
    /// Transform being moved.
    pub transform: &'a mut Transform,
    /// Root collider settings.
    pub collider: PawnCollider,
    /// Owner whose surfaces are ignored.
    pub owner: PawnId,
    /// Static geometry to collide with.
    pub collision: &'a CollisionWorld,
    /// Where the published velocity lands, if the entity tracks it.
    pub velocity: Option<&'a mut ComponentVelocity>,
}

impl UpdatedComponent for EcsComponent<'_> {
    fn location(&self) -> Vec3 {
        self.transform.translation
    }

    fn rotation(&self) -> Quat {
        self.transform.rotation
    }

    fn is_query_collision_enabled(&self) -> bool {
        self.collider.query_enabled
    }

    fn collision_channel(&self) -> CollisionChannel {
        self.collider.channel
    }

    fn move_component(&mut self, delta: Vec3, rotation: Quat, sweep: bool) -> HitResult {
        let start = self.transform.translation;
        let hit = self.collider.shape.map_or_else(
            || HitResult::no_hit(start + delta),
            |shape| {
                self.collision.move_shape(
                    start,
                    delta,
                    shape,
                    self.collider.channel,
                    Some(self.owner),
                    sweep,
                )
            },
        );
        self.transform.translation = hit.location;
        self.transform.rotation = rotation;
        hit
    }

    fn resolve_penetration(&mut self, adjustment: Vec3, _hit: &HitResult, rotation: Quat) -> bool {
        let Some(shape) = self.collider.shape else {
            return false;
        };
        let centre = self.transform.translation;
        let moved = self.collision.depenetrate(
            centre,
            adjustment,
            shape,
            self.collider.channel,
            Some(self.owner),
        );
        if let Some(location) = moved {
            self.transform.translation = location;
            self.transform.rotation = rotation;
        }
        moved.is_some()
    }

    fn set_component_velocity(&mut self, velocity: Vec3) {
        if let Some(published) = self.velocity.as_deref_mut() {
            **published = velocity;
        }
    }
}
