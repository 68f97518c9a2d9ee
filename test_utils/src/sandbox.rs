//! Scripted host doubles for driving [`PawnMovement`] without an ECS.

use glam::{Quat, Vec3};
use log::trace;
use pawn_movement::{
    CollisionChannel, CollisionShape, CollisionWorld, Controller, HitResult, HostWorld,
    MovementConfig, MovementContext, MovementEvent, MovementEvents, PawnId, PawnMovement,
    PawnOwner, SweepQuery, UpdatedComponent, WorldBounds,
};

/// World double answering sweeps from a [`CollisionWorld`].
#[derive(Debug, Clone, Default)]
pub struct SandboxWorld {
    /// Geometry queried by sweeps.
    pub collision: CollisionWorld,
    /// Bounds reported to the integrator.
    pub bounds: WorldBounds,
    /// When set, every update is skipped.
    pub skip_updates: bool,
}

impl HostWorld for SandboxWorld {
    fn should_skip_update(&self, _delta_time: f32) -> bool {
        self.skip_updates
    }

    fn world_bounds(&self) -> WorldBounds {
        self.bounds
    }

    fn sweep_single(&self, query: &SweepQuery) -> Option<HitResult> {
        self.collision.sweep(query)
    }
}

/// Pawn double with a fixed input vector re-applied every tick.
#[derive(Debug, Clone)]
pub struct ScriptedPawn {
    /// Identity used to ignore the pawn's own geometry.
    pub id: PawnId,
    /// Possessing controller.
    pub controller: Option<Controller>,
    /// Input restored after each consumption.
    pub held_input: Vec3,
    /// Input pending for the next tick.
    pub pending_input: Vec3,
    /// Root primitive.
    pub shape: Option<CollisionShape>,
    /// Every blocking hit reported through `handle_impact`.
    pub impacts: Vec<HitResult>,
}

impl ScriptedPawn {
    /// A locally player-controlled pawn with the given root shape.
    #[must_use]
    pub fn player(shape: CollisionShape) -> Self {
        Self {
            id: PawnId(1),
            controller: Some(Controller::local_player()),
            held_input: Vec3::ZERO,
            pending_input: Vec3::ZERO,
            shape: Some(shape),
            impacts: Vec::new(),
        }
    }

    /// Holds `input` down on every following tick.
    pub fn hold(&mut self, input: Vec3) {
        self.held_input = input;
        self.pending_input = input;
    }
}

impl PawnOwner for ScriptedPawn {
    fn id(&self) -> PawnId {
        self.id
    }

    fn controller(&self) -> Option<Controller> {
        self.controller
    }

    fn pending_input_vector(&self) -> Vec3 {
        self.pending_input
    }

    fn consume_input_vector(&mut self) -> Vec3 {
        let consumed = self.pending_input;
        self.pending_input = self.held_input;
        consumed
    }

    fn root_collision_shape(&self) -> Option<CollisionShape> {
        self.shape
    }

    fn handle_impact(&mut self, hit: &HitResult, _delta_time: f32, _move_delta: Vec3) {
        self.impacts.push(*hit);
    }
}

/// Transform double moved through its own copy of the collision world.
#[derive(Debug, Clone)]
pub struct SandboxComponent {
    /// Current location.
    pub location: Vec3,
    /// Current rotation.
    pub rotation: Quat,
    /// Whether floor probes run.
    pub query_enabled: bool,
    /// Collision channel.
    pub channel: CollisionChannel,
    /// Swept shape, or `None` to teleport.
    pub shape: Option<CollisionShape>,
    /// Pawn whose surfaces are ignored.
    pub owner: PawnId,
    /// Geometry to collide with.
    pub collision: CollisionWorld,
    /// Last velocity published by the integrator.
    pub published_velocity: Vec3,
}

impl UpdatedComponent for SandboxComponent {
    fn location(&self) -> Vec3 {
        self.location
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn is_query_collision_enabled(&self) -> bool {
        self.query_enabled
    }

    fn collision_channel(&self) -> CollisionChannel {
        self.channel
    }

    fn move_component(&mut self, delta: Vec3, rotation: Quat, sweep: bool) -> HitResult {
        let hit = self.shape.map_or_else(
            || HitResult::no_hit(self.location + delta),
            |shape| {
                self.collision.move_shape(
                    self.location,
                    delta,
                    shape,
                    self.channel,
                    Some(self.owner),
                    sweep,
                )
            },
        );
        trace!("sandbox move {delta:?} -> {:?}", hit.location);
        self.location = hit.location;
        self.rotation = rotation;
        hit
    }

    fn resolve_penetration(&mut self, adjustment: Vec3, _hit: &HitResult, rotation: Quat) -> bool {
        let Some(shape) = self.shape else {
            return false;
        };
        let moved = self.collision.depenetrate(
            self.location,
            adjustment,
            shape,
            self.channel,
            Some(self.owner),
        );
        if let Some(location) = moved {
            self.location = location;
            self.rotation = rotation;
        }
        moved.is_some()
    }

    fn set_component_velocity(&mut self, velocity: Vec3) {
        self.published_velocity = velocity;
    }
}

/// A pawn, its transform and an integrator sharing one collision world.
#[derive(Debug, Clone)]
pub struct Sandbox {
    /// World double.
    pub world: SandboxWorld,
    /// Pawn double.
    pub pawn: ScriptedPawn,
    /// Transform double.
    pub component: SandboxComponent,
    /// Integrator under test.
    pub movement: PawnMovement,
}

impl Sandbox {
    /// Places a player pawn with `shape` at `start` inside `collision`.
    #[must_use]
    pub fn new(
        collision: CollisionWorld,
        shape: CollisionShape,
        start: Vec3,
        config: MovementConfig,
    ) -> Self {
        let pawn = ScriptedPawn::player(shape);
        let component = SandboxComponent {
            location: start,
            rotation: Quat::IDENTITY,
            query_enabled: true,
            channel: CollisionChannel::Pawn,
            shape: Some(shape),
            owner: pawn.id,
            collision: collision.clone(),
            published_velocity: Vec3::ZERO,
        };
        Self {
            world: SandboxWorld {
                collision,
                ..SandboxWorld::default()
            },
            pawn,
            component,
            movement: PawnMovement::new(config),
        }
    }

    /// Runs one tick.
    pub fn tick(&mut self, delta_time: f32) -> MovementEvents {
        self.movement.tick(
            delta_time,
            MovementContext::new(&self.world, &mut self.pawn, &mut self.component),
        )
    }

    /// Runs `ticks` ticks, returning every notification in order.
    pub fn run(&mut self, ticks: usize, delta_time: f32) -> Vec<MovementEvent> {
        (0..ticks).flat_map(|_| self.tick(delta_time)).collect()
    }

    /// Current pawn location.
    #[must_use]
    pub fn location(&self) -> Vec3 {
        self.component.location
    }
}
