//! The per-tick pawn movement integrator.
//!
//! [`PawnMovement`] owns a pawn's velocity and limits. Each call to
//! [`PawnMovement::tick`] integrates input, moves the pawn's transform through
//! the host with collision, reconciles velocity with what actually happened
//! and re-probes the floor, returning any notifications that fired.

use bevy::prelude::Component;
use glam::{Quat, Vec3};
use log::{debug, trace};

use crate::bounds::kill_plane_rescue_speed;
use crate::collision::HitResult;
use crate::config::{MovementConfig, MovementLimits, MovementTuning};
use crate::events::{MovementEvent, MovementEvents};
use crate::floor::{classify_floor_hit, floor_sweep_query, floor_trace_distance};
use crate::host::{HostWorld, MovementContext, PawnOwner, UpdatedComponent};
use crate::slide::{compute_slide_vector, two_wall_adjust};
use crate::vector_math::is_nearly_zero;
use crate::velocity::{apply_control_input, correct_velocity, is_exceeding_max_speed};
use crate::{MOVE_EPSILON, SLIDE_EPSILON};

/// Kinematic movement state for one pawn.
#[derive(Component, Debug, Clone, Default)]
pub struct PawnMovement {
    velocity: Vec3,
    limits: MovementLimits,
    tuning: MovementTuning,
    touching_floor: bool,
    position_corrected: bool,
}

impl PawnMovement {
    /// Creates an integrator at rest, not touching any floor.
    #[must_use]
    pub fn new(config: MovementConfig) -> Self {
        Self {
            limits: config.limits,
            tuning: config.tuning,
            ..Self::default()
        }
    }

    /// Current velocity.
    #[must_use]
    pub const fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Overwrites the velocity, for launches and teleports.
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    /// Zeroes the velocity.
    pub fn stop_movement_immediately(&mut self) {
        self.velocity = Vec3::ZERO;
    }

    /// Speed and step limits.
    #[must_use]
    pub const fn limits(&self) -> &MovementLimits {
        &self.limits
    }

    /// Replaces the speed and step limits.
    pub fn set_limits(&mut self, limits: MovementLimits) {
        self.limits = limits;
    }

    /// Responsiveness, gravity and floor settings.
    #[must_use]
    pub const fn tuning(&self) -> &MovementTuning {
        &self.tuning
    }

    /// Replaces the tuning parameters.
    pub fn set_tuning(&mut self, tuning: MovementTuning) {
        self.tuning = tuning;
    }

    /// Whether the last floor probe found floor.
    #[must_use]
    pub const fn is_touching_floor(&self) -> bool {
        self.touching_floor
    }

    /// Whether a penetration correction moved the pawn during the last move.
    #[must_use]
    pub const fn is_position_corrected(&self) -> bool {
        self.position_corrected
    }

    /// Largest configured speed limit.
    #[must_use]
    pub fn max_speed(&self) -> f32 {
        self.limits
            .max_horizontal_speed
            .max(self.limits.max_rise_speed)
            .max(self.limits.max_fall_speed)
            .max(0.0)
    }

    /// Whether the current velocity exceeds any limit beyond tolerance.
    #[must_use]
    pub fn is_exceeding_max_speed(&self) -> bool {
        is_exceeding_max_speed(self.velocity, &self.limits)
    }

    /// Returns `velocity` pulled back within this pawn's limits.
    #[must_use]
    pub fn correct_velocity(&self, velocity: Vec3) -> Vec3 {
        correct_velocity(velocity, &self.limits)
    }

    /// Advances the pawn by one simulation tick.
    ///
    /// Does nothing when the host asks to skip the update, when the pawn or
    /// its component is missing, or when the pawn has no local controller.
    /// Returns the notifications raised during the tick in firing order.
    pub fn tick(&mut self, delta_time: f32, context: MovementContext<'_>) -> MovementEvents {
        let MovementContext {
            world,
            pawn: maybe_pawn,
            component: maybe_component,
        } = context;
        let mut events = MovementEvents::new();

        if world.should_skip_update(delta_time) {
            trace!("movement update skipped by host");
            return events;
        }
        let (Some(pawn), Some(component)) = (maybe_pawn, maybe_component) else {
            trace!("movement update without pawn or updated component");
            return events;
        };

        let previous_velocity = self.velocity;
        let Some(controller) = pawn.controller().filter(|c| c.is_local) else {
            return events;
        };

        if controller.integrates_input(self.tuning.use_acceleration_for_paths) {
            self.apply_control_input_to_velocity(delta_time, pawn);
        } else if self.is_exceeding_max_speed() {
            // AI following a path: only keep it within limits.
            self.velocity = self.correct_velocity(self.velocity);
        }

        self.limit_world_bounds(world, component);
        self.position_corrected = false;

        let delta = self.velocity * delta_time;
        if !is_nearly_zero(delta, MOVE_EPSILON) {
            let old_location = component.location();
            let rotation = component.rotation();

            let mut hit = self.safe_move_updated_component(component, delta, rotation, true);
            if hit.is_valid_blocking_hit() {
                pawn.handle_impact(&hit, delta_time, delta);
                self.slide_along_surface(component, pawn, delta, 1.0 - hit.time, &mut hit, true);
            }

            // Penetration fix-ups must not turn into velocity.
            if !self.position_corrected {
                self.velocity = (component.location() - old_location) / delta_time;
            }
        }

        component.set_component_velocity(self.velocity);

        if previous_velocity.z > 0.0 && self.velocity.z < 0.0 {
            debug!("apex reached at {:?}", component.location());
            events.push(MovementEvent::ApexReached);
        }

        let was_touching_floor = self.touching_floor;
        self.perform_floor_check(world, pawn, component);
        if was_touching_floor != self.touching_floor {
            if self.touching_floor {
                debug!("landed at {:?}", component.location());
                events.push(MovementEvent::Landed);
            } else {
                debug!("left floor at {:?}", component.location());
                events.push(MovementEvent::LeftFloor);
            }
        }

        events
    }

    /// Integrates the pawn's pending input and consumes it.
    pub fn apply_control_input_to_velocity(&mut self, delta_time: f32, pawn: &mut dyn PawnOwner) {
        let input = pawn.pending_input_vector();
        self.velocity = apply_control_input(self.velocity, input, &self.limits, &self.tuning, delta_time);
        pawn.consume_input_vector();
    }

    /// Pushes vertical velocity upward while the pawn is below the kill plane.
    ///
    /// Returns `true` if the velocity was overridden.
    pub fn limit_world_bounds(
        &mut self,
        world: &dyn HostWorld,
        component: &dyn UpdatedComponent,
    ) -> bool {
        let bounds = world.world_bounds();
        let location = component.location();
        let rescue = kill_plane_rescue_speed(location.z, &bounds, self.max_speed());
        if let Some(speed) = rescue {
            debug!(
                "below kill plane {} at z={}, rising at {speed}",
                bounds.kill_z, location.z
            );
            self.velocity.z = speed;
        }
        rescue.is_some()
    }

    /// Sweeps down from the pawn and records whether it stands on floor.
    ///
    /// Leaves the floor flag untouched when the component does not take part
    /// in queries, and clears it when the pawn has no collision shape.
    pub fn perform_floor_check(
        &mut self,
        world: &dyn HostWorld,
        pawn: &dyn PawnOwner,
        component: &dyn UpdatedComponent,
    ) {
        if !component.is_query_collision_enabled() {
            return;
        }
        let Some(shape) = pawn.root_collision_shape() else {
            trace!("pawn has no collision shape; treating as airborne");
            self.touching_floor = false;
            return;
        };

        let query = floor_sweep_query(
            component.location(),
            floor_trace_distance(self.limits.max_step_height),
            shape,
            component.collision_channel(),
            pawn.id(),
        );
        let hit = world.sweep_single(&query);
        self.touching_floor = classify_floor_hit(hit.as_ref(), self.tuning.floor_angle_tolerance);
    }

    /// Moves the component, resolving a starting overlap and retrying once.
    pub fn safe_move_updated_component(
        &mut self,
        component: &mut dyn UpdatedComponent,
        delta: Vec3,
        rotation: Quat,
        sweep: bool,
    ) -> HitResult {
        let hit = component.move_component(delta, rotation, sweep);
        if !hit.start_penetrating {
            return hit;
        }

        let adjustment = hit.penetration_adjustment();
        if self.resolve_penetration(component, adjustment, &hit, rotation) {
            trace!("retrying move after depenetrating by {adjustment:?}");
            component.move_component(delta, rotation, sweep)
        } else {
            hit
        }
    }

    /// Asks the host to depenetrate and records whether anything moved.
    ///
    /// Returns `true` if any correction has happened since the current move
    /// began.
    pub fn resolve_penetration(
        &mut self,
        component: &mut dyn UpdatedComponent,
        adjustment: Vec3,
        hit: &HitResult,
        rotation: Quat,
    ) -> bool {
        self.position_corrected |= component.resolve_penetration(adjustment, hit, rotation);
        self.position_corrected
    }

    /// Continues a blocked move along the surface in `hit`.
    ///
    /// `time` is the fraction of `delta` still to travel. On return `hit`
    /// holds the last sweep result. Returns the fraction of `time` applied.
    pub fn slide_along_surface(
        &mut self,
        component: &mut dyn UpdatedComponent,
        pawn: &mut dyn PawnOwner,
        delta: Vec3,
        time: f32,
        hit: &mut HitResult,
        handle_impact: bool,
    ) -> f32 {
        if !hit.blocking_hit {
            return 0.0;
        }

        let old_normal = hit.normal;
        let slide_delta = compute_slide_vector(delta, time, old_normal);
        if slide_delta.dot(delta) <= 0.0 {
            return 0.0;
        }

        let rotation = component.rotation();
        *hit = self.safe_move_updated_component(component, slide_delta, rotation, true);
        let first_hit_percent = hit.time;
        let mut percent_applied = first_hit_percent;

        if hit.is_valid_blocking_hit() {
            if handle_impact {
                pawn.handle_impact(hit, first_hit_percent * time, slide_delta);
            }

            let adjusted = two_wall_adjust(slide_delta, hit, old_normal);
            if !is_nearly_zero(adjusted, SLIDE_EPSILON) && adjusted.dot(delta) > 0.0 {
                *hit = self.safe_move_updated_component(component, adjusted, rotation, true);
                let second_hit_percent = hit.time * (1.0 - first_hit_percent);
                percent_applied += second_hit_percent;
                if handle_impact && hit.blocking_hit {
                    pawn.handle_impact(hit, second_hit_percent * time, adjusted);
                }
            }
        }

        percent_applied.clamp(0.0, 1.0)
    }
}
