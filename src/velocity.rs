//! Velocity integration helpers.
//!
//! Pure functions that turn input into velocity and keep velocity within the
//! configured limits. [`crate::PawnMovement`] calls these once per tick; they
//! are exposed so hosts and tests can evaluate the same maths directly.

use glam::Vec3;

use crate::config::{MovementLimits, MovementTuning};
use crate::vector_math::{clamped_to_max_size, horizontal, safe_normal};
use crate::OVER_VELOCITY_PERCENT;

/// Limits with negative values floored at zero.
#[derive(Debug, Clone, Copy)]
struct SpeedCaps {
    horizontal: f32,
    rise: f32,
    fall: f32,
}

impl SpeedCaps {
    fn new(limits: &MovementLimits) -> Self {
        Self {
            horizontal: limits.max_horizontal_speed.max(0.0),
            rise: limits.max_rise_speed.max(0.0),
            fall: limits.max_fall_speed.max(0.0),
        }
    }

    fn exceeds_horizontal(&self, velocity: Vec3) -> bool {
        horizontal(velocity).length_squared()
            > self.horizontal * self.horizontal * OVER_VELOCITY_PERCENT
    }
}

/// Integrates one tick of control input into `velocity`.
///
/// The X/Y components of `input` act as a horizontal acceleration and Z as a
/// vertical one. With horizontal input (or while over the horizontal limit)
/// the velocity is turned toward the input direction at a rate set by
/// `turn_boost` without growing; with neither it decays at `speed_decay`.
/// Input and gravity are then added and the horizontal speed is clamped.
///
/// Vertical speed is left unclamped unless
/// [`MovementTuning::clamp_vertical_on_input`] is set.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use pawn_movement::{apply_control_input, MovementLimits, MovementTuning};
/// let tuning = MovementTuning { gravity_enabled: false, ..MovementTuning::default() };
/// let limits = MovementLimits::default();
/// let v = apply_control_input(Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0), &limits, &tuning, 0.5);
/// assert_eq!(v, Vec3::new(50.0, 0.0, 0.0));
/// ```
#[must_use]
pub fn apply_control_input(
    velocity: Vec3,
    input: Vec3,
    limits: &MovementLimits,
    tuning: &MovementTuning,
    delta_time: f32,
) -> Vec3 {
    let caps = SpeedCaps::new(limits);
    let horizontal_accel = horizontal(input);
    let vertical_accel = input.z;
    let horizontal_vel = horizontal(velocity);

    let mut next = velocity;
    if horizontal_accel.length_squared() > 0.0 || caps.exceeds_horizontal(velocity) {
        if next.length_squared() > 0.0 {
            // Reorient without ever increasing the magnitude.
            let time_scale = (delta_time * tuning.turn_boost).clamp(0.0, 1.0);
            let desired = safe_normal(horizontal_accel) * horizontal_vel.length();
            next += (desired - horizontal_vel) * time_scale;
        }
    } else if next.length_squared() > 0.0 {
        let time_scale = (delta_time * tuning.speed_decay).clamp(0.0, 1.0);
        next -= horizontal_vel * time_scale;
    }

    next += horizontal_accel * delta_time;
    next.z += vertical_accel * delta_time;
    if tuning.gravity_enabled {
        next.z -= tuning.gravity * delta_time;
    }

    let clamped_horizontal = clamped_to_max_size(horizontal(next), caps.horizontal);
    let vertical = if tuning.clamp_vertical_on_input {
        next.z.clamp(-caps.fall, caps.rise)
    } else {
        next.z
    };
    Vec3::new(clamped_horizontal.x, clamped_horizontal.y, vertical)
}

/// Whether `velocity` exceeds any limit by more than the 1% tolerance.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use pawn_movement::{is_exceeding_max_speed, MovementLimits};
/// let limits = MovementLimits::default();
/// assert!(!is_exceeding_max_speed(Vec3::new(600.0, 0.0, 0.0), &limits));
/// assert!(is_exceeding_max_speed(Vec3::new(0.0, 0.0, -2100.0), &limits));
/// ```
#[must_use]
pub fn is_exceeding_max_speed(velocity: Vec3, limits: &MovementLimits) -> bool {
    let caps = SpeedCaps::new(limits);
    caps.exceeds_horizontal(velocity)
        || velocity.z > caps.rise * OVER_VELOCITY_PERCENT
        || velocity.z < -caps.fall * OVER_VELOCITY_PERCENT
}

/// Returns `velocity` pulled back within the configured limits.
///
/// Horizontal speed over the tolerance is scaled to exactly the horizontal
/// limit with its direction kept; vertical speed beyond the tolerant bounds
/// is set to the bound.
#[must_use]
pub fn correct_velocity(velocity: Vec3, limits: &MovementLimits) -> Vec3 {
    let caps = SpeedCaps::new(limits);
    let mut corrected_horizontal = horizontal(velocity);
    if caps.exceeds_horizontal(velocity) {
        corrected_horizontal = safe_normal(corrected_horizontal) * caps.horizontal;
    }

    let vertical = if velocity.z > caps.rise * OVER_VELOCITY_PERCENT {
        caps.rise
    } else if velocity.z < -caps.fall * OVER_VELOCITY_PERCENT {
        -caps.fall
    } else {
        velocity.z
    };

    Vec3::new(corrected_horizontal.x, corrected_horizontal.y, vertical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn limits() -> MovementLimits {
        MovementLimits {
            max_horizontal_speed: 10.0,
            max_rise_speed: 5.0,
            max_fall_speed: 20.0,
            max_step_height: 1.0,
        }
    }

    #[fixture]
    fn weightless() -> MovementTuning {
        MovementTuning {
            turn_boost: 4.0,
            speed_decay: 2.0,
            gravity_enabled: false,
            ..MovementTuning::default()
        }
    }

    #[rstest]
    fn decay_slows_without_input(limits: MovementLimits, weightless: MovementTuning) {
        let next = apply_control_input(Vec3::new(8.0, 0.0, 0.0), Vec3::ZERO, &limits, &weightless, 0.1);
        // time scale = 0.1 * 2.0 = 0.2
        assert_relative_eq!(next.x, 6.4, epsilon = 1e-5);
        assert_relative_eq!(next.y, 0.0);
    }

    #[rstest]
    fn turning_keeps_magnitude(limits: MovementLimits, weightless: MovementTuning) {
        let tuning = MovementTuning {
            turn_boost: 100.0,
            ..weightless
        };
        // Full turn (time scale clamps to 1) toward +Y, then +Y input * dt is added.
        let next = apply_control_input(
            Vec3::new(5.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            &limits,
            &tuning,
            0.1,
        );
        assert_relative_eq!(next.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(next.y, 5.1, epsilon = 1e-5);
    }

    #[rstest]
    fn over_limit_without_input_bleeds_speed_at_turn_rate(
        limits: MovementLimits,
        weightless: MovementTuning,
    ) {
        let next = apply_control_input(Vec3::new(30.0, 0.0, 0.0), Vec3::ZERO, &limits, &weightless, 0.1);
        // Turn branch toward a zero direction removes 40%, then the clamp applies.
        assert_relative_eq!(next.x, 10.0, epsilon = 1e-5);
    }

    #[rstest]
    fn gravity_subtracts_from_vertical(limits: MovementLimits) {
        let tuning = MovementTuning {
            gravity: 10.0,
            gravity_enabled: true,
            ..MovementTuning::default()
        };
        let next = apply_control_input(Vec3::ZERO, Vec3::ZERO, &limits, &tuning, 0.5);
        assert_relative_eq!(next.z, -5.0);
    }

    #[rstest]
    fn vertical_is_unclamped_by_default(limits: MovementLimits, weightless: MovementTuning) {
        let next = apply_control_input(Vec3::new(0.0, 0.0, 50.0), Vec3::ZERO, &limits, &weightless, 0.1);
        assert_relative_eq!(next.z, 50.0);
    }

    #[rstest]
    fn vertical_clamp_can_be_enabled(limits: MovementLimits, weightless: MovementTuning) {
        let tuning = MovementTuning {
            clamp_vertical_on_input: true,
            ..weightless
        };
        let rising = apply_control_input(Vec3::new(0.0, 0.0, 50.0), Vec3::ZERO, &limits, &tuning, 0.1);
        let falling = apply_control_input(Vec3::new(0.0, 0.0, -50.0), Vec3::ZERO, &limits, &tuning, 0.1);
        assert_relative_eq!(rising.z, 5.0);
        assert_relative_eq!(falling.z, -20.0);
    }

    #[rstest]
    #[case(Vec3::new(10.04, 0.0, 0.0), false)]
    #[case(Vec3::new(10.1, 0.0, 0.0), true)]
    #[case(Vec3::new(0.0, 0.0, 5.06), true)]
    #[case(Vec3::new(0.0, 0.0, -20.1), false)]
    #[case(Vec3::new(0.0, 0.0, -20.3), true)]
    fn exceeding_uses_one_percent_tolerance(
        limits: MovementLimits,
        #[case] velocity: Vec3,
        #[case] expected: bool,
    ) {
        assert_eq!(is_exceeding_max_speed(velocity, &limits), expected);
    }

    #[rstest]
    fn correction_leaves_in_range_velocity_alone(limits: MovementLimits) {
        let velocity = Vec3::new(3.0, -4.0, 2.0);
        assert_eq!(correct_velocity(velocity, &limits), velocity);
    }

    #[rstest]
    fn correction_caps_vertical_bounds(limits: MovementLimits) {
        assert_relative_eq!(correct_velocity(Vec3::new(0.0, 0.0, 9.0), &limits).z, 5.0);
        assert_relative_eq!(correct_velocity(Vec3::new(0.0, 0.0, -90.0), &limits).z, -20.0);
    }
}
