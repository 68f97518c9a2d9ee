//! Floor probe helpers.
//!
//! The integrator sweeps its collision shape straight down after each move
//! and classifies whatever it hits by the surface's angle from world-up.

use glam::{Quat, Vec3};

use crate::collision::{CollisionChannel, CollisionShape, HitResult, PawnId, SweepQuery};
use crate::{FLOOR_TRACE_MIN, KINDA_SMALL_NUMBER};

/// How far below the pawn the floor probe reaches.
///
/// The probe always extends past the configured step height.
///
/// # Examples
/// ```
/// use pawn_movement::floor_trace_distance;
/// assert_eq!(floor_trace_distance(0.0), 2.4 + 1e-4);
/// assert!((floor_trace_distance(45.0) - 47.4001).abs() < 1e-4);
/// ```
#[must_use]
pub fn floor_trace_distance(max_step_height: f32) -> f32 {
    FLOOR_TRACE_MIN.max(max_step_height + FLOOR_TRACE_MIN + KINDA_SMALL_NUMBER)
}

/// Angle in degrees between world-up and `normal`.
#[must_use]
pub fn surface_angle_degrees(normal: Vec3) -> f32 {
    Vec3::Z.dot(normal).clamp(-1.0, 1.0).acos().abs().to_degrees()
}

/// Whether a surface with `normal` counts as floor under `tolerance` degrees.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use pawn_movement::is_walkable_floor;
/// assert!(is_walkable_floor(Vec3::Z, 45.0));
/// assert!(!is_walkable_floor(Vec3::X, 45.0));
/// ```
#[must_use]
pub fn is_walkable_floor(normal: Vec3, tolerance: f32) -> bool {
    surface_angle_degrees(normal) <= tolerance
}

/// Classifies the result of a floor sweep.
///
/// Missing or non-blocking hits are never floor.
#[must_use]
pub fn classify_floor_hit(hit: Option<&HitResult>, tolerance: f32) -> bool {
    hit.is_some_and(|h| h.blocking_hit && is_walkable_floor(h.normal, tolerance))
}

/// Builds the downward sweep used by the floor check.
#[must_use]
pub fn floor_sweep_query(
    start: Vec3,
    trace_distance: f32,
    shape: CollisionShape,
    channel: CollisionChannel,
    ignored: PawnId,
) -> SweepQuery {
    SweepQuery {
        start,
        end: start - Vec3::Z * trace_distance,
        rotation: Quat::IDENTITY,
        channel,
        shape,
        ignored: Some(ignored),
    }
}
