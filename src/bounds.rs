//! Kill-plane enforcement.

use crate::host::WorldBounds;
use crate::KILL_Z_MARGIN;

/// Vertical velocity that lifts a pawn back toward the kill plane.
///
/// Returns `None` when bounds checks are disabled or the pawn is at or above
/// `bounds.kill_z`. Otherwise returns the smaller of `max_speed` and the
/// distance to a point [`KILL_Z_MARGIN`] above the plane.
///
/// # Examples
/// ```
/// use pawn_movement::{kill_plane_rescue_speed, WorldBounds};
/// let bounds = WorldBounds { enabled: true, kill_z: -100.0 };
/// assert_eq!(kill_plane_rescue_speed(-110.0, &bounds, 500.0), Some(12.0));
/// assert_eq!(kill_plane_rescue_speed(-90.0, &bounds, 500.0), None);
/// ```
#[must_use]
pub fn kill_plane_rescue_speed(location_z: f32, bounds: &WorldBounds, max_speed: f32) -> Option<f32> {
    if !bounds.enabled || location_z >= bounds.kill_z {
        return None;
    }
    Some(max_speed.min(bounds.kill_z - location_z + KILL_Z_MARGIN))
}
