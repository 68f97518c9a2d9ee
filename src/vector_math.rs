//! Basic vector math helper functions.
//! Small helpers for splitting velocities into horizontal and vertical parts
//! and for the tolerant length operations the integrator relies on.
use glam::Vec3;

use crate::KINDA_SMALL_NUMBER;

/// Returns the horizontal (X/Y) part of a vector with Z zeroed.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use pawn_movement::vector_math::horizontal;
/// assert_eq!(horizontal(Vec3::new(3.0, 4.0, 12.0)), Vec3::new(3.0, 4.0, 0.0));
/// ```
#[must_use]
pub const fn horizontal(vector: Vec3) -> Vec3 {
    Vec3::new(vector.x, vector.y, 0.0)
}

/// Returns the unit vector in the direction of `vector`, or zero.
///
/// Non-finite input and vectors too short to normalise reliably both yield
/// [`Vec3::ZERO`].
///
/// # Examples
///
/// ```
/// use glam::Vec3;
/// use pawn_movement::safe_normal;
/// let n = safe_normal(Vec3::new(3.0, 0.0, 4.0));
/// assert!((n.x - 0.6).abs() < 1e-6);
/// assert!((n.z - 0.8).abs() < 1e-6);
///
/// assert_eq!(safe_normal(Vec3::ZERO), Vec3::ZERO);
/// ```
#[must_use]
pub fn safe_normal(vector: Vec3) -> Vec3 {
    if !vector.is_finite() {
        return Vec3::ZERO;
    }
    vector.try_normalize().unwrap_or(Vec3::ZERO)
}

/// Returns `vector` scaled down so its length does not exceed `max_size`.
///
/// A limit below [`KINDA_SMALL_NUMBER`] collapses the vector to zero, so a
/// zero or negative limit never flips the direction.
#[must_use]
pub fn clamped_to_max_size(vector: Vec3, max_size: f32) -> Vec3 {
    if max_size < KINDA_SMALL_NUMBER {
        return Vec3::ZERO;
    }
    let length_sq = vector.length_squared();
    if length_sq > max_size * max_size {
        vector * (max_size / length_sq.sqrt())
    } else {
        vector
    }
}

/// Checks whether every component of `vector` lies within `tolerance` of 0.
#[must_use]
pub fn is_nearly_zero(vector: Vec3, tolerance: f32) -> bool {
    vector.abs().max_element() <= tolerance
}

/// Projects `vector` onto the plane with the given unit `normal`.
#[must_use]
pub fn plane_project(vector: Vec3, normal: Vec3) -> Vec3 {
    vector - normal * vector.dot(normal)
}
