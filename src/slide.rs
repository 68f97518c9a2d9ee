//! Slide vector maths used when a move is blocked.

use glam::Vec3;

use crate::collision::HitResult;
use crate::vector_math::{plane_project, safe_normal};
use crate::{KINDA_SMALL_NUMBER, TWO_WALL_NUDGE};

/// Portion of `delta` that continues along a surface with `normal`.
///
/// `time` is the fraction of `delta` left to travel.
#[must_use]
pub fn compute_slide_vector(delta: Vec3, time: f32, normal: Vec3) -> Vec3 {
    plane_project(delta, normal) * time
}

/// Adjusts a slide delta after it runs into a second surface.
///
/// When the two walls meet at 90 degrees or less the delta follows their
/// crease. Otherwise it slides along the new wall, or stops if that would
/// reverse the desired direction.
#[must_use]
pub fn two_wall_adjust(delta: Vec3, hit: &HitResult, old_normal: Vec3) -> Vec3 {
    let hit_normal = hit.normal;
    if old_normal.dot(hit_normal) <= 0.0 {
        let crease = safe_normal(hit_normal.cross(old_normal));
        let along = crease * (delta.dot(crease) * (1.0 - hit.time));
        if delta.dot(along) < 0.0 {
            -along
        } else {
            along
        }
    } else {
        let adjusted = compute_slide_vector(delta, 1.0 - hit.time, hit_normal);
        if adjusted.dot(delta) <= 0.0 {
            Vec3::ZERO
        } else if (hit_normal.dot(old_normal) - 1.0).abs() < KINDA_SMALL_NUMBER {
            // Same wall again: nudge off it so the next sweep does not stick.
            adjusted + hit_normal * TWO_WALL_NUDGE
        } else {
            adjusted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    fn slide_keeps_tangential_part() {
        let slide = compute_slide_vector(Vec3::new(10.0, 5.0, 0.0), 0.5, Vec3::NEG_X);
        assert_relative_eq!(slide.x, 0.0);
        assert_relative_eq!(slide.y, 2.5);
    }

    #[rstest]
    fn corner_follows_crease() {
        // Walls facing -X and -Y meet at a right angle; the crease is vertical.
        let hit = HitResult::blocking(0.0, 0.0, Vec3::ZERO, Vec3::NEG_Y);
        let adjusted = two_wall_adjust(Vec3::new(0.0, 4.0, 2.0), &hit, Vec3::NEG_X);
        assert_relative_eq!(adjusted.x, 0.0);
        assert_relative_eq!(adjusted.y, 0.0);
        assert_relative_eq!(adjusted.z, 2.0);
    }

    #[rstest]
    fn head_on_second_wall_stops() {
        let normal = Vec3::new(-1.0, 1.0, 0.0).normalize();
        let hit = HitResult::blocking(0.0, 0.0, Vec3::ZERO, normal);
        let old = Vec3::new(-1.0, 0.2, 0.0).normalize();
        let adjusted = two_wall_adjust(Vec3::new(1.0, -1.0, 0.0), &hit, old);
        assert!(adjusted.length() < 1e-5, "expected no slide, got {adjusted:?}");
    }

    #[rstest]
    fn same_wall_is_nudged_off() {
        let hit = HitResult::blocking(0.0, 0.0, Vec3::ZERO, Vec3::NEG_X);
        let adjusted = two_wall_adjust(Vec3::new(1.0, 1.0, 0.0), &hit, Vec3::NEG_X);
        assert_relative_eq!(adjusted.x, -TWO_WALL_NUDGE);
        assert_relative_eq!(adjusted.y, 1.0);
    }
}
