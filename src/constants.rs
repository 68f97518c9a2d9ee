//! Tolerances and fixed distances used by the movement integrator.
//!
//! These are engine-scale values rather than per-pawn configuration.

/// Multiplier applied to squared or linear speed limits before a velocity is
/// considered over the limit, absorbing float and correction-step error.
pub const OVER_VELOCITY_PERCENT: f32 = 1.01;
/// Per-axis magnitude below which a frame displacement is not applied.
pub const MOVE_EPSILON: f32 = 1e-6;
/// Small slack used for float comparisons throughout the crate.
pub const KINDA_SMALL_NUMBER: f32 = 1e-4;
/// Minimum length of the downward floor probe.
pub const FLOOR_TRACE_MIN: f32 = 2.4;
/// Extra distance above the kill plane the rescue velocity aims for.
pub const KILL_Z_MARGIN: f32 = 2.0;
/// Distance added to the penetration depth when pushing a body out.
pub const PENETRATION_PULLBACK: f32 = 0.125;
/// Slide deltas shorter than this on every axis are dropped.
pub const SLIDE_EPSILON: f32 = 1e-3;
/// Nudge applied along a repeated wall normal so the body does not stick.
pub const TWO_WALL_NUDGE: f32 = 0.01;
/// Distance a sweep backs off from the surface it hit.
pub const SWEEP_PULLBACK: f32 = 0.01;
/// Overlap tolerated before a shape counts as starting inside a surface.
pub const PENETRATION_TOLERANCE: f32 = 1e-3;
