//! Utility helpers for tests.
//!
//! Host doubles backed by the half-space collision world, shared scenes and
//! configs, plus assertion helpers for vectors.

pub mod fixtures;
pub mod sandbox;

pub use sandbox::{Sandbox, SandboxComponent, SandboxWorld, ScriptedPawn};

use glam::Vec3;

/// Assert that `actual` lies within `epsilon` of `expected` on every axis.
///
/// # Panics
/// Panics with both vectors in the message if any axis differs by more
/// than `epsilon`.
#[track_caller]
pub fn assert_vec3_near(actual: Vec3, expected: Vec3, epsilon: f32) {
    let diff = (actual - expected).abs();
    assert!(
        diff.max_element() <= epsilon,
        "expected {expected:?} within {epsilon}, got {actual:?}"
    );
}

/// Assert that `actual` has no horizontal component beyond `epsilon`.
///
/// # Panics
/// Panics if the X or Y component exceeds `epsilon` in magnitude.
#[track_caller]
pub fn assert_no_horizontal(actual: Vec3, epsilon: f32) {
    assert!(
        actual.x.abs() <= epsilon && actual.y.abs() <= epsilon,
        "expected purely vertical vector, got {actual:?}"
    );
}
