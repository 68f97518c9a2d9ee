//! Shared scenes and configs for movement integration tests.

use glam::Vec3;
use pawn_movement::{
    CollisionShape, CollisionWorld, MovementConfig, MovementLimits, MovementTuning, Surface,
};
use crate::Sandbox;

/// Frame time used by most scenarios.
pub const DT: f32 = 1.0 / 60.0;

/// Unit sphere used as the pawn's root primitive.
pub const BALL: CollisionShape = CollisionShape::Sphere { radius: 1.0 };

/// A world with a single flat floor at `z = 0`.
#[must_use]
pub fn flat_ground() -> CollisionWorld {
    CollisionWorld::new().with_surface(Surface::floor(0.0))
}

/// Default config with a short step so the floor probe reaches 2.4 units.
#[must_use]
pub fn short_step_config() -> MovementConfig {
    MovementConfig {
        limits: MovementLimits {
            max_step_height: 0.0,
            ..MovementLimits::default()
        },
        ..MovementConfig::default()
    }
}

/// Config without gravity or decay, so velocity only changes on contact.
#[must_use]
pub fn frictionless_config() -> MovementConfig {
    MovementConfig {
        limits: MovementLimits {
            max_horizontal_speed: 1000.0,
            max_step_height: 0.0,
            ..MovementLimits::default()
        },
        tuning: MovementTuning {
            gravity_enabled: false,
            speed_decay: 0.0,
            ..MovementTuning::default()
        },
    }
}

/// A ball pawn at `start` over flat ground with a short step.
#[must_use]
pub fn sandbox_over_ground(start: Vec3) -> Sandbox {
    Sandbox::new(flat_ground(), BALL, start, short_step_config())
}
