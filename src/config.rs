//! Movement limits and tuning parameters.
//!
//! Both halves of [`MovementConfig`] are plain data read by the integrator
//! at the start of each tick. The config can be deserialised from JSON with
//! missing fields falling back to their defaults.

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Speed and step limits for a pawn, in world units (per second).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementLimits {
    /// Largest horizontal (X/Y) speed.
    pub max_horizontal_speed: f32,
    /// Largest upward speed.
    pub max_rise_speed: f32,
    /// Largest downward speed, expressed as a positive magnitude.
    pub max_fall_speed: f32,
    /// Tallest ledge the floor probe must reach past.
    pub max_step_height: f32,
}

impl Default for MovementLimits {
    fn default() -> Self {
        Self {
            max_horizontal_speed: 600.0,
            max_rise_speed: 1000.0,
            max_fall_speed: 2000.0,
            max_step_height: 45.0,
        }
    }
}

/// Responsiveness, gravity and floor classification settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    /// How quickly velocity reorients toward the input direction.
    pub turn_boost: f32,
    /// How quickly horizontal velocity decays with no input.
    pub speed_decay: f32,
    /// Downward acceleration applied while gravity is enabled.
    pub gravity: f32,
    /// Steepest surface, in degrees from world-up, still counted as floor.
    pub floor_angle_tolerance: f32,
    /// Whether gravity is applied during input integration.
    pub gravity_enabled: bool,
    /// Let AI controllers following a path keep integrating input.
    pub use_acceleration_for_paths: bool,
    /// Clamp vertical speed during input integration.
    ///
    /// Off by default: input integration historically leaves vertical speed
    /// unclamped and pawns rely on that (for example to exceed the rise
    /// limit with a launch impulse).
    pub clamp_vertical_on_input: bool,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            turn_boost: 8.0,
            speed_decay: 4.0,
            gravity: 980.0,
            floor_angle_tolerance: 45.0,
            gravity_enabled: true,
            use_acceleration_for_paths: false,
            clamp_vertical_on_input: false,
        }
    }
}

/// Complete movement configuration for one pawn.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Speed and step limits.
    pub limits: MovementLimits,
    /// Responsiveness and floor settings.
    pub tuning: MovementTuning,
}

/// Errors raised while loading or validating a [`MovementConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read movement config: {0}")]
    Io(#[from] std::io::Error),
    /// The config file is not valid JSON for [`MovementConfig`].
    #[error("failed to parse movement config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A numeric field is NaN or infinite.
    #[error("`{field}` must be finite")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A field that must be non-negative is negative.
    #[error("`{field}` must not be negative, got {value}")]
    Negative {
        /// Name of the offending field.
        field: &'static str,
        /// Value found in the config.
        value: f32,
    },
    /// The floor angle tolerance lies outside `[0, 180]` degrees.
    #[error("`floor_angle_tolerance` must lie within [0, 180] degrees, got {0}")]
    FloorAngle(f32),
}

impl MovementConfig {
    /// Parses and validates a config from a JSON string.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON and the validation
    /// variants for out-of-range values.
    ///
    /// # Examples
    /// ```
    /// use pawn_movement::MovementConfig;
    /// let config = MovementConfig::from_json(r#"{ "limits": { "max_horizontal_speed": 300.0 } }"#)
    ///     .expect("valid config");
    /// assert_eq!(config.limits.max_horizontal_speed, 300.0);
    /// assert_eq!(config.tuning.gravity, 980.0);
    /// ```
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// errors of [`MovementConfig::from_json`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("loading movement config from {}", path.display());
        let source = fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    /// Checks every numeric field for finiteness and range.
    ///
    /// # Errors
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = &self.limits;
        let tuning = &self.tuning;
        let non_negative = [
            ("max_horizontal_speed", limits.max_horizontal_speed),
            ("max_rise_speed", limits.max_rise_speed),
            ("max_fall_speed", limits.max_fall_speed),
            ("max_step_height", limits.max_step_height),
            ("turn_boost", tuning.turn_boost),
            ("speed_decay", tuning.speed_decay),
            ("gravity", tuning.gravity),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        let angle = tuning.floor_angle_tolerance;
        if !angle.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "floor_angle_tolerance",
            });
        }
        if !(0.0..=180.0).contains(&angle) {
            return Err(ConfigError::FloorAngle(angle));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn empty_object_yields_defaults() {
        let config = MovementConfig::from_json("{}").expect("parse defaults");
        assert_eq!(config, MovementConfig::default());
    }

    #[rstest]
    #[case(r#"{ "limits": { "max_fall_speed": -1.0 } }"#, "max_fall_speed")]
    #[case(r#"{ "tuning": { "gravity": -9.8 } }"#, "gravity")]
    fn negative_values_are_rejected(#[case] source: &str, #[case] expected: &str) {
        match MovementConfig::from_json(source) {
            Err(ConfigError::Negative { field, .. }) => assert_eq!(field, expected),
            other => panic!("expected negative-value error, got {other:?}"),
        }
    }

    #[rstest]
    fn floor_angle_out_of_range_is_rejected() {
        let err = MovementConfig::from_json(r#"{ "tuning": { "floor_angle_tolerance": 200.0 } }"#)
            .expect_err("angle above 180 must fail");
        assert!(matches!(err, ConfigError::FloorAngle(a) if (a - 200.0).abs() < f32::EPSILON));
    }

    #[rstest]
    fn malformed_json_is_a_parse_error() {
        let err = MovementConfig::from_json("{ limits: ").expect_err("malformed");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[rstest]
    fn non_finite_values_are_rejected() {
        let mut config = MovementConfig::default();
        config.tuning.turn_boost = f32::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite { field: "turn_boost" })
        ));
    }
}
