//! Configuration for camera motion interpretation.
//!
//! This module provides the [`InterpreterConfig`] struct which centralizes the
//! tunable parameters of the interpreter, along with pacing presets.
//!
//! # Example
//!
//! ```
//! use camera_motion::{Easing, InterpreterConfig};
//!
//! // Use default configuration
//! let config = InterpreterConfig::default();
//!
//! // Use a preset and tweak it
//! let smooth = InterpreterConfig::cinematic().with_orbit_step_degrees(3.0);
//! assert_eq!(smooth.default_easing, Easing::EaseInOutCubic);
//! ```

use crate::camera::Easing;
use crate::error::{MotionError, Result};

/// Smallest orbit arc covered by one keyframe, in degrees.
pub const MIN_ORBIT_STEP_DEGREES: f64 = 2.0;

/// Largest orbit arc covered by one keyframe, in degrees.
pub const MAX_ORBIT_STEP_DEGREES: f64 = 45.0;

/// Configuration for plan interpretation.
///
/// Every entry point takes the configuration explicitly; the interpreter keeps
/// no state between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpreterConfig {
    /// Length below which a vector is treated as degenerate.
    pub epsilon: f64,

    /// Tolerance between summed step durations and the requested duration
    /// before ratios are renormalized.
    pub duration_tolerance: f64,

    /// Arc covered by each orbit keyframe, in degrees.
    /// Clamped to `[MIN_ORBIT_STEP_DEGREES, MAX_ORBIT_STEP_DEGREES]`.
    pub orbit_step_degrees: f64,

    /// Largest absolute orbit angle accepted in one step, in degrees.
    /// Bounds the number of keyframes a single orbit can emit.
    pub max_orbit_degrees: f64,

    /// Duration of the cut emitted by `move_to` at `instant` speed (seconds).
    pub instant_cut_duration: f64,

    /// Easing used for `medium` speed and when nothing else is specified.
    pub default_easing: Easing,

    /// Maximum elevation of the view direction reachable by tilting, in
    /// degrees. Keeps the view away from world-up.
    pub max_pitch_degrees: f64,

    /// Closest a dolly may bring the camera to its target.
    pub min_target_standoff: f64,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-6,
            duration_tolerance: 1e-9,
            orbit_step_degrees: 15.0,
            max_orbit_degrees: 3600.0,
            instant_cut_duration: 0.01,
            default_easing: Easing::EaseInOutQuad,
            max_pitch_degrees: 89.0,
            min_target_standoff: 0.1,
        }
    }
}

impl InterpreterConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        if !(self.epsilon > 0.0 && self.epsilon.is_finite()) {
            return Err(MotionError::invalid_config("epsilon must be positive"));
        }
        if !(self.duration_tolerance > 0.0 && self.duration_tolerance.is_finite()) {
            return Err(MotionError::invalid_config(
                "duration_tolerance must be positive",
            ));
        }
        if !(self.orbit_step_degrees > 0.0 && self.orbit_step_degrees.is_finite()) {
            return Err(MotionError::invalid_config(
                "orbit_step_degrees must be positive",
            ));
        }
        if !(self.max_orbit_degrees > 0.0 && self.max_orbit_degrees.is_finite()) {
            return Err(MotionError::invalid_config(
                "max_orbit_degrees must be positive",
            ));
        }
        if !(self.instant_cut_duration >= 0.0 && self.instant_cut_duration.is_finite()) {
            return Err(MotionError::invalid_config(
                "instant_cut_duration must be non-negative",
            ));
        }
        if !(self.max_pitch_degrees > 0.0 && self.max_pitch_degrees < 90.0) {
            return Err(MotionError::invalid_config(
                "max_pitch_degrees must be in (0, 90)",
            ));
        }
        if !(self.min_target_standoff >= 0.0 && self.min_target_standoff.is_finite()) {
            return Err(MotionError::invalid_config(
                "min_target_standoff must be non-negative",
            ));
        }
        Ok(())
    }

    /// Orbit keyframe arc after clamping to the supported range.
    #[must_use]
    pub fn effective_orbit_step_degrees(&self) -> f64 {
        self.orbit_step_degrees
            .clamp(MIN_ORBIT_STEP_DEGREES, MAX_ORBIT_STEP_DEGREES)
    }

    /// Preset for final renders: dense orbit keyframes, cubic easing.
    #[must_use]
    pub fn cinematic() -> Self {
        Self {
            orbit_step_degrees: 5.0,
            default_easing: Easing::EaseInOutCubic,
            ..Self::default()
        }
    }

    /// Preset for quick previews: coarse orbit keyframes, linear easing.
    #[must_use]
    pub fn preview() -> Self {
        Self {
            orbit_step_degrees: MAX_ORBIT_STEP_DEGREES,
            default_easing: Easing::Linear,
            ..Self::default()
        }
    }

    /// Set the orbit keyframe arc.
    #[must_use]
    pub const fn with_orbit_step_degrees(mut self, degrees: f64) -> Self {
        self.orbit_step_degrees = degrees;
        self
    }

    /// Set the largest orbit angle accepted in one step.
    #[must_use]
    pub const fn with_max_orbit_degrees(mut self, degrees: f64) -> Self {
        self.max_orbit_degrees = degrees;
        self
    }

    /// Set the default easing.
    #[must_use]
    pub const fn with_default_easing(mut self, easing: Easing) -> Self {
        self.default_easing = easing;
        self
    }

    /// Set the instant cut duration.
    #[must_use]
    pub const fn with_instant_cut_duration(mut self, seconds: f64) -> Self {
        self.instant_cut_duration = seconds;
        self
    }

    /// Set the maximum tilt elevation.
    #[must_use]
    pub const fn with_max_pitch_degrees(mut self, degrees: f64) -> Self {
        self.max_pitch_degrees = degrees;
        self
    }
}
