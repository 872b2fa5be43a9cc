//! Camera poses, output keyframes and timing curves.
//!
//! [`CameraState`] is the value threaded through the interpreter and
//! [`CameraCommand`] is one keyframe of the generated trajectory. [`Easing`]
//! and [`Speed`] describe how a consumer should interpolate between
//! consecutive keyframes.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// Camera location and look-at point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CameraState {
    /// Camera position in world space.
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
}

impl CameraState {
    /// Create a camera state.
    #[must_use]
    pub const fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Vector from the camera to its target.
    #[must_use]
    pub fn view_vector(&self) -> Vec3 {
        self.target - self.position
    }

    /// Distance from the camera to its target.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.view_vector().norm()
    }

    /// Whether both vectors contain only finite components.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        crate::math::linalg::is_finite(&self.position) && crate::math::linalg::is_finite(&self.target)
    }
}

/// One keyframe of the output trajectory.
///
/// The consumer moves from the previous keyframe (or the initial state) to
/// this pose over `duration` seconds using the `easing` curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CameraCommand {
    /// Camera position at the end of the segment.
    pub position: Vec3,
    /// Look-at point at the end of the segment.
    pub target: Vec3,
    /// Segment duration in seconds.
    pub duration: f64,
    /// Interpolation curve for the segment.
    pub easing: Easing,
}

impl CameraCommand {
    /// Create a keyframe reaching `state` after `duration` seconds.
    #[must_use]
    pub const fn new(state: CameraState, duration: f64, easing: Easing) -> Self {
        Self {
            position: state.position,
            target: state.target,
            duration,
            easing,
        }
    }

    /// Pose reached at the end of this keyframe.
    #[must_use]
    pub const fn state(&self) -> CameraState {
        CameraState::new(self.position, self.target)
    }
}

/// Easing curve identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Easing {
    /// Constant velocity.
    #[default]
    Linear,
    /// Quadratic acceleration from rest.
    EaseInQuad,
    /// Quadratic deceleration to rest.
    EaseOutQuad,
    /// Quadratic acceleration then deceleration.
    EaseInOutQuad,
    /// Cubic acceleration from rest.
    EaseInCubic,
    /// Cubic deceleration to rest.
    EaseOutCubic,
    /// Cubic acceleration then deceleration.
    EaseInOutCubic,
}

impl Easing {
    /// Parse a loosely formatted easing name.
    ///
    /// Case, underscores, hyphens and spaces are ignored, so `easeInOutQuad`,
    /// `ease_in_out_quad` and `Ease-In-Out` all resolve. A family name without
    /// an order (`easeInOut`) selects the quadratic variant.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let key: String = raw
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "linear" | "none" => Some(Self::Linear),
            "easein" | "easeinquad" | "in" => Some(Self::EaseInQuad),
            "easeout" | "easeoutquad" | "out" => Some(Self::EaseOutQuad),
            "easeinout" | "easeinoutquad" | "inout" | "smooth" => Some(Self::EaseInOutQuad),
            "easeincubic" => Some(Self::EaseInCubic),
            "easeoutcubic" => Some(Self::EaseOutCubic),
            "easeinoutcubic" => Some(Self::EaseInOutCubic),
            _ => None,
        }
    }

    /// Canonical identifier, as understood by the animation layer.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseInQuad => "easeInQuad",
            Self::EaseOutQuad => "easeOutQuad",
            Self::EaseInOutQuad => "easeInOutQuad",
            Self::EaseInCubic => "easeInCubic",
            Self::EaseOutCubic => "easeOutCubic",
            Self::EaseInOutCubic => "easeInOutCubic",
        }
    }

    /// Evaluate the curve at normalized time `t` (clamped to `[0, 1]`).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInQuad => t * t,
            Self::EaseOutQuad => t * (2.0 - t),
            Self::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Self::EaseInCubic => t * t * t,
            Self::EaseOutCubic => {
                let u = t - 1.0;
                u * u * u + 1.0
            }
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 2.0 * t - 2.0;
                    0.5 * u * u * u + 1.0
                }
            }
        }
    }

    /// Easing for segment `index` of a move split into `count` keyframes.
    ///
    /// The acceleration phase goes on the first segment and the deceleration
    /// phase on the last; everything in between runs at constant velocity.
    #[must_use]
    pub fn for_segment(self, index: usize, count: usize) -> Self {
        if count <= 1 {
            return self;
        }
        let first = index == 0;
        let last = index + 1 == count;
        match self {
            Self::Linear => Self::Linear,
            Self::EaseInQuad | Self::EaseInCubic if first => self,
            Self::EaseOutQuad | Self::EaseOutCubic if last => self,
            Self::EaseInOutQuad if first => Self::EaseInQuad,
            Self::EaseInOutQuad if last => Self::EaseOutQuad,
            Self::EaseInOutCubic if first => Self::EaseInCubic,
            Self::EaseInOutCubic if last => Self::EaseOutCubic,
            _ => Self::Linear,
        }
    }
}

impl std::fmt::Display for Easing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative pacing of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Speed {
    /// Abrupt, constant-velocity move.
    VeryFast,
    /// Quick start, soft landing.
    Fast,
    /// The plan's nominal pacing.
    Medium,
    /// Gentle start and stop.
    Slow,
    /// Hard cut (only meaningful for `move_to`).
    Instant,
}

impl Speed {
    /// Parse a loosely formatted speed word.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let key: String = raw
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "veryfast" | "rapid" | "snappy" => Some(Self::VeryFast),
            "fast" | "quick" | "brisk" => Some(Self::Fast),
            "medium" | "normal" | "moderate" | "default" => Some(Self::Medium),
            "slow" | "gentle" | "leisurely" | "veryslow" => Some(Self::Slow),
            "instant" | "instantaneous" | "immediate" | "cut" => Some(Self::Instant),
            _ => None,
        }
    }

    /// Easing implied by this speed when none is given explicitly.
    #[must_use]
    pub const fn easing(self, nominal: Easing) -> Easing {
        match self {
            Self::VeryFast | Self::Instant => Easing::Linear,
            Self::Fast => Easing::EaseOutQuad,
            Self::Slow => Easing::EaseInOutQuad,
            Self::Medium => nominal,
        }
    }
}
