//! Motion plan data structures.
//!
//! A [`MotionPlan`] is produced upstream (typically by a language model) and
//! consumed once by the interpreter. Parameters are kept close to what the
//! planner emits: numbers are optional overrides and qualitative words stay
//! strings until a handler interprets them. Numeric parameters also accept
//! numeric strings (`"90"`, `"90°"`); any other word is read as absent, so
//! the handler reports the step as skipped instead of the whole plan being
//! rejected. An unknown primitive `type` or a structurally broken document
//! still fails [`MotionPlan::from_json`].
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "steps": [
//!     {
//!       "type": "orbit",
//!       "parameters": { "direction": "left", "angle": 90, "axis": "y" },
//!       "duration_ratio": 1.0
//!     }
//!   ],
//!   "metadata": { "requested_duration": 4.0 }
//! }
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "serde")]
use tracing::warn;

#[cfg(feature = "serde")]
use crate::error::{MotionError, Result};

/// Read an optional number leniently: JSON numbers and numeric strings give
/// a value, `null`, booleans and other words give `None`.
#[cfg(feature = "serde")]
fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de;

    struct LenientNumberVisitor;

    impl<'de> de::Visitor<'de> for LenientNumberVisitor {
        type Value = Option<f64>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a number or a numeric string")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
            Ok(Some(v as f64))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
            Ok(Some(v as f64))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
            let parsed = v.trim().trim_end_matches('°').trim_end().parse::<f64>().ok();
            if parsed.is_none() {
                warn!(value = v, "non-numeric parameter treated as absent");
            }
            Ok(parsed)
        }

        fn visit_bool<E: de::Error>(self, _: bool) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2: serde::Deserializer<'de>>(self, d: D2) -> std::result::Result<Self::Value, D2::Error> {
            d.deserialize_any(self)
        }
    }

    deserializer.deserialize_any(LenientNumberVisitor)
}

/// Name of a motion primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PrimitiveKind {
    /// Hold position and target.
    Static,
    /// Scale the camera-to-target distance.
    Zoom,
    /// Rotate around a center.
    Orbit,
    /// Turn the view left or right.
    Pan,
    /// Turn the view up or down.
    Tilt,
    /// Move along the view direction.
    Dolly,
    /// Move sideways.
    Truck,
    /// Move vertically.
    Pedestal,
    /// Relocate the camera.
    MoveTo,
    /// Retarget the view.
    FocusOn,
    /// Yaw / pitch / roll the view.
    Rotate,
}

impl PrimitiveKind {
    /// Identifier as used in plans.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Zoom => "zoom",
            Self::Orbit => "orbit",
            Self::Pan => "pan",
            Self::Tilt => "tilt",
            Self::Dolly => "dolly",
            Self::Truck => "truck",
            Self::Pedestal => "pedestal",
            Self::MoveTo => "move_to",
            Self::FocusOn => "focus_on",
            Self::Rotate => "rotate",
        }
    }
}

impl std::fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Movement direction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Screen left.
    Left,
    /// Screen right.
    Right,
    /// Up.
    Up,
    /// Down.
    Down,
    /// Toward the target.
    In,
    /// Away from the target.
    Out,
    /// Clockwise.
    Clockwise,
    /// Counter-clockwise.
    CounterClockwise,
}

impl Direction {
    /// Parse a loosely formatted direction word.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let key: String = raw
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "up" | "upward" | "upwards" | "raise" => Some(Self::Up),
            "down" | "downward" | "downwards" | "lower" => Some(Self::Down),
            "in" | "forward" | "forwards" | "closer" | "toward" | "towards" => Some(Self::In),
            "out" | "backward" | "backwards" | "back" | "away" => Some(Self::Out),
            "clockwise" | "cw" => Some(Self::Clockwise),
            "counterclockwise" | "anticlockwise" | "ccw" => Some(Self::CounterClockwise),
            _ => None,
        }
    }

    /// Canonical word.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
            Self::In => "in",
            Self::Out => "out",
            Self::Clockwise => "clockwise",
            Self::CounterClockwise => "counter_clockwise",
        }
    }
}

/// Parameters of a `static` step.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StaticParams {
    /// Ignored; a hold is always linear.
    pub speed: Option<String>,
}

/// Parameters of a `zoom` step.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ZoomParams {
    /// `in` or `out`.
    pub direction: Option<String>,
    /// Explicit distance scale factor.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient_number"))]
    pub factor: Option<f64>,
    /// Qualitative amount (`small`, `large`, ...).
    pub factor_descriptor: Option<String>,
    /// Qualitative absolute framing distance (`close`, `far`, ...).
    pub target_distance_descriptor: Option<String>,
    /// Pacing word.
    pub speed: Option<String>,
    /// Explicit easing name.
    pub easing: Option<String>,
}

/// Parameters of a `dolly` step.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DollyParams {
    /// `in` or `out`.
    pub direction: Option<String>,
    /// Explicit travel distance (positive).
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient_number"))]
    pub distance: Option<f64>,
    /// Qualitative travel distance.
    pub distance_descriptor: Option<String>,
    /// Named point whose projection on the view axis sets the travel.
    pub destination_target: Option<String>,
    /// Qualitative absolute framing distance.
    pub target_distance_descriptor: Option<String>,
    /// Pacing word.
    pub speed: Option<String>,
    /// Explicit easing name.
    pub easing: Option<String>,
}

/// Parameters shared by `truck` and `pedestal` steps.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TranslateParams {
    /// `left`/`right` for truck, `up`/`down` for pedestal.
    pub direction: Option<String>,
    /// Explicit travel distance (positive).
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient_number"))]
    pub distance: Option<f64>,
    /// Qualitative travel distance.
    pub distance_descriptor: Option<String>,
    /// Named point whose projection on the move axis sets the travel.
    pub destination_target: Option<String>,
    /// Pacing word.
    pub speed: Option<String>,
    /// Explicit easing name.
    pub easing: Option<String>,
}

/// Parameters of an `orbit` step.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OrbitParams {
    /// `left`, `right`, `clockwise` or `counter_clockwise`.
    pub direction: Option<String>,
    /// Arc in degrees.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient_number"))]
    pub angle: Option<f64>,
    /// Qualitative arc.
    pub angle_descriptor: Option<String>,
    /// `x`, `y`, `z` or `camera_up`. Defaults to `y`.
    pub axis: Option<String>,
    /// Named orbit center. Defaults to the subject center.
    pub target: Option<String>,
    /// Final radius as a multiple of the starting radius.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient_number"))]
    pub radius_factor: Option<f64>,
    /// Pacing word.
    pub speed: Option<String>,
    /// Explicit easing name.
    pub easing: Option<String>,
}

/// Parameters shared by `pan`, `tilt` and `rotate` steps.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LookParams {
    /// Turn direction.
    pub direction: Option<String>,
    /// Turn angle in degrees.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient_number"))]
    pub angle: Option<f64>,
    /// Qualitative turn angle.
    pub angle_descriptor: Option<String>,
    /// `rotate` only: `yaw`, `pitch` or `roll`.
    pub axis: Option<String>,
    /// `tilt` only: named point to look at directly.
    pub target: Option<String>,
    /// Pacing word.
    pub speed: Option<String>,
    /// Explicit easing name.
    pub easing: Option<String>,
}

/// Parameters of a `move_to` step.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MoveToParams {
    /// Named destination.
    pub target: Option<String>,
    /// Named point to look at on arrival. Defaults to the current target.
    pub look_at: Option<String>,
    /// Qualitative stand-off distance from the destination.
    pub distance_descriptor: Option<String>,
    /// Pacing word; `instant` produces a cut.
    pub speed: Option<String>,
    /// Explicit easing name.
    pub easing: Option<String>,
}

/// Parameters of a `focus_on` step.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FocusOnParams {
    /// Named point to look at.
    pub target: Option<String>,
    /// Request automatic framing (not supported).
    pub adjust_framing: Option<bool>,
    /// Pacing word.
    pub speed: Option<String>,
    /// Explicit easing name.
    pub easing: Option<String>,
}

/// A motion primitive with its typed parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", content = "parameters", rename_all = "snake_case")
)]
pub enum Primitive {
    /// Hold.
    Static(StaticParams),
    /// Distance scaling toward/away from the target.
    Zoom(ZoomParams),
    /// Rotation around a center.
    Orbit(OrbitParams),
    /// Horizontal view turn.
    Pan(LookParams),
    /// Vertical view turn or retarget.
    Tilt(LookParams),
    /// Move along the view.
    Dolly(DollyParams),
    /// Lateral move.
    Truck(TranslateParams),
    /// Vertical move.
    Pedestal(TranslateParams),
    /// Relocation.
    MoveTo(MoveToParams),
    /// Retarget.
    FocusOn(FocusOnParams),
    /// Yaw / pitch / roll.
    Rotate(LookParams),
}

impl Primitive {
    /// Name of this primitive.
    #[must_use]
    pub const fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Static(_) => PrimitiveKind::Static,
            Self::Zoom(_) => PrimitiveKind::Zoom,
            Self::Orbit(_) => PrimitiveKind::Orbit,
            Self::Pan(_) => PrimitiveKind::Pan,
            Self::Tilt(_) => PrimitiveKind::Tilt,
            Self::Dolly(_) => PrimitiveKind::Dolly,
            Self::Truck(_) => PrimitiveKind::Truck,
            Self::Pedestal(_) => PrimitiveKind::Pedestal,
            Self::MoveTo(_) => PrimitiveKind::MoveTo,
            Self::FocusOn(_) => PrimitiveKind::FocusOn,
            Self::Rotate(_) => PrimitiveKind::Rotate,
        }
    }
}

/// One atomic camera move.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionStep {
    /// What to do.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub primitive: Primitive,
    /// Share of the plan duration, nominally in `[0, 1]`.
    pub duration_ratio: f64,
}

impl MotionStep {
    /// Create a step.
    #[must_use]
    pub const fn new(primitive: Primitive, duration_ratio: f64) -> Self {
        Self {
            primitive,
            duration_ratio,
        }
    }
}

/// Plan-level metadata.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanMetadata {
    /// Total duration of the move sequence in seconds.
    pub requested_duration: f64,
}

/// An ordered list of motion steps plus a total duration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionPlan {
    /// Steps in execution order.
    pub steps: Vec<MotionStep>,
    /// Plan-level metadata.
    pub metadata: PlanMetadata,
}

impl MotionPlan {
    /// Create a plan.
    #[must_use]
    pub const fn new(steps: Vec<MotionStep>, requested_duration: f64) -> Self {
        Self {
            steps,
            metadata: PlanMetadata { requested_duration },
        }
    }

    /// Total requested duration in seconds.
    #[must_use]
    pub const fn requested_duration(&self) -> f64 {
        self.metadata.requested_duration
    }

    /// Parse a plan from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::Parse`] if the document is malformed.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| MotionError::parse(e.to_string()))
    }
}
