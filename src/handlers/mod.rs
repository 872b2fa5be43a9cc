//! Per-primitive motion handlers.
//!
//! Each handler is a pure function of its parameters, the incoming
//! [`CameraState`] and a [`StepContext`]; it returns the keyframes for its
//! step together with the state the next step starts from. Errors returned
//! here are per-step and recoverable.
//!
//! Parameter resolution priority, everywhere: explicit numeric override >
//! qualitative descriptor > destination-derived delta > error.

mod dolly;
mod look;
mod orbit;
mod relocate;
mod static_hold;
mod translate;
mod zoom;

use tracing::warn;

use crate::camera::{CameraCommand, CameraState, Easing, Speed};
use crate::config::InterpreterConfig;
use crate::descriptor::{map_descriptor_to_value, normalize_descriptor, Descriptor, MagnitudeType};
use crate::error::{MotionError, Result};
use crate::math::{constrain_position, Vec3};
use crate::plan::{Direction, Primitive, PrimitiveKind};
use crate::scene::{EnvContext, SceneContext};
use crate::targets::resolve_target_position;

/// Everything a handler may read besides its parameters and camera state.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StepContext<'a> {
    pub scene: &'a SceneContext,
    pub env: &'a EnvContext,
    pub config: &'a InterpreterConfig,
    /// Seconds allocated to this step.
    pub duration: f64,
}

impl StepContext<'_> {
    /// Resolve a named target or fail with a recoverable error.
    pub fn resolve(&self, name: &str, current_target: &Vec3) -> Result<Vec3> {
        resolve_target_position(name, self.scene, self.env, current_target)
            .ok_or_else(|| MotionError::unresolved(name))
    }

    /// Run the shared clamping pipeline.
    pub fn constrain(&self, start: &Vec3, candidate: &Vec3, anchor: &Vec3) -> Vec3 {
        constrain_position(start, candidate, anchor, self.scene, self.env, self.config)
    }

    /// Easing from an explicit name, else from the speed word, else the
    /// configured default. Unrecognized words fall back with a warning.
    pub fn easing(&self, easing: Option<&str>, speed: Option<&str>) -> Easing {
        let nominal = self.config.default_easing;
        if let Some(raw) = easing {
            match Easing::parse(raw) {
                Some(e) => return e,
                None => warn!(easing = raw, "unknown easing, using speed or default"),
            }
        }
        match speed {
            Some(raw) => match Speed::parse(raw) {
                Some(s) => s.easing(nominal),
                None => {
                    warn!(speed = raw, "unknown speed, using default easing");
                    nominal
                }
            },
            None => nominal,
        }
    }

    /// Map a qualitative amount for `motion`.
    pub fn descriptor_value(
        &self,
        descriptor: Descriptor,
        magnitude: MagnitudeType,
        motion: PrimitiveKind,
        state: &CameraState,
        direction: Option<Direction>,
    ) -> f64 {
        map_descriptor_to_value(descriptor, magnitude, motion, self.scene, self.env, state, direction)
    }
}

/// What a handler produced for one step.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StepOutcome {
    pub commands: Vec<CameraCommand>,
    pub state: CameraState,
    /// Requested behavior that was not realized, as
    /// [`MotionError::Unsupported`] values.
    pub unsupported: Vec<MotionError>,
}

impl StepOutcome {
    /// A single keyframe reaching `state`.
    pub fn single(state: CameraState, duration: f64, easing: Easing) -> Self {
        Self {
            commands: vec![CameraCommand::new(state, duration, easing)],
            state,
            unsupported: Vec::new(),
        }
    }

    /// Hold the current pose for the whole step.
    pub fn hold(state: CameraState, duration: f64) -> Self {
        Self::single(state, duration, Easing::Linear)
    }

    /// Record an unsupported request.
    #[must_use]
    pub fn with_unsupported(mut self, note: impl Into<String>) -> Self {
        self.unsupported.push(MotionError::unsupported(note));
        self
    }
}

/// Dispatch a primitive to its handler.
pub(crate) fn run_step(primitive: &Primitive, state: &CameraState, ctx: &StepContext<'_>) -> Result<StepOutcome> {
    match primitive {
        Primitive::Static(_) => Ok(static_hold::hold(state, ctx)),
        Primitive::Zoom(p) => zoom::zoom(p, state, ctx),
        Primitive::Orbit(p) => orbit::orbit(p, state, ctx),
        Primitive::Pan(p) => look::pan(p, state, ctx),
        Primitive::Tilt(p) => look::tilt(p, state, ctx),
        Primitive::Rotate(p) => look::rotate(p, state, ctx),
        Primitive::Dolly(p) => dolly::dolly(p, state, ctx),
        Primitive::Truck(p) => translate::truck(p, state, ctx),
        Primitive::Pedestal(p) => translate::pedestal(p, state, ctx),
        Primitive::MoveTo(p) => relocate::move_to(p, state, ctx),
        Primitive::FocusOn(p) => relocate::focus_on(p, state, ctx),
    }
}

/// Parse a direction word and map it to a sign.
///
/// Returns `Ok(None)` when no direction was given, an error when the word is
/// unknown or not meaningful for this primitive.
pub(crate) fn direction_sign(
    raw: Option<&str>,
    positive: &[Direction],
    negative: &[Direction],
) -> Result<Option<(Direction, f64)>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let accepted = || {
        positive
            .iter()
            .chain(negative)
            .map(|d| d.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let direction = Direction::parse(raw).ok_or_else(|| {
        MotionError::invalid_parameter("direction", format!("unknown direction `{raw}`, expected one of {}", accepted()))
    })?;
    if positive.contains(&direction) {
        Ok(Some((direction, 1.0)))
    } else if negative.contains(&direction) {
        Ok(Some((direction, -1.0)))
    } else {
        Err(MotionError::invalid_parameter(
            "direction",
            format!("`{raw}` is not valid here, expected one of {}", accepted()),
        ))
    }
}

/// Parse an optional descriptor word; unknown words are an error.
pub(crate) fn parse_descriptor(raw: Option<&str>, name: &'static str) -> Result<Option<Descriptor>> {
    raw.map(|word| {
        normalize_descriptor(word)
            .ok_or_else(|| MotionError::invalid_parameter(name, format!("unknown descriptor `{word}`")))
    })
    .transpose()
}

/// Signed angle in degrees from an explicit value or a descriptor.
///
/// With a direction, the magnitude of the explicit angle is used and the
/// sign comes from the direction; without one, the explicit angle keeps its
/// own sign.
pub(crate) fn resolve_angle(
    angle: Option<f64>,
    angle_descriptor: Option<&str>,
    sign: Option<f64>,
    motion: PrimitiveKind,
    state: &CameraState,
    ctx: &StepContext<'_>,
) -> Result<f64> {
    if let Some(angle) = angle {
        if !angle.is_finite() {
            return Err(MotionError::invalid_parameter("angle", "must be finite"));
        }
        return Ok(sign.map_or(angle, |s| s * angle.abs()));
    }
    if let Some(descriptor) = parse_descriptor(angle_descriptor, "angle_descriptor")? {
        let sign = sign.ok_or(MotionError::missing("direction"))?;
        let degrees = ctx.descriptor_value(descriptor, MagnitudeType::Angle, motion, state, None);
        return Ok(sign * degrees);
    }
    Err(MotionError::missing("angle"))
}

/// Positive travel distance from an explicit value or a descriptor, if any.
pub(crate) fn resolve_travel(
    distance: Option<f64>,
    distance_descriptor: Option<&str>,
    motion: PrimitiveKind,
    state: &CameraState,
    ctx: &StepContext<'_>,
) -> Result<Option<f64>> {
    if let Some(d) = distance {
        if !(d.is_finite() && d > 0.0) {
            return Err(MotionError::invalid_parameter(
                "distance",
                format!("must be a positive number, got {d}"),
            ));
        }
        return Ok(Some(d));
    }
    Ok(parse_descriptor(distance_descriptor, "distance_descriptor")?
        .map(|d| ctx.descriptor_value(d, MagnitudeType::Distance, motion, state, None)))
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_direction_sign() {
        let pos = [Direction::Right, Direction::CounterClockwise];
        let neg = [Direction::Left, Direction::Clockwise];
        assert_eq!(direction_sign(None, &pos, &neg).unwrap(), None);
        assert_eq!(direction_sign(Some("left"), &pos, &neg).unwrap(), Some((Direction::Left, -1.0)));
        assert_eq!(direction_sign(Some("CCW"), &pos, &neg).unwrap(), Some((Direction::CounterClockwise, 1.0)));
        assert!(direction_sign(Some("up"), &pos, &neg).is_err());
        assert!(direction_sign(Some("sideways"), &pos, &neg).is_err());
    }

    #[test]
    fn test_easing_resolution() {
        let scene = SceneContext::default();
        let env = EnvContext::default();
        let config = config();
        let c = ctx(&scene, &env, &config, 1.0);

        assert_eq!(c.easing(Some("easeOutCubic"), Some("slow")), Easing::EaseOutCubic);
        assert_eq!(c.easing(None, Some("very_fast")), Easing::Linear);
        assert_eq!(c.easing(None, Some("fast")), Easing::EaseOutQuad);
        assert_eq!(c.easing(None, Some("medium")), config.default_easing);
        assert_eq!(c.easing(Some("wobbly"), Some("slow")), Easing::EaseInOutQuad);
        assert_eq!(c.easing(None, Some("ludicrous")), config.default_easing);
        assert_eq!(c.easing(None, None), config.default_easing);
    }

    #[test]
    fn test_resolve_angle() {
        let scene = SceneContext::default();
        let env = EnvContext::default();
        let config = config();
        let c = ctx(&scene, &env, &config, 1.0);
        let s = front_camera();

        assert_eq!(resolve_angle(Some(30.0), None, Some(-1.0), PrimitiveKind::Pan, &s, &c).unwrap(), -30.0);
        assert_eq!(resolve_angle(Some(-30.0), None, Some(1.0), PrimitiveKind::Pan, &s, &c).unwrap(), 30.0);
        assert_eq!(resolve_angle(Some(-30.0), None, None, PrimitiveKind::Pan, &s, &c).unwrap(), -30.0);
        assert_eq!(resolve_angle(None, Some("large"), Some(1.0), PrimitiveKind::Orbit, &s, &c).unwrap(), 90.0);
        assert!(matches!(
            resolve_angle(None, Some("large"), None, PrimitiveKind::Orbit, &s, &c),
            Err(MotionError::MissingParameter("direction"))
        ));
        assert!(matches!(
            resolve_angle(None, None, Some(1.0), PrimitiveKind::Orbit, &s, &c),
            Err(MotionError::MissingParameter("angle"))
        ));
        assert!(resolve_angle(None, Some("gigantic"), Some(1.0), PrimitiveKind::Orbit, &s, &c).is_err());
    }

    #[test]
    fn test_resolve_travel() {
        let scene = SceneContext::default();
        let env = EnvContext::default();
        let config = config();
        let c = ctx(&scene, &env, &config, 1.0);
        let s = front_camera();

        assert_eq!(resolve_travel(Some(2.0), Some("huge"), PrimitiveKind::Truck, &s, &c).unwrap(), Some(2.0));
        assert!(resolve_travel(Some(0.0), None, PrimitiveKind::Truck, &s, &c).is_err());
        assert!(resolve_travel(Some(-1.0), None, PrimitiveKind::Truck, &s, &c).is_err());
        assert_eq!(resolve_travel(None, None, PrimitiveKind::Truck, &s, &c).unwrap(), None);
        assert!(resolve_travel(None, Some("small"), PrimitiveKind::Truck, &s, &c).unwrap().unwrap() > 0.0);
    }
}
