//! `pan`, `tilt` and `rotate`: change where the camera looks, never where it is.

use tracing::debug;

use super::{direction_sign, resolve_angle, StepContext, StepOutcome};
use crate::camera::CameraState;
use crate::error::{MotionError, Result};
use crate::math::linalg::{camera_basis, elevation, rotate_about, CameraBasis};
use crate::plan::{Direction, LookParams, PrimitiveKind};

const YAW_POSITIVE: &[Direction] = &[Direction::Right, Direction::CounterClockwise];
const YAW_NEGATIVE: &[Direction] = &[Direction::Left, Direction::Clockwise];
const PITCH_POSITIVE: &[Direction] = &[Direction::Up];
const PITCH_NEGATIVE: &[Direction] = &[Direction::Down];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LookAxis {
    Yaw,
    Pitch,
    Roll,
}

/// Rotate the view vector about the camera's local up axis.
pub(crate) fn pan(params: &LookParams, state: &CameraState, ctx: &StepContext<'_>) -> Result<StepOutcome> {
    turn(params, state, ctx, LookAxis::Yaw, PrimitiveKind::Pan)
}

/// Rotate the view vector about the camera's local right axis, or aim
/// straight at `target` when one is given.
pub(crate) fn tilt(params: &LookParams, state: &CameraState, ctx: &StepContext<'_>) -> Result<StepOutcome> {
    if let Some(name) = params.target.as_deref() {
        let target = ctx.resolve(name, &state.target)?;
        if (target - state.position).norm() < ctx.config.epsilon {
            return Err(MotionError::invalid_parameter(
                "target",
                format!("`{name}` coincides with the camera position"),
            ));
        }
        let easing = ctx.easing(params.easing.as_deref(), params.speed.as_deref());
        return Ok(StepOutcome::single(
            CameraState::new(state.position, target),
            ctx.duration,
            easing,
        ));
    }
    turn(params, state, ctx, LookAxis::Pitch, PrimitiveKind::Tilt)
}

/// Yaw, pitch or roll the view. Roll has no geometric effect: the step
/// holds and reports itself unsupported.
pub(crate) fn rotate(params: &LookParams, state: &CameraState, ctx: &StepContext<'_>) -> Result<StepOutcome> {
    let axis = match params.axis.as_deref().map(|s| s.trim().to_lowercase()) {
        None => LookAxis::Yaw,
        Some(raw) => match raw.as_str() {
            "yaw" | "y" | "up" | "vertical" => LookAxis::Yaw,
            "pitch" | "x" | "right" | "horizontal" => LookAxis::Pitch,
            "roll" | "z" | "forward" => LookAxis::Roll,
            _ => {
                return Err(MotionError::invalid_parameter(
                    "axis",
                    format!("unknown rotate axis `{raw}`, expected yaw, pitch or roll"),
                ))
            }
        },
    };

    if axis == LookAxis::Roll {
        debug!("roll requested, holding");
        return Ok(StepOutcome::hold(*state, ctx.duration).with_unsupported("roll axis"));
    }
    turn(params, state, ctx, axis, PrimitiveKind::Rotate)
}

fn turn(
    params: &LookParams,
    state: &CameraState,
    ctx: &StepContext<'_>,
    axis: LookAxis,
    motion: PrimitiveKind,
) -> Result<StepOutcome> {
    let (positive, negative) = match axis {
        LookAxis::Pitch => (PITCH_POSITIVE, PITCH_NEGATIVE),
        LookAxis::Yaw | LookAxis::Roll => (YAW_POSITIVE, YAW_NEGATIVE),
    };
    let sign = direction_sign(params.direction.as_deref(), positive, negative)?.map(|(_, s)| s);
    let degrees = resolve_angle(
        params.angle,
        params.angle_descriptor.as_deref(),
        sign,
        motion,
        state,
        ctx,
    )?;

    let Some(basis) = camera_basis(&state.position, &state.target, ctx.config.epsilon) else {
        debug!(motion = %motion, "camera coincides with target, holding");
        return Ok(StepOutcome::hold(*state, ctx.duration));
    };
    if degrees.abs() < ctx.config.epsilon {
        return Ok(StepOutcome::hold(*state, ctx.duration));
    }

    let view = state.view_vector();
    let rotated = match axis {
        LookAxis::Pitch => {
            let radians = clamp_pitch(&basis, degrees.to_radians(), ctx.config.max_pitch_degrees.to_radians());
            rotate_about(&view, &basis.right, radians)
        }
        LookAxis::Yaw | LookAxis::Roll => rotate_about(&view, &basis.up, degrees.to_radians()),
    };

    let next = CameraState::new(state.position, state.position + rotated);
    let easing = ctx.easing(params.easing.as_deref(), params.speed.as_deref());
    Ok(StepOutcome::single(next, ctx.duration, easing))
}

/// Limit a pitch rotation so the view elevation stays within `±max_pitch`.
///
/// The right axis is horizontal, so rotating about it changes the elevation
/// by exactly the rotation angle.
fn clamp_pitch(basis: &CameraBasis, radians: f64, max_pitch: f64) -> f64 {
    let current = elevation(&basis.forward);
    let requested = current + radians;
    let goal = requested.clamp(-max_pitch, max_pitch);
    if (goal - requested).abs() > f64::EPSILON {
        debug!(
            requested = radians.to_degrees(),
            applied = (goal - current).to_degrees(),
            "tilt clamped at pitch limit"
        );
    }
    goal - current
}
