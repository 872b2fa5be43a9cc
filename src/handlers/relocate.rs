//! `move_to` and `focus_on`: jump to named places.

use tracing::debug;

use super::{parse_descriptor, StepContext, StepOutcome};
use crate::camera::{CameraCommand, CameraState, Easing, Speed};
use crate::descriptor::map_descriptor_to_goal_distance;
use crate::error::{MotionError, Result};
use crate::math::linalg::normalize_or;
use crate::math::Vec3;
use crate::plan::{FocusOnParams, MoveToParams};

/// Fly the camera to a named destination.
///
/// With a distance descriptor the camera stops short of the destination,
/// on the side it approaches from. On arrival it looks at `look_at`, or
/// keeps its current target. Speed `instant` produces a cut: a near-zero
/// keyframe followed by a hold for the rest of the step.
pub(crate) fn move_to(params: &MoveToParams, state: &CameraState, ctx: &StepContext<'_>) -> Result<StepOutcome> {
    let eps = ctx.config.epsilon;
    let name = params.target.as_deref().ok_or(MotionError::missing("target"))?;
    let destination = ctx.resolve(name, &state.target)?;
    let target = match params.look_at.as_deref() {
        Some(look_at) => ctx.resolve(look_at, &state.target)?,
        None => state.target,
    };

    let candidate = match parse_descriptor(params.distance_descriptor.as_deref(), "distance_descriptor")? {
        Some(descriptor) => {
            let standoff = map_descriptor_to_goal_distance(descriptor, ctx.scene);
            let backward = normalize_or(&-state.view_vector(), Vec3::z(), eps);
            destination + normalize_or(&(state.position - destination), backward, eps) * standoff
        }
        None => destination,
    };

    let position = ctx.constrain(&state.position, &candidate, &target);
    if (target - position).norm() < eps {
        return Err(MotionError::invalid_parameter(
            "look_at",
            "camera would end up on its own look-at point",
        ));
    }
    let next = CameraState::new(position, target);

    let instant = params.speed.as_deref().and_then(Speed::parse) == Some(Speed::Instant);
    if !instant {
        let easing = ctx.easing(params.easing.as_deref(), params.speed.as_deref());
        return Ok(StepOutcome::single(next, ctx.duration, easing));
    }

    let cut = ctx.config.instant_cut_duration.min(ctx.duration);
    let remainder = ctx.duration - cut;
    debug!(cut, remainder, "move_to as instant cut");

    let mut commands = vec![CameraCommand::new(next, cut, Easing::Linear)];
    if remainder > ctx.config.duration_tolerance {
        commands.push(CameraCommand::new(next, remainder, Easing::Linear));
    }
    Ok(StepOutcome {
        commands,
        state: next,
        unsupported: Vec::new(),
    })
}

/// Keep the position and look at a named point.
pub(crate) fn focus_on(params: &FocusOnParams, state: &CameraState, ctx: &StepContext<'_>) -> Result<StepOutcome> {
    let name = params.target.as_deref().ok_or(MotionError::missing("target"))?;
    let target = ctx.resolve(name, &state.target)?;
    if (target - state.position).norm() < ctx.config.epsilon {
        return Err(MotionError::invalid_parameter(
            "target",
            format!("`{name}` coincides with the camera position"),
        ));
    }

    let easing = ctx.easing(params.easing.as_deref(), params.speed.as_deref());
    let outcome = StepOutcome::single(CameraState::new(state.position, target), ctx.duration, easing);
    if params.adjust_framing == Some(true) {
        return Ok(outcome.with_unsupported("adjust_framing"));
    }
    Ok(outcome)
}
