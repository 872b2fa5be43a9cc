//! `dolly`: move the camera along its view direction.

use tracing::debug;

use super::{direction_sign, parse_descriptor, resolve_travel, StepContext, StepOutcome};
use crate::camera::CameraState;
use crate::descriptor::map_descriptor_to_goal_distance;
use crate::error::{MotionError, Result};
use crate::math::camera_basis;
use crate::plan::{Direction, DollyParams, PrimitiveKind};

/// Translate the camera along the view direction by a signed distance; the
/// target stays where it is.
///
/// The distance comes from, in order: the explicit `distance` or the
/// distance descriptor (signed by the direction), the projection of
/// `destination_target` onto the view axis, or `current − goal` for a target
/// distance descriptor. The camera never passes closer to the target than
/// `min_target_standoff`. A travel of ~0 emits a single hold.
pub(crate) fn dolly(params: &DollyParams, state: &CameraState, ctx: &StepContext<'_>) -> Result<StepOutcome> {
    let eps = ctx.config.epsilon;
    let Some(basis) = camera_basis(&state.position, &state.target, eps) else {
        debug!("camera coincides with target, dolly degrades to hold");
        return Ok(StepOutcome::hold(*state, ctx.duration));
    };
    let current = state.distance();
    let sign = direction_sign(params.direction.as_deref(), &[Direction::In], &[Direction::Out])?;

    let travel = if let Some(amount) = resolve_travel(
        params.distance,
        params.distance_descriptor.as_deref(),
        PrimitiveKind::Dolly,
        state,
        ctx,
    )? {
        let (_, sign) = sign.ok_or(MotionError::missing("direction"))?;
        sign * amount
    } else if let Some(name) = params.destination_target.as_deref() {
        let destination = ctx.resolve(name, &state.target)?;
        (destination - state.position).dot(&basis.forward)
    } else if let Some(descriptor) =
        parse_descriptor(params.target_distance_descriptor.as_deref(), "target_distance_descriptor")?
    {
        current - map_descriptor_to_goal_distance(descriptor, ctx.scene)
    } else {
        return Err(MotionError::missing("distance"));
    };

    let max_forward = (current - ctx.config.min_target_standoff).max(0.0);
    let travel = travel.min(max_forward);
    if travel.abs() < eps {
        debug!("dolly travel is zero, holding");
        return Ok(StepOutcome::hold(*state, ctx.duration));
    }

    let candidate = state.position + basis.forward * travel;
    let position = ctx.constrain(&state.position, &candidate, &state.target);
    let next = CameraState::new(position, state.target);
    let easing = ctx.easing(params.easing.as_deref(), params.speed.as_deref());

    Ok(StepOutcome::single(next, ctx.duration, easing))
}
