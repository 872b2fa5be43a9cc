//! `truck` and `pedestal`: move camera and target together.

use tracing::debug;

use super::{direction_sign, resolve_travel, StepContext, StepOutcome};
use crate::camera::CameraState;
use crate::error::{MotionError, Result};
use crate::math::{camera_basis, clamp_height, Vec3, WORLD_UP};
use crate::plan::{Direction, PrimitiveKind, TranslateParams};

/// Lateral move along the camera's right axis.
pub(crate) fn truck(params: &TranslateParams, state: &CameraState, ctx: &StepContext<'_>) -> Result<StepOutcome> {
    let Some(basis) = camera_basis(&state.position, &state.target, ctx.config.epsilon) else {
        debug!("camera coincides with target, truck degrades to hold");
        return Ok(StepOutcome::hold(*state, ctx.duration));
    };
    translate(
        params,
        state,
        ctx,
        PrimitiveKind::Truck,
        &basis.right,
        &[Direction::Right],
        &[Direction::Left],
    )
}

/// Vertical move along world up.
pub(crate) fn pedestal(params: &TranslateParams, state: &CameraState, ctx: &StepContext<'_>) -> Result<StepOutcome> {
    translate(
        params,
        state,
        ctx,
        PrimitiveKind::Pedestal,
        &WORLD_UP,
        &[Direction::Up],
        &[Direction::Down],
    )
}

/// Shift position and target along `axis`.
///
/// Only the position goes through the clamping pipeline; the target then
/// receives the same actual displacement, so camera and target always move
/// in parallel and the view vector is unchanged.
fn translate(
    params: &TranslateParams,
    state: &CameraState,
    ctx: &StepContext<'_>,
    motion: PrimitiveKind,
    axis: &Vec3,
    positive: &[Direction],
    negative: &[Direction],
) -> Result<StepOutcome> {
    let sign = direction_sign(params.direction.as_deref(), positive, negative)?;

    let travel = if let Some(amount) =
        resolve_travel(params.distance, params.distance_descriptor.as_deref(), motion, state, ctx)?
    {
        let (_, sign) = sign.ok_or(MotionError::missing("direction"))?;
        sign * amount
    } else if let Some(name) = params.destination_target.as_deref() {
        let destination = ctx.resolve(name, &state.target)?;
        (destination - state.position).dot(axis)
    } else {
        return Err(MotionError::missing("distance"));
    };

    if travel.abs() < ctx.config.epsilon {
        return Ok(StepOutcome::hold(*state, ctx.duration));
    }

    // Height first: camera and target move together, so the distance
    // constraint is measured from the target that follows the clamped point.
    let mut candidate = state.position + axis * travel;
    if let Some(constraints) = &ctx.env.camera_constraints {
        candidate = clamp_height(&candidate, constraints);
    }
    let anchor = candidate + state.view_vector();
    let position = ctx.constrain(&state.position, &candidate, &anchor);
    let displacement = position - state.position;
    let next = CameraState::new(position, state.target + displacement);
    let easing = ctx.easing(params.easing.as_deref(), params.speed.as_deref());

    Ok(StepOutcome::single(next, ctx.duration, easing))
}
