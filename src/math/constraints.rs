//! Constraint clamping pipeline shared by every moving primitive.
//!
//! Order: height → distance from anchor → bounding-box raycast. Clamping is
//! silent; adjustments are only reported at `trace` level.

use tracing::trace;

use super::linalg::normalize_or;
use super::raycast::clamp_position_with_raycast;
use super::Vec3;
use crate::config::InterpreterConfig;
use crate::scene::{CameraConstraints, EnvContext, SceneContext};

/// Tolerance used when re-checking a clamped position.
const ADMIT_TOLERANCE: f64 = 1e-6;

/// Clamp the camera height (world Y) into `[min_height, max_height]`.
#[must_use]
pub fn clamp_height(position: &Vec3, constraints: &CameraConstraints) -> Vec3 {
    let mut out = *position;
    out.y = out.y.max(constraints.min_height).min(constraints.max_height);
    out
}

/// Clamp the distance to `anchor` into `[min_distance, max_distance]`.
///
/// The position is moved along the anchor → position ray. When the position
/// coincides with the anchor, `fallback_dir` gives the ray direction.
#[must_use]
pub fn clamp_distance(
    position: &Vec3,
    anchor: &Vec3,
    constraints: &CameraConstraints,
    fallback_dir: &Vec3,
    eps: f64,
) -> Vec3 {
    let offset = position - anchor;
    let distance = offset.norm();
    let goal = distance
        .max(constraints.min_distance)
        .min(constraints.max_distance);
    if (goal - distance).abs() <= eps {
        return *position;
    }
    let dir = normalize_or(&offset, normalize_or(fallback_dir, Vec3::z(), eps), eps);
    anchor + dir * goal
}

/// Run the full clamping pipeline on a candidate camera position.
///
/// # Arguments
///
/// * `start` - Position the camera moves from (assumed safe)
/// * `candidate` - Unconstrained end position
/// * `anchor` - Point distance constraints are measured from
///
/// If the pipeline's result still violates a constraint (the stages can
/// undo each other near the box) while `start` satisfied all of them, the
/// camera stays at `start`.
#[must_use]
pub fn constrain_position(
    start: &Vec3,
    candidate: &Vec3,
    anchor: &Vec3,
    scene: &SceneContext,
    env: &EnvContext,
    config: &InterpreterConfig,
) -> Vec3 {
    let mut position = *candidate;

    if let Some(constraints) = &env.camera_constraints {
        position = clamp_height(&position, constraints);
        position = clamp_distance(&position, anchor, constraints, &(start - anchor), config.epsilon);
    }

    if let Some(bounds) = &scene.bounds {
        position = clamp_position_with_raycast(start, &position, bounds, env.user_vertical_adjustment);
    }

    if (position - candidate).norm() > config.epsilon {
        trace!(
            candidate = ?candidate.as_slice(),
            clamped = ?position.as_slice(),
            "camera position clamped"
        );
    }

    if !is_admissible(&position, anchor, scene, env) && is_admissible(start, anchor, scene, env) {
        trace!("clamped position still unsafe, holding start position");
        return *start;
    }

    position
}

/// Whether `position` satisfies the constraints and stays out of the box.
#[must_use]
pub fn is_admissible(position: &Vec3, anchor: &Vec3, scene: &SceneContext, env: &EnvContext) -> bool {
    let within = env
        .camera_constraints
        .as_ref()
        .map_or(true, |c| c.admits(position, anchor, ADMIT_TOLERANCE));
    let outside = scene
        .adjusted_bounds(env)
        .map_or(true, |b| !b.contains_strictly(position));
    within && outside
}
