//! `zoom`: scale the camera-to-target distance.

use tracing::debug;

use super::{direction_sign, parse_descriptor, StepContext, StepOutcome};
use crate::camera::CameraState;
use crate::descriptor::{map_descriptor_to_goal_distance, MagnitudeType};
use crate::error::{MotionError, Result};
use crate::plan::{Direction, PrimitiveKind, ZoomParams};

/// Move the camera along the position → target line so that its distance to
/// the target is multiplied by a factor.
///
/// The factor comes from, in order: the explicit `factor` (oriented by the
/// direction: `in` never moves away, `out` never moves closer), the
/// direction-aware descriptor table, or `goal / current` for a target
/// distance descriptor.
pub(crate) fn zoom(params: &ZoomParams, state: &CameraState, ctx: &StepContext<'_>) -> Result<StepOutcome> {
    let current = state.distance();
    if current < ctx.config.epsilon {
        debug!("camera coincides with target, zoom degrades to hold");
        return Ok(StepOutcome::hold(*state, ctx.duration));
    }

    let direction = direction_sign(params.direction.as_deref(), &[Direction::Out], &[Direction::In])?
        .map(|(d, _)| d);

    let factor = if let Some(f) = params.factor {
        if !(f.is_finite() && f > 0.0) {
            return Err(MotionError::invalid_parameter(
                "factor",
                format!("must be a positive number, got {f}"),
            ));
        }
        match direction {
            Some(Direction::In) => f.min(f.recip()),
            Some(Direction::Out) => f.max(f.recip()),
            _ => f,
        }
    } else if let Some(descriptor) = parse_descriptor(params.factor_descriptor.as_deref(), "factor_descriptor")? {
        let direction = direction.ok_or(MotionError::missing("direction"))?;
        ctx.descriptor_value(descriptor, MagnitudeType::Factor, PrimitiveKind::Zoom, state, Some(direction))
    } else if let Some(descriptor) =
        parse_descriptor(params.target_distance_descriptor.as_deref(), "target_distance_descriptor")?
    {
        map_descriptor_to_goal_distance(descriptor, ctx.scene) / current
    } else {
        return Err(MotionError::missing("factor"));
    };

    let candidate = state.target + (state.position - state.target) * factor;
    let position = ctx.constrain(&state.position, &candidate, &state.target);
    let next = CameraState::new(position, state.target);
    let easing = ctx.easing(params.easing.as_deref(), params.speed.as_deref());

    Ok(StepOutcome::single(next, ctx.duration, easing))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::math::Vec3;
    use crate::scene::{Bounds, CameraConstraints, EnvContext, SceneContext};
    use approx::assert_relative_eq;

    fn params(direction: &str, factor: Option<f64>) -> ZoomParams {
        ZoomParams {
            direction: Some(direction.to_string()),
            factor,
            ..ZoomParams::default()
        }
    }

    #[test]
    fn test_zoom_in_by_half() {
        let scene = SceneContext::default();
        let env = EnvContext::default();
        let config = config();
        let out = zoom(&params("in", Some(0.5)), &front_camera(), &ctx(&scene, &env, &config, 2.0)).unwrap();

        assert_eq!(out.commands.len(), 1);
        assert_relative_eq!(out.state.position, Vec3::new(0.0, 0.0, 2.5), epsilon = 1e-12);
        assert_eq!(out.state.target, Vec3::zeros());
        assert_relative_eq!(total_duration(&out), 2.0);
    }

    #[test]
    fn test_factor_is_oriented_by_direction() {
        let scene = SceneContext::default();
        let env = EnvContext::default();
        let config = config();
        let c = ctx(&scene, &env, &config, 1.0);

        let inward = zoom(&params("in", Some(2.0)), &front_camera(), &c).unwrap();
        assert_relative_eq!(inward.state.position.z, 2.5, epsilon = 1e-12);

        let outward = zoom(&params("out", Some(2.0)), &front_camera(), &c).unwrap();
        assert_relative_eq!(outward.state.position.z, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_descriptor_needs_direction() {
        let scene = SceneContext::default();
        let env = EnvContext::default();
        let config = config();
        let p = ZoomParams {
            factor_descriptor: Some("small".into()),
            ..ZoomParams::default()
        };
        let err = zoom(&p, &front_camera(), &ctx(&scene, &env, &config, 1.0)).unwrap_err();
        assert!(err.is_recoverable());

        let p = ZoomParams {
            direction: Some("out".into()),
            factor_descriptor: Some("small".into()),
            ..ZoomParams::default()
        };
        let out = zoom(&p, &front_camera(), &ctx(&scene, &env, &config, 1.0)).unwrap();
        assert!(out.state.position.z > 5.0);
    }

    #[test]
    fn test_goal_distance() {
        let scene = SceneContext::with_bounds(Bounds::new(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, 1.0),
        ));
        let env = EnvContext::default();
        let config = config();
        let p = ZoomParams {
            target_distance_descriptor: Some("close".into()),
            ..ZoomParams::default()
        };
        let out = zoom(&p, &front_camera(), &ctx(&scene, &env, &config, 1.0)).unwrap();
        // small → 1.0 × object size 2
        assert_relative_eq!(out.state.distance(), 2.0, epsilon = 1e-9);
        assert_relative_eq!(out.state.position, Vec3::new(0.0, 0.0, 2.0), epsilon = 1e-9);
    }

    #[test]
    fn test_zoom_stops_outside_box() {
        let bounds = Bounds::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let scene = SceneContext::with_bounds(bounds);
        let env = EnvContext::default();
        let config = config();
        let state = CameraState::new(Vec3::new(0.0, 0.0, 1.5), Vec3::zeros());

        let out = zoom(&params("in", Some(0.1)), &state, &ctx(&scene, &env, &config, 1.0)).unwrap();
        assert!(!bounds.contains_strictly(&out.state.position));
        assert!(out.state.position.z > 1.0);
    }

    #[test]
    fn test_zoom_respects_min_distance() {
        let scene = SceneContext::default();
        let env = EnvContext::with_constraints(CameraConstraints::new(3.0, 20.0, -10.0, 10.0));
        let config = config();
        let out = zoom(&params("in", Some(0.2)), &front_camera(), &ctx(&scene, &env, &config, 1.0)).unwrap();
        assert_relative_eq!(out.state.distance(), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_inputs() {
        let scene = SceneContext::default();
        let env = EnvContext::default();
        let config = config();
        let c = ctx(&scene, &env, &config, 1.0);

        assert!(zoom(&params("sideways", Some(0.5)), &front_camera(), &c).is_err());
        assert!(zoom(&params("in", Some(-0.5)), &front_camera(), &c).is_err());
        assert!(matches!(
            zoom(&ZoomParams::default(), &front_camera(), &c),
            Err(MotionError::MissingParameter("factor"))
        ));
    }

    #[test]
    fn test_degenerate_camera_holds() {
        let scene = SceneContext::default();
        let env = EnvContext::default();
        let config = config();
        let state = CameraState::new(Vec3::zeros(), Vec3::zeros());
        let out = zoom(&params("in", Some(0.5)), &state, &ctx(&scene, &env, &config, 1.0)).unwrap();
        assert_eq!(out.state, state);
        assert_eq!(out.commands.len(), 1);
    }
}
