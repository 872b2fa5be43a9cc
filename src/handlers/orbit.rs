//! `orbit`: rotate the camera around a center.

use tracing::debug;

use super::{direction_sign, resolve_angle, StepContext, StepOutcome};
use crate::camera::{CameraCommand, CameraState};
use crate::error::{MotionError, Result};
use crate::math::linalg::{camera_basis, rotate_about};
use crate::math::Vec3;
use crate::plan::{Direction, OrbitParams, PrimitiveKind};
use crate::targets::resolve_target_position;

/// Rotate the (position − center) radius about an axis by a signed angle,
/// looking at the center throughout.
///
/// The arc is split into `ceil(|angle| / step)` keyframes so that clamping is
/// applied along the whole path rather than only at its end. The radius is
/// scaled progressively towards `radius_factor`.
pub(crate) fn orbit(params: &OrbitParams, state: &CameraState, ctx: &StepContext<'_>) -> Result<StepOutcome> {
    let eps = ctx.config.epsilon;

    let center = match params.target.as_deref() {
        Some(name) => ctx.resolve(name, &state.target)?,
        None => resolve_target_position("object_center", ctx.scene, ctx.env, &state.target)
            .unwrap_or(state.target),
    };

    let sign = direction_sign(
        params.direction.as_deref(),
        &[Direction::Right, Direction::CounterClockwise],
        &[Direction::Left, Direction::Clockwise],
    )?
    .map(|(_, s)| s);
    let degrees = resolve_angle(
        params.angle,
        params.angle_descriptor.as_deref(),
        sign,
        PrimitiveKind::Orbit,
        state,
        ctx,
    )?;

    if degrees.abs() > ctx.config.max_orbit_degrees {
        return Err(MotionError::invalid_parameter(
            "angle",
            format!(
                "{degrees}° exceeds the {}° orbit limit",
                ctx.config.max_orbit_degrees
            ),
        ));
    }

    let radius_factor = params.radius_factor.unwrap_or(1.0);
    if !(radius_factor.is_finite() && radius_factor > 0.0) {
        return Err(MotionError::invalid_parameter(
            "radius_factor",
            format!("must be a positive number, got {radius_factor}"),
        ));
    }

    let axis = orbit_axis(params.axis.as_deref(), state, eps)?;

    let radius = state.position - center;
    if radius.norm() < eps {
        debug!("camera sits on the orbit center, orbit degrades to hold");
        return Ok(StepOutcome::hold(*state, ctx.duration));
    }
    if degrees.abs() < eps && (radius_factor - 1.0).abs() < eps {
        return Ok(StepOutcome::hold(CameraState::new(state.position, center), ctx.duration));
    }

    let step_degrees = ctx.config.effective_orbit_step_degrees();
    let segments = ((degrees.abs() / step_degrees).ceil() as usize).max(1);
    let segment_duration = ctx.duration / segments as f64;
    let easing = ctx.easing(params.easing.as_deref(), params.speed.as_deref());
    let radians = degrees.to_radians();

    debug!(degrees, segments, "orbit subdivided");

    let mut commands = Vec::with_capacity(segments);
    let mut position = state.position;
    for k in 1..=segments {
        let fraction = k as f64 / segments as f64;
        let scale = 1.0 + (radius_factor - 1.0) * fraction;
        let candidate = center + rotate_about(&radius, &axis, radians * fraction) * scale;
        position = ctx.constrain(&position, &candidate, &center);
        commands.push(CameraCommand::new(
            CameraState::new(position, center),
            segment_duration,
            easing.for_segment(k - 1, segments),
        ));
    }

    Ok(StepOutcome {
        commands,
        state: CameraState::new(position, center),
        unsupported: Vec::new(),
    })
}

/// Rotation axis: world X/Y/Z or the camera's local up. Defaults to Y.
fn orbit_axis(raw: Option<&str>, state: &CameraState, eps: f64) -> Result<Vec3> {
    let key = raw.map(|s| s.trim().to_lowercase().replace(['-', ' '], "_"));
    match key.as_deref() {
        None | Some("y" | "world_y" | "vertical") => Ok(Vec3::y()),
        Some("x" | "world_x") => Ok(Vec3::x()),
        Some("z" | "world_z") => Ok(Vec3::z()),
        Some("camera_up" | "local_up" | "up") => Ok(camera_basis(&state.position, &state.target, eps)
            .map_or(Vec3::y(), |b| b.up)),
        Some(other) => Err(MotionError::invalid_parameter(
            "axis",
            format!("unknown orbit axis `{other}`, expected x, y, z or camera_up"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::camera::Easing;
    use crate::config::InterpreterConfig;
    use crate::scene::{Bounds, CameraConstraints, EnvContext, SceneContext};
    use approx::assert_relative_eq;

    fn params(direction: &str, angle: f64) -> OrbitParams {
        OrbitParams {
            direction: Some(direction.to_string()),
            angle: Some(angle),
            axis: Some("y".into()),
            ..OrbitParams::default()
        }
    }

    fn centered_scene() -> SceneContext {
        SceneContext::with_bounds(Bounds::new(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, 1.0),
        ))
    }

    #[test]
    fn test_orbit_left_quarter_turn() {
        let scene = centered_scene();
        let env = EnvContext::default();
        let config = config();
        let out = orbit(&params("left", 90.0), &front_camera(), &ctx(&scene, &env, &config, 4.0)).unwrap();

        // 90° at 15° per keyframe
        assert_eq!(out.commands.len(), 6);
        assert_relative_eq!(out.state.position, Vec3::new(-5.0, 0.0, 0.0), epsilon = 1e-9);
        assert_eq!(out.state.target, Vec3::zeros());
        assert_relative_eq!(total_duration(&out), 4.0, epsilon = 1e-12);
        for cmd in &out.commands {
            assert_relative_eq!(cmd.position.norm(), 5.0, epsilon = 1e-9);
            assert_eq!(cmd.target, Vec3::zeros());
        }
    }

    #[test]
    fn test_orbit_right_is_opposite() {
        let scene = centered_scene();
        let env = EnvContext::default();
        let config = config();
        let out = orbit(&params("right", 90.0), &front_camera(), &ctx(&scene, &env, &config, 1.0)).unwrap();
        assert_relative_eq!(out.state.position, Vec3::new(5.0, 0.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn test_full_orbit_closes() {
        let scene = centered_scene();
        let env = EnvContext::default();
        let config = config();
        let out = orbit(&params("clockwise", 360.0), &front_camera(), &ctx(&scene, &env, &config, 6.0)).unwrap();
        assert_eq!(out.commands.len(), 24);
        assert_relative_eq!(out.state.position, Vec3::new(0.0, 0.0, 5.0), epsilon = 1e-9);
        assert_eq!(out.state.target, Vec3::zeros());
    }

    #[test]
    fn test_easing_spread_across_arc() {
        let scene = centered_scene();
        let env = EnvContext::default();
        let config = config();
        let mut p = params("left", 45.0);
        p.easing = Some("easeInOutQuad".into());
        let out = orbit(&p, &front_camera(), &ctx(&scene, &env, &config, 3.0)).unwrap();
        assert_eq!(out.commands.len(), 3);
        assert_eq!(out.commands[0].easing, Easing::EaseInQuad);
        assert_eq!(out.commands[1].easing, Easing::Linear);
        assert_eq!(out.commands[2].easing, Easing::EaseOutQuad);
    }

    #[test]
    fn test_step_size_follows_config() {
        let scene = centered_scene();
        let env = EnvContext::default();
        let config = InterpreterConfig::preview();
        let out = orbit(&params("left", 90.0), &front_camera(), &ctx(&scene, &env, &config, 1.0)).unwrap();
        assert_eq!(out.commands.len(), 2);
    }

    #[test]
    fn test_radius_factor() {
        let scene = SceneContext::default();
        let env = EnvContext::default();
        let config = config();
        let mut p = params("right", 90.0);
        p.radius_factor = Some(2.0);
        let out = orbit(&p, &front_camera(), &ctx(&scene, &env, &config, 1.0)).unwrap();
        assert_relative_eq!(out.state.position, Vec3::new(10.0, 0.0, 0.0), epsilon = 1e-9);

        p.radius_factor = Some(0.0);
        assert!(orbit(&p, &front_camera(), &ctx(&scene, &env, &config, 1.0)).is_err());
    }

    #[test]
    fn test_orbit_respects_constraints() {
        let scene = centered_scene();
        let env = EnvContext::with_constraints(CameraConstraints::new(2.0, 8.0, -0.5, 3.0));
        let config = config();
        let state = CameraState::new(Vec3::new(0.0, 0.0, 5.0), Vec3::zeros());
        let p = OrbitParams {
            direction: Some("right".into()),
            angle: Some(120.0),
            axis: Some("x".into()),
            ..OrbitParams::default()
        };
        let out = orbit(&p, &state, &ctx(&scene, &env, &config, 2.0)).unwrap();
        for cmd in &out.commands {
            assert!(cmd.position.y >= -0.5 - 1e-9 && cmd.position.y <= 3.0 + 1e-9);
            let d = cmd.position.norm();
            assert!((2.0 - 1e-9..=8.0 + 1e-9).contains(&d));
            assert!(!scene.bounds.unwrap().contains_strictly(&cmd.position));
        }
    }

    #[test]
    fn test_named_center_and_errors() {
        let scene = centered_scene();
        let env = EnvContext::default();
        let config = config();
        let c = ctx(&scene, &env, &config, 1.0);

        let mut p = params("left", 90.0);
        p.target = Some("nowhere".into());
        assert!(matches!(orbit(&p, &front_camera(), &c), Err(MotionError::UnresolvedTarget(_))));

        let mut p = params("up", 90.0);
        p.axis = None;
        assert!(orbit(&p, &front_camera(), &c).is_err());

        let mut p = params("left", 90.0);
        p.axis = Some("w".into());
        assert!(orbit(&p, &front_camera(), &c).is_err());
    }

    #[test]
    fn test_oversized_angle_is_rejected() {
        let scene = centered_scene();
        let env = EnvContext::default();
        let config = config();
        let c = ctx(&scene, &env, &config, 1.0);

        for angle in [1e300, -1e12, 3600.5] {
            assert!(matches!(
                orbit(&params("left", angle), &front_camera(), &c),
                Err(MotionError::InvalidParameter { .. })
            ));
        }

        // Ten full turns is the default limit
        let out = orbit(&params("right", 3600.0), &front_camera(), &c).unwrap();
        assert_eq!(out.commands.len(), 240);
        assert_relative_eq!(out.state.position, front_camera().position, epsilon = 1e-6);

        let tight = InterpreterConfig::preview().with_max_orbit_degrees(180.0);
        let c = ctx(&scene, &env, &tight, 1.0);
        assert!(orbit(&params("left", 270.0), &front_camera(), &c).is_err());
    }

    #[test]
    fn test_camera_up_axis() {
        let scene = SceneContext::default();
        let env = EnvContext::default();
        let config = config();
        let p = OrbitParams {
            direction: Some("left".into()),
            angle: Some(90.0),
            axis: Some("camera_up".into()),
            ..OrbitParams::default()
        };
        let out = orbit(&p, &front_camera(), &ctx(&scene, &env, &config, 1.0)).unwrap();
        // Level camera: local up equals world up
        assert_relative_eq!(out.state.position, Vec3::new(-5.0, 0.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn test_center_defaults_to_current_target_without_bounds() {
        let scene = SceneContext::default();
        let env = EnvContext::default();
        let config = config();
        let state = CameraState::new(Vec3::new(1.0, 0.0, 5.0), Vec3::new(1.0, 0.0, 0.0));
        let out = orbit(&params("right", 180.0), &state, &ctx(&scene, &env, &config, 1.0)).unwrap();
        assert_relative_eq!(out.state.position, Vec3::new(1.0, 0.0, -5.0), epsilon = 1e-9);
        assert_eq!(out.state.target, Vec3::new(1.0, 0.0, 0.0));
    }
}
