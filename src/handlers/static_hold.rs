//! `static`: hold the current pose.

use super::{StepContext, StepOutcome};
use crate::camera::CameraState;

/// Hold position and target for the whole step, always with linear easing.
pub(crate) fn hold(state: &CameraState, ctx: &StepContext<'_>) -> StepOutcome {
    StepOutcome::hold(*state, ctx.duration)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::camera::Easing;
    use crate::scene::{EnvContext, SceneContext};

    #[test]
    fn test_hold_keeps_pose() {
        let scene = SceneContext::default();
        let env = EnvContext::default();
        let config = config();
        let state = front_camera();

        let out = hold(&state, &ctx(&scene, &env, &config, 2.5));
        assert_eq!(out.commands.len(), 1);
        assert_eq!(out.commands[0].state(), state);
        assert_eq!(out.commands[0].duration, 2.5);
        assert_eq!(out.commands[0].easing, Easing::Linear);
        assert_eq!(out.state, state);
    }
}
