//! Plan interpretation: from a [`MotionPlan`] to timed camera keyframes.
//!
//! # Pipeline Overview
//!
//! 1. Validate configuration, plan and initial camera state (fatal errors)
//! 2. Allocate a duration to every step from its `duration_ratio`
//! 3. Run the step handlers in plan order, threading the camera state
//! 4. Skip steps whose handler fails recoverably, recording a diagnostic
//! 5. Concatenate all keyframes in order

use tracing::{debug, debug_span, warn};

use crate::camera::{CameraCommand, CameraState};
use crate::config::InterpreterConfig;
use crate::error::{MotionError, Result};
use crate::handlers::{run_step, StepContext, StepOutcome};
use crate::math::linalg::is_finite;
use crate::plan::{MotionPlan, PrimitiveKind};
use crate::scene::{EnvContext, SceneContext};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What a [`Diagnostic`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DiagnosticKind {
    /// The step produced no keyframes; the camera state was carried forward.
    Skipped,
    /// Part of the step's request has no geometric realization.
    Unsupported,
}

/// A non-fatal problem met while interpreting one step.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diagnostic {
    /// Index of the step in the plan.
    pub step_index: usize,
    /// Primitive type of the step.
    pub primitive: PrimitiveKind,
    /// Kind of problem.
    pub kind: DiagnosticKind,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            DiagnosticKind::Skipped => {
                write!(f, "step {} ({}) skipped: {}", self.step_index, self.primitive, self.message)
            }
            DiagnosticKind::Unsupported => write!(f, "step {} ({}): {}", self.step_index, self.primitive, self.message),
        }
    }
}

/// Full result of an interpretation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interpretation {
    /// Keyframes in playback order.
    pub commands: Vec<CameraCommand>,
    /// Camera state after the last step.
    pub final_state: CameraState,
    /// Seconds allocated to each step, in plan order.
    pub step_durations: Vec<f64>,
    /// Skipped steps and unsupported requests.
    pub diagnostics: Vec<Diagnostic>,
}

impl Interpretation {
    /// Sum of all keyframe durations.
    #[must_use]
    pub fn total_duration(&self) -> f64 {
        self.commands.iter().map(|c| c.duration).sum()
    }

    /// Indices of steps that produced no keyframes.
    #[must_use]
    pub fn skipped_steps(&self) -> Vec<usize> {
        self.diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::Skipped)
            .map(|d| d.step_index)
            .collect()
    }

    /// Length of the polyline through `initial` and every keyframe position.
    #[must_use]
    pub fn path_length(&self, initial: &CameraState) -> f64 {
        self.commands
            .iter()
            .scan(initial.position, |previous, cmd| {
                let segment = (cmd.position - *previous).norm();
                *previous = cmd.position;
                Some(segment)
            })
            .sum()
    }
}

/// Split the plan's requested duration across its steps.
///
/// `ideal_i = requested × ratio_i`; negative or non-finite ratios count as
/// zero. When all ideals are zero every step gets an equal share, otherwise
/// the ideals are rescaled to sum exactly to the requested duration. The
/// rescaling works on the ratios, so huge durations or ratios cannot overflow
/// the sum.
///
/// # Errors
///
/// Returns [`MotionError::InvalidPlan`] for an empty plan or a non-positive
/// requested duration, and [`MotionError::InvalidConfig`] for a bad config.
pub fn allocate_durations(plan: &MotionPlan, config: &InterpreterConfig) -> Result<Vec<f64>> {
    config.validate()?;
    validate_plan(plan)?;

    let requested = plan.requested_duration();
    let n = plan.steps.len();

    let ratios: Vec<f64> = plan
        .steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            let ratio = step.duration_ratio;
            if ratio.is_finite() && ratio >= 0.0 {
                ratio
            } else {
                warn!(step = i, ratio, "invalid duration ratio treated as zero");
                0.0
            }
        })
        .collect();

    // Weights relative to the largest ratio keep every sum finite
    let largest = ratios.iter().copied().fold(0.0, f64::max);
    let weights: Vec<f64> = if largest > 0.0 {
        ratios.iter().map(|r| r / largest).collect()
    } else {
        vec![0.0; n]
    };
    let weight_sum: f64 = weights.iter().sum();
    let sum = requested * largest * weight_sum;

    if sum <= config.duration_tolerance {
        warn!(steps = n, "all duration ratios are zero, splitting evenly");
        return Ok(vec![requested / n as f64; n]);
    }
    if (sum - requested).abs() > config.duration_tolerance {
        debug!(sum, requested, "rescaling step durations");
        return Ok(weights.into_iter().map(|w| requested * (w / weight_sum)).collect());
    }
    Ok(ratios.into_iter().map(|r| requested * r).collect())
}

/// Interpret a plan into camera keyframes.
///
/// # Arguments
///
/// * `plan` - Steps and requested total duration
/// * `scene` - Subject bounds and named features
/// * `env` - Camera constraints and vertical adjustment
/// * `initial` - Camera pose before the first step
/// * `config` - Interpreter tuning
///
/// # Errors
///
/// Fails only on unusable input; see [`interpret_detailed`].
///
/// # Example
///
/// ```
/// use camera_motion::{
///     interpret, CameraState, InterpreterConfig, MotionPlan, MotionStep, OrbitParams, Primitive,
///     SceneContext, EnvContext, Vec3,
/// };
///
/// let orbit = OrbitParams {
///     direction: Some("left".into()),
///     angle: Some(90.0),
///     ..OrbitParams::default()
/// };
/// let plan = MotionPlan::new(vec![MotionStep::new(Primitive::Orbit(orbit), 1.0)], 4.0);
/// let initial = CameraState::new(Vec3::new(0.0, 0.0, 5.0), Vec3::zeros());
///
/// let commands = interpret(
///     &plan,
///     &SceneContext::default(),
///     &EnvContext::default(),
///     initial,
///     &InterpreterConfig::default(),
/// )?;
/// assert_eq!(commands.len(), 6);
/// # Ok::<(), camera_motion::MotionError>(())
/// ```
pub fn interpret(
    plan: &MotionPlan,
    scene: &SceneContext,
    env: &EnvContext,
    initial: CameraState,
    config: &InterpreterConfig,
) -> Result<Vec<CameraCommand>> {
    interpret_detailed(plan, scene, env, initial, config).map(|i| i.commands)
}

/// Interpret a plan and keep the per-step bookkeeping.
///
/// Steps whose handler fails recoverably (unresolved target, missing or
/// invalid parameter) contribute no keyframes; the camera state is carried
/// forward unchanged and a [`Diagnostic`] is recorded.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid
/// - The plan has no steps or a non-positive requested duration
/// - The initial camera state is not finite
pub fn interpret_detailed(
    plan: &MotionPlan,
    scene: &SceneContext,
    env: &EnvContext,
    initial: CameraState,
    config: &InterpreterConfig,
) -> Result<Interpretation> {
    if !initial.is_finite() {
        return Err(MotionError::invalid_input("initial camera state must be finite"));
    }
    let durations = allocate_durations(plan, config)?;

    let span = debug_span!("interpret", steps = plan.steps.len(), requested = plan.requested_duration());
    let _guard = span.enter();

    let mut state = initial;
    let mut commands = Vec::new();
    let mut diagnostics = Vec::new();

    for (index, (step, &duration)) in plan.steps.iter().zip(&durations).enumerate() {
        let primitive = step.primitive.kind();
        let ctx = StepContext {
            scene,
            env,
            config,
            duration,
        };
        debug!(step = index, primitive = %primitive, duration, "interpreting step");

        let outcome = run_step(&step.primitive, &state, &ctx).and_then(|o| check_outcome(o, duration, config));
        match outcome {
            Ok(outcome) => {
                diagnostics.extend(outcome.unsupported.into_iter().map(|err| Diagnostic {
                    step_index: index,
                    primitive,
                    kind: DiagnosticKind::Unsupported,
                    message: err.to_string(),
                }));
                commands.extend(outcome.commands);
                state = outcome.state;
            }
            Err(err) if err.is_recoverable() => {
                warn!(step = index, primitive = %primitive, error = %err, "skipping step");
                diagnostics.push(Diagnostic {
                    step_index: index,
                    primitive,
                    kind: DiagnosticKind::Skipped,
                    message: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
    }

    debug!(commands = commands.len(), skipped = diagnostics.len(), "interpretation done");

    Ok(Interpretation {
        commands,
        final_state: state,
        step_durations: durations,
        diagnostics,
    })
}

fn validate_plan(plan: &MotionPlan) -> Result<()> {
    if plan.steps.is_empty() {
        return Err(MotionError::invalid_plan("plan has no steps"));
    }
    let requested = plan.requested_duration();
    if !(requested.is_finite() && requested > 0.0) {
        return Err(MotionError::invalid_plan(format!(
            "requested duration must be positive, got {requested}"
        )));
    }
    Ok(())
}

/// Structural checks on a handler result; a bad result skips the step.
fn check_outcome(outcome: StepOutcome, duration: f64, config: &InterpreterConfig) -> Result<StepOutcome> {
    let finite = outcome.state.is_finite()
        && outcome
            .commands
            .iter()
            .all(|c| is_finite(&c.position) && is_finite(&c.target) && c.duration.is_finite() && c.duration >= 0.0);
    if !finite {
        return Err(MotionError::invalid_parameter(
            "parameters",
            "step produced a non-finite or negative keyframe",
        ));
    }

    let total: f64 = outcome.commands.iter().map(|c| c.duration).sum();
    if (total - duration).abs() > config.duration_tolerance.max(1e-9 * duration) {
        warn!(total, duration, "step keyframes do not fill the allocated duration");
    }
    Ok(outcome)
}
