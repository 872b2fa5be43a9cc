//! Camera Motion Library
//!
//! Interprets declarative cinematic camera plans into concrete keyframes.
//!
//! A [`MotionPlan`] is a list of qualitative camera moves ("orbit left 90°",
//! "dolly in a small amount", "focus on the cockpit") with a total duration.
//! [`interpret`] turns it into a time-ordered list of [`CameraCommand`]s
//! (position, look-at target, duration, easing) that stays out of the
//! subject's bounding box and inside the caller's camera constraints.
//!
//! # Features
//!
//! - **Eleven primitives**: static, zoom, orbit, pan, tilt, dolly, truck,
//!   pedestal, `move_to`, `focus_on`, rotate
//! - **Qualitative amounts**: descriptors like "a bit" or "huge" scaled to the scene
//! - **Safe by construction**: height, distance and collision clamping on every move
//! - **Skip-and-continue**: a malformed step is reported, not fatal
//!
//! # Quick Start
//!
//! ```
//! use camera_motion::{
//!     interpret, validate_commands, Bounds, CameraState, EnvContext, InterpreterConfig,
//!     MotionPlan, MotionStep, OrbitParams, Primitive, SceneContext, Vec3, ZoomParams,
//! };
//!
//! let scene = SceneContext::with_bounds(Bounds::new(
//!     Vec3::new(-1.0, -1.0, -1.0),
//!     Vec3::new(1.0, 1.0, 1.0),
//! ));
//! let plan = MotionPlan::new(
//!     vec![
//!         MotionStep::new(
//!             Primitive::Orbit(OrbitParams {
//!                 direction: Some("left".into()),
//!                 angle: Some(90.0),
//!                 target: Some("object_center".into()),
//!                 ..OrbitParams::default()
//!             }),
//!             0.75,
//!         ),
//!         MotionStep::new(
//!             Primitive::Zoom(ZoomParams {
//!                 direction: Some("in".into()),
//!                 factor_descriptor: Some("a bit".into()),
//!                 ..ZoomParams::default()
//!             }),
//!             0.25,
//!         ),
//!     ],
//!     4.0,
//! );
//! let initial = CameraState::new(Vec3::new(0.0, 0.0, 5.0), Vec3::zeros());
//!
//! let commands = interpret(&plan, &scene, &EnvContext::default(), initial, &InterpreterConfig::default())?;
//! let report = validate_commands(&commands, scene.bounds.as_ref());
//! assert!(report.is_valid);
//! # Ok::<(), camera_motion::MotionError>(())
//! ```
//!
//! # Presets
//!
//! ```
//! use camera_motion::InterpreterConfig;
//!
//! let cinematic = InterpreterConfig::cinematic();
//! let preview = InterpreterConfig::preview();
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod camera;
pub mod config;
pub mod descriptor;
pub mod error;
mod handlers;
pub mod interpreter;
pub mod math;
pub mod plan;
pub mod scene;
pub mod targets;
pub mod validation;

// Re-exports for convenient access
pub use camera::{CameraCommand, CameraState, Easing, Speed};
pub use config::InterpreterConfig;
pub use descriptor::{
    map_descriptor_to_goal_distance, map_descriptor_to_value, normalize_descriptor, Descriptor,
    MagnitudeType,
};
pub use error::{MotionError, Result};
pub use interpreter::{
    allocate_durations, interpret, interpret_detailed, Diagnostic, DiagnosticKind, Interpretation,
};
pub use math::{clamp_position_with_raycast, Vec3};
pub use plan::{
    Direction, DollyParams, FocusOnParams, LookParams, MotionPlan, MotionStep, MoveToParams,
    OrbitParams, PlanMetadata, Primitive, PrimitiveKind, StaticParams, TranslateParams, ZoomParams,
};
pub use scene::{Bounds, CameraConstraints, EnvContext, SceneContext, SceneFeature};
pub use targets::resolve_target_position;
pub use validation::{validate_commands, validate_with_context, ValidationReport};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
