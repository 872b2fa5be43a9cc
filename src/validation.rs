//! Post-hoc safety validation of assembled camera commands.
//!
//! The interpreter already clamps every position it produces; this module is
//! the independent check a caller runs before handing keyframes to a
//! renderer.

use tracing::warn;

use crate::camera::CameraCommand;
use crate::scene::{Bounds, EnvContext, SceneContext};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Validation results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ValidationReport {
    /// Whether the commands passed every check.
    pub is_valid: bool,

    /// Violations; at most one is reported.
    pub errors: Vec<String>,

    /// Checks that could not be run.
    pub warnings: Vec<String>,
}

/// Check that no command places the camera inside the subject.
///
/// # Arguments
///
/// * `commands` - Keyframes to check
/// * `bounds` - Subject bounding box, already shifted by any vertical adjustment
///
/// # Returns
///
/// A report listing the first violation found. Without bounds the check is
/// skipped and the commands are reported valid with a warning.
#[must_use]
pub fn validate_commands(commands: &[CameraCommand], bounds: Option<&Bounds>) -> ValidationReport {
    let Some(bounds) = bounds else {
        let message = "no object bounds available, collision check skipped".to_string();
        warn!("{message}");
        return ValidationReport {
            is_valid: true,
            errors: Vec::new(),
            warnings: vec![message],
        };
    };

    let violation = commands
        .iter()
        .enumerate()
        .find(|(_, cmd)| bounds.contains_strictly(&cmd.position))
        .map(|(i, cmd)| {
            format!(
                "command {i} places the camera inside the object bounds at ({:.3}, {:.3}, {:.3})",
                cmd.position.x, cmd.position.y, cmd.position.z
            )
        });

    match violation {
        Some(error) => ValidationReport {
            is_valid: false,
            errors: vec![error],
            warnings: Vec::new(),
        },
        None => ValidationReport {
            is_valid: true,
            ..ValidationReport::default()
        },
    }
}

/// [`validate_commands`] against the scene bounds shifted by the user's
/// vertical adjustment.
#[must_use]
pub fn validate_with_context(commands: &[CameraCommand], scene: &SceneContext, env: &EnvContext) -> ValidationReport {
    validate_commands(commands, scene.adjusted_bounds(env).as_ref())
}
