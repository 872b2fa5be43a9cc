//! Error types for camera motion interpretation.
//!
//! Errors fall into two groups: fatal plan/input errors that abort an
//! interpretation, and per-step errors that the interpreter recovers from by
//! skipping the offending step (see [`MotionError::is_recoverable`]).

use thiserror::Error;

/// Main error type for camera motion operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotionError {
    /// The plan cannot be interpreted at all.
    #[error("Invalid plan: {0}")]
    InvalidPlan(String),

    /// Caller-supplied input (initial camera state, contexts) is unusable.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A step lacks a parameter it cannot be executed without.
    #[error("Missing parameter `{0}`")]
    MissingParameter(&'static str),

    /// A step parameter is present but unusable.
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears in the plan.
        name: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// A named target could not be resolved against the scene.
    #[error("Unresolved target: {0}")]
    UnresolvedTarget(String),

    /// The requested behavior has no geometric realization.
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// The plan document could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type alias for camera motion operations.
pub type Result<T> = std::result::Result<T, MotionError>;

impl MotionError {
    /// Create an invalid plan error.
    #[must_use]
    pub fn invalid_plan(msg: impl Into<String>) -> Self {
        Self::InvalidPlan(msg.into())
    }

    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a missing parameter error.
    #[must_use]
    pub const fn missing(name: &'static str) -> Self {
        Self::MissingParameter(name)
    }

    /// Create an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Create an unresolved target error.
    #[must_use]
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self::UnresolvedTarget(name.into())
    }

    /// Create an unsupported-behavior error.
    #[must_use]
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    /// Create a parse error.
    #[must_use]
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Whether the interpreter may skip the failing step and continue.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::MissingParameter(_)
                | Self::InvalidParameter { .. }
                | Self::UnresolvedTarget(_)
                | Self::Unsupported(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MotionError::invalid_parameter("direction", "expected left or right, got `up`");
        let text = err.to_string();
        assert!(text.contains("direction"));
        assert!(text.contains("`up`"));

        let err = MotionError::missing("angle");
        assert_eq!(err.to_string(), "Missing parameter `angle`");
    }

    #[test]
    fn test_recoverability() {
        assert!(MotionError::missing("target").is_recoverable());
        assert!(MotionError::unresolved("left_wing").is_recoverable());
        assert!(MotionError::unsupported("roll").is_recoverable());
        assert!(MotionError::invalid_parameter("distance", "must be positive").is_recoverable());

        assert!(!MotionError::invalid_plan("no steps").is_recoverable());
        assert!(!MotionError::invalid_input("nan").is_recoverable());
        assert!(!MotionError::invalid_config("epsilon").is_recoverable());
        assert!(!MotionError::parse("eof").is_recoverable());
    }
}
