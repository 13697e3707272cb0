//! Error types surfaced by the core.

use thiserror::Error;

use crate::ids::TargetId;

/// Failures while turning notation into an [`ActionGrid`](crate::ActionGrid).
///
/// The grammar itself is total; only the fixed grid bounds can be violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(
        "notation exceeds grid capacity at pipe {pipe}, action {action} (limit {max_pipes} pipes x {max_actions} actions)"
    )]
    CapacityExceeded {
        pipe: usize,
        action: usize,
        max_pipes: usize,
        max_actions: usize,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors from the host-side [`Stage`](crate::Stage).
#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("unknown target {0:?}")]
    UnknownTarget(TargetId),
}
