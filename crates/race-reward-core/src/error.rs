//! Error types for reward scoring

use thiserror::Error;

/// Result type for reward operations
pub type Result<T> = std::result::Result<T, RewardError>;

/// Reward scoring error types
#[derive(Debug, Error, PartialEq)]
pub enum RewardError {
    /// Telemetry key absent from the snapshot
    #[error("Missing telemetry key: {0}")]
    MissingKey(String),

    /// Telemetry value has the wrong shape
    #[error("Invalid telemetry value for {key}: expected {expected}")]
    InvalidType {
        key: String,
        expected: &'static str,
    },

    /// Waypoint list has no points
    #[error("Waypoint list is empty")]
    EmptyWaypoints,

    /// Speed term evaluated before the first step
    #[error("Step count is zero, speed reward is undefined")]
    ZeroSteps,

    /// Centre distance cannot be scaled by a track with no width
    #[error("Track width must be positive, got {0}")]
    InvalidTrackWidth(f64),

    /// Weight override names a term the variant does not register
    #[error("Unknown scoring term: {0}")]
    UnknownTerm(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for RewardError {
    fn from(err: serde_json::Error) -> Self {
        RewardError::Serialization(err.to_string())
    }
}
