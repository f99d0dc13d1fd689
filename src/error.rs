//! Error types for crew planning.

use thiserror::Error;

/// Errors produced while configuring or running the planner.
#[derive(Debug, Error)]
pub enum PlanError {
    /// A configuration knob is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The job catalog cannot be planned (empty, duplicate or non-positive ids,
    /// negative RUL, malformed source file).
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Balanced insertion found no crew within the imbalance threshold.
    #[error(
        "no crew accepted job {job_id} within {attempts} attempts (imbalance threshold {threshold})"
    )]
    InsertionStarvation {
        job_id: i64,
        attempts: usize,
        threshold: i64,
    },

    /// No schedule in the final population fits the plan horizon.
    #[error("no schedule finishes within the maximum plan duration of {max_plan_duration} days")]
    NoFeasibleSolution { max_plan_duration: i64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for planner operations.
pub type Result<T> = std::result::Result<T, PlanError>;
