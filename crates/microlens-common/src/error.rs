// SPDX-License-Identifier: MIT OR Apache-2.0
//! Errors raised when a record is mutated into a structurally invalid state.
//!
//! Validation itself never fails: it reports [`crate::Finding`]s. These errors
//! only guard the mutators on [`crate::Solution`] and [`crate::Event`].

use thiserror::Error;

/// Hard failures at the point of assignment.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolutionError {
    #[error("parameter '{name}' must be numeric, got {found}")]
    NonNumericParameter { name: String, found: String },

    #[error("parameter '{name}' must be finite, got {value}")]
    NonFiniteParameter { name: String, value: f64 },

    #[error("relative_probability must lie in [0, 1], got {0}")]
    ProbabilityOutOfRange(f64),

    #[error("confidence_level must lie strictly between 0 and 1, got {0}")]
    ConfidenceLevelOutOfRange(f64),

    #[error("solution '{solution_id}' already exists in event '{event_id}'")]
    DuplicateSolutionId { event_id: String, solution_id: String },

    #[error("solution '{solution_id}' not found in event '{event_id}'")]
    UnknownSolution { event_id: String, solution_id: String },
}

/// Convenience alias used by the record mutators.
pub type Result<T> = std::result::Result<T, SolutionError>;
