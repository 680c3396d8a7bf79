// SPDX-License-Identifier: MIT OR Apache-2.0
//! Validation and relative-probability engine for microlensing submissions.
//!
//! All validators are pure functions over borrowed records and return
//! [`Finding`](microlens_common::Finding) lists; none of them mutate input
//! or stop at the first problem.
//!
//! - `parameters`: completeness, type and range checks per solution
//! - `physical`: mass budget, vector magnitudes, distance ordering
//! - `uncertainty`: uncertainty shape and relative size
//! - `free_params`: free-parameter count for the information criterion
//! - `probability`: relative probabilities across an event's active solutions
//! - `tier`: event identifiers and model choices against a tier
//! - `aggregate`: the submission-level pass tying these together
//!
//! # Quick start
//!
//! ```rust
//! use microlens_common::{ModelType, Solution, Submission};
//! use microlens_validation::SubmissionValidator;
//!
//! let mut sub = Submission::new("Team Alpha", "experienced");
//! let mut sol = Solution::new("pspl", ModelType::PointSourcePointLens);
//! sol.set_parameter("t0", 2459123.5).set_parameter("u0", 0.1);
//! sub.event_mut("rmdc26_0001").add_solution(sol).unwrap();
//!
//! let report = SubmissionValidator::default().validate(&sub);
//! assert!(report.has_errors()); // tE is missing
//! assert_eq!(report.probabilities_for("rmdc26_0001").unwrap().get("pspl"), Some(1.0));
//! ```

pub mod aggregate;
pub mod free_params;
pub mod parameters;
pub mod physical;
pub mod probability;
pub mod tier;
pub mod uncertainty;

pub use aggregate::{SubmissionValidator, ValidationReport};
pub use free_params::count_free_parameters;
pub use parameters::{Requirement, required_parameters, validate_parameters};
pub use physical::validate_physical_parameters;
pub use probability::{
    EventProbabilities, ProbabilityEstimate, ProbabilitySource, compute_relative_probabilities,
    information_criterion,
};
pub use tier::{unknown_tier, validate_event_id, validate_tier_choices};
pub use uncertainty::{shape_problem, validate_uncertainties};
