// SPDX-License-Identifier: MIT OR Apache-2.0
//! Common types for microlensing solution validation.
//!
//! This crate provides the records every validator operates on (solutions,
//! events, submissions), the structured [`Finding`] type they emit, typed
//! mutation errors, and the tolerance configuration.
//!
//! # Quick start
//!
//! ```rust
//! use microlens_common::{ModelType, Solution};
//!
//! let mut sol = Solution::new("sol-1", ModelType::PointSourcePointLens);
//! sol.set_parameter("t0", 2459123.5);
//! sol.set_parameter("u0", 0.1);
//! sol.set_parameter("tE", 20.0);
//! assert_eq!(sol.param("tE"), Some(20.0));
//! ```

pub mod config;
pub mod error;
pub mod finding;
pub mod model;
pub mod solution;
pub mod uncertainty;

pub use config::{ValidationConfig, load_validation_config};
pub use error::{Result, SolutionError};
pub use finding::{Finding, FindingCode, Severity, count_by_severity, has_errors};
pub use model::{HigherOrderEffect, ModelType, UncertaintyMethod};
pub use solution::{Event, Lenient, ParameterValue, Solution, Submission};
pub use uncertainty::Uncertainty;
