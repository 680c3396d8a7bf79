// SPDX-License-Identifier: MIT OR Apache-2.0
//! Structured validation findings.
//!
//! Every validator returns an ordered `Vec<Finding>`. Errors and warnings are
//! carried the same way; callers decide whether errors block persistence.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Finding severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Machine-stable finding codes.
///
/// The serialized form (`snake_case`) is part of the output contract and must
/// not change once released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingCode {
    // Parameter completeness
    MissingParameter,
    MissingOptionalParameter,
    NonNumericParameter,
    PartialFluxBand,
    UndeclaredBand,
    UnrecognizedParameter,
    PhysicalParameterInParameters,
    UncheckedModelType,
    UncheckedEffect,
    UnknownEffect,
    ParameterOutOfRange,
    ProbabilityOutOfRange,

    // Physical consistency
    MassBudgetMismatch,
    VectorMagnitudeMismatch,
    DistanceOrderViolation,
    ImplausibleDistance,
    ImplausibleMass,
    UnknownPhysicalParameter,

    // Uncertainties
    UncertaintyShapeInvalid,
    UncertaintyLarge,
    UncertaintySmall,
    UncertaintyForUnknownParameter,
    MisplacedUncertainty,
    UncertaintyMethodMissing,
    ConfidenceLevelOutOfRange,

    // Relative probabilities
    ProbabilitySumMismatch,
    ProbabilityOverflow,

    // Tier / event identifiers
    UnknownTier,
    EventIdNotInTier,
    ModelTypeNotPermitted,
    EffectNotPermitted,

    // Submission structure
    DuplicateAlias,
    DuplicateSolutionId,
    NoActiveSolutions,
    DuplicateEventId,
    MissingTeamName,
    MissingTier,
    MissingRepoUrl,
}

impl FindingCode {
    /// The stable wire name of this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingParameter => "missing_parameter",
            Self::MissingOptionalParameter => "missing_optional_parameter",
            Self::NonNumericParameter => "non_numeric_parameter",
            Self::PartialFluxBand => "partial_flux_band",
            Self::UndeclaredBand => "undeclared_band",
            Self::UnrecognizedParameter => "unrecognized_parameter",
            Self::PhysicalParameterInParameters => "physical_parameter_in_parameters",
            Self::UncheckedModelType => "unchecked_model_type",
            Self::UncheckedEffect => "unchecked_effect",
            Self::UnknownEffect => "unknown_effect",
            Self::ParameterOutOfRange => "parameter_out_of_range",
            Self::ProbabilityOutOfRange => "probability_out_of_range",
            Self::MassBudgetMismatch => "mass_budget_mismatch",
            Self::VectorMagnitudeMismatch => "vector_magnitude_mismatch",
            Self::DistanceOrderViolation => "distance_order_violation",
            Self::ImplausibleDistance => "implausible_distance",
            Self::ImplausibleMass => "implausible_mass",
            Self::UnknownPhysicalParameter => "unknown_physical_parameter",
            Self::UncertaintyShapeInvalid => "uncertainty_shape_invalid",
            Self::UncertaintyLarge => "uncertainty_large",
            Self::UncertaintySmall => "uncertainty_small",
            Self::UncertaintyForUnknownParameter => "uncertainty_for_unknown_parameter",
            Self::MisplacedUncertainty => "misplaced_uncertainty",
            Self::UncertaintyMethodMissing => "uncertainty_method_missing",
            Self::ConfidenceLevelOutOfRange => "confidence_level_out_of_range",
            Self::ProbabilitySumMismatch => "probability_sum_mismatch",
            Self::ProbabilityOverflow => "probability_overflow",
            Self::UnknownTier => "unknown_tier",
            Self::EventIdNotInTier => "event_id_not_in_tier",
            Self::ModelTypeNotPermitted => "model_type_not_permitted",
            Self::EffectNotPermitted => "effect_not_permitted",
            Self::DuplicateAlias => "duplicate_alias",
            Self::DuplicateSolutionId => "duplicate_solution_id",
            Self::NoActiveSolutions => "no_active_solutions",
            Self::MissingTeamName => "missing_team_name",
            Self::DuplicateEventId => "duplicate_event_id",
            Self::MissingTier => "missing_tier",
            Self::MissingRepoUrl => "missing_repo_url",
        }
    }
}

impl fmt::Display for FindingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub code: FindingCode,
    /// Offending field name(s), in the order they are mentioned in `message`.
    pub fields: Vec<String>,
    /// Human-readable text suitable for direct CLI display.
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution_id: Option<String>,
}

impl Finding {
    pub fn error<F, S>(code: FindingCode, fields: F, message: impl Into<String>) -> Self
    where
        F: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Severity::Error, code, fields, message)
    }

    pub fn warning<F, S>(code: FindingCode, fields: F, message: impl Into<String>) -> Self
    where
        F: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Severity::Warning, code, fields, message)
    }

    fn new<F, S>(severity: Severity, code: FindingCode, fields: F, message: impl Into<String>) -> Self
    where
        F: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            severity,
            code,
            fields: fields.into_iter().map(Into::into).collect(),
            message: message.into(),
            event_id: None,
            solution_id: None,
        }
    }

    /// Attach the owning event identifier (kept if already set).
    pub fn in_event(mut self, event_id: &str) -> Self {
        self.event_id.get_or_insert_with(|| event_id.to_string());
        self
    }

    /// Attach the owning solution identifier (kept if already set).
    pub fn in_solution(mut self, solution_id: &str) -> Self {
        self.solution_id.get_or_insert_with(|| solution_id.to_string());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }

    /// `true` if `field` is one of the offending fields.
    pub fn mentions(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: ", self.severity, self.code)?;
        match (&self.event_id, &self.solution_id) {
            (Some(event), Some(solution)) => write!(f, "event {event}, solution {solution}: ")?,
            (Some(event), None) => write!(f, "event {event}: ")?,
            (None, Some(solution)) => write!(f, "solution {solution}: ")?,
            (None, None) => {}
        }
        f.write_str(&self.message)
    }
}

/// `true` if any finding has error severity.
pub fn has_errors(findings: &[Finding]) -> bool {
    findings.iter().any(Finding::is_error)
}

/// Returns `(errors, warnings)`.
pub fn count_by_severity(findings: &[Finding]) -> (usize, usize) {
    let errors = findings.iter().filter(|f| f.is_error()).count();
    (errors, findings.len() - errors)
}
