// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shape and plausibility checks for parameter uncertainties.

use std::collections::BTreeMap;

use microlens_common::{Finding, FindingCode, Solution, Uncertainty, ValidationConfig};
use microlens_schema::Registry;

/// Which uncertainty map an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Model,
    Physical,
}

impl Level {
    fn map_name(self) -> &'static str {
        match self {
            Self::Model => "parameter_uncertainties",
            Self::Physical => "physical_parameter_uncertainties",
        }
    }
}

/// Describe what is wrong with an uncertainty's shape, if anything.
pub fn shape_problem(name: &str, uncertainty: &Uncertainty) -> Option<String> {
    match uncertainty {
        Uncertainty::Symmetric(v) if !v.is_finite() => {
            Some(format!("Uncertainty for '{name}' must be a finite number, got {v}"))
        }
        Uncertainty::Symmetric(v) if *v < 0.0 => {
            Some(format!("Uncertainty for '{name}' must be non-negative, got {v}"))
        }
        Uncertainty::Symmetric(_) => None,
        Uncertainty::Bounds(b) if b.len() != 2 => Some(format!(
            "Uncertainty for '{name}' should be [lower, upper] or a single value, got {} values",
            b.len()
        )),
        Uncertainty::Bounds(b) => {
            let (lower, upper) = (b[0], b[1]);
            if !(lower.is_finite() && upper.is_finite()) {
                Some(format!("Uncertainty bounds for '{name}' must be finite numbers"))
            } else if lower < 0.0 || upper < 0.0 {
                Some(format!("Uncertainty bounds for '{name}' must be non-negative, got [{lower}, {upper}]"))
            } else if lower > upper {
                Some(format!("Lower uncertainty for '{name}' ({lower}) > upper uncertainty ({upper})"))
            } else {
                None
            }
        }
        Uncertainty::Malformed(value) => Some(format!(
            "Uncertainty for '{name}' should be [lower, upper] or a single value, got {value}"
        )),
    }
}

/// Check both uncertainty maps of a solution, its method and confidence level.
pub fn validate_uncertainties(
    solution: &Solution,
    registry: &Registry,
    config: &ValidationConfig,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    let model_values: BTreeMap<&str, Option<f64>> =
        solution.parameters.iter().map(|(k, v)| (k.as_str(), v.as_f64())).collect();
    let physical_values: BTreeMap<&str, Option<f64>> =
        solution.physical_parameters.iter().map(|(k, v)| (k.as_str(), v.as_f64())).collect();

    check_map(
        Level::Model,
        &solution.parameter_uncertainties,
        &model_values,
        registry,
        config,
        &mut findings,
    );
    check_map(
        Level::Physical,
        &solution.physical_parameter_uncertainties,
        &physical_values,
        registry,
        config,
        &mut findings,
    );

    let has_any =
        !solution.parameter_uncertainties.is_empty() || !solution.physical_parameter_uncertainties.is_empty();
    if has_any && solution.uncertainty_method.is_none() {
        findings.push(Finding::warning(
            FindingCode::UncertaintyMethodMissing,
            ["uncertainty_method"],
            "Uncertainties are provided but uncertainty_method is not set",
        ));
    }

    let level = solution.confidence_level;
    if !(level > 0.0 && level < 1.0) {
        findings.push(Finding::error(
            FindingCode::ConfidenceLevelOutOfRange,
            ["confidence_level"],
            format!("Confidence level must be strictly between 0 and 1, got {level}"),
        ));
    }
    findings
}

fn check_map(
    level: Level,
    uncertainties: &BTreeMap<String, Uncertainty>,
    values: &BTreeMap<&str, Option<f64>>,
    registry: &Registry,
    config: &ValidationConfig,
    findings: &mut Vec<Finding>,
) {
    for (name, uncertainty) in uncertainties {
        let belongs_elsewhere = match level {
            Level::Model => registry.is_physical(name),
            Level::Physical => !registry.is_physical(name),
        };
        if !values.contains_key(name.as_str()) {
            if belongs_elsewhere {
                let (kind, target) = match level {
                    Level::Model => ("Physical parameter", Level::Physical.map_name()),
                    Level::Physical => ("Parameter", Level::Model.map_name()),
                };
                findings.push(Finding::warning(
                    FindingCode::MisplacedUncertainty,
                    [name.as_str()],
                    format!(
                        "{kind} '{name}' found in {}. Move it to {target}.",
                        level.map_name()
                    ),
                ));
            } else {
                findings.push(Finding::warning(
                    FindingCode::UncertaintyForUnknownParameter,
                    [name.as_str()],
                    format!("Uncertainty provided for unknown parameter '{name}'"),
                ));
            }
        }

        if let Some(problem) = shape_problem(name, uncertainty) {
            findings.push(Finding::error(
                FindingCode::UncertaintyShapeInvalid,
                [name.as_str()],
                problem,
            ));
            continue;
        }

        // Relative size is undefined for a zero or missing value.
        let Some(Some(value)) = values.get(name.as_str()) else {
            continue;
        };
        let Some(sigma) = uncertainty.representative() else {
            continue;
        };
        if *value == 0.0 || !value.is_finite() {
            continue;
        }
        let relative = sigma / value.abs();
        if relative > config.uncertainty_large_fraction {
            findings.push(Finding::warning(
                FindingCode::UncertaintyLarge,
                [name.as_str()],
                format!(
                    "Uncertainty for '{name}' is very large ({:.1}% of parameter value)",
                    relative * 100.0
                ),
            ));
        } else if relative < config.uncertainty_small_fraction {
            findings.push(Finding::warning(
                FindingCode::UncertaintySmall,
                [name.as_str()],
                format!(
                    "Uncertainty for '{name}' is very small ({:.4}% of parameter value)",
                    relative * 100.0
                ),
            ));
        }
    }
}
