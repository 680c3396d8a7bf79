// SPDX-License-Identifier: MIT OR Apache-2.0
//! Parameter completeness, type, and range checks for a single solution.

use std::collections::{BTreeMap, BTreeSet};

use microlens_common::{
    Finding, FindingCode, HigherOrderEffect, Lenient, ModelType, ParameterValue, Solution,
};
use microlens_schema::registry::T_REF;
use microlens_schema::{FluxRole, Registry, flux_names_for_band, parse_flux_name};

/// A required name and everything that demanded it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub name: String,
    pub triggers: Vec<String>,
}

fn require(reqs: &mut Vec<Requirement>, name: &str, trigger: String) {
    match reqs.iter_mut().find(|r| r.name == name) {
        Some(existing) => {
            if !existing.triggers.contains(&trigger) {
                existing.triggers.push(trigger);
            }
        }
        None => reqs.push(Requirement { name: name.to_string(), triggers: vec![trigger] }),
    }
}

/// Full required-name set for a solution, in discovery order: model core,
/// effect parameters, `t_ref`, then per-band flux names.
pub fn required_parameters(solution: &Solution, registry: &Registry) -> Vec<Requirement> {
    let mut reqs = Vec::new();
    let model_trigger = format!("model type '{}'", solution.model_type);
    for name in registry.required_params(solution.model_type) {
        require(&mut reqs, name, model_trigger.clone());
    }
    for effect in solution.effects() {
        for name in registry.effect_params(effect).required {
            require(&mut reqs, name, format!("effect '{effect}'"));
        }
    }
    for effect in solution.effects() {
        if registry.effect_params(effect).needs_t_ref {
            require(&mut reqs, T_REF, format!("effect '{effect}'"));
        }
    }
    let binary = solution.model_type.is_binary_source();
    for band in &solution.bands {
        for name in flux_names_for_band(band, binary) {
            require(&mut reqs, &name, format!("band '{band}'"));
        }
    }
    reqs
}

fn is_present(solution: &Solution, name: &str) -> bool {
    solution.parameters.contains_key(name) || (name == T_REF && solution.t_ref.is_some())
}

/// Check one solution's `parameters` against the registry.
///
/// Findings are ordered: unchecked model/effect notices, missing required
/// names, missing optional names, per-parameter findings in name order,
/// partial flux bands, malformed fit statistics, then value-range checks.
pub fn validate_parameters(solution: &Solution, registry: &Registry) -> Vec<Finding> {
    let mut findings = Vec::new();

    let checkable = solution.model_type != ModelType::Other
        && !solution.has_effect(HigherOrderEffect::Other)
        && solution.unrecognized_effects().next().is_none();
    if solution.model_type == ModelType::Other {
        findings.push(Finding::warning(
            FindingCode::UncheckedModelType,
            ["model_type"],
            "Model type 'other' has no parameter definition; completeness cannot be checked",
        ));
    }
    if solution.has_effect(HigherOrderEffect::Other) {
        findings.push(Finding::warning(
            FindingCode::UncheckedEffect,
            ["higher_order_effects"],
            "Higher-order effect 'other' has no parameter definition; its parameters cannot be checked",
        ));
    }
    for raw in solution.unrecognized_effects() {
        let valid: Vec<&str> = HigherOrderEffect::ALL.iter().map(HigherOrderEffect::as_str).collect();
        findings.push(Finding::error(
            FindingCode::UnknownEffect,
            ["higher_order_effects"],
            format!("Unknown higher-order effect {}. Valid effects: {}", quoted(raw), valid.join(", ")),
        ));
    }

    let required = required_parameters(solution, registry);
    let mut reported_missing = BTreeSet::new();
    for req in &required {
        if !is_present(solution, &req.name) {
            findings.push(Finding::error(
                FindingCode::MissingParameter,
                [req.name.as_str()],
                format!("Missing required parameter '{}' for {}", req.name, req.triggers.join(", ")),
            ));
            reported_missing.insert(req.name.clone());
        }
    }

    let mut known: BTreeSet<&str> = required.iter().map(|r| r.name.as_str()).collect();
    known.extend(registry.metadata_param_names());
    for effect in solution.effects() {
        for name in registry.effect_params(effect).optional {
            known.insert(*name);
            if !solution.parameters.contains_key(*name) {
                findings.push(Finding::warning(
                    FindingCode::MissingOptionalParameter,
                    [*name],
                    format!("Optional parameter '{name}' not provided for effect '{effect}'"),
                ));
            }
        }
    }

    let binary = solution.model_type.is_binary_source();
    let mut flux_by_band: BTreeMap<&str, BTreeSet<FluxRole>> = BTreeMap::new();
    for (name, value) in &solution.parameters {
        if registry.is_metadata(name) {
            continue;
        }
        check_numeric(name, value, &mut findings);

        if registry.is_physical(name) {
            findings.push(Finding::warning(
                FindingCode::PhysicalParameterInParameters,
                [name.as_str()],
                format!(
                    "Physical parameter '{name}' found in parameters. Move it to physical_parameters."
                ),
            ));
        } else if let Some((band, role)) = parse_flux_name(name) {
            flux_by_band.entry(band).or_default().insert(role);
            if !solution.bands.iter().any(|b| b == band) {
                findings.push(Finding::warning(
                    FindingCode::UndeclaredBand,
                    [name.as_str()],
                    format!(
                        "Flux parameter '{name}' refers to band '{band}', which is not in bands [{}]",
                        solution.bands.join(", ")
                    ),
                ));
            } else if role.is_binary_source_role() != binary && role != FluxRole::Blend {
                findings.push(Finding::warning(
                    FindingCode::UnrecognizedParameter,
                    [name.as_str()],
                    format!(
                        "Flux parameter '{name}' does not apply to model type '{}'",
                        solution.model_type
                    ),
                ));
            }
        } else if checkable && !known.contains(name.as_str()) {
            findings.push(Finding::warning(
                FindingCode::UnrecognizedParameter,
                [name.as_str()],
                format!(
                    "Parameter '{name}' not recognized for model type '{}'",
                    solution.model_type
                ),
            ));
        }
    }

    for (band, roles) in &flux_by_band {
        let counterparts: Vec<String> = FluxRole::for_sources(binary)
            .iter()
            .filter(|role| !roles.contains(*role))
            .map(|role| format!("F{}_{}", band, role.suffix()))
            .filter(|name| !reported_missing.contains(name))
            .collect();
        if counterparts.is_empty() || roles.iter().all(|r| !FluxRole::for_sources(binary).contains(r)) {
            continue;
        }
        findings.push(Finding::warning(
            FindingCode::PartialFluxBand,
            counterparts.iter().map(String::as_str),
            format!(
                "Band '{band}' is only partially specified; add {} alongside the existing flux parameters",
                counterparts.join(" and ")
            ),
        ));
    }

    check_fit_statistics(solution, &mut findings);
    check_ranges(solution, &mut findings);
    findings
}

/// `'text'` for JSON strings, the JSON form otherwise.
fn quoted(raw: &serde_json::Value) -> String {
    match raw {
        serde_json::Value::String(s) => format!("'{s}'"),
        other => other.to_string(),
    }
}

fn check_fit_statistics(solution: &Solution, findings: &mut Vec<Finding>) {
    if let Some(raw) = solution.log_likelihood.as_ref().and_then(Lenient::malformed) {
        findings.push(Finding::error(
            FindingCode::NonNumericParameter,
            ["log_likelihood"],
            format!("log_likelihood should be numeric, got {}", quoted(raw)),
        ));
    }
    if let Some(raw) = solution.n_data_points.as_ref().and_then(Lenient::malformed) {
        findings.push(Finding::error(
            FindingCode::NonNumericParameter,
            ["n_data_points"],
            format!("n_data_points should be a non-negative integer, got {}", quoted(raw)),
        ));
    }
}

fn check_numeric(name: &str, value: &ParameterValue, findings: &mut Vec<Finding>) {
    match value {
        ParameterValue::Number(v) if !v.is_finite() => findings.push(Finding::error(
            FindingCode::NonNumericParameter,
            [name],
            format!("Parameter '{name}' must be a finite number, got {v}"),
        )),
        ParameterValue::Number(_) => {}
        other => findings.push(Finding::error(
            FindingCode::NonNumericParameter,
            [name],
            format!("Parameter '{name}' should be numeric, got {}", other.type_name()),
        )),
    }
}

fn check_ranges(solution: &Solution, findings: &mut Vec<Finding>) {
    let positive = [
        ("tE", "Einstein crossing time"),
        ("s", "Separation"),
        ("s1", "Separation"),
        ("s2", "Separation"),
    ];
    for (name, label) in positive {
        if let Some(v) = solution.param(name)
            && v <= 0.0
        {
            findings.push(Finding::error(
                FindingCode::ParameterOutOfRange,
                [name],
                format!("{label} ({name}) must be positive, got {v}"),
            ));
        }
    }

    for name in ["q", "q1", "q2"] {
        if let Some(v) = solution.param(name)
            && !(v > 0.0 && v <= 1.0)
        {
            findings.push(Finding::warning(
                FindingCode::ParameterOutOfRange,
                [name],
                format!("Mass ratio ({name}) should be between 0 and 1, got {v}"),
            ));
        }
    }

    let binary_lens = matches!(
        solution.model_type,
        ModelType::PointSourceBinaryLens | ModelType::BinarySourceBinaryLens
    );
    if binary_lens
        && let Some(s) = solution.param("s")
        && s > 0.0
        && !(0.5..=2.0).contains(&s)
    {
        findings.push(Finding::warning(
            FindingCode::ParameterOutOfRange,
            ["s"],
            format!("Separation (s) = {s} is outside the typical caustic-crossing range (0.5-2.0)"),
        ));
    }

    if let Some(p) = solution.relative_probability
        && !(0.0..=1.0).contains(&p)
    {
        findings.push(Finding::error(
            FindingCode::ProbabilityOutOfRange,
            ["relative_probability"],
            format!("Relative probability should be between 0 and 1, got {p}"),
        ));
    }
}
