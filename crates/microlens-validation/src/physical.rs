// SPDX-License-Identifier: MIT OR Apache-2.0
//! Self-consistency checks over derived physical parameters.
//!
//! Every check runs independently so one failure never hides another.

use microlens_common::{Finding, FindingCode, Solution, ValidationConfig};
use microlens_schema::Registry;
use microlens_schema::physical::{
    COMPONENT_MASSES, LENS_DISTANCE, SOURCE_DISTANCE, TOTAL_MASS, VECTORS, mass_fields,
};

/// `|a - b|` relative to the larger magnitude; zero when both are zero.
pub(crate) fn relative_difference(a: f64, b: f64) -> f64 {
    let scale = a.abs().max(b.abs());
    if scale == 0.0 { 0.0 } else { (a - b).abs() / scale }
}

fn percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Check a solution's `physical_parameters`. Returns nothing when the map is empty.
pub fn validate_physical_parameters(
    solution: &Solution,
    registry: &Registry,
    config: &ValidationConfig,
) -> Vec<Finding> {
    let params = &solution.physical_parameters;
    let mut findings = Vec::new();
    if params.is_empty() {
        return findings;
    }

    for (name, value) in params {
        if !registry.is_physical(name) {
            findings.push(Finding::warning(
                FindingCode::UnknownPhysicalParameter,
                [name.as_str()],
                format!("Unknown physical parameter '{name}'"),
            ));
        }
        if value.as_f64().is_none() {
            findings.push(Finding::error(
                FindingCode::NonNumericParameter,
                [name.as_str()],
                format!("Physical parameter '{name}' should be numeric, got {}", value.type_name()),
            ));
        }
    }

    check_signs(solution, &mut findings);
    check_mass_budget(solution, config, &mut findings);
    check_vectors(solution, config, &mut findings);
    check_distances(solution, config, &mut findings);
    check_mass_magnitudes(solution, config, &mut findings);
    findings
}

fn check_signs(solution: &Solution, findings: &mut Vec<Finding>) {
    let strictly_positive =
        mass_fields().chain([LENS_DISTANCE, SOURCE_DISTANCE, "thetaE"]);
    for name in strictly_positive {
        if let Some(v) = solution.physical(name)
            && !(v > 0.0 && v.is_finite())
        {
            findings.push(Finding::error(
                FindingCode::ParameterOutOfRange,
                [name],
                format!("Physical parameter '{name}' must be positive, got {v}"),
            ));
        }
    }
    for spec in VECTORS {
        if let Some(v) = solution.physical(spec.magnitude)
            && !(v >= 0.0 && v.is_finite())
        {
            findings.push(Finding::error(
                FindingCode::ParameterOutOfRange,
                [spec.magnitude],
                format!("Magnitude '{}' must be non-negative, got {v}", spec.magnitude),
            ));
        }
    }
}

fn check_mass_budget(solution: &Solution, config: &ValidationConfig, findings: &mut Vec<Finding>) {
    let Some(total) = solution.physical(TOTAL_MASS) else {
        return;
    };
    let components: Vec<(&str, f64)> = COMPONENT_MASSES
        .iter()
        .filter_map(|name| solution.physical(name).map(|v| (*name, v)))
        .collect();
    if components.is_empty() {
        return;
    }

    let sum: f64 = components.iter().map(|(_, v)| v).sum();
    let diff = relative_difference(total, sum);
    if diff > config.mass_budget_rel_tol {
        let names: Vec<&str> = components.iter().map(|(n, _)| *n).collect();
        findings.push(Finding::error(
            FindingCode::MassBudgetMismatch,
            std::iter::once(TOTAL_MASS).chain(names.iter().copied()),
            format!(
                "Total mass Mtot = {total} does not match {} = {sum} ({} difference, tolerance {})",
                names.join(" + "),
                percent(diff),
                percent(config.mass_budget_rel_tol)
            ),
        ));
    }
}

fn check_vectors(solution: &Solution, config: &ValidationConfig, findings: &mut Vec<Finding>) {
    for spec in VECTORS {
        let Some(magnitude) = solution.physical(spec.magnitude) else {
            continue;
        };
        for pair in spec.components {
            let (Some(a), Some(b)) = (solution.physical(pair.first), solution.physical(pair.second)) else {
                continue;
            };
            let norm = a.hypot(b);
            let diff = relative_difference(magnitude, norm);
            if diff > config.vector_rel_tol {
                findings.push(Finding::error(
                    FindingCode::VectorMagnitudeMismatch,
                    [spec.magnitude, pair.first, pair.second],
                    format!(
                        "{} magnitude {} = {magnitude} does not match the {} components \
                         ({}, {}) with norm {norm:.6} ({} difference)",
                        spec.label,
                        spec.magnitude,
                        pair.frame,
                        pair.first,
                        pair.second,
                        percent(diff)
                    ),
                ));
            }
        }
    }
}

fn check_distances(solution: &Solution, config: &ValidationConfig, findings: &mut Vec<Finding>) {
    let lens = solution.physical(LENS_DISTANCE);
    let source = solution.physical(SOURCE_DISTANCE);

    if let (Some(d_l), Some(d_s)) = (lens, source)
        && d_l >= d_s
    {
        findings.push(Finding::error(
            FindingCode::DistanceOrderViolation,
            [LENS_DISTANCE, SOURCE_DISTANCE],
            format!("Lens distance D_L = {d_l} kpc must be less than source distance D_S = {d_s} kpc"),
        ));
    }

    for (name, value) in [(LENS_DISTANCE, lens), (SOURCE_DISTANCE, source)] {
        if let Some(d) = value
            && d > config.max_plausible_distance_kpc
        {
            findings.push(Finding::warning(
                FindingCode::ImplausibleDistance,
                [name],
                format!(
                    "{name} = {d} kpc is unusually large (above {} kpc)",
                    config.max_plausible_distance_kpc
                ),
            ));
        }
    }
}

fn check_mass_magnitudes(
    solution: &Solution,
    config: &ValidationConfig,
    findings: &mut Vec<Finding>,
) {
    for name in mass_fields() {
        if let Some(m) = solution.physical(name)
            && m > config.max_plausible_mass_msun
        {
            findings.push(Finding::warning(
                FindingCode::ImplausibleMass,
                [name],
                format!(
                    "{name} = {m} Msun is unusually large (above {} Msun); check the units",
                    config.max_plausible_mass_msun
                ),
            ));
        }
    }
}
