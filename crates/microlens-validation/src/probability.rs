// SPDX-License-Identifier: MIT OR Apache-2.0
//! Relative-probability derivation across an event's active solutions.
//!
//! Explicit `relative_probability` values in `[0, 1]` are kept as given;
//! out-of-range values are treated as unset. Remaining mass
//! is split by information criterion `IC = k·ln(n) − 2·lnL`, weighted
//! `exp(−ΔIC / 2)`, with an equal share for solutions lacking the inputs.
//! Input records are never modified; callers persist the estimates if they
//! choose to.

use microlens_common::{Event, Finding, FindingCode, Solution, ValidationConfig};
use microlens_schema::Registry;
use serde::Serialize;
use tracing::{debug, warn};

use crate::free_params::count_free_parameters;

/// How a probability was obtained.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProbabilitySource {
    /// The only active solution in its event.
    Sole,
    /// Supplied by the user.
    Provided,
    /// Weighted by information criterion.
    InformationCriterion { ic: f64, k: usize },
    /// Equal share of the unassigned mass (IC inputs missing).
    EqualShare,
    /// Equal split across every active solution after an overflow.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbabilityEstimate {
    pub solution_id: String,
    pub probability: f64,
    pub source: ProbabilitySource,
}

/// Estimates for one event, in active-solution order, plus any findings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventProbabilities {
    pub event_id: String,
    pub estimates: Vec<ProbabilityEstimate>,
    #[serde(skip)]
    pub findings: Vec<Finding>,
}

impl EventProbabilities {
    pub fn get(&self, solution_id: &str) -> Option<f64> {
        self.estimates.iter().find(|e| e.solution_id == solution_id).map(|e| e.probability)
    }

    pub fn total(&self) -> f64 {
        self.estimates.iter().map(|e| e.probability).sum()
    }
}

/// `k·ln(n) − 2·lnL`.
pub fn information_criterion(k: usize, n_data_points: u64, log_likelihood: f64) -> f64 {
    k as f64 * (n_data_points as f64).ln() - 2.0 * log_likelihood
}

/// IC and `k` if the solution has everything the criterion needs.
fn ic_of(solution: &Solution, registry: &Registry) -> Option<(f64, usize)> {
    let log_l = solution.log_likelihood_value().filter(|v| v.is_finite())?;
    let n = solution.data_point_count().filter(|n| *n > 0)?;
    let k = count_free_parameters(solution, registry);
    if k == 0 {
        return None;
    }
    Some((information_criterion(k, n, log_l), k))
}

/// Derive relative probabilities for the active solutions of `event`.
pub fn compute_relative_probabilities(
    event: &Event,
    registry: &Registry,
    config: &ValidationConfig,
) -> EventProbabilities {
    let event_id = event.event_id.as_str();
    let active: Vec<&Solution> = event.active_solutions().collect();
    let mut out = EventProbabilities { event_id: event_id.to_string(), ..Default::default() };

    match active.as_slice() {
        [] => return out,
        [only] => {
            out.estimates.push(ProbabilityEstimate {
                solution_id: only.solution_id.clone(),
                probability: 1.0,
                source: ProbabilitySource::Sole,
            });
            return out;
        }
        _ => {}
    }

    for s in active.iter().filter(|s| s.relative_probability.is_some() && explicit(s).is_none()) {
        warn!(
            event = %event_id,
            solution = %s.solution_id,
            value = ?s.relative_probability,
            "ignoring relative_probability outside [0, 1]"
        );
    }
    let fixed_sum: f64 = active.iter().filter_map(|s| explicit(s)).sum();
    let free: Vec<&Solution> = active.iter().copied().filter(|s| explicit(s).is_none()).collect();

    if free.is_empty() {
        if (fixed_sum - 1.0).abs() > config.probability_sum_tol {
            out.findings.push(
                Finding::warning(
                    FindingCode::ProbabilitySumMismatch,
                    ["relative_probability"],
                    format!(
                        "Relative probabilities of the {} active solutions sum to {fixed_sum}, expected 1.0",
                        active.len()
                    ),
                )
                .in_event(event_id),
            );
        }
        out.estimates = active.iter().filter_map(|s| explicit(s).map(|p| provided(s, p))).collect();
        return out;
    }

    if fixed_sum > 1.0 + config.probability_sum_tol {
        warn!(event = %event_id, fixed_sum, "explicit probabilities exceed 1; splitting equally");
        out.findings.push(
            Finding::error(
                FindingCode::ProbabilityOverflow,
                ["relative_probability"],
                format!(
                    "Explicit relative probabilities already sum to {fixed_sum} (> 1.0); \
                     falling back to an equal split across {} active solutions",
                    active.len()
                ),
            )
            .in_event(event_id),
        );
        let share = 1.0 / active.len() as f64;
        out.estimates = active
            .iter()
            .map(|s| ProbabilityEstimate {
                solution_id: s.solution_id.clone(),
                probability: share,
                source: ProbabilitySource::Fallback,
            })
            .collect();
        return out;
    }

    let leftover = (1.0 - fixed_sum).max(0.0);
    let mut derived = distribute(&free, leftover, registry);
    if derived.iter().any(|e| e.source == ProbabilitySource::EqualShare) {
        warn!(event = %event_id, "relative_probability set equally for solutions missing likelihood data");
    }

    out.estimates = active
        .iter()
        .map(|s| match explicit(s) {
            Some(p) => provided(s, p),
            None => {
                let pos = derived.iter().position(|e| e.solution_id == s.solution_id);
                // `derived` holds exactly one entry per free solution.
                pos.map(|i| derived.swap_remove(i)).unwrap_or_else(|| ProbabilityEstimate {
                    solution_id: s.solution_id.clone(),
                    probability: 0.0,
                    source: ProbabilitySource::EqualShare,
                })
            }
        })
        .collect();

    for e in &out.estimates {
        debug!(event = %event_id, solution = %e.solution_id, probability = e.probability, "relative probability");
    }
    out
}

/// The user's probability if it is usable; values outside `[0, 1]` are
/// reported by the parameter checks and treated as unset here.
fn explicit(solution: &Solution) -> Option<f64> {
    solution.relative_probability.filter(|p| (0.0..=1.0).contains(p))
}

fn provided(solution: &Solution, probability: f64) -> ProbabilityEstimate {
    ProbabilityEstimate {
        solution_id: solution.solution_id.clone(),
        probability,
        source: ProbabilitySource::Provided,
    }
}

/// Split `mass` over `free`: equal shares for solutions without IC inputs,
/// IC weights over the rest of the mass.
fn distribute(free: &[&Solution], mass: f64, registry: &Registry) -> Vec<ProbabilityEstimate> {
    let scored: Vec<(&Solution, Option<(f64, usize)>)> =
        free.iter().map(|s| (*s, ic_of(s, registry))).collect();
    let n_missing = scored.iter().filter(|(_, ic)| ic.is_none()).count();
    let share = mass / free.len() as f64;
    let ic_mass = mass - share * n_missing as f64;

    let ic_min = scored.iter().filter_map(|(_, ic)| ic.map(|(v, _)| v)).fold(f64::INFINITY, f64::min);
    let weight = |ic: f64| (-0.5 * (ic - ic_min)).exp();
    let weight_sum: f64 = scored.iter().filter_map(|(_, ic)| ic.map(|(v, _)| weight(v))).sum();

    scored
        .into_iter()
        .map(|(s, ic)| match ic {
            Some((value, k)) => ProbabilityEstimate {
                solution_id: s.solution_id.clone(),
                probability: ic_mass * weight(value) / weight_sum,
                source: ProbabilitySource::InformationCriterion { ic: value, k },
            },
            None => ProbabilityEstimate {
                solution_id: s.solution_id.clone(),
                probability: share,
                source: ProbabilitySource::EqualShare,
            },
        })
        .collect()
}
