// SPDX-License-Identifier: MIT OR Apache-2.0
//! Submission-level validation pass.
//!
//! Walks events and solutions, runs every per-solution validator, derives
//! relative probabilities per event, and checks cross-solution invariants.
//! The pass never short-circuits: every finding is collected into one flat,
//! deterministically ordered list.

use std::collections::{BTreeMap, BTreeSet};

use microlens_common::{
    Event, Finding, FindingCode, Solution, Submission, ValidationConfig, count_by_severity,
    has_errors,
};
use microlens_schema::{Registry, TierConfig, TierDefinition};
use serde::Serialize;
use tracing::debug;

use crate::parameters::validate_parameters;
use crate::physical::validate_physical_parameters;
use crate::probability::{EventProbabilities, compute_relative_probabilities};
use crate::tier::{unknown_tier, validate_event_id, validate_tier_choices};
use crate::uncertainty::validate_uncertainties;

/// Outcome of one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub findings: Vec<Finding>,
    pub probabilities: Vec<EventProbabilities>,
}

impl ValidationReport {
    pub fn has_errors(&self) -> bool {
        has_errors(&self.findings)
    }

    /// `(errors, warnings)`.
    pub fn counts(&self) -> (usize, usize) {
        count_by_severity(&self.findings)
    }

    pub fn for_event<'a>(&'a self, event_id: &'a str) -> impl Iterator<Item = &'a Finding> {
        self.findings.iter().filter(move |f| f.event_id.as_deref() == Some(event_id))
    }

    pub fn probabilities_for(&self, event_id: &str) -> Option<&EventProbabilities> {
        self.probabilities.iter().find(|p| p.event_id == event_id)
    }
}

/// Validation engine with its registry, tier table and thresholds fixed at
/// construction.
#[derive(Debug, Clone)]
pub struct SubmissionValidator {
    registry: Registry,
    tiers: TierConfig,
    config: ValidationConfig,
}

impl Default for SubmissionValidator {
    fn default() -> Self {
        Self::new(Registry::builtin().clone(), TierConfig::builtin().clone(), ValidationConfig::default())
    }
}

impl SubmissionValidator {
    pub fn new(registry: Registry, tiers: TierConfig, config: ValidationConfig) -> Self {
        Self { registry, tiers, config }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn tiers(&self) -> &TierConfig {
        &self.tiers
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Parameter, physical and uncertainty checks for one solution.
    pub fn validate_solution(&self, solution: &Solution) -> Vec<Finding> {
        let mut findings = validate_parameters(solution, &self.registry);
        findings.extend(validate_physical_parameters(solution, &self.registry, &self.config));
        findings.extend(validate_uncertainties(solution, &self.registry, &self.config));
        let id = solution.solution_id.as_str();
        findings.into_iter().map(|f| f.in_solution(id)).collect()
    }

    /// Every check scoped to one event. `tier` is `None` when the
    /// submission's tier is missing or unknown.
    pub fn validate_event(
        &self,
        event: &Event,
        tier: Option<(&str, &TierDefinition)>,
    ) -> (Vec<Finding>, EventProbabilities) {
        let event_id = event.event_id.as_str();
        let mut findings = Vec::new();

        if let Some((name, def)) = tier
            && let Some(f) = validate_event_id(event_id, name, def)
        {
            findings.push(f);
        }

        findings.extend(duplicate_solution_ids(event));

        for solution in &event.solutions {
            if let Some((name, def)) = tier {
                findings.extend(
                    validate_tier_choices(solution, name, def)
                        .into_iter()
                        .map(|f| f.in_solution(&solution.solution_id)),
                );
            }
            findings.extend(self.validate_solution(solution));
        }

        if !event.solutions.is_empty() && event.active_solutions().next().is_none() {
            findings.push(Finding::warning(
                FindingCode::NoActiveSolutions,
                ["is_active"],
                format!("Event '{event_id}' has no active solutions and will be excluded from export"),
            ));
        }

        let mut probabilities = compute_relative_probabilities(event, &self.registry, &self.config);
        findings.append(&mut probabilities.findings);
        findings.extend(duplicate_aliases(event));

        let findings = findings.into_iter().map(|f| f.in_event(event_id)).collect();
        (findings, probabilities)
    }

    /// Validate a whole submission.
    pub fn validate(&self, submission: &Submission) -> ValidationReport {
        let mut report = ValidationReport::default();

        if submission.team_name.trim().is_empty() {
            report.findings.push(Finding::warning(
                FindingCode::MissingTeamName,
                ["team_name"],
                "team_name is required",
            ));
        }
        if submission.repo_url.as_deref().is_none_or(|url| url.trim().is_empty()) {
            report.findings.push(Finding::warning(
                FindingCode::MissingRepoUrl,
                ["repo_url"],
                "repo_url is required (GitHub repository URL)",
            ));
        }

        let tier_name = submission.tier.trim();
        let tier = if tier_name.is_empty() {
            report.findings.push(Finding::warning(
                FindingCode::MissingTier,
                ["tier"],
                "tier is required; event IDs unchecked",
            ));
            None
        } else {
            match self.tiers.get(tier_name) {
                Some(def) => Some((tier_name, def)),
                None => {
                    report.findings.push(unknown_tier(tier_name, &self.tiers));
                    None
                }
            }
        };

        let mut seen_events = BTreeSet::new();
        for event in &submission.events {
            if !seen_events.insert(event.event_id.as_str()) {
                report.findings.push(
                    Finding::error(
                        FindingCode::DuplicateEventId,
                        ["event_id"],
                        format!("Event '{}' appears more than once in the submission", event.event_id),
                    )
                    .in_event(&event.event_id),
                );
            }
            let (findings, probabilities) = self.validate_event(event, tier);
            debug!(
                event = %event.event_id,
                solutions = event.solutions.len(),
                findings = findings.len(),
                "validated event"
            );
            report.findings.extend(findings);
            report.probabilities.push(probabilities);
        }

        let (errors, warnings) = report.counts();
        debug!(events = submission.events.len(), errors, warnings, "validation pass complete");
        report
    }
}

fn duplicate_solution_ids(event: &Event) -> Vec<Finding> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for s in &event.solutions {
        *counts.entry(s.solution_id.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(id, n)| {
            Finding::error(
                FindingCode::DuplicateSolutionId,
                ["solution_id"],
                format!("Solution id '{id}' is used by {n} solutions in event '{}'", event.event_id),
            )
            .in_solution(id)
        })
        .collect()
}

/// One finding per alias shared by more than one solution (active or not).
fn duplicate_aliases(event: &Event) -> Vec<Finding> {
    let mut by_alias: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for s in &event.solutions {
        if let Some(alias) = s.alias.as_deref().filter(|a| !a.is_empty()) {
            by_alias.entry(alias).or_default().push(s.solution_id.as_str());
        }
    }
    by_alias
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .map(|(alias, ids)| {
            Finding::error(
                FindingCode::DuplicateAlias,
                std::iter::once("alias").chain(ids.iter().copied()),
                format!(
                    "Duplicate alias '{alias}' found in event '{}' for solutions [{}]. \
                     Aliases must be unique within each event; rename one of them.",
                    event.event_id,
                    ids.join(", ")
                ),
            )
        })
        .collect()
}
