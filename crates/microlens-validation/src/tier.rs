// SPDX-License-Identifier: MIT OR Apache-2.0
//! Tier checks: event identifiers and permitted model choices.
//!
//! Everything here is advisory; an event outside its tier is reported as a
//! warning because submissions may reference such events during testing.

use microlens_common::{Finding, FindingCode, Solution};
use microlens_schema::{TierConfig, TierDefinition};

/// Warning for a tier name absent from the configuration.
pub fn unknown_tier(tier_name: &str, tiers: &TierConfig) -> Finding {
    Finding::warning(
        FindingCode::UnknownTier,
        ["tier"],
        format!(
            "Tier '{tier_name}' not recognized, event IDs unchecked (known tiers: {})",
            tiers.names().collect::<Vec<_>>().join(", ")
        ),
    )
}

/// Check one event identifier against a known tier.
pub fn validate_event_id(event_id: &str, tier_name: &str, tier: &TierDefinition) -> Option<Finding> {
    if tier.events.admits(event_id) {
        return None;
    }
    Some(
        Finding::warning(
            FindingCode::EventIdNotInTier,
            ["event_id"],
            format!(
                "Event '{event_id}' is not part of tier '{tier_name}' (expected {})",
                tier.events.describe()
            ),
        )
        .in_event(event_id),
    )
}

/// Check a solution's model type and effects against the tier's allow-lists.
pub fn validate_tier_choices(solution: &Solution, tier_name: &str, tier: &TierDefinition) -> Vec<Finding> {
    let mut findings = Vec::new();
    if !tier.permits_model_type(solution.model_type) {
        findings.push(Finding::warning(
            FindingCode::ModelTypeNotPermitted,
            ["model_type"],
            format!("Model type '{}' is not permitted in tier '{tier_name}'", solution.model_type),
        ));
    }
    for effect in solution.effects() {
        if !tier.permits_effect(effect) {
            findings.push(Finding::warning(
                FindingCode::EffectNotPermitted,
                ["higher_order_effects"],
                format!("Higher-order effect '{effect}' is not permitted in tier '{tier_name}'"),
            ));
        }
    }
    findings
}
