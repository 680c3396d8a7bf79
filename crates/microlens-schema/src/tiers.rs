// SPDX-License-Identifier: MIT OR Apache-2.0
//! Challenge tiers and their event-identifier policies.
//!
//! Built-in tiers cover the current challenge. A YAML file can replace them:
//!
//! ```yaml
//! version: 1
//! tiers:
//!   practice:
//!     description: Practice events
//!     events:
//!       kind: range
//!       prefix: "rmdc26_"
//!       start: 0
//!       end: 50
//!     allowed_model_types: ["1S1L"]
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result, anyhow};
use microlens_common::{HigherOrderEffect, ModelType};
use serde::{Deserialize, Serialize};

/// Which event identifiers a tier admits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventPolicy {
    /// No identifier checks.
    Unchecked,
    /// Exactly these identifiers.
    List { ids: Vec<String> },
    /// `prefix` followed by a number in `start..=end`. With `width` set the
    /// number must be zero-padded to exactly that many digits.
    Range {
        prefix: String,
        start: u64,
        end: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<usize>,
    },
}

impl EventPolicy {
    /// `true` if `event_id` is valid under this policy.
    pub fn admits(&self, event_id: &str) -> bool {
        match self {
            Self::Unchecked => true,
            Self::List { ids } => ids.iter().any(|id| id == event_id),
            Self::Range { prefix, start, end, width } => {
                let Some(digits) = event_id.strip_prefix(prefix.as_str()) else {
                    return false;
                };
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return false;
                }
                if let Some(w) = width
                    && digits.len() != *w
                {
                    return false;
                }
                // Overlong digit strings overflow u64 and are out of range anyway.
                digits.parse::<u64>().is_ok_and(|n| (*start..=*end).contains(&n))
            }
        }
    }

    /// Short human-readable form used in finding messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Unchecked => "any event id".to_string(),
            Self::List { ids } if ids.len() <= 5 => format!("one of [{}]", ids.join(", ")),
            Self::List { ids } => {
                format!("one of [{}, ... {} more]", ids[..3].join(", "), ids.len() - 3)
            }
            Self::Range { prefix, start, end, width: Some(w) } => {
                format!("{prefix}{start:0w$} to {prefix}{end:0w$}", w = *w)
            }
            Self::Range { prefix, start, end, width: None } => {
                format!("{prefix}{start} to {prefix}{end}")
            }
        }
    }
}

/// One named tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierDefinition {
    #[serde(default)]
    pub description: String,
    pub events: EventPolicy,
    /// `None` permits every model type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_model_types: Option<Vec<ModelType>>,
    /// `None` permits every effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_effects: Option<Vec<HigherOrderEffect>>,
}

impl TierDefinition {
    pub fn unchecked(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            events: EventPolicy::Unchecked,
            allowed_model_types: None,
            allowed_effects: None,
        }
    }

    pub fn permits_model_type(&self, model_type: ModelType) -> bool {
        self.allowed_model_types.as_ref().is_none_or(|allowed| allowed.contains(&model_type))
    }

    pub fn permits_effect(&self, effect: HigherOrderEffect) -> bool {
        self.allowed_effects.as_ref().is_none_or(|allowed| allowed.contains(&effect))
    }
}

/// The set of tiers a submission may name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TierConfig {
    pub tiers: BTreeMap<String, TierDefinition>,
}

fn challenge_range(end: u64) -> EventPolicy {
    EventPolicy::Range { prefix: "rmdc26_".to_string(), start: 0, end, width: None }
}

fn builtin_tiers() -> TierConfig {
    let mut tiers = BTreeMap::new();
    tiers.insert(
        "beginner".to_string(),
        TierDefinition {
            description: "Beginner challenge tier, limited event set".to_string(),
            events: challenge_range(200),
            allowed_model_types: Some(vec![
                ModelType::PointSourcePointLens,
                ModelType::PointSourceBinaryLens,
                ModelType::BinarySourcePointLens,
            ]),
            allowed_effects: Some(vec![
                HigherOrderEffect::Parallax,
                HigherOrderEffect::FiniteSource,
            ]),
        },
    );
    tiers.insert(
        "experienced".to_string(),
        TierDefinition {
            description: "Experienced challenge tier, full event set".to_string(),
            events: challenge_range(2000),
            allowed_model_types: None,
            allowed_effects: None,
        },
    );
    tiers.insert(
        "test".to_string(),
        TierDefinition {
            description: "Testing tier for development".to_string(),
            events: EventPolicy::List {
                ids: ["rmdc26_2001", "rmdc26_2002", "rmdc26_2003"].map(String::from).to_vec(),
            },
            allowed_model_types: None,
            allowed_effects: None,
        },
    );
    tiers.insert(
        "2018-test".to_string(),
        TierDefinition {
            description: "2018 data challenge events (legacy identifiers)".to_string(),
            events: EventPolicy::Range {
                prefix: "ulwdc1_".to_string(),
                start: 1,
                end: 293,
                width: Some(3),
            },
            allowed_model_types: None,
            allowed_effects: None,
        },
    );
    tiers.insert("None".to_string(), TierDefinition::unchecked("No tier; event ids unchecked"));
    TierConfig { tiers }
}

static BUILTIN: OnceLock<TierConfig> = OnceLock::new();

impl TierConfig {
    /// Shared built-in tier table.
    pub fn builtin() -> &'static TierConfig {
        BUILTIN.get_or_init(builtin_tiers)
    }

    pub fn get(&self, name: &str) -> Option<&TierDefinition> {
        self.tiers.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tiers.keys().map(String::as_str)
    }

    /// Add or replace tiers from `other`.
    pub fn extend(&mut self, other: TierConfig) {
        self.tiers.extend(other.tiers);
    }
}

#[derive(Debug, Deserialize)]
struct TierFile {
    #[allow(dead_code)]
    version: u32,
    tiers: BTreeMap<String, TierDefinition>,
}

/// Load a tier table from a YAML file. The result replaces the built-ins;
/// use [`TierConfig::extend`] to merge.
pub fn load_tier_config(path: &Path) -> Result<TierConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read tier config '{}'", path.display()))?;
    let file: TierFile = serde_yaml::from_str(&text)
        .map_err(|e| anyhow!("invalid tier yaml '{}': {}", path.display(), e))?;

    for (name, tier) in &file.tiers {
        if let EventPolicy::Range { start, end, .. } = &tier.events
            && start > end
        {
            return Err(anyhow!(
                "tier '{}' in {}: range start {} exceeds end {}",
                name,
                path.display(),
                start,
                end
            ));
        }
    }
    Ok(TierConfig { tiers: file.tiers })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_policy_bounds_are_inclusive() {
        let p = challenge_range(200);
        assert!(p.admits("rmdc26_0"));
        assert!(p.admits("rmdc26_0200"));
        assert!(p.admits("rmdc26_200"));
        assert!(!p.admits("rmdc26_201"));
        assert!(!p.admits("rmdc26_"));
        assert!(!p.admits("rmdc26_-1"));
        assert!(!p.admits("rmdc25_0001"));
    }

    #[test]
    fn fixed_width_policy_requires_padding() {
        let tier = TierConfig::builtin().get("2018-test").unwrap();
        assert!(tier.events.admits("ulwdc1_001"));
        assert!(tier.events.admits("ulwdc1_293"));
        assert!(!tier.events.admits("ulwdc1_1"));
        assert!(!tier.events.admits("ulwdc1_0001"));
        assert!(!tier.events.admits("ulwdc1_000"));
        assert!(!tier.events.admits("ulwdc1_294"));
    }

    #[test]
    fn list_policy_is_exact() {
        let tier = TierConfig::builtin().get("test").unwrap();
        assert!(tier.events.admits("rmdc26_2002"));
        assert!(!tier.events.admits("RMDC26_2002"));
        assert!(!tier.events.admits("rmdc26_2004"));
    }

    #[test]
    fn overlong_suffix_is_rejected_not_panicking() {
        assert!(!challenge_range(u64::MAX).admits("rmdc26_99999999999999999999999"));
    }

    #[test]
    fn describe_forms() {
        assert_eq!(challenge_range(200).describe(), "rmdc26_0 to rmdc26_200");
        let legacy = &TierConfig::builtin().get("2018-test").unwrap().events;
        assert_eq!(legacy.describe(), "ulwdc1_001 to ulwdc1_293");
        let long = EventPolicy::List { ids: (0..8).map(|i| format!("e{i}")).collect() };
        assert_eq!(long.describe(), "one of [e0, e1, e2, ... 5 more]");
    }

    #[test]
    fn beginner_restricts_models_and_effects() {
        let tier = TierConfig::builtin().get("beginner").unwrap();
        assert!(tier.permits_model_type(ModelType::PointSourceBinaryLens));
        assert!(!tier.permits_model_type(ModelType::PointSourceTripleLens));
        assert!(tier.permits_effect(HigherOrderEffect::Parallax));
        assert!(!tier.permits_effect(HigherOrderEffect::Xallarap));

        let open = TierConfig::builtin().get("experienced").unwrap();
        assert!(open.permits_model_type(ModelType::Other));
    }

    #[test]
    fn extend_replaces_by_name() {
        let mut cfg = TierConfig::builtin().clone();
        let mut extra = TierConfig::default();
        extra.tiers.insert("test".to_string(), TierDefinition::unchecked("relaxed"));
        cfg.extend(extra);
        assert_eq!(cfg.get("test").unwrap().events, EventPolicy::Unchecked);
        assert!(cfg.get("beginner").is_some());
    }

    #[test]
    fn load_from_yaml() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            tmp.path(),
            r#"
version: 1
tiers:
  practice:
    description: Practice events
    events:
      kind: range
      prefix: "rmdc26_"
      start: 0
      end: 50
    allowed_model_types: ["1S1L"]
  open:
    events:
      kind: unchecked
"#,
        )
        .unwrap();
        let cfg = load_tier_config(tmp.path()).unwrap();
        assert_eq!(cfg.names().collect::<Vec<_>>(), vec!["open", "practice"]);
        let practice = cfg.get("practice").unwrap();
        assert!(practice.events.admits("rmdc26_0050"));
        assert!(!practice.permits_model_type(ModelType::PointSourceBinaryLens));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            tmp.path(),
            "version: 1\ntiers:\n  bad:\n    events: {kind: range, prefix: x, start: 9, end: 1}\n",
        )
        .unwrap();
        let err = load_tier_config(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("range start 9 exceeds end 1"));
    }
}
