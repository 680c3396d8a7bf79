// SPDX-License-Identifier: MIT OR Apache-2.0
//! Validation tolerances and thresholds.
//!
//! Defaults reproduce the published submission rules. A YAML file can
//! override any subset:
//!
//! ```yaml
//! version: 1
//! validation:
//!   mass_budget_rel_tol: 0.02
//!   max_plausible_distance_kpc: 30.0
//! ```

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Numeric thresholds used by the validators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    /// Relative tolerance between `Mtot` and the sum of component masses.
    pub mass_budget_rel_tol: f64,
    /// Relative tolerance between a vector magnitude and its component norm.
    pub vector_rel_tol: f64,
    /// Distances above this (kpc) are flagged as implausible.
    pub max_plausible_distance_kpc: f64,
    /// Masses above this (solar masses) are flagged as implausible.
    pub max_plausible_mass_msun: f64,
    /// Relative uncertainty above this fraction of |value| is flagged.
    pub uncertainty_large_fraction: f64,
    /// Relative uncertainty below this fraction of |value| is flagged.
    pub uncertainty_small_fraction: f64,
    /// Allowed deviation of a probability sum from 1.0.
    pub probability_sum_tol: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            mass_budget_rel_tol: 0.01,
            vector_rel_tol: 0.01,
            max_plausible_distance_kpc: 25.0,
            max_plausible_mass_msun: 20.0,
            uncertainty_large_fraction: 0.5,
            uncertainty_small_fraction: 0.001,
            probability_sum_tol: 1e-3,
        }
    }
}

impl ValidationConfig {
    /// Reject thresholds that would make the checks meaningless.
    pub fn check(&self) -> Result<()> {
        let positive = [
            ("mass_budget_rel_tol", self.mass_budget_rel_tol),
            ("vector_rel_tol", self.vector_rel_tol),
            ("max_plausible_distance_kpc", self.max_plausible_distance_kpc),
            ("max_plausible_mass_msun", self.max_plausible_mass_msun),
            ("uncertainty_large_fraction", self.uncertainty_large_fraction),
            ("uncertainty_small_fraction", self.uncertainty_small_fraction),
            ("probability_sum_tol", self.probability_sum_tol),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(anyhow!("'{}' must be a positive finite number, got {}", name, value));
            }
        }
        if self.uncertainty_small_fraction >= self.uncertainty_large_fraction {
            return Err(anyhow!(
                "uncertainty_small_fraction ({}) must be below uncertainty_large_fraction ({})",
                self.uncertainty_small_fraction,
                self.uncertainty_large_fraction
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[allow(dead_code)]
    version: u32,
    #[serde(default)]
    validation: ValidationConfig,
}

/// Load validation thresholds from a YAML file.
pub fn load_validation_config(path: &Path) -> Result<ValidationConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read validation config '{}'", path.display()))?;
    let file: ConfigFile = serde_yaml::from_str(&text)
        .map_err(|e| anyhow!("invalid validation config yaml '{}': {}", path.display(), e))?;
    file.validation.check().with_context(|| format!("in {}", path.display()))?;
    Ok(file.validation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_their_own_check() {
        ValidationConfig::default().check().unwrap();
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            tmp.path(),
            "version: 1\nvalidation:\n  mass_budget_rel_tol: 0.05\n  max_plausible_distance_kpc: 30.0\n",
        )
        .unwrap();
        let cfg = load_validation_config(tmp.path()).unwrap();
        assert_eq!(cfg.mass_budget_rel_tol, 0.05);
        assert_eq!(cfg.max_plausible_distance_kpc, 30.0);
        assert_eq!(cfg.vector_rel_tol, 0.01);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "version: 1\nvalidation:\n  mass_tol: 0.05\n").unwrap();
        assert!(load_validation_config(tmp.path()).is_err());
    }

    #[test]
    fn inverted_uncertainty_thresholds_are_rejected() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            tmp.path(),
            "version: 1\nvalidation:\n  uncertainty_small_fraction: 0.9\n",
        )
        .unwrap();
        let err = load_validation_config(tmp.path()).unwrap_err();
        assert!(format!("{err:#}").contains("uncertainty_small_fraction"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_validation_config(Path::new("/nonexistent/validation.yaml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/validation.yaml"));
    }
}
