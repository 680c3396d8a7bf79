// SPDX-License-Identifier: MIT OR Apache-2.0
//! Solution, event and submission records.
//!
//! Records are plain data: they derive serde so a caller can load them from
//! the on-disk JSON layout, and expose a small set of mutators. Mutators
//! reject structurally malformed values with [`SolutionError`]; everything
//! else (missing parameters, inconsistent physics) is left for the validators
//! to report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SolutionError};
use crate::model::{HigherOrderEffect, ModelType, UncertaintyMethod};
use crate::uncertainty::Uncertainty;

/// A fitted parameter value.
///
/// Non-numeric JSON is kept as [`ParameterValue::Other`] rather than rejected
/// at load time, so validation can report it with a specific code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Number(f64),
    Other(serde_json::Value),
}

impl ParameterValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Other(_) => None,
        }
    }

    /// Short type label used in messages (`number`, `string`, `object`, ...).
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Other(v) => json_type_name(v),
        }
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// A typed scalar that falls back to the raw JSON when the input does not fit.
///
/// Loading never fails on a wrong-typed field; the validators report it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Lenient<T> {
    Valid(T),
    Malformed(serde_json::Value),
}

impl<T: Copy> Lenient<T> {
    pub fn valid(&self) -> Option<T> {
        match self {
            Self::Valid(v) => Some(*v),
            Self::Malformed(_) => None,
        }
    }
}

impl<T> Lenient<T> {
    pub fn malformed(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Valid(_) => None,
            Self::Malformed(raw) => Some(raw),
        }
    }
}

pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

fn default_confidence_level() -> f64 {
    0.68
}

fn default_active() -> bool {
    true
}

/// One model fit submitted against an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub solution_id: String,
    pub model_type: ModelType,
    #[serde(default)]
    pub higher_order_effects: Vec<Lenient<HigherOrderEffect>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t_ref: Option<f64>,
    #[serde(default)]
    pub bands: Vec<String>,
    #[serde(default)]
    pub parameters: BTreeMap<String, ParameterValue>,
    #[serde(default)]
    pub parameter_uncertainties: BTreeMap<String, Uncertainty>,
    #[serde(default)]
    pub physical_parameters: BTreeMap<String, ParameterValue>,
    #[serde(default)]
    pub physical_parameter_uncertainties: BTreeMap<String, Uncertainty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uncertainty_method: Option<UncertaintyMethod>,
    #[serde(default = "default_confidence_level")]
    pub confidence_level: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_likelihood: Option<Lenient<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_data_points: Option<Lenient<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_probability: Option<f64>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limb_darkening_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limb_darkening_coeffs: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

impl Solution {
    /// Minimal solution: identifier and model type, everything else empty.
    pub fn new(solution_id: impl Into<String>, model_type: ModelType) -> Self {
        Self {
            solution_id: solution_id.into(),
            model_type,
            higher_order_effects: Vec::new(),
            t_ref: None,
            bands: Vec::new(),
            parameters: BTreeMap::new(),
            parameter_uncertainties: BTreeMap::new(),
            physical_parameters: BTreeMap::new(),
            physical_parameter_uncertainties: BTreeMap::new(),
            uncertainty_method: None,
            confidence_level: default_confidence_level(),
            log_likelihood: None,
            n_data_points: None,
            relative_probability: None,
            is_active: true,
            alias: None,
            limb_darkening_model: None,
            limb_darkening_coeffs: None,
            notes: String::new(),
        }
    }

    pub fn set_parameter(&mut self, name: impl Into<String>, value: f64) -> &mut Self {
        self.parameters.insert(name.into(), ParameterValue::Number(value));
        self
    }

    /// Assign a parameter from untyped input.
    ///
    /// Anything but a finite JSON number is rejected; the map is left
    /// untouched on error.
    pub fn set_parameter_value(
        &mut self,
        name: impl Into<String>,
        value: serde_json::Value,
    ) -> Result<&mut Self> {
        let name = name.into();
        let number = match &value {
            serde_json::Value::Number(n) => n.as_f64(),
            _ => None,
        };
        let Some(number) = number else {
            return Err(SolutionError::NonNumericParameter {
                name,
                found: json_type_name(&value).to_string(),
            });
        };
        if !number.is_finite() {
            return Err(SolutionError::NonFiniteParameter { name, value: number });
        }
        self.parameters.insert(name, ParameterValue::Number(number));
        Ok(self)
    }

    pub fn remove_parameter(&mut self, name: &str) -> Option<ParameterValue> {
        self.parameters.remove(name)
    }

    /// Numeric value of a fitted parameter, if present and numeric.
    pub fn param(&self, name: &str) -> Option<f64> {
        self.parameters.get(name).and_then(ParameterValue::as_f64)
    }

    pub fn set_uncertainty(&mut self, name: impl Into<String>, value: impl Into<Uncertainty>) -> &mut Self {
        self.parameter_uncertainties.insert(name.into(), value.into());
        self
    }

    pub fn set_physical_parameter(&mut self, name: impl Into<String>, value: f64) -> &mut Self {
        self.physical_parameters.insert(name.into(), ParameterValue::Number(value));
        self
    }

    /// Numeric value of a physical parameter, if present and numeric.
    pub fn physical(&self, name: &str) -> Option<f64> {
        self.physical_parameters.get(name).and_then(ParameterValue::as_f64)
    }

    pub fn set_physical_uncertainty(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Uncertainty>,
    ) -> &mut Self {
        self.physical_parameter_uncertainties.insert(name.into(), value.into());
        self
    }

    pub fn add_effect(&mut self, effect: HigherOrderEffect) -> &mut Self {
        if !self.has_effect(effect) {
            self.higher_order_effects.push(Lenient::Valid(effect));
        }
        self
    }

    /// Recognized effects in declaration order.
    pub fn effects(&self) -> impl Iterator<Item = HigherOrderEffect> + '_ {
        self.higher_order_effects.iter().filter_map(Lenient::valid)
    }

    pub fn has_effect(&self, effect: HigherOrderEffect) -> bool {
        self.effects().any(|e| e == effect)
    }

    /// Effect tags that did not match any known effect, as loaded.
    pub fn unrecognized_effects(&self) -> impl Iterator<Item = &serde_json::Value> {
        self.higher_order_effects.iter().filter_map(Lenient::malformed)
    }

    pub fn add_band(&mut self, band: impl Into<String>) -> &mut Self {
        let band = band.into();
        if !self.bands.contains(&band) {
            self.bands.push(band);
        }
        self
    }

    pub fn set_relative_probability(&mut self, value: Option<f64>) -> Result<&mut Self> {
        if let Some(p) = value
            && !(0.0..=1.0).contains(&p)
        {
            return Err(SolutionError::ProbabilityOutOfRange(p));
        }
        self.relative_probability = value;
        Ok(self)
    }

    pub fn set_confidence_level(&mut self, level: f64) -> Result<&mut Self> {
        if !(level > 0.0 && level < 1.0) {
            return Err(SolutionError::ConfidenceLevelOutOfRange(level));
        }
        self.confidence_level = level;
        Ok(self)
    }

    pub fn set_likelihood(&mut self, log_likelihood: f64, n_data_points: u64) -> &mut Self {
        self.log_likelihood = Some(Lenient::Valid(log_likelihood));
        self.n_data_points = Some(Lenient::Valid(n_data_points));
        self
    }

    /// `log_likelihood` if it loaded as a number.
    pub fn log_likelihood_value(&self) -> Option<f64> {
        self.log_likelihood.as_ref().and_then(Lenient::valid)
    }

    /// `n_data_points` if it loaded as a non-negative integer.
    pub fn data_point_count(&self) -> Option<u64> {
        self.n_data_points.as_ref().and_then(Lenient::valid)
    }

    pub fn set_alias(&mut self, alias: Option<String>) -> &mut Self {
        self.alias = alias.filter(|a| !a.is_empty());
        self
    }

    pub fn activate(&mut self) {
        self.is_active = true;
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Reference time from the dedicated field or the `t_ref` metadata parameter.
    pub fn reference_time(&self) -> Option<f64> {
        self.t_ref.or_else(|| self.param("t_ref"))
    }
}

/// A microlensing event and its candidate solutions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Event {
    pub event_id: String,
    #[serde(default)]
    pub solutions: Vec<Solution>,
}

impl Event {
    pub fn new(event_id: impl Into<String>) -> Self {
        Self { event_id: event_id.into(), solutions: Vec::new() }
    }

    /// Append a solution; identifiers must be unique within the event.
    pub fn add_solution(&mut self, solution: Solution) -> Result<&mut Solution> {
        if self.solution(&solution.solution_id).is_some() {
            return Err(SolutionError::DuplicateSolutionId {
                event_id: self.event_id.clone(),
                solution_id: solution.solution_id,
            });
        }
        self.solutions.push(solution);
        let last = self.solutions.len() - 1;
        Ok(&mut self.solutions[last])
    }

    pub fn solution(&self, solution_id: &str) -> Option<&Solution> {
        self.solutions.iter().find(|s| s.solution_id == solution_id)
    }

    pub fn solution_mut(&mut self, solution_id: &str) -> Result<&mut Solution> {
        let event_id = &self.event_id;
        self.solutions.iter_mut().find(|s| s.solution_id == solution_id).ok_or_else(|| {
            SolutionError::UnknownSolution {
                event_id: event_id.clone(),
                solution_id: solution_id.to_string(),
            }
        })
    }

    pub fn active_solutions(&self) -> impl Iterator<Item = &Solution> {
        self.solutions.iter().filter(|s| s.is_active)
    }

    /// First solution carrying `alias` (exact, case-sensitive match).
    pub fn solution_by_alias(&self, alias: &str) -> Option<&Solution> {
        self.solutions.iter().find(|s| s.alias.as_deref() == Some(alias))
    }
}

/// Top-level container for a team's submission.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub tier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Submission {
    pub fn new(team_name: impl Into<String>, tier: impl Into<String>) -> Self {
        Self { team_name: team_name.into(), tier: tier.into(), repo_url: None, events: Vec::new() }
    }

    pub fn event(&self, event_id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.event_id == event_id)
    }

    /// Get or create the event with `event_id`.
    pub fn event_mut(&mut self, event_id: &str) -> &mut Event {
        let idx = match self.events.iter().position(|e| e.event_id == event_id) {
            Some(idx) => idx,
            None => {
                self.events.push(Event::new(event_id));
                self.events.len() - 1
            }
        };
        &mut self.events[idx]
    }

    pub fn solution_count(&self) -> usize {
        self.events.iter().map(|e| e.solutions.len()).sum()
    }
}
