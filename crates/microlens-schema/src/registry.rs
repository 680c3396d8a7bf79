// SPDX-License-Identifier: MIT OR Apache-2.0
//! Parameter schema registry.
//!
//! A static table mapping model types and higher-order effects to the
//! parameter names a solution must (or may) carry. Validators consult the
//! registry instead of branching on model-type strings.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use microlens_common::{HigherOrderEffect, ModelType};

use crate::names::flux_names_for_band;
use crate::physical::{PHYSICAL_PARAMS, is_physical_param};

use self::ParameterCategory as Cat;

/// Core parameter requirements of one model type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSpec {
    pub model_type: ModelType,
    pub description: &'static str,
    pub required: &'static [&'static str],
}

/// Parameters introduced by one higher-order effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectSpec {
    pub effect: HigherOrderEffect,
    pub description: &'static str,
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
    /// Effect is time-referenced and needs `t_ref`.
    pub needs_t_ref: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParameterCategory {
    Core,
    BinaryLens,
    TripleLens,
    FiniteSource,
    Parallax,
    LensOrbitalMotion,
    GaussianProcess,
    StellarRotation,
    LimbDarkening,
    Metadata,
    Physical,
}

/// Units and description of a named parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterProperty {
    pub name: &'static str,
    pub units: &'static str,
    pub description: &'static str,
    pub category: ParameterCategory,
}

/// Name of the reference-time metadata parameter.
pub const T_REF: &str = "t_ref";

const METADATA_PARAMS: &[&str] = &[T_REF, "limb_darkening_coeffs", "limb_darkening_model"];

const CORE: &[&str] = &["t0", "u0", "tE"];
const BINARY_LENS: &[&str] = &["t0", "u0", "tE", "s", "q", "alpha"];
const TRIPLE_LENS: &[&str] = &["t0", "u0", "tE", "s1", "q1", "alpha1", "s2", "q2", "alpha2"];

const MODELS: &[ModelSpec] = &[
    ModelSpec {
        model_type: ModelType::PointSourcePointLens,
        description: "Point source, single point lens",
        required: CORE,
    },
    ModelSpec {
        model_type: ModelType::PointSourceBinaryLens,
        description: "Point source, binary point lens",
        required: BINARY_LENS,
    },
    ModelSpec {
        model_type: ModelType::BinarySourcePointLens,
        description: "Binary source, single point lens",
        required: CORE,
    },
    ModelSpec {
        model_type: ModelType::BinarySourceBinaryLens,
        description: "Binary source, binary point lens",
        required: BINARY_LENS,
    },
    ModelSpec {
        model_type: ModelType::PointSourceTripleLens,
        description: "Point source, triple point lens",
        required: TRIPLE_LENS,
    },
    ModelSpec {
        model_type: ModelType::BinarySourceTripleLens,
        description: "Binary source, triple point lens",
        required: TRIPLE_LENS,
    },
    ModelSpec {
        model_type: ModelType::Other,
        description: "Unlisted model; completeness cannot be checked",
        required: &[],
    },
];

const EFFECTS: &[EffectSpec] = &[
    EffectSpec {
        effect: HigherOrderEffect::Parallax,
        description: "Microlens parallax",
        required: &["piEN", "piEE"],
        optional: &[],
        needs_t_ref: true,
    },
    EffectSpec {
        effect: HigherOrderEffect::FiniteSource,
        description: "Finite source size",
        required: &["rho"],
        optional: &[],
        needs_t_ref: false,
    },
    EffectSpec {
        effect: HigherOrderEffect::LensOrbitalMotion,
        description: "Orbital motion of the lens components",
        required: &["dsdt", "dadt"],
        optional: &["dzdt"],
        needs_t_ref: true,
    },
    EffectSpec {
        effect: HigherOrderEffect::Xallarap,
        description: "Source orbital motion (xallarap)",
        required: &[],
        optional: &[],
        needs_t_ref: true,
    },
    EffectSpec {
        effect: HigherOrderEffect::GaussianProcess,
        description: "Gaussian process noise model",
        required: &[],
        optional: &["ln_K", "ln_lambda", "ln_period", "ln_gamma"],
        needs_t_ref: false,
    },
    EffectSpec {
        effect: HigherOrderEffect::StellarRotation,
        description: "Stellar rotation (spots)",
        required: &[],
        optional: &["v_rot_sin_i", "epsilon"],
        needs_t_ref: false,
    },
    EffectSpec {
        effect: HigherOrderEffect::FittedLimbDarkening,
        description: "Limb darkening coefficients fitted as parameters",
        required: &[],
        optional: &["u1", "u2", "u3", "u4"],
        needs_t_ref: false,
    },
    EffectSpec {
        effect: HigherOrderEffect::Other,
        description: "Unlisted effect; parameters cannot be checked",
        required: &[],
        optional: &[],
        needs_t_ref: false,
    },
];

const fn prop(
    name: &'static str,
    units: &'static str,
    description: &'static str,
    category: ParameterCategory,
) -> ParameterProperty {
    ParameterProperty { name, units, description, category }
}

const PROPERTIES: &[ParameterProperty] = &[
    prop("t0", "HJD", "Time of closest approach", Cat::Core),
    prop("u0", "thetaE", "Minimum impact parameter", Cat::Core),
    prop("tE", "days", "Einstein radius crossing time", Cat::Core),
    prop("s", "thetaE", "Binary separation", Cat::BinaryLens),
    prop("q", "mass ratio", "Mass ratio M2/M1", Cat::BinaryLens),
    prop("alpha", "rad", "Source trajectory angle to the binary axis", Cat::BinaryLens),
    prop("s1", "thetaE", "Separation of the second lens", Cat::TripleLens),
    prop("q1", "mass ratio", "Mass ratio of the second lens", Cat::TripleLens),
    prop("alpha1", "rad", "Trajectory angle, first pair", Cat::TripleLens),
    prop("s2", "thetaE", "Separation of the third lens", Cat::TripleLens),
    prop("q2", "mass ratio", "Mass ratio of the third lens", Cat::TripleLens),
    prop("alpha2", "rad", "Trajectory angle, second pair", Cat::TripleLens),
    prop("rho", "thetaE", "Source radius", Cat::FiniteSource),
    prop("piEN", "thetaE", "Parallax vector, north component", Cat::Parallax),
    prop("piEE", "thetaE", "Parallax vector, east component", Cat::Parallax),
    prop("dsdt", "thetaE/year", "Rate of change of binary separation", Cat::LensOrbitalMotion),
    prop("dadt", "rad/year", "Rate of change of binary angle", Cat::LensOrbitalMotion),
    prop("dzdt", "au/year", "Relative radial rate of change of the lenses", Cat::LensOrbitalMotion),
    prop("ln_K", "mag^2", "Log amplitude of the GP kernel", Cat::GaussianProcess),
    prop("ln_lambda", "days", "Log length scale of the GP kernel", Cat::GaussianProcess),
    prop("ln_period", "days", "Log period of the GP kernel", Cat::GaussianProcess),
    prop("ln_gamma", "", "Log smoothing parameter of the GP kernel", Cat::GaussianProcess),
    prop("v_rot_sin_i", "km/s", "Projected rotational velocity", Cat::StellarRotation),
    prop("epsilon", "", "Spot coverage parameter", Cat::StellarRotation),
    prop("u1", "", "Linear limb darkening coefficient", Cat::LimbDarkening),
    prop("u2", "", "Quadratic limb darkening coefficient", Cat::LimbDarkening),
    prop("u3", "", "Cubic limb darkening coefficient", Cat::LimbDarkening),
    prop("u4", "", "Quartic limb darkening coefficient", Cat::LimbDarkening),
    prop("t_ref", "HJD", "Reference time for time-dependent effects", Cat::Metadata),
    prop("limb_darkening_coeffs", "", "Fixed limb darkening coefficients per band", Cat::Metadata),
    prop("limb_darkening_model", "", "Limb darkening law", Cat::Metadata),
    prop("Mtot", "Msun", "Total lens mass", Cat::Physical),
    prop("M1", "Msun", "Primary lens mass", Cat::Physical),
    prop("M2", "Msun", "Secondary lens mass", Cat::Physical),
    prop("M3", "Msun", "Third lens mass", Cat::Physical),
    prop("M4", "Msun", "Fourth lens mass", Cat::Physical),
    prop("D_L", "kpc", "Lens distance", Cat::Physical),
    prop("D_S", "kpc", "Source distance", Cat::Physical),
    prop("thetaE", "mas", "Angular Einstein radius", Cat::Physical),
    prop("piE", "", "Microlens parallax magnitude", Cat::Physical),
    prop("piE_N", "", "Parallax, north component", Cat::Physical),
    prop("piE_E", "", "Parallax, east component", Cat::Physical),
    prop("piE_parallel", "", "Parallax, component parallel to the Sun's acceleration", Cat::Physical),
    prop("piE_perp", "", "Parallax, perpendicular component", Cat::Physical),
    prop("piE_l", "", "Parallax, galactic longitude component", Cat::Physical),
    prop("piE_b", "", "Parallax, galactic latitude component", Cat::Physical),
    prop("mu_rel", "mas/yr", "Relative proper motion magnitude", Cat::Physical),
    prop("mu_rel_N", "mas/yr", "Relative proper motion, north", Cat::Physical),
    prop("mu_rel_E", "mas/yr", "Relative proper motion, east", Cat::Physical),
    prop("mu_rel_parallel", "mas/yr", "Relative proper motion, parallel component", Cat::Physical),
    prop("mu_rel_perp", "mas/yr", "Relative proper motion, perpendicular component", Cat::Physical),
    prop("mu_rel_l", "mas/yr", "Relative proper motion, galactic longitude", Cat::Physical),
    prop("mu_rel_b", "mas/yr", "Relative proper motion, galactic latitude", Cat::Physical),
    prop("phi", "rad", "Position angle of the relative proper motion", Cat::Physical),
    prop("a_perp", "au", "Projected lens separation", Cat::Physical),
];

/// Lookup table of parameter requirements.
#[derive(Debug, Clone)]
pub struct Registry {
    models: BTreeMap<ModelType, ModelSpec>,
    effects: BTreeMap<HigherOrderEffect, EffectSpec>,
    properties: BTreeMap<&'static str, ParameterProperty>,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            models: MODELS.iter().map(|m| (m.model_type, m.clone())).collect(),
            effects: EFFECTS.iter().map(|e| (e.effect, e.clone())).collect(),
            properties: PROPERTIES.iter().map(|p| (p.name, p.clone())).collect(),
        }
    }
}

static BUILTIN: OnceLock<Registry> = OnceLock::new();

impl Registry {
    /// Shared built-in registry.
    pub fn builtin() -> &'static Registry {
        BUILTIN.get_or_init(Registry::default)
    }

    pub fn model_spec(&self, model_type: ModelType) -> &ModelSpec {
        // Every ModelType variant has a table row (checked in tests).
        &self.models[&model_type]
    }

    /// Core parameters required by a model type.
    pub fn required_params(&self, model_type: ModelType) -> &'static [&'static str] {
        self.model_spec(model_type).required
    }

    /// Required/optional parameters and reference-time need of an effect.
    pub fn effect_params(&self, effect: HigherOrderEffect) -> &EffectSpec {
        &self.effects[&effect]
    }

    /// Flux parameter names for `bands`, in band order.
    pub fn flux_param_names(&self, bands: &[String], is_binary_source: bool) -> Vec<String> {
        bands.iter().flat_map(|band| flux_names_for_band(band, is_binary_source)).collect()
    }

    /// Names that are never free parameters.
    pub fn metadata_param_names(&self) -> &'static [&'static str] {
        METADATA_PARAMS
    }

    pub fn is_metadata(&self, name: &str) -> bool {
        METADATA_PARAMS.contains(&name)
    }

    /// Names accepted in `physical_parameters`.
    pub fn physical_param_names(&self) -> &'static [&'static str] {
        &PHYSICAL_PARAMS
    }

    pub fn is_physical(&self, name: &str) -> bool {
        is_physical_param(name)
    }

    pub fn property(&self, name: &str) -> Option<&ParameterProperty> {
        self.properties.get(name)
    }

    /// `true` if any declared effect needs a reference time.
    pub fn needs_t_ref(&self, effects: &[HigherOrderEffect]) -> bool {
        effects.iter().any(|e| self.effect_params(*e).needs_t_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_model_type_has_a_row() {
        let r = Registry::builtin();
        for m in ModelType::ALL {
            assert_eq!(r.model_spec(m).model_type, m);
        }
    }

    #[test]
    fn every_effect_has_a_row() {
        let r = Registry::builtin();
        for e in HigherOrderEffect::ALL {
            assert_eq!(r.effect_params(e).effect, e);
        }
    }

    #[test]
    fn binary_lens_adds_geometry() {
        let r = Registry::builtin();
        assert_eq!(
            r.required_params(ModelType::PointSourceBinaryLens),
            ["t0", "u0", "tE", "s", "q", "alpha"]
        );
        assert!(r.required_params(ModelType::Other).is_empty());
    }

    #[test]
    fn time_referenced_effects() {
        let r = Registry::builtin();
        let needing: Vec<_> = HigherOrderEffect::ALL
            .into_iter()
            .filter(|e| r.effect_params(*e).needs_t_ref)
            .collect();
        assert_eq!(
            needing,
            vec![
                HigherOrderEffect::Parallax,
                HigherOrderEffect::LensOrbitalMotion,
                HigherOrderEffect::Xallarap
            ]
        );
    }

    #[test]
    fn flux_names_follow_band_order() {
        let r = Registry::builtin();
        let bands = vec!["1".to_string(), "0".to_string()];
        assert_eq!(r.flux_param_names(&bands, false), vec!["F1_S", "F1_B", "F0_S", "F0_B"]);
        assert_eq!(r.flux_param_names(&[], true), Vec::<String>::new());
    }

    #[test]
    fn every_named_parameter_has_a_property() {
        let r = Registry::builtin();
        let named = MODELS
            .iter()
            .flat_map(|m| m.required.iter())
            .chain(EFFECTS.iter().flat_map(|e| e.required.iter().chain(e.optional.iter())))
            .chain(METADATA_PARAMS.iter())
            .chain(PHYSICAL_PARAMS.iter());
        for name in named {
            assert!(r.property(name).is_some(), "no property row for '{}'", name);
        }
    }

    #[test]
    fn metadata_and_fitted_names_are_disjoint() {
        let r = Registry::builtin();
        for name in r.metadata_param_names() {
            assert!(!r.is_physical(name));
            for m in ModelType::ALL {
                assert!(!r.required_params(m).contains(name));
            }
            for e in HigherOrderEffect::ALL {
                let spec = r.effect_params(e);
                assert!(!spec.required.contains(name) && !spec.optional.contains(name));
            }
        }
    }
}
