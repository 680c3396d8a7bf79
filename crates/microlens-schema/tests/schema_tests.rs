// SPDX-License-Identifier: MIT OR Apache-2.0
//! Integration tests for the parameter schema registry and tier table.

use microlens_common::{HigherOrderEffect, ModelType};
use microlens_schema::{EventPolicy, FluxRole, Registry, TierConfig, parse_flux_name};

#[test]
fn registry_required_sets_by_model() {
    let r = Registry::builtin();
    assert_eq!(r.required_params(ModelType::BinarySourcePointLens), ["t0", "u0", "tE"]);
    assert_eq!(
        r.required_params(ModelType::BinarySourceTripleLens),
        ["t0", "u0", "tE", "s1", "q1", "alpha1", "s2", "q2", "alpha2"]
    );
}

#[test]
fn effect_rows_match_published_rules() {
    let r = Registry::builtin();
    let parallax = r.effect_params(HigherOrderEffect::Parallax);
    assert_eq!(parallax.required, ["piEN", "piEE"]);
    assert!(parallax.needs_t_ref);

    let orbital = r.effect_params(HigherOrderEffect::LensOrbitalMotion);
    assert_eq!(orbital.required, ["dsdt", "dadt"]);
    assert_eq!(orbital.optional, ["dzdt"]);

    let fs = r.effect_params(HigherOrderEffect::FiniteSource);
    assert_eq!(fs.required, ["rho"]);
    assert!(!fs.needs_t_ref);

    assert!(r.needs_t_ref(&[HigherOrderEffect::FiniteSource, HigherOrderEffect::Xallarap]));
    assert!(!r.needs_t_ref(&[HigherOrderEffect::FiniteSource]));
    assert!(!r.needs_t_ref(&[]));
}

#[test]
fn binary_source_flux_names_round_trip_through_parser() {
    let r = Registry::builtin();
    let names = r.flux_param_names(&["I".to_string()], true);
    assert_eq!(names, vec!["FI_S1", "FI_S2", "FI_B"]);
    let roles: Vec<_> = names.iter().filter_map(|n| parse_flux_name(n)).map(|(_, role)| role).collect();
    assert_eq!(roles, vec![FluxRole::PrimarySource, FluxRole::SecondarySource, FluxRole::Blend]);
}

#[test]
fn metadata_is_never_physical_and_physical_is_never_metadata() {
    let r = Registry::builtin();
    assert_eq!(r.metadata_param_names(), ["t_ref", "limb_darkening_coeffs", "limb_darkening_model"]);
    assert_eq!(r.physical_param_names().len(), 24);
    for name in r.physical_param_names() {
        assert!(!r.is_metadata(name), "{name}");
    }
}

#[test]
fn property_units() {
    let r = Registry::builtin();
    assert_eq!(r.property("tE").unwrap().units, "days");
    assert_eq!(r.property("D_L").unwrap().units, "kpc");
    assert!(r.property("F0_S").is_none());
}

#[test]
fn builtin_tier_names() {
    let names: Vec<_> = TierConfig::builtin().names().collect();
    assert_eq!(names, vec!["2018-test", "None", "beginner", "experienced", "test"]);
}

#[test]
fn none_tier_admits_anything() {
    let none = TierConfig::builtin().get("None").unwrap();
    assert_eq!(none.events, EventPolicy::Unchecked);
    assert!(none.events.admits("whatever-id"));
    assert!(none.events.admits(""));
}

#[test]
fn tier_table_serializes_as_tagged_policies() {
    let policy = TierConfig::builtin().get("2018-test").unwrap().events.clone();
    let yaml = serde_yaml::to_string(&policy).unwrap();
    insta::assert_snapshot!(yaml, @r#"
    kind: range
    prefix: ulwdc1_
    start: 1
    end: 293
    width: 3
    "#);
}
