// SPDX-License-Identifier: MIT OR Apache-2.0
//! Derived physical-parameter vocabulary.

/// Total lens mass (solar masses).
pub const TOTAL_MASS: &str = "Mtot";

/// Individual lens component masses (solar masses).
pub const COMPONENT_MASSES: &[&str] = &["M1", "M2", "M3", "M4"];

/// Lens distance (kpc).
pub const LENS_DISTANCE: &str = "D_L";

/// Source distance (kpc).
pub const SOURCE_DISTANCE: &str = "D_S";

/// Every name accepted in `physical_parameters`.
pub const PHYSICAL_PARAMS: [&str; 24] = [
    "Mtot",
    "M1",
    "M2",
    "M3",
    "M4",
    "D_L",
    "D_S",
    "thetaE",
    "piE",
    "piE_N",
    "piE_E",
    "piE_parallel",
    "piE_perp",
    "piE_l",
    "piE_b",
    "mu_rel",
    "mu_rel_N",
    "mu_rel_E",
    "mu_rel_parallel",
    "mu_rel_perp",
    "mu_rel_l",
    "mu_rel_b",
    "phi",
    "a_perp",
];

/// Two orthogonal components of a vector in one reference frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentPair {
    pub frame: &'static str,
    pub first: &'static str,
    pub second: &'static str,
}

/// A physical vector stated both as a magnitude and as components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorSpec {
    pub label: &'static str,
    pub magnitude: &'static str,
    pub components: &'static [ComponentPair],
}

pub const VECTORS: &[VectorSpec] = &[
    VectorSpec {
        label: "microlens parallax",
        magnitude: "piE",
        components: &[
            ComponentPair { frame: "north/east", first: "piE_N", second: "piE_E" },
            ComponentPair { frame: "parallel/perpendicular", first: "piE_parallel", second: "piE_perp" },
            ComponentPair { frame: "galactic l/b", first: "piE_l", second: "piE_b" },
        ],
    },
    VectorSpec {
        label: "relative proper motion",
        magnitude: "mu_rel",
        components: &[
            ComponentPair { frame: "north/east", first: "mu_rel_N", second: "mu_rel_E" },
            ComponentPair {
                frame: "parallel/perpendicular",
                first: "mu_rel_parallel",
                second: "mu_rel_perp",
            },
            ComponentPair { frame: "galactic l/b", first: "mu_rel_l", second: "mu_rel_b" },
        ],
    },
];

/// All mass fields, total first.
pub fn mass_fields() -> impl Iterator<Item = &'static str> {
    std::iter::once(TOTAL_MASS).chain(COMPONENT_MASSES.iter().copied())
}

pub fn is_physical_param(name: &str) -> bool {
    PHYSICAL_PARAMS.contains(&name)
}
