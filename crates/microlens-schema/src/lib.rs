// SPDX-License-Identifier: MIT OR Apache-2.0
//! Parameter schema registry and tier definitions.
//!
//! This crate is the single source of truth for which parameter names a
//! solution must carry:
//! - `registry`: model types and higher-order effects to required/optional
//!   names, metadata-only names, parameter units
//! - `names`: photometric flux parameter naming (`F{band}_S`, `F{band}_B`, ...)
//! - `physical`: the derived physical-parameter vocabulary and its vector groups
//! - `tiers`: challenge tiers and their event-identifier policies
//!
//! # Quick start
//!
//! ```rust
//! use microlens_common::{HigherOrderEffect, ModelType};
//! use microlens_schema::Registry;
//!
//! let registry = Registry::builtin();
//! assert_eq!(registry.required_params(ModelType::PointSourcePointLens), ["t0", "u0", "tE"]);
//! assert!(registry.effect_params(HigherOrderEffect::Parallax).needs_t_ref);
//! assert!(registry.is_metadata("t_ref"));
//! ```

pub mod names;
pub mod physical;
pub mod registry;
pub mod tiers;

pub use names::{FluxRole, flux_names_for_band, parse_flux_name};
pub use registry::{EffectSpec, ModelSpec, ParameterCategory, ParameterProperty, Registry};
pub use tiers::{EventPolicy, TierConfig, TierDefinition, load_tier_config};
