// SPDX-License-Identifier: MIT OR Apache-2.0
//! Closed vocabularies: model types, higher-order effects, uncertainty methods.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Source/lens multiplicity of a fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ModelType {
    #[serde(rename = "1S1L")]
    PointSourcePointLens,
    #[serde(rename = "1S2L")]
    PointSourceBinaryLens,
    #[serde(rename = "2S1L")]
    BinarySourcePointLens,
    #[serde(rename = "2S2L")]
    BinarySourceBinaryLens,
    #[serde(rename = "1S3L")]
    PointSourceTripleLens,
    #[serde(rename = "2S3L")]
    BinarySourceTripleLens,
    #[serde(rename = "other")]
    Other,
}

impl ModelType {
    pub const ALL: [ModelType; 7] = [
        Self::PointSourcePointLens,
        Self::PointSourceBinaryLens,
        Self::BinarySourcePointLens,
        Self::BinarySourceBinaryLens,
        Self::PointSourceTripleLens,
        Self::BinarySourceTripleLens,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PointSourcePointLens => "1S1L",
            Self::PointSourceBinaryLens => "1S2L",
            Self::BinarySourcePointLens => "2S1L",
            Self::BinarySourceBinaryLens => "2S2L",
            Self::PointSourceTripleLens => "1S3L",
            Self::BinarySourceTripleLens => "2S3L",
            Self::Other => "other",
        }
    }

    /// `true` for the `2S*` family, which uses per-source flux names.
    pub fn is_binary_source(&self) -> bool {
        matches!(
            self,
            Self::BinarySourcePointLens | Self::BinarySourceBinaryLens | Self::BinarySourceTripleLens
        )
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(ModelType::as_str).collect();
                format!("unknown model type '{s}'. Valid types: {}", valid.join(", "))
            })
    }
}

/// Optional physical refinement to a base model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HigherOrderEffect {
    Parallax,
    FiniteSource,
    LensOrbitalMotion,
    Xallarap,
    GaussianProcess,
    StellarRotation,
    FittedLimbDarkening,
    Other,
}

impl HigherOrderEffect {
    pub const ALL: [HigherOrderEffect; 8] = [
        Self::Parallax,
        Self::FiniteSource,
        Self::LensOrbitalMotion,
        Self::Xallarap,
        Self::GaussianProcess,
        Self::StellarRotation,
        Self::FittedLimbDarkening,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parallax => "parallax",
            Self::FiniteSource => "finite-source",
            Self::LensOrbitalMotion => "lens-orbital-motion",
            Self::Xallarap => "xallarap",
            Self::GaussianProcess => "gaussian-process",
            Self::StellarRotation => "stellar-rotation",
            Self::FittedLimbDarkening => "fitted-limb-darkening",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for HigherOrderEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HigherOrderEffect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL.into_iter().find(|e| e.as_str() == normalized).ok_or_else(|| {
            let valid: Vec<&str> = Self::ALL.iter().map(HigherOrderEffect::as_str).collect();
            format!("unknown higher-order effect '{s}'. Valid effects: {}", valid.join(", "))
        })
    }
}

/// How parameter uncertainties were obtained.
///
/// Serialized in `snake_case`; the hyphenated spellings are accepted on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UncertaintyMethod {
    #[serde(alias = "mcmc-posterior")]
    McmcPosterior,
    #[serde(alias = "fisher-matrix")]
    FisherMatrix,
    Bootstrap,
    Propagation,
    Inference,
    Literature,
    Other,
}

impl fmt::Display for UncertaintyMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::McmcPosterior => "mcmc_posterior",
            Self::FisherMatrix => "fisher_matrix",
            Self::Bootstrap => "bootstrap",
            Self::Propagation => "propagation",
            Self::Inference => "inference",
            Self::Literature => "literature",
            Self::Other => "other",
        };
        f.write_str(s)
    }
}
