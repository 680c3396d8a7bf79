// SPDX-License-Identifier: MIT OR Apache-2.0
//! Uncertainty values as submitted.
//!
//! The accepted shapes are a single number or a `[lower, upper]` pair. Any
//! other JSON value is preserved as [`Uncertainty::Malformed`] so the
//! validator can report it instead of failing to load the record.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Uncertainty {
    Symmetric(f64),
    Bounds(Vec<f64>),
    Malformed(serde_json::Value),
}

impl Uncertainty {
    pub fn symmetric(value: f64) -> Self {
        Self::Symmetric(value)
    }

    pub fn asymmetric(lower: f64, upper: f64) -> Self {
        Self::Bounds(vec![lower, upper])
    }

    /// `(lower, upper)` if the shape is well formed, regardless of sign.
    pub fn as_pair(&self) -> Option<(f64, f64)> {
        match self {
            Self::Symmetric(v) => Some((*v, *v)),
            Self::Bounds(b) if b.len() == 2 => Some((b[0], b[1])),
            _ => None,
        }
    }

    /// Symmetric value, or the mean of the two bounds.
    pub fn representative(&self) -> Option<f64> {
        self.as_pair().map(|(lo, hi)| 0.5 * (lo + hi))
    }
}

impl From<f64> for Uncertainty {
    fn from(value: f64) -> Self {
        Self::Symmetric(value)
    }
}

impl From<[f64; 2]> for Uncertainty {
    fn from([lower, upper]: [f64; 2]) -> Self {
        Self::asymmetric(lower, upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_each_shape() {
        let u: Uncertainty = serde_json::from_str("0.5").unwrap();
        assert_eq!(u, Uncertainty::Symmetric(0.5));

        let u: Uncertainty = serde_json::from_str("[0.1, 0.2]").unwrap();
        assert_eq!(u.as_pair(), Some((0.1, 0.2)));

        let u: Uncertainty = serde_json::from_str("[0.1, 0.2, 0.3]").unwrap();
        assert_eq!(u.as_pair(), None);

        let u: Uncertainty = serde_json::from_str("\"tiny\"").unwrap();
        assert!(matches!(u, Uncertainty::Malformed(_)));

        let u: Uncertainty = serde_json::from_str("[\"a\", 1]").unwrap();
        assert!(matches!(u, Uncertainty::Malformed(_)));
    }

    #[test]
    fn representative_averages_bounds() {
        let mean = Uncertainty::asymmetric(0.2, 0.4).representative().unwrap();
        assert!((mean - 0.3).abs() < 1e-12);
        assert_eq!(Uncertainty::symmetric(0.3).representative(), Some(0.3));
    }
}
