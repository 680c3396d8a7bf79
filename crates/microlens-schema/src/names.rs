// SPDX-License-Identifier: MIT OR Apache-2.0
//! Photometric flux parameter naming.
//!
//! Single-source models carry `F{band}_S` and `F{band}_B` per band; binary
//! source models carry `F{band}_S1`, `F{band}_S2` and `F{band}_B`.

use std::sync::OnceLock;

use regex::Regex;

/// Which flux component a name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FluxRole {
    Source,
    PrimarySource,
    SecondarySource,
    Blend,
}

impl FluxRole {
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Source => "S",
            Self::PrimarySource => "S1",
            Self::SecondarySource => "S2",
            Self::Blend => "B",
        }
    }

    /// Roles required per band for the given source multiplicity.
    pub fn for_sources(is_binary_source: bool) -> &'static [FluxRole] {
        if is_binary_source {
            &[Self::PrimarySource, Self::SecondarySource, Self::Blend]
        } else {
            &[Self::Source, Self::Blend]
        }
    }

    /// `true` if this role only exists for binary-source models.
    pub fn is_binary_source_role(&self) -> bool {
        matches!(self, Self::PrimarySource | Self::SecondarySource)
    }
}

pub fn flux_name(band: &str, role: FluxRole) -> String {
    format!("F{}_{}", band, role.suffix())
}

/// All flux names required for one band.
pub fn flux_names_for_band(band: &str, is_binary_source: bool) -> Vec<String> {
    FluxRole::for_sources(is_binary_source).iter().map(|role| flux_name(band, *role)).collect()
}

/// Split a flux parameter name into its band label and role.
///
/// # Examples
///
/// ```
/// use microlens_schema::{FluxRole, parse_flux_name};
///
/// assert_eq!(parse_flux_name("F0_S"), Some(("0", FluxRole::Source)));
/// assert_eq!(parse_flux_name("FI_S2"), Some(("I", FluxRole::SecondarySource)));
/// assert_eq!(parse_flux_name("tE"), None);
/// ```
pub fn parse_flux_name(name: &str) -> Option<(&str, FluxRole)> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let regex = RE.get_or_init(|| {
        Regex::new(r"^F(?P<band>[A-Za-z0-9._\-]+)_(?P<role>S1|S2|S|B)$")
            .expect("internal flux-name regex must compile")
    });

    let caps = regex.captures(name)?;
    let band = caps.name("band")?.as_str();
    let role = match caps.name("role")?.as_str() {
        "S" => FluxRole::Source,
        "S1" => FluxRole::PrimarySource,
        "S2" => FluxRole::SecondarySource,
        _ => FluxRole::Blend,
    };
    Some((band, role))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_source_band_names() {
        assert_eq!(flux_names_for_band("0", false), vec!["F0_S", "F0_B"]);
    }

    #[test]
    fn binary_source_band_names() {
        assert_eq!(flux_names_for_band("1", true), vec!["F1_S1", "F1_S2", "F1_B"]);
    }

    #[test]
    fn parse_each_role() {
        assert_eq!(parse_flux_name("F2_B"), Some(("2", FluxRole::Blend)));
        assert_eq!(parse_flux_name("F2_S1"), Some(("2", FluxRole::PrimarySource)));
        assert_eq!(parse_flux_name("FV_S"), Some(("V", FluxRole::Source)));
    }

    #[test]
    fn band_labels_may_contain_underscores() {
        assert_eq!(parse_flux_name("Fztf_g_S"), Some(("ztf_g", FluxRole::Source)));
        assert_eq!(parse_flux_name("Fztf_g_S2"), Some(("ztf_g", FluxRole::SecondarySource)));
        assert_eq!(parse_flux_name("Fkmt_ctio_I_B"), Some(("kmt_ctio_I", FluxRole::Blend)));
    }

    #[test]
    fn parse_rejects_near_misses() {
        assert_eq!(parse_flux_name("F_S"), None);
        assert_eq!(parse_flux_name("F0_S3"), None);
        assert_eq!(parse_flux_name("F0S"), None);
        assert_eq!(parse_flux_name("f0_S"), None);
        assert_eq!(parse_flux_name("F0_B "), None);
    }
}
