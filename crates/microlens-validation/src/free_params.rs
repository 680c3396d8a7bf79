// SPDX-License-Identifier: MIT OR Apache-2.0
//! Free-parameter counting for information-criterion weighting.

use microlens_common::Solution;
use microlens_schema::Registry;

/// Number of genuinely fitted parameters in `solution.parameters`.
///
/// Metadata names (`t_ref`, limb-darkening settings), physical-vocabulary
/// names copied into `parameters`, and non-numeric values are not counted.
///
/// # Examples
///
/// ```
/// use microlens_common::{ModelType, Solution};
/// use microlens_schema::Registry;
/// use microlens_validation::count_free_parameters;
///
/// let mut sol = Solution::new("a", ModelType::PointSourcePointLens);
/// sol.set_parameter("t0", 1.0).set_parameter("u0", 0.1).set_parameter("tE", 20.0);
/// sol.set_parameter("t_ref", 1.0);
/// assert_eq!(count_free_parameters(&sol, Registry::builtin()), 3);
/// ```
pub fn count_free_parameters(solution: &Solution, registry: &Registry) -> usize {
    solution
        .parameters
        .iter()
        .filter(|(name, value)| {
            value.as_f64().is_some() && !registry.is_metadata(name) && !registry.is_physical(name)
        })
        .count()
}
