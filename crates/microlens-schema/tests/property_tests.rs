// SPDX-License-Identifier: MIT OR Apache-2.0
//! Property-based tests for `microlens-schema`.
//!
//! Exercises event-identifier policies and flux-name parsing against
//! generated identifiers.

use microlens_schema::{EventPolicy, parse_flux_name};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────────

fn arb_range() -> impl Strategy<Value = (u64, u64)> {
    (0u64..5_000, 0u64..5_000).prop_map(|(a, b)| (a.min(b), a.max(b)))
}

// ── Property tests ──────────────────────────────────────────────────────────

proptest! {
    /// A range policy admits `prefix + n` exactly when `n` lies in the range.
    #[test]
    fn range_admits_iff_in_bounds((start, end) in arb_range(), n in 0u64..6_000) {
        let policy = EventPolicy::Range { prefix: "ev_".to_string(), start, end, width: None };
        prop_assert_eq!(policy.admits(&format!("ev_{n}")), (start..=end).contains(&n));
    }

    /// Zero-padding never changes membership for unconstrained width.
    #[test]
    fn padding_is_ignored_without_width((start, end) in arb_range(), n in 0u64..6_000) {
        let policy = EventPolicy::Range { prefix: "ev_".to_string(), start, end, width: None };
        prop_assert_eq!(policy.admits(&format!("ev_{n}")), policy.admits(&format!("ev_{n:06}")));
    }

    /// A fixed-width policy only admits identifiers of that width.
    #[test]
    fn fixed_width_admits_only_exact_width(n in 0u64..1_000, pad in 1usize..6) {
        let policy = EventPolicy::Range { prefix: "x".to_string(), start: 0, end: 999, width: Some(3) };
        let id = format!("x{n:0pad$}");
        let digits = id.len() - 1;
        prop_assert_eq!(policy.admits(&id), digits == 3);
    }

    /// Identifiers with a different prefix are never admitted.
    #[test]
    fn foreign_prefix_never_admitted(n in 0u64..100) {
        let policy = EventPolicy::Range { prefix: "rmdc26_".to_string(), start: 0, end: 100, width: None };
        let id = format!("rmdc25_{n}");
        prop_assert!(!policy.admits(&id));
    }

    /// The parser never panics and only accepts names starting with `F`.
    #[test]
    fn flux_parser_total(name in "\\PC{0,12}") {
        if parse_flux_name(&name).is_some() {
            prop_assert!(name.starts_with('F'));
        }
    }
}
