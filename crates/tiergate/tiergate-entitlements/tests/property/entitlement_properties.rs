//! Property tests for rank comparison, usage arithmetic, and fail-closed lookups.

use std::sync::Arc;

use proptest::prelude::*;

use tiergate_core::{EvaluatorConfig, LimitValue, TierCatalog, TierDefinition};
use tiergate_entitlements::{Evaluator, ReasonCode};

/// A catalog whose tiers have the given distinct ranks; tier `i` is named
/// `t{i}` and carries the finite limit `limit` on "units" plus an unlimited
/// "calls" key. Feature `f{i}` is gated at tier `t{i}`.
fn catalog_with_ranks(ranks: &[i64], limit: u64) -> Evaluator {
    let tiers = ranks
        .iter()
        .enumerate()
        .map(|(i, &rank)| {
            TierDefinition::new(format!("t{i}"), rank)
                .with_limit("units", limit)
                .with_limit("calls", LimitValue::Unlimited)
        })
        .collect();
    let requirements = (0..ranks.len()).map(|i| (format!("f{i}"), format!("t{i}")));
    let catalog = TierCatalog::from_parts(tiers, requirements, EvaluatorConfig::default()).unwrap();
    Evaluator::new(Arc::new(catalog))
}

fn distinct_ranks() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::hash_set(-1000i64..1000, 1..8).prop_map(|s| s.into_iter().collect())
}

proptest! {
    #[test]
    fn compare_matches_rank(ranks in distinct_ranks()) {
        let ev = catalog_with_ranks(&ranks, 1);
        for (i, &ra) in ranks.iter().enumerate() {
            for (j, &rb) in ranks.iter().enumerate() {
                let c = ev.compare_tiers(&format!("t{i}"), &format!("t{j}"));
                prop_assert_eq!(c.a_meets_or_exceeds_b, ra >= rb);
            }
        }
    }

    #[test]
    fn feature_access_matches_rank(ranks in distinct_ranks()) {
        let ev = catalog_with_ranks(&ranks, 1);
        for (i, &ra) in ranks.iter().enumerate() {
            for (j, &rb) in ranks.iter().enumerate() {
                let d = ev.check_feature_access(&format!("t{i}"), &format!("f{j}"));
                prop_assert_eq!(d.allowed, ra >= rb);
            }
        }
    }

    #[test]
    fn unlimited_always_usable(ranks in distinct_ranks(), usage in any::<u64>()) {
        let ev = catalog_with_ranks(&ranks, 1);
        for i in 0..ranks.len() {
            let d = ev.check_usage_limit(&format!("t{i}"), "calls", usage);
            prop_assert!(d.can_use);
            prop_assert!(!d.is_near_limit);
        }
    }

    #[test]
    fn finite_limit_boundary(limit in 1u64..1_000_000) {
        let ev = catalog_with_ranks(&[0], limit);

        let below = ev.check_usage_limit("t0", "units", limit - 1);
        prop_assert!(below.can_use);
        prop_assert_eq!(below.usage_percentage, (limit - 1) as f64 / limit as f64 * 100.0);

        let at = ev.check_usage_limit("t0", "units", limit);
        prop_assert!(!at.can_use);
        prop_assert_eq!(at.reason_code, ReasonCode::LimitReached);
    }

    #[test]
    fn zero_limit_never_usable(usage in any::<u64>()) {
        let ev = catalog_with_ranks(&[0], 0);
        let d = ev.check_usage_limit("t0", "units", usage);
        prop_assert!(!d.can_use);
        prop_assert_eq!(d.usage_percentage, 100.0);
    }

    #[test]
    fn unknown_ids_fail_closed(ranks in distinct_ranks(), suffix in "[a-z]{1,12}") {
        let ev = catalog_with_ranks(&ranks, 1);
        let ghost_tier = format!("ghost-{suffix}");
        let ghost_feature = format!("ghost-{suffix}");
        for j in 0..ranks.len() {
            let feature = format!("f{j}");
            let d = ev.check_feature_access(&ghost_tier, &feature);
            prop_assert!(!d.allowed);
        }
        let top = ev.catalog().highest_tier().id.clone();
        prop_assert!(!ev.check_feature_access(&top, &ghost_feature).allowed);
    }

    #[test]
    fn cta_list_is_ascending_and_above(ranks in distinct_ranks()) {
        let ev = catalog_with_ranks(&ranks, 1);
        let lowest = ev.catalog().lowest_tier().id.clone();
        // f{i} is gated at t{i}; the highest-ranked one is denied to the
        // lowest tier whenever there are at least two tiers.
        let (top, _) = ranks.iter().enumerate().max_by_key(|&(_, r)| *r).unwrap();
        let top_feature = format!("f{top}");
        let d = ev.check_feature_access(&lowest, &top_feature);
        if let Some(payload) = ev.build_upgrade_prompt(&d, None) {
            let cta_ranks: Vec<i64> = payload
                .cta_tier_list
                .iter()
                .map(|id| ev.catalog().get_tier(id).unwrap().rank)
                .collect();
            prop_assert!(cta_ranks.windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(cta_ranks.len(), ranks.len() - 1);
        } else {
            prop_assert_eq!(ranks.len(), 1);
        }
    }

    #[test]
    fn feature_check_is_pure(ranks in distinct_ranks(), i in 0usize..8, j in 0usize..8) {
        let ev = catalog_with_ranks(&ranks, 1);
        let tier = format!("t{}", i % ranks.len());
        let feature = format!("f{}", j % ranks.len());
        prop_assert_eq!(
            ev.check_feature_access(&tier, &feature),
            ev.check_feature_access(&tier, &feature)
        );
    }
}
