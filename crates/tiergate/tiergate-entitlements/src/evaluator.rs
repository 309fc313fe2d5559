//! Evaluator: feature gates, usage limits, and tier comparison.
//! Central authority for every entitlement decision.

use std::sync::Arc;

use tiergate_core::{
    CatalogError, CatalogHandle, CatalogResult, EvaluatorConfig, LimitValue, TierCatalog,
    TierDefinition,
};
use tracing::{debug, warn};

use crate::decision::{AccessDecision, ReasonCode, TierComparison, UsageDecision};

/// Stateless decision functions over one catalog snapshot.
///
/// Cheap to clone and safe to share across threads: it holds an `Arc` to an
/// immutable catalog and nothing else that changes.
#[derive(Debug, Clone)]
pub struct Evaluator {
    catalog: Arc<TierCatalog>,
    near_limit_threshold: f64,
}

impl Evaluator {
    /// Evaluate against `catalog` using its configured near-limit threshold.
    pub fn new(catalog: Arc<TierCatalog>) -> Self {
        let near_limit_threshold = catalog
            .evaluator_config()
            .effective_near_limit_threshold();
        Self {
            catalog,
            near_limit_threshold,
        }
    }

    /// Evaluate against the handle's current catalog.
    pub fn from_handle(handle: &CatalogHandle) -> Self {
        Self::new(handle.snapshot())
    }

    /// Override the near-limit threshold (percent, in `(0, 100]`).
    pub fn with_near_limit_threshold(mut self, threshold: f64) -> CatalogResult<Self> {
        let candidate = EvaluatorConfig {
            near_limit_threshold: Some(threshold),
            upgrade_url: None,
        };
        candidate.validate()?;
        self.near_limit_threshold = threshold;
        Ok(self)
    }

    pub fn catalog(&self) -> &TierCatalog {
        &self.catalog
    }

    pub fn near_limit_threshold(&self) -> f64 {
        self.near_limit_threshold
    }

    pub fn upgrade_url(&self) -> Option<&str> {
        self.catalog.evaluator_config().upgrade_url.as_deref()
    }

    /// Is `feature` unlocked at `tier_id`?
    ///
    /// Unknown features and unknown tiers are denied.
    pub fn check_feature_access(&self, tier_id: &str, feature: &str) -> AccessDecision {
        let (current, known) = self.resolve_tier(tier_id);

        let Some(required) = self.catalog.required_tier(feature) else {
            warn!(tier = tier_id, feature, "Unregistered feature denied");
            return AccessDecision {
                allowed: false,
                reason_code: ReasonCode::UnknownFeature,
                feature: feature.to_string(),
                required_tier: None,
                current_tier: current.id.clone(),
            };
        };

        let (allowed, reason_code) = if !known {
            (false, ReasonCode::UnknownTier)
        } else if current.meets_or_exceeds(required) {
            (true, ReasonCode::Ok)
        } else {
            (false, ReasonCode::InsufficientTier)
        };

        debug!(
            tier = %current.id,
            feature,
            required = %required.id,
            allowed,
            "Feature access checked"
        );

        AccessDecision {
            allowed,
            reason_code,
            feature: feature.to_string(),
            required_tier: Some(required.id.clone()),
            current_tier: current.id.clone(),
        }
    }

    /// Is there headroom left under `limit_key` at `current_usage`?
    ///
    /// Reaching a finite ceiling exactly counts as exhausted.
    pub fn check_usage_limit(
        &self,
        tier_id: &str,
        limit_key: &str,
        current_usage: u64,
    ) -> UsageDecision {
        self.evaluate_usage(tier_id, limit_key, current_usage, None)
    }

    /// Would consuming `requested` more units stay within `limit_key`?
    ///
    /// The decision is computed at the projected usage; `current_usage` and
    /// `remaining` still describe the state before the increment.
    pub fn check_usage_increment(
        &self,
        tier_id: &str,
        limit_key: &str,
        current_usage: u64,
        requested: u64,
    ) -> UsageDecision {
        if requested == 0 {
            return self.check_usage_limit(tier_id, limit_key, current_usage);
        }
        self.evaluate_usage(tier_id, limit_key, current_usage, Some(requested))
    }

    /// Does `tier_a` rank at or above `tier_b`?
    ///
    /// An unknown `tier_a` never meets anything; an unknown `tier_b` is taken
    /// as the lowest tier.
    pub fn compare_tiers(&self, tier_a: &str, tier_b: &str) -> TierComparison {
        let (a, a_known) = self.resolve_tier(tier_a);
        let (b, b_known) = self.resolve_tier(tier_b);

        if !a_known {
            return TierComparison {
                a_meets_or_exceeds_b: false,
                reason_code: ReasonCode::UnknownTier,
            };
        }

        let meets = a.meets_or_exceeds(b);
        let reason_code = match (b_known, meets) {
            (false, _) => ReasonCode::UnknownTier,
            (true, true) => ReasonCode::Ok,
            (true, false) => ReasonCode::InsufficientTier,
        };
        TierComparison {
            a_meets_or_exceeds_b: meets,
            reason_code,
        }
    }

    /// Minimum tier that unlocks `feature`.
    pub fn required_tier_for(&self, feature: &str) -> Option<&TierDefinition> {
        self.catalog.required_tier(feature)
    }

    /// Every registered feature available at `tier_id`, sorted. Empty for
    /// unknown tiers.
    pub fn features_for_tier(&self, tier_id: &str) -> Vec<String> {
        let Some(tier) = self.catalog.get_tier(tier_id) else {
            return Vec::new();
        };
        let mut features: Vec<String> = self
            .catalog
            .feature_keys()
            .filter(|f| {
                self.catalog
                    .required_tier(f)
                    .is_some_and(|required| tier.meets_or_exceeds(required))
            })
            .map(str::to_string)
            .collect();
        features.sort_unstable();
        features
    }

    fn resolve_tier(&self, tier_id: &str) -> (&TierDefinition, bool) {
        match self.catalog.get_tier(tier_id) {
            Some(tier) => (tier, true),
            None => {
                warn!(tier = tier_id, "Unknown tier, evaluating as lowest tier");
                (self.catalog.lowest_tier(), false)
            }
        }
    }

    fn evaluate_usage(
        &self,
        tier_id: &str,
        limit_key: &str,
        current_usage: u64,
        requested: Option<u64>,
    ) -> UsageDecision {
        let (tier, known) = self.resolve_tier(tier_id);

        let Some(limit) = tier.limit(limit_key) else {
            warn!(tier = %tier.id, limit_key, "No limit registered, usage denied");
            return UsageDecision {
                can_use: false,
                is_near_limit: false,
                usage_percentage: 0.0,
                limit: None,
                current_usage,
                requested,
                remaining: None,
                limit_key: limit_key.to_string(),
                current_tier: tier.id.clone(),
                reason_code: if known {
                    ReasonCode::UnknownLimit
                } else {
                    ReasonCode::UnknownTier
                },
            };
        };

        let (mut can_use, is_near_limit, usage_percentage, remaining) = match limit {
            LimitValue::Unlimited => (true, false, 0.0, None),
            LimitValue::Finite(0) => (false, 100.0 >= self.near_limit_threshold, 100.0, Some(0)),
            LimitValue::Finite(ceiling) => {
                let (fits, projected) = match requested {
                    None => (current_usage < ceiling, current_usage),
                    Some(n) => {
                        let projected = current_usage.saturating_add(n);
                        (projected <= ceiling, projected)
                    }
                };
                let percentage = projected as f64 / ceiling as f64 * 100.0;
                (
                    fits,
                    percentage >= self.near_limit_threshold,
                    percentage,
                    Some(ceiling.saturating_sub(current_usage)),
                )
            }
        };

        let reason_code = if !known {
            can_use = false;
            ReasonCode::UnknownTier
        } else if can_use {
            ReasonCode::Ok
        } else {
            ReasonCode::LimitReached
        };

        debug!(
            tier = %tier.id,
            limit_key,
            current_usage,
            %limit,
            can_use,
            "Usage limit checked"
        );

        UsageDecision {
            can_use,
            is_near_limit,
            usage_percentage,
            limit: Some(limit),
            current_usage,
            requested,
            remaining,
            limit_key: limit_key.to_string(),
            current_tier: tier.id.clone(),
            reason_code,
        }
    }
}

impl From<Arc<TierCatalog>> for Evaluator {
    fn from(catalog: Arc<TierCatalog>) -> Self {
        Self::new(catalog)
    }
}

impl TryFrom<&tiergate_core::TiergateConfig> for Evaluator {
    type Error = CatalogError;

    fn try_from(config: &tiergate_core::TiergateConfig) -> Result<Self, Self::Error> {
        Ok(Self::new(Arc::new(TierCatalog::from_config(config)?)))
    }
}
