//! Upgrade prompt payload.

use serde::{Deserialize, Serialize};
use tiergate_core::TierCatalog;

use crate::decision::{EntitlementDecision, ReasonCode};
use crate::evaluator::Evaluator;

/// Everything a host needs to render a "please upgrade" interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradePromptPayload {
    /// Lowest tier that would lift the denial, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_tier: Option<String>,
    pub current_tier: String,
    /// Caller-supplied label, or the feature/limit key.
    pub feature_label: String,
    /// Every tier above the current one, ascending by rank.
    pub cta_tier_list: Vec<String>,
    pub reason_code: ReasonCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upgrade_url: Option<String>,
}

/// Build the prompt for a denied decision. Allowed decisions yield `None`.
pub fn build_upgrade_prompt<D>(
    catalog: &TierCatalog,
    decision: &D,
    feature_label: Option<&str>,
) -> Option<UpgradePromptPayload>
where
    D: EntitlementDecision + ?Sized,
{
    if decision.is_allowed() {
        return None;
    }

    let current = catalog
        .get_tier(decision.current_tier())
        .unwrap_or_else(|| catalog.lowest_tier());

    let cta_tier_list = catalog
        .tiers_above(current)
        .iter()
        .map(|t| t.id.clone())
        .collect();

    Some(UpgradePromptPayload {
        required_tier: decision.required_tier(catalog),
        current_tier: current.id.clone(),
        feature_label: feature_label
            .unwrap_or_else(|| decision.subject())
            .to_string(),
        cta_tier_list,
        reason_code: decision.reason_code(),
        upgrade_url: catalog.evaluator_config().upgrade_url.clone(),
    })
}

impl Evaluator {
    /// [`build_upgrade_prompt`] against this evaluator's catalog.
    pub fn build_upgrade_prompt<D>(
        &self,
        decision: &D,
        feature_label: Option<&str>,
    ) -> Option<UpgradePromptPayload>
    where
        D: EntitlementDecision + ?Sized,
    {
        build_upgrade_prompt(self.catalog(), decision, feature_label)
    }
}
