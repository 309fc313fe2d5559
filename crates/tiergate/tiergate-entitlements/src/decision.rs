//! Decision value objects returned by the evaluator.

use std::fmt;

use serde::{Deserialize, Serialize};
use tiergate_core::{LimitValue, TierCatalog};

/// Why a decision came out the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    Ok,
    UnknownTier,
    UnknownFeature,
    UnknownLimit,
    InsufficientTier,
    LimitReached,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::UnknownTier => "UNKNOWN_TIER",
            Self::UnknownFeature => "UNKNOWN_FEATURE",
            Self::UnknownLimit => "UNKNOWN_LIMIT",
            Self::InsufficientTier => "INSUFFICIENT_TIER",
            Self::LimitReached => "LIMIT_REACHED",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a feature gate check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessDecision {
    pub allowed: bool,
    pub reason_code: ReasonCode,
    pub feature: String,
    /// Minimum tier for the feature; absent when the feature is unregistered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_tier: Option<String>,
    /// Tier the check ran against. For an unknown tier id this is the
    /// lowest-rank tier.
    pub current_tier: String,
}

/// Outcome of a usage limit check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageDecision {
    pub can_use: bool,
    pub is_near_limit: bool,
    pub usage_percentage: f64,
    /// Absent when the tier has no ceiling for the key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<LimitValue>,
    pub current_usage: u64,
    /// Extra units asked for by an increment check; absent for plain checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested: Option<u64>,
    /// Units left before the ceiling; absent for unlimited or unknown limits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining: Option<u64>,
    pub limit_key: String,
    pub current_tier: String,
    pub reason_code: ReasonCode,
}

/// Outcome of a tier-to-tier comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierComparison {
    pub a_meets_or_exceeds_b: bool,
    pub reason_code: ReasonCode,
}

/// Common view over decisions that can trigger an upgrade prompt.
pub trait EntitlementDecision {
    fn is_allowed(&self) -> bool;

    fn reason_code(&self) -> ReasonCode;

    fn current_tier(&self) -> &str;

    /// Feature-key or limit-key the decision is about.
    fn subject(&self) -> &str;

    /// Lowest tier that would turn this denial into an allowance, if any.
    fn required_tier(&self, catalog: &TierCatalog) -> Option<String>;

    /// Human-readable explanation for a denial; `None` when allowed.
    fn denial_message(&self, upgrade_url: Option<&str>) -> Option<String>;
}

impl EntitlementDecision for AccessDecision {
    fn is_allowed(&self) -> bool {
        self.allowed
    }

    fn reason_code(&self) -> ReasonCode {
        self.reason_code
    }

    fn current_tier(&self) -> &str {
        &self.current_tier
    }

    fn subject(&self) -> &str {
        &self.feature
    }

    fn required_tier(&self, _catalog: &TierCatalog) -> Option<String> {
        self.required_tier.clone()
    }

    fn denial_message(&self, upgrade_url: Option<&str>) -> Option<String> {
        if self.allowed {
            return None;
        }
        let base = match (&self.reason_code, &self.required_tier) {
            (ReasonCode::UnknownFeature, _) => {
                format!("Feature '{}' is not available on any plan", self.feature)
            }
            (ReasonCode::UnknownTier, _) => {
                format!("Feature '{}' requires a verified subscription", self.feature)
            }
            (_, Some(required)) => format!(
                "Feature '{}' requires the {} tier (current: {})",
                self.feature, required, self.current_tier
            ),
            (_, None) => format!("Feature '{}' is not available", self.feature),
        };
        Some(with_upgrade_url(base, upgrade_url))
    }
}

impl EntitlementDecision for UsageDecision {
    fn is_allowed(&self) -> bool {
        self.can_use
    }

    fn reason_code(&self) -> ReasonCode {
        self.reason_code
    }

    fn current_tier(&self) -> &str {
        &self.current_tier
    }

    fn subject(&self) -> &str {
        &self.limit_key
    }

    fn required_tier(&self, catalog: &TierCatalog) -> Option<String> {
        let current = catalog.get_tier(&self.current_tier)?;
        catalog
            .tiers_above(current)
            .iter()
            .find(|t| match (t.limit(&self.limit_key), self.limit) {
                (Some(offered), Some(ceiling)) => offered.exceeds(&ceiling),
                (Some(_), None) => true,
                (None, _) => false,
            })
            .map(|t| t.id.clone())
    }

    fn denial_message(&self, upgrade_url: Option<&str>) -> Option<String> {
        if self.can_use {
            return None;
        }
        let base = match (self.reason_code, self.limit) {
            (ReasonCode::UnknownTier, _) => {
                format!("'{}' requires a verified subscription", self.limit_key)
            }
            (ReasonCode::UnknownLimit, _) | (_, None) => {
                format!("'{}' is not included in the {} tier", self.limit_key, self.current_tier)
            }
            (_, Some(limit)) => match (self.requested, self.remaining) {
                (Some(requested), Some(remaining)) if remaining > 0 => format!(
                    "'{}' request of {} exceeds the {} remaining ({} of {} used) on the {} tier",
                    self.limit_key,
                    requested,
                    remaining,
                    self.current_usage,
                    limit,
                    self.current_tier
                ),
                _ => format!(
                    "'{}' limit reached: {} of {} used on the {} tier",
                    self.limit_key, self.current_usage, limit, self.current_tier
                ),
            },
        };
        Some(with_upgrade_url(base, upgrade_url))
    }
}

fn with_upgrade_url(message: String, upgrade_url: Option<&str>) -> String {
    match upgrade_url {
        Some(url) => format!("{message}. Upgrade at {url}"),
        None => message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_codes_serialize_screaming() {
        assert_eq!(
            serde_json::to_string(&ReasonCode::InsufficientTier).unwrap(),
            r#""INSUFFICIENT_TIER""#
        );
        assert_eq!(ReasonCode::LimitReached.to_string(), "LIMIT_REACHED");
    }

    #[test]
    fn access_decision_json_shape() {
        let decision = AccessDecision {
            allowed: false,
            reason_code: ReasonCode::InsufficientTier,
            feature: "export-pdf".to_string(),
            required_tier: Some("pro".to_string()),
            current_tier: "free".to_string(),
        };
        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["allowed"], false);
        assert_eq!(json["reasonCode"], "INSUFFICIENT_TIER");
        assert_eq!(json["requiredTier"], "pro");
        assert_eq!(json["currentTier"], "free");
    }

    #[test]
    fn allowed_decisions_have_no_message() {
        let decision = AccessDecision {
            allowed: true,
            reason_code: ReasonCode::Ok,
            feature: "export-pdf".to_string(),
            required_tier: Some("pro".to_string()),
            current_tier: "pro".to_string(),
        };
        assert!(decision.denial_message(Some("https://x")).is_none());
    }

    #[test]
    fn denial_message_mentions_tier_and_url() {
        let decision = AccessDecision {
            allowed: false,
            reason_code: ReasonCode::InsufficientTier,
            feature: "export-pdf".to_string(),
            required_tier: Some("pro".to_string()),
            current_tier: "free".to_string(),
        };
        let msg = decision.denial_message(Some("https://example.com/pricing")).unwrap();
        assert!(msg.contains("pro"));
        assert!(msg.contains("https://example.com/pricing"));
    }
}
