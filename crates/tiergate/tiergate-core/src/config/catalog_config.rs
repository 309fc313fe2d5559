//! Tier table configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::limit::LimitEntry;

/// One `[[tiers]]` entry as written in the config document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TierConfig {
    /// Unique tier identifier, e.g. "free", "pro".
    pub id: String,
    /// Position in the total order; higher means more capability.
    pub rank: i64,
    /// Label for upgrade prompts. Default: the id.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Limit-key to ceiling, validated when the catalog is built.
    #[serde(default)]
    pub limits: BTreeMap<String, LimitEntry>,
    /// Feature-keys unlocked at this tier.
    #[serde(default)]
    pub features: Vec<String>,
}
