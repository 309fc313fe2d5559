//! A single subscription tier.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::TierConfig;
use crate::errors::CatalogError;

use super::limit::LimitValue;

/// Immutable tier definition, built once when the catalog is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct TierDefinition {
    pub id: String,
    pub rank: i64,
    pub display_name: String,
    pub limits: FxHashMap<String, LimitValue>,
    pub features: FxHashSet<String>,
}

impl TierDefinition {
    pub fn new(id: impl Into<String>, rank: i64) -> Self {
        let id = id.into();
        Self {
            display_name: id.clone(),
            id,
            rank,
            limits: FxHashMap::default(),
            features: FxHashSet::default(),
        }
    }

    pub fn with_limit(mut self, key: impl Into<String>, limit: impl Into<LimitValue>) -> Self {
        self.limits.insert(key.into(), limit.into());
        self
    }

    pub fn with_feature(mut self, feature: impl Into<String>) -> Self {
        self.features.insert(feature.into());
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn limit(&self, key: &str) -> Option<LimitValue> {
        self.limits.get(key).copied()
    }

    /// Rank comparison; identity of the id plays no part.
    pub fn meets_or_exceeds(&self, other: &TierDefinition) -> bool {
        self.rank >= other.rank
    }
}

impl TryFrom<&TierConfig> for TierDefinition {
    type Error = CatalogError;

    fn try_from(cfg: &TierConfig) -> Result<Self, Self::Error> {
        let mut limits = FxHashMap::default();
        for (key, entry) in &cfg.limits {
            let limit = entry.resolve().map_err(|value| CatalogError::InvalidLimit {
                tier: cfg.id.clone(),
                key: key.clone(),
                value,
            })?;
            limits.insert(key.clone(), limit);
        }

        Ok(Self {
            id: cfg.id.clone(),
            rank: cfg.rank,
            display_name: cfg.display_name.clone().unwrap_or_else(|| cfg.id.clone()),
            limits,
            features: cfg.features.iter().cloned().collect(),
        })
    }
}
