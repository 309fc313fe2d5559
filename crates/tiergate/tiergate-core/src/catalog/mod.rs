//! Tier Catalog: the validated, immutable tier table every decision reads.
//!
//! ## Guarantees
//! - At least one tier
//! - Tier ids and ranks are unique; tiers are held in ascending rank order
//! - Every feature requirement points at a tier in the catalog
//!
//! ## Components
//! - **limit**: `LimitValue` and the `UNLIMITED` sentinel
//! - **tier**: `TierDefinition`
//! - **handle**: `CatalogHandle`: snapshot, publish, hot-reload

pub mod handle;
pub mod limit;
pub mod tier;

use std::path::Path;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::info;

use crate::config::{EvaluatorConfig, TiergateConfig};
use crate::errors::{CatalogError, CatalogResult};

use self::tier::TierDefinition;

/// The tier table plus the feature-to-minimum-tier mapping.
#[derive(Debug, Clone)]
pub struct TierCatalog {
    /// Ascending by rank.
    tiers: Vec<TierDefinition>,
    /// Tier id -> position in `tiers`.
    by_id: FxHashMap<String, usize>,
    /// Feature-key -> position of its minimum tier in `tiers`.
    requirements: FxHashMap<String, usize>,
    evaluator: EvaluatorConfig,
}

impl TierCatalog {
    /// Build a catalog from a parsed config document.
    pub fn from_config(config: &TiergateConfig) -> CatalogResult<Self> {
        let tiers = config
            .tiers
            .iter()
            .map(TierDefinition::try_from)
            .collect::<CatalogResult<Vec<_>>>()?;
        let requirements = config
            .features
            .iter()
            .map(|(feature, tier)| (feature.clone(), tier.clone()));
        Self::from_parts(tiers, requirements, config.evaluator.clone())
    }

    /// Build a catalog from tier definitions and explicit `(feature, tier-id)`
    /// requirements.
    ///
    /// Features listed in a tier's `features` set without an explicit
    /// requirement are gated at the lowest-rank tier that lists them.
    pub fn from_parts<I>(
        mut tiers: Vec<TierDefinition>,
        requirements: I,
        evaluator: EvaluatorConfig,
    ) -> CatalogResult<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        evaluator.validate()?;
        if tiers.is_empty() {
            return Err(CatalogError::Empty);
        }
        if let Some(index) = tiers.iter().position(|t| t.id.trim().is_empty()) {
            return Err(CatalogError::EmptyTierId { index });
        }

        let mut seen = FxHashSet::default();
        for tier in &tiers {
            if !seen.insert(tier.id.as_str()) {
                return Err(CatalogError::DuplicateTierId {
                    id: tier.id.clone(),
                });
            }
        }

        tiers.sort_by_key(|t| t.rank);
        for pair in tiers.windows(2) {
            if pair[0].rank == pair[1].rank {
                return Err(CatalogError::DuplicateRank {
                    rank: pair[0].rank,
                    first: pair[0].id.clone(),
                    second: pair[1].id.clone(),
                });
            }
        }

        let by_id: FxHashMap<String, usize> = tiers
            .iter()
            .enumerate()
            .map(|(pos, tier)| (tier.id.clone(), pos))
            .collect();

        let mut explicit = FxHashMap::default();
        for (feature, tier_id) in requirements {
            let pos = *by_id
                .get(&tier_id)
                .ok_or_else(|| CatalogError::UnknownRequiredTier {
                    feature: feature.clone(),
                    tier: tier_id.clone(),
                })?;
            explicit.insert(feature, pos);
        }

        // Ascending walk: the first tier to list a feature is its minimum.
        let mut requirements = explicit;
        for (pos, tier) in tiers.iter().enumerate() {
            for feature in &tier.features {
                requirements.entry(feature.clone()).or_insert(pos);
            }
        }

        info!(
            tiers = tiers.len(),
            features = requirements.len(),
            "Tier catalog loaded"
        );

        Ok(Self {
            tiers,
            by_id,
            requirements,
            evaluator,
        })
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(toml_str: &str) -> CatalogResult<Self> {
        Self::from_config(&TiergateConfig::from_toml(toml_str)?)
    }

    /// Parse and validate a JSON document.
    pub fn from_json(json_str: &str) -> CatalogResult<Self> {
        Self::from_config(&TiergateConfig::from_json(json_str)?)
    }

    /// Read, parse, and validate a `.toml` or `.json` catalog file.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        Self::from_config(&TiergateConfig::load(path)?)
    }

    /// Tier by id.
    pub fn get_tier(&self, id: &str) -> Option<&TierDefinition> {
        self.by_id.get(id).map(|&pos| &self.tiers[pos])
    }

    /// All tiers, ascending by rank.
    pub fn tiers(&self) -> &[TierDefinition] {
        &self.tiers
    }

    /// The tier unknown ids fall back to.
    pub fn lowest_tier(&self) -> &TierDefinition {
        // Construction rejects empty catalogs.
        &self.tiers[0]
    }

    pub fn highest_tier(&self) -> &TierDefinition {
        &self.tiers[self.tiers.len() - 1]
    }

    /// Tiers ranked strictly above `tier`, ascending.
    pub fn tiers_above(&self, tier: &TierDefinition) -> &[TierDefinition] {
        let start = self.tiers.partition_point(|t| t.rank <= tier.rank);
        &self.tiers[start..]
    }

    /// Minimum tier for a feature, if the feature is registered.
    pub fn required_tier(&self, feature: &str) -> Option<&TierDefinition> {
        self.requirements.get(feature).map(|&pos| &self.tiers[pos])
    }

    /// Every registered feature-key, in no particular order.
    pub fn feature_keys(&self) -> impl Iterator<Item = &str> {
        self.requirements.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn evaluator_config(&self) -> &EvaluatorConfig {
        &self.evaluator
    }
}
