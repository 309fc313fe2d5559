pub mod catalog_config;
pub mod evaluator_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use catalog_config::TierConfig;
pub use evaluator_config::{EvaluatorConfig, NEAR_LIMIT_THRESHOLD_PERCENT};

use crate::errors::{CatalogError, CatalogResult};

/// Top-level configuration document: evaluator settings, the tier table, and
/// the feature-to-minimum-tier mapping.
///
/// ```toml
/// [evaluator]
/// near_limit_threshold = 80.0
///
/// [[tiers]]
/// id = "free"
/// rank = 0
/// [tiers.limits]
/// generations = 10
///
/// [features]
/// export-pdf = "pro"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct TiergateConfig {
    pub evaluator: EvaluatorConfig,
    pub tiers: Vec<TierConfig>,
    /// Feature-key to minimum tier-id.
    pub features: std::collections::BTreeMap<String, String>,
}

impl TiergateConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> CatalogResult<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load config from a JSON string, falling back to defaults for missing fields.
    pub fn from_json(json_str: &str) -> CatalogResult<Self> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Load config from a `.toml` or `.json` file.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::from_toml(&content),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json(&content),
            _ => Err(CatalogError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}
