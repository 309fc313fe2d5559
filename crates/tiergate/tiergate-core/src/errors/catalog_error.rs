//! Catalog load and validation errors.

use std::path::PathBuf;

use super::error_code::{self, TiergateErrorCode};

/// Errors raised while loading or validating a tier catalog.
///
/// All of these are fatal at boot: a host must refuse to serve requests
/// rather than evaluate against an inconsistent catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Cannot read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML catalog: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported catalog format for {path} (expected .toml or .json)")]
    UnsupportedFormat { path: PathBuf },

    #[error("Catalog defines no tiers")]
    Empty,

    #[error("Tier at position {index} has an empty id")]
    EmptyTierId { index: usize },

    #[error("Duplicate tier id: {id}")]
    DuplicateTierId { id: String },

    #[error("Duplicate rank {rank} shared by tiers '{first}' and '{second}'")]
    DuplicateRank {
        rank: i64,
        first: String,
        second: String,
    },

    #[error("Tier '{tier}' has invalid limit '{key}' = {value}")]
    InvalidLimit {
        tier: String,
        key: String,
        value: String,
    },

    #[error("Feature '{feature}' requires unknown tier '{tier}'")]
    UnknownRequiredTier { feature: String, tier: String },

    #[error("Near-limit threshold {value} is outside (0, 100]")]
    InvalidThreshold { value: f64 },

    #[error("No catalog source path configured")]
    NoSource,
}

impl TiergateErrorCode for CatalogError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::CATALOG_IO,
            Self::Toml(_) | Self::Json(_) => error_code::CATALOG_PARSE,
            Self::UnsupportedFormat { .. } => error_code::CATALOG_UNSUPPORTED_FORMAT,
            Self::Empty => error_code::CATALOG_EMPTY,
            Self::EmptyTierId { .. } => error_code::CATALOG_EMPTY_TIER_ID,
            Self::DuplicateTierId { .. } => error_code::CATALOG_DUPLICATE_TIER_ID,
            Self::DuplicateRank { .. } => error_code::CATALOG_DUPLICATE_RANK,
            Self::InvalidLimit { .. } => error_code::CATALOG_INVALID_LIMIT,
            Self::UnknownRequiredTier { .. } => error_code::CATALOG_UNKNOWN_REQUIRED_TIER,
            Self::InvalidThreshold { .. } => error_code::CATALOG_INVALID_THRESHOLD,
            Self::NoSource => error_code::CATALOG_NO_SOURCE,
        }
    }
}

/// Convenience type alias.
pub type CatalogResult<T> = Result<T, CatalogError>;
