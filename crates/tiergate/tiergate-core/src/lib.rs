//! # tiergate-core
//!
//! Foundation crate for the tiergate entitlement evaluator.
//! Defines the tier catalog, its configuration format, fatal catalog errors,
//! the hot-reloadable catalog handle, and logging setup.
//! `tiergate-entitlements` builds every decision on top of this.

pub mod catalog;
pub mod config;
pub mod errors;
pub mod logging;

// Re-export the most commonly used types at the crate root.
pub use catalog::handle::CatalogHandle;
pub use catalog::limit::{LimitEntry, LimitValue};
pub use catalog::tier::TierDefinition;
pub use catalog::TierCatalog;
pub use config::{EvaluatorConfig, TiergateConfig};
pub use errors::{CatalogError, CatalogResult, TiergateErrorCode};
