//! Errors that stop a host from serving.
//!
//! Evaluation outcomes are never errors; only a catalog that fails to load or
//! validate ends up here.

mod catalog_error;
pub mod error_code;

pub use catalog_error::{CatalogError, CatalogResult};
pub use error_code::TiergateErrorCode;
