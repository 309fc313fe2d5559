//! Stable string codes for fatal errors.

/// Implemented by every tiergate error so hosts can log or report a code
/// that does not change when the message wording does.
pub trait TiergateErrorCode {
    fn error_code(&self) -> &'static str;
}

pub const CATALOG_IO: &str = "CATALOG_IO";
pub const CATALOG_PARSE: &str = "CATALOG_PARSE";
pub const CATALOG_UNSUPPORTED_FORMAT: &str = "CATALOG_UNSUPPORTED_FORMAT";
pub const CATALOG_EMPTY: &str = "CATALOG_EMPTY";
pub const CATALOG_EMPTY_TIER_ID: &str = "CATALOG_EMPTY_TIER_ID";
pub const CATALOG_DUPLICATE_TIER_ID: &str = "CATALOG_DUPLICATE_TIER_ID";
pub const CATALOG_DUPLICATE_RANK: &str = "CATALOG_DUPLICATE_RANK";
pub const CATALOG_INVALID_LIMIT: &str = "CATALOG_INVALID_LIMIT";
pub const CATALOG_UNKNOWN_REQUIRED_TIER: &str = "CATALOG_UNKNOWN_REQUIRED_TIER";
pub const CATALOG_INVALID_THRESHOLD: &str = "CATALOG_INVALID_THRESHOLD";
pub const CATALOG_NO_SOURCE: &str = "CATALOG_NO_SOURCE";
