//! Entitlement evaluation over a tier catalog.
//!
//! ## Operations
//! - **check_feature_access**: is a feature unlocked at a tier
//! - **check_usage_limit** / **check_usage_increment**: is a counted resource within its ceiling
//! - **compare_tiers**: does one tier meet or exceed another
//! - **build_upgrade_prompt**: what to offer a user after a denial
//!
//! Every operation is a pure read of an immutable `TierCatalog`. Unknown
//! tiers, features, and limits fail closed and are reported through
//! `ReasonCode`, never as errors.

pub mod decision;
pub mod evaluator;
pub mod upgrade;

pub use decision::{AccessDecision, EntitlementDecision, ReasonCode, TierComparison, UsageDecision};
pub use evaluator::Evaluator;
pub use upgrade::{build_upgrade_prompt, UpgradePrompt, UpgradePromptPayload, UpgradePromptState};
