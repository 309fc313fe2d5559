//! Upgrade prompting: turns a denial into something a host can render.
//!
//! - **prompt**: `UpgradePromptPayload` and `build_upgrade_prompt`
//! - **state**: `UpgradePrompt`, the closed/open machine a caller owns per session

pub mod prompt;
pub mod state;

pub use prompt::{build_upgrade_prompt, UpgradePromptPayload};
pub use state::{UpgradePrompt, UpgradePromptState};
