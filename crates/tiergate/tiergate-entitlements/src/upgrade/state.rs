//! Caller-owned prompt state: `Closed` -> `Open` on a denial, back on close.

use crate::decision::EntitlementDecision;
use crate::evaluator::Evaluator;

use super::prompt::UpgradePromptPayload;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UpgradePromptState {
    #[default]
    Closed,
    Open(UpgradePromptPayload),
}

/// One prompt per UI session. The evaluator never holds one of these.
#[derive(Debug, Clone, Default)]
pub struct UpgradePrompt {
    state: UpgradePromptState,
}

impl UpgradePrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the prompt for a denied decision. Returns whether it is open
    /// afterwards; an allowed decision leaves the state untouched. Showing an
    /// already open prompt replaces its payload.
    pub fn show<D>(&mut self, evaluator: &Evaluator, decision: &D, feature_label: Option<&str>) -> bool
    where
        D: EntitlementDecision + ?Sized,
    {
        if let Some(payload) = evaluator.build_upgrade_prompt(decision, feature_label) {
            self.state = UpgradePromptState::Open(payload);
        }
        self.is_open()
    }

    pub fn close(&mut self) {
        self.state = UpgradePromptState::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, UpgradePromptState::Open(_))
    }

    pub fn payload(&self) -> Option<&UpgradePromptPayload> {
        match &self.state {
            UpgradePromptState::Open(payload) => Some(payload),
            UpgradePromptState::Closed => None,
        }
    }

    pub fn state(&self) -> &UpgradePromptState {
        &self.state
    }
}
