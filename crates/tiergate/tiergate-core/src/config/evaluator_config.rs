//! Evaluator tuning.

use serde::{Deserialize, Serialize};

use crate::errors::{CatalogError, CatalogResult};

/// Usage at or above this percentage of a finite limit is "near limit".
pub const NEAR_LIMIT_THRESHOLD_PERCENT: f64 = 80.0;

/// Settings that shape decisions but not the tier table itself.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Near-limit warning threshold in percent. Default: 80.0.
    pub near_limit_threshold: Option<f64>,
    /// Pricing page quoted in denial messages.
    pub upgrade_url: Option<String>,
}

impl EvaluatorConfig {
    /// Returns the effective near-limit threshold, defaulting to 80%.
    pub fn effective_near_limit_threshold(&self) -> f64 {
        self.near_limit_threshold
            .unwrap_or(NEAR_LIMIT_THRESHOLD_PERCENT)
    }

    /// Rejects thresholds outside `(0, 100]`, NaN included.
    pub fn validate(&self) -> CatalogResult<()> {
        let value = self.effective_near_limit_threshold();
        if value > 0.0 && value <= 100.0 {
            Ok(())
        } else {
            Err(CatalogError::InvalidThreshold { value })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_threshold_is_eighty() {
        assert_eq!(
            EvaluatorConfig::default().effective_near_limit_threshold(),
            80.0
        );
    }

    #[test]
    fn threshold_bounds() {
        for bad in [0.0, -1.0, 100.5, f64::NAN] {
            let cfg = EvaluatorConfig {
                near_limit_threshold: Some(bad),
                upgrade_url: None,
            };
            assert!(cfg.validate().is_err(), "{bad} should be rejected");
        }
        let cfg = EvaluatorConfig {
            near_limit_threshold: Some(100.0),
            upgrade_url: None,
        };
        assert!(cfg.validate().is_ok());
    }
}
