use serde::{Deserialize, Serialize};

use crate::error::{ScoringError, ScoringResult};
use crate::model::optimizer::AdamParams;
use crate::model::weights::WeightVector;

/// Center/scale estimator used by the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CenterMode {
    /// Median and IQR / 1.35.
    Robust,
    /// Mean and population standard deviation.
    Classical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdMode {
    /// Median baseline, MAD threshold, rolling re-estimation after the warm-up window.
    Dynamic,
    /// Mean baseline with the fixed fallback threshold.
    Static,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorParams {
    pub ewma_lambda: f64,
    pub cusum_slack: f64,
    pub fallback_threshold: f64,
    pub threshold_multiplier: f64,
    pub window: usize,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            ewma_lambda: 0.2,
            cusum_slack: 0.5,
            fallback_threshold: 5.0,
            threshold_multiplier: 5.0,
            window: 100,
        }
    }
}

impl DetectorParams {
    /// Rejects smoothing outside (0, 1], negative or non-finite slack and
    /// thresholds, and an empty rolling window.
    pub fn validate(&self) -> ScoringResult<()> {
        if !(self.ewma_lambda > 0.0 && self.ewma_lambda <= 1.0) {
            return Err(ScoringError::InvalidParameter(format!(
                "ewma_lambda must lie in (0, 1], got {}",
                self.ewma_lambda
            )));
        }
        for (name, value) in [
            ("cusum_slack", self.cusum_slack),
            ("fallback_threshold", self.fallback_threshold),
            ("threshold_multiplier", self.threshold_multiplier),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ScoringError::InvalidParameter(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if self.window == 0 {
            return Err(ScoringError::InvalidParameter(
                "detector window must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapParams {
    pub n_bootstrap: usize,
    pub alpha: f64,
}

impl Default for BootstrapParams {
    fn default() -> Self {
        Self {
            n_bootstrap: 1000,
            alpha: 0.05,
        }
    }
}

/// Run profile for the end-to-end analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub center_mode: CenterMode,
    pub threshold_mode: ThresholdMode,
    pub display_scale: f64,
    pub weights: WeightVector,
    pub detector: DetectorParams,
    pub bootstrap: BootstrapParams,
    pub adam: AdamParams,
    pub seed: u64,
}

impl AnalysisConfig {
    pub fn default_v1() -> Self {
        Self {
            center_mode: CenterMode::Robust,
            threshold_mode: ThresholdMode::Dynamic,
            display_scale: 100.0,
            weights: WeightVector::uniform(),
            detector: DetectorParams::default(),
            bootstrap: BootstrapParams::default(),
            adam: AdamParams::default(),
            seed: 42,
        }
    }

    pub fn classical_static() -> Self {
        let mut base = Self::default_v1();
        base.center_mode = CenterMode::Classical;
        base.threshold_mode = ThresholdMode::Static;
        base
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::default_v1()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/config.rs"]
mod tests;
