//! Productivity scoring core.
//!
//! Four component scores (effort, duration, quality, goal) are normalized,
//! combined into a weighted composite, monitored with a CUSUM-EWMA detector,
//! checked for internal consistency and summarized with BCa bootstrap
//! intervals. Weights are re-fitted out-of-band with Adam.

pub mod error;
pub mod input;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod tracing;

pub use error::{ScoringError, ScoringResult};
pub use model::component::Component;
pub use model::config::{AnalysisConfig, BootstrapParams, CenterMode, DetectorParams, ThresholdMode};
pub use model::interval::ConfidenceInterval;
pub use model::optimizer::{AdamParams, OptimizerState};
pub use model::scores::{ComponentScoreSet, NormalizedScoreSet};
pub use model::weights::{WEIGHT_FLOOR, WeightVector};
pub use pipeline::stage1_normalize::{normalize, normalize_set};
pub use pipeline::stage2_composite::{composite_from_set, composite_score};
pub use pipeline::stage3_anomaly::{
    AnomalyReport, AnomalyRunState, detect_anomalies, detect_anomalies_with,
};
pub use pipeline::stage4_reliability::{cronbach_alpha, cronbach_alpha_items};
pub use pipeline::stage5_uncertainty::{bca_confidence_interval, bca_mean_interval, mean_statistic};
pub use pipeline::stage6_reweight::{GradientMap, update_weights, update_weights_with};
