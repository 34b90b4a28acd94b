use serde::Serialize;

use crate::model::interval::ConfidenceInterval;
use crate::model::weights::WeightVector;
use crate::stats::{mean, percentile_sorted, sorted_copy, std_dev};

pub mod json;
pub mod text;

/// Descriptive statistics over all composite scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub mean: f64,
    pub std: f64,
    pub median: f64,
    pub q1: f64,
    pub q3: f64,
}

impl SummaryStatistics {
    pub fn compute(values: &[f64]) -> Self {
        let sorted = sorted_copy(values);
        Self {
            mean: mean(values),
            std: std_dev(values),
            median: percentile_sorted(&sorted, 50.0),
            q1: percentile_sorted(&sorted, 25.0),
            q3: percentile_sorted(&sorted, 75.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReliabilityBand {
    Excellent,
    Good,
    Acceptable,
    Questionable,
    Poor,
}

impl ReliabilityBand {
    pub fn from_alpha(alpha: f64) -> Self {
        if alpha >= 0.9 {
            ReliabilityBand::Excellent
        } else if alpha >= 0.8 {
            ReliabilityBand::Good
        } else if alpha >= 0.7 {
            ReliabilityBand::Acceptable
        } else if alpha >= 0.6 {
            ReliabilityBand::Questionable
        } else {
            ReliabilityBand::Poor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReliabilityBand::Excellent => "Excellent",
            ReliabilityBand::Good => "Good",
            ReliabilityBand::Acceptable => "Acceptable",
            ReliabilityBand::Questionable => "Questionable",
            ReliabilityBand::Poor => "Poor",
        }
    }
}

/// Everything the report writers need from one analysis run.
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub tool_name: String,
    pub tool_version: String,
    pub input_source: String,
    pub n_entities: usize,
    pub n_days: usize,
    pub center_mode: String,
    pub threshold_mode: String,
    pub seed: u64,
    pub n_bootstrap: usize,
    pub ci_alpha: f64,
    pub weights: WeightVector,
    pub cronbach_alpha: f64,
    pub component_alpha: f64,
    pub confidence_interval: ConfidenceInterval,
    pub statistics: SummaryStatistics,
    pub anomalies: Vec<usize>,
}

pub fn format_f64_1(v: f64) -> String {
    format!("{:.1}", v)
}

pub fn format_f64_3(v: f64) -> String {
    format!("{:.3}", v)
}

/// Short weekday label for time step `day`; steps past a week are numbered.
pub fn day_label(day: usize) -> String {
    const NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
    match NAMES.get(day) {
        Some(name) => (*name).to_string(),
        None => format!("Day{day}"),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
