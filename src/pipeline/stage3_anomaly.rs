use std::collections::VecDeque;

use tracing::{debug, info};

use crate::error::{ScoringResult, ensure_finite};
use crate::model::config::{DetectorParams, ThresholdMode};
use crate::stats::{mad, mean, median, std_dev};

#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyReport {
    pub indices: Vec<usize>,
    pub ewma: Vec<f64>,
}

/// Sequential CUSUM-EWMA state. Each `step` depends only on the previous state
/// and the new observation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyRunState {
    pub ewma: f64,
    pub cusum_pos: f64,
    pub cusum_neg: f64,
    pub threshold: f64,
    pub baseline: f64,
    pub step: usize,
    window: VecDeque<f64>,
}

impl AnomalyRunState {
    /// State after observing `first` at step 0.
    pub fn start(first: f64, baseline: f64, threshold: f64, params: &DetectorParams) -> Self {
        let mut window = VecDeque::with_capacity(params.window + 1);
        window.push_back(first);
        Self {
            ewma: first,
            cusum_pos: 0.0,
            cusum_neg: 0.0,
            threshold,
            baseline,
            step: 0,
            window,
        }
    }

    /// Advances one step; returns true when the step triggers an anomaly.
    pub fn step(&mut self, x: f64, mode: ThresholdMode, params: &DetectorParams) -> bool {
        self.step += 1;
        let t = self.step;
        let lambda = params.ewma_lambda;
        let k = params.cusum_slack;

        self.ewma = lambda * x + (1.0 - lambda) * self.ewma;
        let dev = self.ewma - self.baseline;
        self.cusum_pos = (self.cusum_pos + (dev - k)).max(0.0);
        self.cusum_neg = (self.cusum_neg - (dev + k)).max(0.0);

        // window holds ewma[t - window .. t - 1] at this point
        if mode == ThresholdMode::Dynamic && t > params.window {
            self.threshold = params.threshold_multiplier * std_dev(self.window.make_contiguous());
        }
        self.window.push_back(self.ewma);
        while self.window.len() > params.window {
            self.window.pop_front();
        }

        if self.cusum_pos > self.threshold || self.cusum_neg > self.threshold {
            self.cusum_pos = 0.0;
            self.cusum_neg = 0.0;
            return true;
        }
        false
    }
}

/// Baseline and initial threshold for a full series.
pub fn initial_baseline(
    series: &[f64],
    mode: ThresholdMode,
    params: &DetectorParams,
) -> (f64, f64) {
    match mode {
        ThresholdMode::Dynamic => {
            let mu0 = median(series);
            let spread = mad(series, mu0);
            let h = if spread > 0.0 {
                params.threshold_multiplier * spread
            } else {
                debug!("zero MAD; using fallback CUSUM threshold");
                params.fallback_threshold
            };
            (mu0, h)
        }
        ThresholdMode::Static => (mean(series), params.fallback_threshold),
    }
}

pub fn detect_anomalies(series: &[f64], mode: ThresholdMode) -> ScoringResult<AnomalyReport> {
    detect_anomalies_with(series, mode, &DetectorParams::default())
}

pub fn detect_anomalies_with(
    series: &[f64],
    mode: ThresholdMode,
    params: &DetectorParams,
) -> ScoringResult<AnomalyReport> {
    params.validate()?;
    let Some(&first) = series.first() else {
        return Ok(AnomalyReport {
            indices: Vec::new(),
            ewma: Vec::new(),
        });
    };
    ensure_finite(series, "anomaly detector series")?;

    let (baseline, threshold) = initial_baseline(series, mode, params);
    let mut state = AnomalyRunState::start(first, baseline, threshold, params);
    let mut ewma = Vec::with_capacity(series.len());
    ewma.push(first);
    let mut indices = Vec::new();

    for (t, &x) in series.iter().enumerate().skip(1) {
        if state.step(x, mode, params) {
            indices.push(t);
        }
        ewma.push(state.ewma);
    }

    info!(
        n = series.len(),
        anomalies = indices.len(),
        ?mode,
        "CUSUM-EWMA detection finished"
    );
    Ok(AnomalyReport { indices, ewma })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_anomaly.rs"]
mod tests;
