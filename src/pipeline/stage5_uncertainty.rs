use rand::Rng;
use tracing::debug;

use crate::error::{ScoringError, ScoringResult, ensure_finite};
use crate::model::config::BootstrapParams;
use crate::model::interval::ConfidenceInterval;
use crate::stats::normal::{norm_cdf, norm_ppf};
use crate::stats::{mean, percentile_sorted, sorted_copy};

/// Default statistic for the bootstrap: the arithmetic mean.
pub fn mean_statistic(sample: &[f64]) -> f64 {
    mean(sample)
}

/// Bias-corrected and accelerated bootstrap interval for `statistic`.
///
/// Resampling draws indices from `rng`, so a seeded generator gives
/// bit-identical bounds. The bounds are not reordered if the adjusted levels
/// cross.
pub fn bca_confidence_interval<F, R>(
    sample: &[f64],
    statistic: F,
    n_bootstrap: usize,
    alpha: f64,
    rng: &mut R,
) -> ScoringResult<ConfidenceInterval>
where
    F: Fn(&[f64]) -> f64,
    R: Rng + ?Sized,
{
    let n = sample.len();
    if n == 0 {
        return Err(ScoringError::EmptyInput("bootstrap sample"));
    }
    if n_bootstrap == 0 {
        return Err(ScoringError::InvalidParameter(
            "n_bootstrap must be at least 1".to_string(),
        ));
    }
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(ScoringError::InvalidParameter(format!(
            "alpha must lie in (0, 1), got {alpha}"
        )));
    }
    ensure_finite(sample, "bootstrap sample")?;

    let mut resample = Vec::with_capacity(n);
    let mut boot = Vec::with_capacity(n_bootstrap);
    for _ in 0..n_bootstrap {
        resample.clear();
        for _ in 0..n {
            resample.push(sample[rng.gen_range(0..n)]);
        }
        boot.push(statistic(&resample));
    }

    let original = statistic(sample);
    let below = boot.iter().filter(|&&s| s < original).count();
    let z0 = norm_ppf(below as f64 / n_bootstrap as f64);

    let acceleration = jackknife_acceleration(sample, &statistic);

    let (alpha1, alpha2) = adjusted_levels(z0, acceleration, alpha);
    let sorted = sorted_copy(&boot);
    let lower = percentile_sorted(&sorted, 100.0 * alpha1);
    let upper = percentile_sorted(&sorted, 100.0 * alpha2);
    if !lower.is_finite() || !upper.is_finite() {
        return Err(ScoringError::NonFinite("bootstrap interval"));
    }

    debug!(
        n,
        n_bootstrap, z0, acceleration, alpha1, alpha2, lower, upper, "BCa interval"
    );
    Ok(ConfidenceInterval { lower, upper })
}

/// BCa interval of the mean with the run's bootstrap parameters.
pub fn bca_mean_interval<R>(
    sample: &[f64],
    params: &BootstrapParams,
    rng: &mut R,
) -> ScoringResult<ConfidenceInterval>
where
    R: Rng + ?Sized,
{
    bca_confidence_interval(sample, mean_statistic, params.n_bootstrap, params.alpha, rng)
}

/// Skewness-based acceleration from leave-one-out statistics. 0 when the
/// jackknife is undefined (single observation) or has zero spread.
pub fn jackknife_acceleration<F>(sample: &[f64], statistic: &F) -> f64
where
    F: Fn(&[f64]) -> f64,
{
    let n = sample.len();
    if n < 2 {
        return 0.0;
    }
    let mut leave_out = Vec::with_capacity(n - 1);
    let mut jack = Vec::with_capacity(n);
    for i in 0..n {
        leave_out.clear();
        leave_out.extend_from_slice(&sample[..i]);
        leave_out.extend_from_slice(&sample[i + 1..]);
        jack.push(statistic(&leave_out));
    }
    let jack_mean = mean(&jack);

    let mut num = 0f64;
    let mut sq = 0f64;
    for &j in &jack {
        let d = jack_mean - j;
        num += d * d * d;
        sq += d * d;
    }
    let den = 6.0 * sq.powf(1.5);
    if den != 0.0 { num / den } else { 0.0 }
}

/// Percentile levels (as fractions) after bias and acceleration correction.
fn adjusted_levels(z0: f64, acceleration: f64, alpha: f64) -> (f64, f64) {
    let lo = alpha / 2.0;
    let hi = 1.0 - alpha / 2.0;
    if !z0.is_finite() {
        debug!(z0, "bootstrap distribution entirely on one side; using unadjusted levels");
        return (lo, hi);
    }
    let z_alpha = norm_ppf(lo);

    let denom1 = 1.0 - acceleration * (z0 + z_alpha);
    let alpha1 = if denom1 != 0.0 {
        norm_cdf(z0 + (z0 + z_alpha) / denom1)
    } else {
        lo
    };
    let denom2 = 1.0 - acceleration * (z0 - z_alpha);
    let alpha2 = if denom2 != 0.0 {
        norm_cdf(z0 + (z0 - z_alpha) / denom2)
    } else {
        hi
    };

    (
        if alpha1.is_nan() { lo } else { alpha1 },
        if alpha2.is_nan() { hi } else { alpha2 },
    )
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_uncertainty.rs"]
mod tests;
