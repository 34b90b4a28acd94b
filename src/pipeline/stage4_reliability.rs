use tracing::debug;

use crate::error::{ScoringError, ScoringResult, ensure_finite, ensure_same_len};
use crate::stats::variance;

/// Cronbach's alpha over the four component columns, clamped to [0,1].
pub fn cronbach_alpha(rows: &[[f64; 4]]) -> ScoringResult<f64> {
    if rows.is_empty() {
        return Err(ScoringError::EmptyInput("reliability matrix"));
    }
    let columns = (0..4)
        .map(|c| rows.iter().map(|r| r[c]).collect::<Vec<_>>())
        .collect::<Vec<_>>();
    cronbach_alpha_items(&columns)
}

/// Cronbach's alpha for `k >= 2` equal-length item columns, clamped to [0,1].
/// Returns exactly 0 when the summed score has zero variance.
pub fn cronbach_alpha_items(columns: &[Vec<f64>]) -> ScoringResult<f64> {
    let k = columns.len();
    if k < 2 {
        return Err(ScoringError::InvalidParameter(format!(
            "reliability needs at least 2 items, got {k}"
        )));
    }
    let n = columns[0].len();
    if n == 0 {
        return Err(ScoringError::EmptyInput("reliability matrix"));
    }
    for col in columns {
        ensure_same_len(n, col.len(), "reliability item column")?;
        ensure_finite(col, "reliability matrix")?;
    }

    let item_variance_sum = columns.iter().map(|c| variance(c)).sum::<f64>();
    let totals = (0..n)
        .map(|i| columns.iter().map(|c| c[i]).sum::<f64>())
        .collect::<Vec<_>>();
    let total_variance = variance(&totals);
    if total_variance == 0.0 {
        debug!(n, k, "zero total variance; reliability is 0");
        return Ok(0.0);
    }

    let k = k as f64;
    let alpha = (k / (k - 1.0)) * (1.0 - item_variance_sum / total_variance);
    Ok(alpha.clamp(0.0, 1.0))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_reliability.rs"]
mod tests;
