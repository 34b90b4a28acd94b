use tracing::debug;

use crate::error::{ScoringResult, ensure_finite};
use crate::model::component::Component;
use crate::model::config::CenterMode;
use crate::model::scores::{ComponentScoreSet, NormalizedScoreSet};
use crate::stats::{mean, percentile_sorted, sorted_copy, std_dev};

/// IQR of a standard normal, in units of sigma.
const IQR_TO_SIGMA: f64 = 1.35;

/// Logistic normalization into (0,1) around a robust or classical center.
pub fn normalize(x: &[f64], mode: CenterMode) -> ScoringResult<Vec<f64>> {
    if x.is_empty() {
        return Ok(Vec::new());
    }
    ensure_finite(x, "normalizer input")?;

    let (center, mut scale) = center_scale(x, mode);
    if scale == 0.0 {
        debug!(?mode, n = x.len(), "zero scale in normalizer; using 1");
        scale = 1.0;
    }

    Ok(x.iter()
        .map(|&v| 1.0 / (1.0 + (-(v - center) / scale).exp()))
        .collect())
}

fn center_scale(x: &[f64], mode: CenterMode) -> (f64, f64) {
    match mode {
        CenterMode::Robust => {
            let sorted = sorted_copy(x);
            let q1 = percentile_sorted(&sorted, 25.0);
            let q3 = percentile_sorted(&sorted, 75.0);
            (percentile_sorted(&sorted, 50.0), (q3 - q1) / IQR_TO_SIGMA)
        }
        CenterMode::Classical => (mean(x), std_dev(x)),
    }
}

/// Normalizes each component column independently and multiplies by `display_scale`.
pub fn normalize_set(
    set: &ComponentScoreSet,
    mode: CenterMode,
    display_scale: f64,
) -> ScoringResult<NormalizedScoreSet> {
    set.validate()?;
    let mut columns: [Vec<f64>; 4] = Default::default();
    for component in Component::ALL {
        let mut col = normalize(set.column(component), mode)?;
        for v in &mut col {
            *v *= display_scale;
        }
        columns[component.index()] = col;
    }
    let [effort, duration, quality, goal] = columns;
    Ok(NormalizedScoreSet {
        scores: ComponentScoreSet {
            effort,
            duration,
            quality,
            goal,
        },
        display_scale,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_normalize.rs"]
mod tests;
