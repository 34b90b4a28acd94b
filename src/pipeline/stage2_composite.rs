use crate::error::{ScoringResult, ensure_finite, ensure_same_len};
use crate::model::scores::NormalizedScoreSet;
use crate::model::weights::WeightVector;

/// Weighted sum `w_e*E + w_d*D + w_q*Q + w_g*G`, elementwise. Not clamped.
/// Non-finite components or weights and negative weights are rejected.
pub fn composite_score(
    effort: &[f64],
    duration: &[f64],
    quality: &[f64],
    goal: &[f64],
    weights: &WeightVector,
) -> ScoringResult<Vec<f64>> {
    let n = effort.len();
    ensure_same_len(n, duration.len(), "duration component")?;
    ensure_same_len(n, quality.len(), "quality component")?;
    ensure_same_len(n, goal.len(), "goal component")?;
    weights.validate()?;
    ensure_finite(effort, "effort component")?;
    ensure_finite(duration, "duration component")?;
    ensure_finite(quality, "quality component")?;
    ensure_finite(goal, "goal component")?;

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        out.push(
            weights.effort * effort[i]
                + weights.duration * duration[i]
                + weights.quality * quality[i]
                + weights.goal * goal[i],
        );
    }
    Ok(out)
}

pub fn composite_from_set(
    set: &NormalizedScoreSet,
    weights: &WeightVector,
) -> ScoringResult<Vec<f64>> {
    let s = &set.scores;
    composite_score(&s.effort, &s.duration, &s.quality, &s.goal, weights)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_composite.rs"]
mod tests;
