/// Logistic efficiency of an estimate against the actual time taken.
///
/// A ratio of 0.8 (finished 25% over estimate) maps to 0.5. A non-positive
/// `actual` counts as on-estimate.
pub fn duration_efficiency(estimated: f64, actual: f64, complexity_factor: f64) -> f64 {
    let base_ratio = if actual > 0.0 { estimated / actual } else { 1.0 };
    let adjusted = base_ratio * complexity_factor;
    1.0 / (1.0 + (-5.0 * (adjusted - 0.8)).exp())
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/duration.rs"]
mod tests;
