use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::error::{ScoringError, ScoringResult};
use crate::model::component::Component;
use crate::model::optimizer::{AdamParams, OptimizerState};
use crate::model::weights::{WEIGHT_FLOOR, WeightVector};

/// Gradients keyed by component name, as supplied by an external feedback loop.
pub type GradientMap = BTreeMap<String, f64>;

/// Resolves a name-keyed gradient map into component order.
pub fn gradients_by_component(gradients: &GradientMap) -> ScoringResult<[f64; 4]> {
    let mut out = [None; 4];
    for (key, &g) in gradients {
        let component = key.parse::<Component>()?;
        if !g.is_finite() {
            return Err(ScoringError::NonFinite("gradient"));
        }
        out[component.index()] = Some(g);
    }
    let mut resolved = [0.0; 4];
    for component in Component::ALL {
        resolved[component.index()] = out[component.index()]
            .ok_or_else(|| ScoringError::MissingKey(component.name().to_string()))?;
    }
    Ok(resolved)
}

/// One Adam step with the default hyperparameters.
pub fn update_weights(
    weights: &WeightVector,
    gradients: &GradientMap,
    iteration: u32,
    state: Option<&OptimizerState>,
) -> ScoringResult<(WeightVector, OptimizerState)> {
    update_weights_with(weights, gradients, iteration, state, &AdamParams::default())
}

/// One Adam step, then normalize to sum 1 and floor each weight at
/// `WEIGHT_FLOOR`. The floor is applied after normalization and is not
/// re-normalized, so the returned sum can exceed 1 slightly.
pub fn update_weights_with(
    weights: &WeightVector,
    gradients: &GradientMap,
    iteration: u32,
    state: Option<&OptimizerState>,
    params: &AdamParams,
) -> ScoringResult<(WeightVector, OptimizerState)> {
    if iteration == 0 {
        return Err(ScoringError::InvalidParameter(
            "optimizer iteration must be at least 1".to_string(),
        ));
    }
    weights.validate()?;
    let g = gradients_by_component(gradients)?;
    let prev = state.copied().unwrap_or_else(OptimizerState::cold);

    let bias1 = 1.0 - params.beta1.powf(f64::from(iteration));
    let bias2 = 1.0 - params.beta2.powf(f64::from(iteration));

    let old = weights.as_array();
    let mut next = OptimizerState {
        m: [0.0; 4],
        v: [0.0; 4],
        iteration,
    };
    let mut updated = [0.0; 4];
    for i in 0..4 {
        next.m[i] = params.beta1 * prev.m[i] + (1.0 - params.beta1) * g[i];
        next.v[i] = params.beta2 * prev.v[i] + (1.0 - params.beta2) * g[i] * g[i];
        let m_hat = next.m[i] / bias1;
        let v_hat = next.v[i] / bias2;
        updated[i] = old[i] - params.learning_rate * (m_hat / (v_hat.sqrt() + params.epsilon));
    }

    let total = updated.iter().sum::<f64>();
    if !total.is_finite() || total == 0.0 {
        return Err(ScoringError::NonFinite("weight normalization total"));
    }
    let mut floored = 0usize;
    for w in &mut updated {
        let normalized = *w / total;
        if normalized < WEIGHT_FLOOR {
            floored += 1;
        }
        *w = normalized.max(WEIGHT_FLOOR);
    }

    let result = WeightVector::from_array(updated);
    if floored > 0 {
        debug!(floored, sum = result.sum(), "weight floor applied after normalization");
    }
    info!(
        iteration,
        effort = result.effort,
        duration = result.duration,
        quality = result.quality,
        goal = result.goal,
        "weights updated"
    );
    Ok((result, next))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_reweight.rs"]
mod tests;
