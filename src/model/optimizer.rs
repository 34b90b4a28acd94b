use serde::{Deserialize, Serialize};

/// Adam hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdamParams {
    pub beta1: f64,
    pub beta2: f64,
    pub epsilon: f64,
    pub learning_rate: f64,
}

impl Default for AdamParams {
    fn default() -> Self {
        Self {
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
            learning_rate: 0.001,
        }
    }
}

/// Per-component moment estimates, indexed by `Component::index`.
///
/// This is the only value with cross-call lifetime; callers that want Adam's
/// momentum keep the returned state and pass it back on the next update.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OptimizerState {
    pub m: [f64; 4],
    pub v: [f64; 4],
    pub iteration: u32,
}

impl OptimizerState {
    pub fn cold() -> Self {
        Self::default()
    }

    pub fn next_iteration(&self) -> u32 {
        self.iteration.saturating_add(1)
    }
}
