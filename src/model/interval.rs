use serde::{Deserialize, Serialize};

/// Bootstrap confidence interval. `lower <= upper` is not guaranteed under
/// extreme acceleration; bounds are reported as computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn is_ordered(&self) -> bool {
        self.lower <= self.upper
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}
