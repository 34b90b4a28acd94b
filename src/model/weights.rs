use serde::{Deserialize, Serialize};

use crate::error::{ScoringError, ScoringResult};
use crate::model::component::Component;

/// Lower bound applied to every weight after an optimizer update.
pub const WEIGHT_FLOOR: f64 = 0.01;

/// One weight per component. The caller owns the live copy; aggregation reads it
/// and the optimizer returns a replacement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    pub effort: f64,
    pub duration: f64,
    pub quality: f64,
    pub goal: f64,
}

impl WeightVector {
    pub fn uniform() -> Self {
        Self::from_array([0.25; 4])
    }

    pub fn from_array(values: [f64; 4]) -> Self {
        Self {
            effort: values[0],
            duration: values[1],
            quality: values[2],
            goal: values[3],
        }
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.effort, self.duration, self.quality, self.goal]
    }

    pub fn get(&self, component: Component) -> f64 {
        self.as_array()[component.index()]
    }

    pub fn sum(&self) -> f64 {
        self.effort + self.duration + self.quality + self.goal
    }

    /// Rejects negative or non-finite weights. The sum is not checked here since
    /// floored optimizer output may exceed 1 slightly.
    pub fn validate(&self) -> ScoringResult<()> {
        for component in Component::ALL {
            let w = self.get(component);
            if !w.is_finite() {
                return Err(ScoringError::NonFinite("weight vector"));
            }
            if w < 0.0 {
                return Err(ScoringError::InvalidParameter(format!(
                    "weight for {component} is negative ({w})"
                )));
            }
        }
        Ok(())
    }
}

impl Default for WeightVector {
    fn default() -> Self {
        Self::uniform()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/weights.rs"]
mod tests;
