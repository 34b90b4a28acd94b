use serde::{Deserialize, Serialize};

use crate::error::{ScoringResult, ensure_same_len};
use crate::model::component::Component;

/// Four parallel raw component columns, one value per (entity, time) pair.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComponentScoreSet {
    pub effort: Vec<f64>,
    pub duration: Vec<f64>,
    pub quality: Vec<f64>,
    pub goal: Vec<f64>,
}

impl ComponentScoreSet {
    pub fn new(
        effort: Vec<f64>,
        duration: Vec<f64>,
        quality: Vec<f64>,
        goal: Vec<f64>,
    ) -> ScoringResult<Self> {
        let set = Self {
            effort,
            duration,
            quality,
            goal,
        };
        set.validate()?;
        Ok(set)
    }

    pub fn validate(&self) -> ScoringResult<()> {
        let n = self.effort.len();
        ensure_same_len(n, self.duration.len(), "duration component")?;
        ensure_same_len(n, self.quality.len(), "quality component")?;
        ensure_same_len(n, self.goal.len(), "goal component")?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.effort.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effort.is_empty()
    }

    pub fn column(&self, component: Component) -> &[f64] {
        match component {
            Component::Effort => &self.effort,
            Component::Duration => &self.duration,
            Component::Quality => &self.quality,
            Component::Goal => &self.goal,
        }
    }

    /// Observation-major view, one `[effort, duration, quality, goal]` per row.
    pub fn rows(&self) -> Vec<[f64; 4]> {
        (0..self.len())
            .map(|i| {
                [
                    self.effort[i],
                    self.duration[i],
                    self.quality[i],
                    self.goal[i],
                ]
            })
            .collect()
    }
}

/// Component columns after logistic normalization, multiplied by `display_scale`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedScoreSet {
    pub scores: ComponentScoreSet,
    pub display_scale: f64,
}
