use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::error::ScoringError;
use crate::model::component::Component;
use crate::model::scores::ComponentScoreSet;

pub mod synthetic;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

/// Raw component scores laid out entity × time step, one matrix per component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreTable {
    pub effort: Vec<Vec<f64>>,
    pub duration: Vec<Vec<f64>>,
    pub quality: Vec<Vec<f64>>,
    pub goal: Vec<Vec<f64>>,
    /// Optional per-entity value in [0,1], used to colour the chart export.
    #[serde(default)]
    pub values: Option<Vec<f64>>,
}

impl ScoreTable {
    pub fn n_entities(&self) -> usize {
        self.effort.len()
    }

    pub fn n_days(&self) -> usize {
        self.effort.first().map_or(0, Vec::len)
    }

    pub fn matrix(&self, component: Component) -> &[Vec<f64>] {
        match component {
            Component::Effort => &self.effort,
            Component::Duration => &self.duration,
            Component::Quality => &self.quality,
            Component::Goal => &self.goal,
        }
    }

    pub fn validate(&self) -> Result<(), InputError> {
        let n_entities = self.n_entities();
        let n_days = self.n_days();
        if n_entities == 0 || n_days == 0 {
            return Err(InputError::InvalidInput(
                "score table has no entities or no time steps".to_string(),
            ));
        }
        for component in Component::ALL {
            let m = self.matrix(component);
            if m.len() != n_entities {
                return Err(InputError::InvalidInput(format!(
                    "{component} has {} entities, expected {n_entities}",
                    m.len()
                )));
            }
            for (entity, row) in m.iter().enumerate() {
                if row.len() != n_days {
                    return Err(InputError::InvalidInput(format!(
                        "{component} row {entity} has {} time steps, expected {n_days}",
                        row.len()
                    )));
                }
            }
        }
        if let Some(values) = &self.values {
            if values.len() != n_entities {
                return Err(InputError::InvalidInput(format!(
                    "values has {} entries, expected {n_entities}",
                    values.len()
                )));
            }
        }
        Ok(())
    }

    /// All entities' raw components at one time step.
    pub fn day_set(&self, day: usize) -> ComponentScoreSet {
        let column = |m: &[Vec<f64>]| m.iter().map(|row| row[day]).collect::<Vec<_>>();
        ComponentScoreSet {
            effort: column(&self.effort),
            duration: column(&self.duration),
            quality: column(&self.quality),
            goal: column(&self.goal),
        }
    }
}

pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, InputError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

pub fn load_score_table(path: &Path) -> Result<ScoreTable, InputError> {
    let table: ScoreTable = load_json(path)?;
    table.validate()?;
    info!(
        path = %path.display(),
        entities = table.n_entities(),
        days = table.n_days(),
        "loaded score table"
    );
    Ok(table)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
