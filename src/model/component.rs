use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

/// The four sub-scores that make up a composite productivity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    Effort,
    Duration,
    Quality,
    Goal,
}

impl Component {
    pub const ALL: [Component; 4] = [
        Component::Effort,
        Component::Duration,
        Component::Quality,
        Component::Goal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Component::Effort => "effort",
            Component::Duration => "duration",
            Component::Quality => "quality",
            Component::Goal => "goal",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Component::Effort => 0,
            Component::Duration => 1,
            Component::Quality => 2,
            Component::Goal => 3,
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Component {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "effort" => Ok(Component::Effort),
            "duration" => Ok(Component::Duration),
            "quality" => Ok(Component::Quality),
            "goal" => Ok(Component::Goal),
            other => Err(ScoringError::UnknownKey(other.to_string())),
        }
    }
}
