use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Maximize,
    Minimize,
}

impl From<Direction> for glpk::Sense {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Maximize => glpk::Sense::Maximize,
            Direction::Minimize => glpk::Sense::Minimize,
        }
    }
}

impl From<glpk::Sense> for Direction {
    fn from(sense: glpk::Sense) -> Self {
        match sense {
            glpk::Sense::Maximize => Direction::Maximize,
            glpk::Sense::Minimize => Direction::Minimize,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    #[default]
    Continuous,
    Integer,
    /// Integer restricted to `[0, 1]`
    Binary,
}

impl VariableKind {
    pub fn is_integral(self) -> bool {
        !matches!(self, VariableKind::Continuous)
    }
}

/// Status of a successful solve
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SolveStatus {
    Optimal,
    /// Feasible, but optimality was not proven
    Suboptimal,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SolveMethod {
    Simplex,
    BranchCut,
}

/// Owned snapshot of a solve result, keyed by variable name
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Solution {
    pub status: SolveStatus,
    pub method: SolveMethod,
    pub objective: f64,
    pub values: HashMap<String, f64>,
}
