use std::env;

use dotenv::dotenv;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

pub const VERBOSE_VAR: &str = "GLPK_MODEL_VERBOSE";
pub const PRESOLVE_VAR: &str = "GLPK_MODEL_PRESOLVE";

/// Solver knobs that can come from configuration files or the environment
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct SolverConfig {
    /// Forward GLPK progress messages to the model's logger
    pub verbose: bool,
    /// Let GLPK eliminate rows and columns before solving
    pub presolve: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            verbose: false,
            presolve: true,
        }
    }
}

impl SolverConfig {
    /// Defaults overridden by `GLPK_MODEL_VERBOSE` and `GLPK_MODEL_PRESOLVE`.
    /// A `.env` file in the working directory is honoured.
    pub fn from_env() -> Result<Self, ModelError> {
        dotenv().ok();
        let mut config = SolverConfig::default();
        if let Ok(value) = env::var(VERBOSE_VAR) {
            config.verbose = parse_flag(VERBOSE_VAR, &value)?;
        }
        if let Ok(value) = env::var(PRESOLVE_VAR) {
            config.presolve = parse_flag(PRESOLVE_VAR, &value)?;
        }
        Ok(config)
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool, ModelError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        other => Err(ModelError::InvalidOption(format!(
            "{} must be a boolean, got {:?}",
            name, other
        ))),
    }
}
