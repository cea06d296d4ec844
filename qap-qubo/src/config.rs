use crate::{
    error::ValidationError,
    qubo::validate_penalty,
    transition::{TransitionMode, DEFAULT_MOVE_PENALTY_BASE},
};
use anyhow::Result;
use qap_utils::{dejsonify, jsonify};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SHOTS: usize = 1000;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TrackerConfig {
    /// Reads requested from the sampler by `initialize` and `evolve`.
    pub shots: usize,
    /// Fixed one-hot penalty. `None` derives it from each cost matrix.
    pub penalty: Option<f64>,
    pub move_penalty_base: f64,
    pub transition: TransitionMode,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            shots: DEFAULT_SHOTS,
            penalty: None,
            move_penalty_base: DEFAULT_MOVE_PENALTY_BASE,
            transition: TransitionMode::default(),
        }
    }
}

impl TrackerConfig {
    pub fn from_json(json_str: &str) -> Result<Self> {
        let config: Self = dejsonify(json_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Canonical form with sorted keys, accepted back by [`TrackerConfig::from_json`].
    pub fn to_json(&self) -> Result<String> {
        Ok(jsonify(self)?)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.shots == 0 {
            return Err(ValidationError::InvalidShots);
        }
        if let Some(penalty) = self.penalty {
            validate_penalty(penalty)?;
        }
        if !self.move_penalty_base.is_finite() {
            return Err(ValidationError::InvalidPenalty(self.move_penalty_base));
        }
        Ok(())
    }
}
