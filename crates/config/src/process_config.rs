// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use zkvote_curves::CurveType;
use zkvote_smt::HashKind;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_votes_per_batch must be greater than zero")]
    InvalidBatchSize,

    #[error("fields_per_ballot must be greater than zero")]
    InvalidFieldCount,

    #[error("smt_max_levels must be between 1 and 2040, got {0}")]
    InvalidMaxLevels(usize),

    #[error("unknown curve type: {0}")]
    UnknownCurve(String),

    #[error("configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("could not load configuration: {0}")]
    Load(String),
}

/// Parameters of one voting process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessConfig {
    /// Curve backend name, see [`CurveType`].
    pub curve: String,
    /// Vote slots per batch. Batches are padded to this size.
    pub max_votes_per_batch: usize,
    /// Ciphertexts per ballot.
    pub fields_per_ballot: usize,
    /// Upper bound of a decrypted tally field.
    pub max_message: u64,
    /// Tree depth. The default covers a full namespaced voter key, so distinct voters never
    /// run out of levels.
    pub smt_max_levels: usize,
    pub hash: HashKind,
    pub db_path: PathBuf,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            curve: CurveType::BjjReduced.name().to_string(),
            max_votes_per_batch: 10,
            fields_per_ballot: 8,
            max_message: 1 << 24,
            smt_max_levels: 264,
            hash: HashKind::Sha256,
            db_path: PathBuf::from("./zkvote-data"),
        }
    }
}

impl ProcessConfig {
    /// Resolves the configured curve, aborting on an unknown name.
    pub fn curve_type(&self) -> CurveType {
        CurveType::must_parse(&self.curve)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.curve.parse::<CurveType>().is_err() {
            return Err(ConfigError::UnknownCurve(self.curve.clone()));
        }
        if self.max_votes_per_batch == 0 {
            return Err(ConfigError::InvalidBatchSize);
        }
        if self.fields_per_ballot == 0 {
            return Err(ConfigError::InvalidFieldCount);
        }
        if self.smt_max_levels == 0 || self.smt_max_levels > 8 * zkvote_smt::MAX_KEY_LEN {
            return Err(ConfigError::InvalidMaxLevels(self.smt_max_levels));
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Load(e.to_string()))
    }
}
