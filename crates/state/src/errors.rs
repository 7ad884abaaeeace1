// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use thiserror::Error;
use zkvote_config::ConfigError;
use zkvote_curves::{CurveError, CurveType};
use zkvote_elgamal::ElGamalError;
use zkvote_smt::SmtError;

pub type Result<T, E = StateError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("process state is not initialized")]
    NotInitialized,

    #[error("process state is already initialized")]
    AlreadyInitialized,

    #[error("no open batch, call start_batch first")]
    BatchNotOpen,

    #[error("a batch is already open")]
    BatchAlreadyOpen,

    #[error("batch is full: {0} votes")]
    BatchFull(usize),

    #[error("invalid vote: {0}")]
    InvalidVote(String),

    #[error("invalid ballot mode: {0}")]
    InvalidBallotMode(String),

    #[error("state uses curve {expected}, configuration names {configured}")]
    CurveMismatch {
        expected: CurveType,
        configured: CurveType,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Smt(#[from] SmtError),

    #[error(transparent)]
    ElGamal(#[from] ElGamalError),

    #[error(transparent)]
    Curve(#[from] CurveError),
}
