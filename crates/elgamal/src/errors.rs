// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use thiserror::Error;
use zkvote_curves::CurveError;

pub type Result<T, E = ElGamalError> = std::result::Result<T, E>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ElGamalError {
    /// The plaintext is larger than the discrete log search bound
    #[error("message out of bound: no plaintext in [0, {max}]")]
    MessageOutOfBound { max: u64 },

    #[error("randomness must be nonzero modulo the group order")]
    ZeroRandomness,

    #[error("ballot field count mismatch: expected {expected}, got {got}")]
    FieldCountMismatch { expected: usize, got: usize },

    #[error("invalid encoding length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error(transparent)]
    Curve(#[from] CurveError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DkgError {
    #[error("invalid threshold {threshold} for {participants} participants")]
    InvalidThreshold { threshold: usize, participants: usize },

    #[error("invalid participant set: {0}")]
    InvalidParticipants(String),

    #[error("secret polynomial has not been generated")]
    PolynomialNotGenerated,

    #[error("share from {from} is addressed to {to}, not to {me}")]
    MisaddressedShare { from: u64, to: u64, me: u64 },

    #[error("{0} is not a participant")]
    UnknownParticipant(u64),

    #[error("participant {from} published {got} commitments, expected {expected}")]
    CommitmentCount {
        from: u64,
        expected: usize,
        got: usize,
    },

    /// The share does not match the sender's Feldman commitments
    #[error("share from {from} failed verification")]
    InvalidShare { from: u64 },

    #[error("missing shares from {0:?}")]
    MissingShares(Vec<u64>),

    #[error("missing commitments from {0:?}")]
    MissingCommitments(Vec<u64>),

    #[error("private share has not been aggregated")]
    NotAggregated,

    /// Lagrange denominator has no inverse, which happens with repeated ids
    #[error("no modular inverse while interpolating for participant {0}")]
    NoInverse(u64),

    #[error("need {threshold} partial decryptions, got {got}")]
    NotEnoughPartials { threshold: usize, got: usize },

    #[error(transparent)]
    ElGamal(#[from] ElGamalError),
}
