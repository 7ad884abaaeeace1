// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use thiserror::Error;

/// Errors raised while constructing or decoding curve points.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CurveError {
    /// The curve identifier is not one of the known backends
    #[error("unknown curve type: {0}")]
    UnknownCurve(String),

    /// Encoded point had the wrong number of bytes
    #[error("invalid point encoding length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },

    /// A coordinate is not a canonical field element
    #[error("coordinate is not reduced modulo the base field")]
    CoordinateOutOfRange,

    /// The coordinates do not satisfy the curve equation
    #[error("point is not on the curve")]
    NotOnCurve,

    /// The point is on the curve but outside the prime order subgroup
    #[error("point is not in the prime order subgroup")]
    NotInSubgroup,

    /// Textual encoding could not be parsed
    #[error("invalid point encoding: {0}")]
    InvalidEncoding(String),
}
