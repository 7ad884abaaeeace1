// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use zkvote_curves::Point;

/// Broadcast by every dealer: `commitments[j] = a_j·G` for its secret coefficients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct PublicCommitments<P: Point> {
    pub from: u64,
    pub commitments: Vec<P>,
}

/// Sent privately from a dealer to one recipient: `value = f_from(to)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateShare {
    pub from: u64,
    pub to: u64,
    pub value: BigUint,
}
