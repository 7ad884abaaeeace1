// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use serde::{Deserialize, Serialize};
use zkvote_smt::{ArboProof, ArboTransition};

/// Inclusion proofs of the process metadata, taken against the root before a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessProofs {
    pub process_id: ArboProof,
    pub census_root: ArboProof,
    pub ballot_mode: ArboProof,
    pub encryption_key: ArboProof,
}

/// Transitions produced by one batch, in the order they were applied.
///
/// `ballot` and `commitment` always hold one entry per batch slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotesProofs {
    pub ballot: Vec<ArboTransition>,
    pub commitment: Vec<ArboTransition>,
    pub results_add: ArboTransition,
    pub results_sub: ArboTransition,
}
