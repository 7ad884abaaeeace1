// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{Result, StateError, MAX_VOTER_KEY_LEN};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use zkvote_curves::{biguint_to_fixed_be, Point};
use zkvote_elgamal::Ballot;

/// Width of a stored commitment.
pub const COMMITMENT_SIZE: usize = 32;

/// An encrypted vote as accepted into a batch.
///
/// The ballot is stored under [`ballot_key`](crate::ballot_key) of `nullifier`, the
/// commitment under [`commitment_key`](crate::commitment_key) of `address`. Both keys are
/// read as big-endian numbers, so leading zero bytes do not make a different voter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Vote<P: Point> {
    pub address: Vec<u8>,
    pub commitment: BigUint,
    pub nullifier: Vec<u8>,
    pub ballot: Ballot<P>,
}

impl<P: Point> Vote<P> {
    pub fn new(
        address: Vec<u8>,
        commitment: BigUint,
        nullifier: Vec<u8>,
        ballot: Ballot<P>,
    ) -> Self {
        Self {
            address,
            commitment,
            nullifier,
            ballot,
        }
    }

    /// Filler for an unused batch slot.
    pub fn padding(fields: usize) -> Self {
        Self {
            address: vec![0],
            commitment: BigUint::default(),
            nullifier: vec![0],
            ballot: Ballot::new(fields),
        }
    }

    pub fn commitment_bytes(&self) -> Vec<u8> {
        biguint_to_fixed_be(&self.commitment, COMMITMENT_SIZE)
    }

    pub(crate) fn validate(&self, fields: usize) -> Result<()> {
        if self.ballot.fields() != fields {
            return Err(StateError::InvalidVote(format!(
                "ballot has {} fields, process expects {fields}",
                self.ballot.fields()
            )));
        }
        check_voter_key("nullifier", &self.nullifier)?;
        check_voter_key("address", &self.address)?;
        if self.commitment.bits() > (COMMITMENT_SIZE * 8) as u64 {
            return Err(StateError::InvalidVote(format!(
                "commitment does not fit in {COMMITMENT_SIZE} bytes"
            )));
        }
        Ok(())
    }
}

fn check_voter_key(name: &str, key: &[u8]) -> Result<()> {
    if key.is_empty() || key.len() > MAX_VOTER_KEY_LEN {
        return Err(StateError::InvalidVote(format!(
            "{name} must be 1 to {MAX_VOTER_KEY_LEN} bytes, got {}",
            key.len()
        )));
    }
    // zero marks padding slots
    if key.iter().all(|b| *b == 0) {
        return Err(StateError::InvalidVote(format!("{name} must not be zero")));
    }
    Ok(())
}

/// One slot of a batch as seen by the circuit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchSlot<P: Point> {
    Real(Vote<P>),
    Padding(Vote<P>),
}

impl<P: Point> BatchSlot<P> {
    pub fn vote(&self) -> &Vote<P> {
        match self {
            BatchSlot::Real(vote) | BatchSlot::Padding(vote) => vote,
        }
    }

    pub fn is_padding(&self) -> bool {
        matches!(self, BatchSlot::Padding(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zkvote_curves::BjjReduced;

    fn vote(nullifier: &[u8], address: &[u8]) -> Vote<BjjReduced> {
        Vote::new(
            address.to_vec(),
            BigUint::from(7u8),
            nullifier.to_vec(),
            Ballot::new(2),
        )
    }

    #[test]
    fn test_accepts_regular_keys() {
        assert!(vote(&[0xaa; 32], &[0xbb; 20]).validate(2).is_ok());
        // namespaced in the tree, so small keys and shared bytes are fine
        assert!(vote(&[0x04], &[0x04, 0x00]).validate(2).is_ok());
        assert!(vote(&[0xaa; 20], &[0xaa; 20]).validate(2).is_ok());
    }

    #[test]
    fn test_rejects_bad_keys() {
        for (nullifier, address) in [
            (vec![], vec![0xbb; 20]),
            (vec![0xaa; 33], vec![0xbb; 20]),
            (vec![0x00, 0x00], vec![0xbb; 20]),
            (vec![0xaa; 32], vec![0x00]),
        ] {
            assert!(matches!(
                vote(&nullifier, &address).validate(2),
                Err(StateError::InvalidVote(_))
            ));
        }
    }

    #[test]
    fn test_rejects_wrong_field_count_and_wide_commitment() {
        assert!(vote(&[0xaa; 32], &[0xbb; 20]).validate(3).is_err());
        let mut wide = vote(&[0xaa; 32], &[0xbb; 20]);
        wide.commitment = BigUint::from(1u8) << 256;
        assert!(wide.validate(2).is_err());
    }

    #[test]
    fn test_padding_slot() {
        let slot = BatchSlot::Padding(Vote::<BjjReduced>::padding(2));
        assert!(slot.is_padding());
        assert_eq!(slot.vote().commitment_bytes(), vec![0u8; COMMITMENT_SIZE]);
        assert!(slot.vote().ballot.ciphertexts().iter().all(|c| c.is_zero()));
    }
}
