// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{
    keys::voter_key_word, Result, State, KEY_BALLOT_MODE, KEY_CENSUS_ROOT, KEY_ENCRYPTION_KEY,
    KEY_PROCESS_ID,
};
use zkvote_curves::Point;
use zkvote_smt::{Hasher, KvStore};

impl<P: Point, S: KvStore> State<P, S> {
    /// Digest binding the process metadata to the current batch slots.
    ///
    /// Hashes, with the tree's hasher: process id, census root, ballot mode, encryption key,
    /// then every slot's nullifier, every slot's ballot, every slot's address and every
    /// slot's commitment. Voter keys and commitments are 32 byte big-endian words.
    pub fn aggregated_witness_hash(&self) -> Result<Vec<u8>> {
        let slots = self.padded_votes();
        let mut inputs: Vec<Vec<u8>> = vec![
            self.committed(KEY_PROCESS_ID)?,
            self.committed(KEY_CENSUS_ROOT)?,
            self.committed(KEY_BALLOT_MODE)?,
            self.committed(KEY_ENCRYPTION_KEY)?,
        ];
        inputs.extend(slots.iter().map(|s| voter_key_word(&s.vote().nullifier)));
        inputs.extend(slots.iter().map(|s| s.vote().ballot.marshal()));
        inputs.extend(slots.iter().map(|s| voter_key_word(&s.vote().address)));
        inputs.extend(slots.iter().map(|s| s.vote().commitment_bytes()));

        let parts: Vec<&[u8]> = inputs.iter().map(Vec::as_slice).collect();
        Ok(self.tree().hasher().hash(&parts))
    }
}

