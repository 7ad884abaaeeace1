// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{
    node::{leaf_hash, path_bit},
    Hasher, EMPTY_HASH,
};
use serde::{Deserialize, Serialize};

/// Merkle proof for one key.
///
/// With `existence` set, `key`/`value` are the proven entry. Otherwise the proof shows the
/// key is absent: `key`/`value` then hold the leaf found on the queried path, or are empty
/// when the path ends in an empty subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArboProof {
    pub root: Vec<u8>,
    /// Sibling hashes from the root down.
    pub siblings: Vec<Vec<u8>>,
    pub key: Vec<u8>,
    pub value: Vec<u8>,
    pub existence: bool,
}

impl ArboProof {
    /// Checks the proof for `key` against its root.
    pub fn verify(&self, hasher: &dyn Hasher, key: &[u8]) -> bool {
        let leaf = if self.existence {
            if self.key != key {
                return false;
            }
            leaf_hash(hasher, key, &self.value)
        } else if self.key.is_empty() {
            EMPTY_HASH.to_vec()
        } else {
            // the colliding leaf must be a different key on the same path prefix
            if self.key == key
                || (0..self.siblings.len()).any(|l| path_bit(&self.key, l) != path_bit(key, l))
            {
                return false;
            }
            leaf_hash(hasher, &self.key, &self.value)
        };

        let mut hash = leaf;
        for (level, sibling) in self.siblings.iter().enumerate().rev() {
            hash = if path_bit(key, level) {
                hasher.hash(&[sibling.as_slice(), hash.as_slice()])
            } else {
                hasher.hash(&[hash.as_slice(), sibling.as_slice()])
            };
        }
        hash == self.root
    }

    /// `true` when the path of the proven key ends in an empty subtree.
    pub fn is_old0(&self) -> bool {
        self.key.is_empty() && self.value.is_empty()
    }
}
