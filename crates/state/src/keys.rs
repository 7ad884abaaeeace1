// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Tree keys of the process metadata and of voter entries.
//!
//! Nullifiers and addresses never reach the tree as raw bytes. Each is read as a 32 byte
//! big-endian word and stored under its own namespace byte followed by the word in
//! little-endian order, so every voter key is [`VOTER_TREE_KEY_LEN`] bytes wide and its
//! path starts at the low order bits.

pub const KEY_PROCESS_ID: &[u8] = &[0x00];
pub const KEY_CENSUS_ROOT: &[u8] = &[0x01];
pub const KEY_BALLOT_MODE: &[u8] = &[0x02];
pub const KEY_ENCRYPTION_KEY: &[u8] = &[0x03];
/// Running sum of every accepted ballot.
pub const KEY_RESULTS_ADD: &[u8] = &[0x04];
/// Running sum of every overwritten ballot.
pub const KEY_RESULTS_SUB: &[u8] = &[0x05];

/// Namespace of encrypted ballots, keyed by nullifier.
pub const BALLOT_NAMESPACE: u8 = 0x06;
/// Namespace of commitments, keyed by address.
pub const COMMITMENT_NAMESPACE: u8 = 0x07;

/// Longest nullifier or address accepted, matching one 32 byte witness element.
pub const MAX_VOTER_KEY_LEN: usize = 32;

/// Width of a namespaced voter key in the tree.
pub const VOTER_TREE_KEY_LEN: usize = 1 + MAX_VOTER_KEY_LEN;

/// Left pads a voter key to one big-endian word.
pub(crate) fn voter_key_word(key: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; MAX_VOTER_KEY_LEN.saturating_sub(key.len())];
    out.extend_from_slice(key);
    out
}

fn namespaced(namespace: u8, key: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(VOTER_TREE_KEY_LEN);
    out.push(namespace);
    out.extend(voter_key_word(key).into_iter().rev());
    out
}

/// Tree key holding the ballot cast under `nullifier`.
pub fn ballot_key(nullifier: &[u8]) -> Vec<u8> {
    namespaced(BALLOT_NAMESPACE, nullifier)
}

/// Tree key holding the commitment of `address`.
pub fn commitment_key(address: &[u8]) -> Vec<u8> {
    namespaced(COMMITMENT_NAMESPACE, address)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_divergence(a: &[u8], b: &[u8]) -> Option<usize> {
        (0..8 * a.len().max(b.len())).find(|&level| {
            let bit = |k: &[u8]| k.get(level / 8).map_or(0, |byte| (byte >> (level % 8)) & 1);
            bit(a) != bit(b)
        })
    }

    #[test]
    fn test_voter_keys_are_left_padded() {
        let word = voter_key_word(&[0xab, 0xcd]);
        assert_eq!(word.len(), 32);
        assert_eq!(&word[30..], &[0xab, 0xcd]);
        assert!(word[..30].iter().all(|b| *b == 0));
        assert_eq!(voter_key_word(&[0x11; 32]), vec![0x11; 32]);
    }

    #[test]
    fn test_voter_keys_are_fixed_width_and_little_endian() {
        let key = ballot_key(&[0x04, 0x00]);
        assert_eq!(key.len(), VOTER_TREE_KEY_LEN);
        assert_eq!(&key[..3], &[BALLOT_NAMESPACE, 0x00, 0x04]);
        assert_eq!(ballot_key(&[0x00, 0x01]), ballot_key(&[0x01]));
        assert_ne!(ballot_key(&[0x01]), commitment_key(&[0x01]));
    }

    #[test]
    fn test_voter_keys_leave_metadata_paths_within_one_byte() {
        let metadata = [
            KEY_PROCESS_ID,
            KEY_CENSUS_ROOT,
            KEY_BALLOT_MODE,
            KEY_ENCRYPTION_KEY,
            KEY_RESULTS_ADD,
            KEY_RESULTS_SUB,
        ];
        let raws: [&[u8]; 5] =
            [&[0x04], &[0x04, 0x00], &[0x00], &[0x05, 0x00, 0x00], &[0xff; 32]];
        for raw in raws {
            for key in [ballot_key(raw), commitment_key(raw)] {
                for reserved in metadata {
                    let level = first_divergence(&key, reserved);
                    assert!(matches!(level, Some(l) if l < 8), "{key:?} vs {reserved:?}");
                }
            }
        }
        assert_eq!(
            first_divergence(&ballot_key(&[0x01]), &commitment_key(&[0x01])),
            Some(0)
        );
    }
}
