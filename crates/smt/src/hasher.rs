// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::SmtError;
use ark_bn254::Fr;
use ark_ff::{BigInteger, PrimeField};
use light_poseidon::{Poseidon, PoseidonHasher as _};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::{fmt, str::FromStr, sync::Arc};

/// Length of every node hash.
pub const HASH_LEN: usize = 32;

/// Hash of an empty subtree.
pub const EMPTY_HASH: [u8; HASH_LEN] = [0u8; HASH_LEN];

/// Hash function used for tree nodes and witness digests.
pub trait Hasher: Send + Sync + fmt::Debug {
    fn name(&self) -> &'static str;

    /// Hashes the concatenation of `inputs` into [`HASH_LEN`] bytes.
    fn hash(&self, inputs: &[&[u8]]) -> Vec<u8>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl Hasher for Sha256Hasher {
    fn name(&self) -> &'static str {
        "sha256"
    }

    fn hash(&self, inputs: &[&[u8]]) -> Vec<u8> {
        let mut hasher = Sha256::new();
        for input in inputs {
            hasher.update(input);
        }
        hasher.finalize().to_vec()
    }
}

/// Bytes packed into one field element, always below the BN254 scalar modulus.
const POSEIDON_CHUNK: usize = 31;

/// Circom compatible Poseidon over the BN254 scalar field.
///
/// The concatenated input is split into 31 byte big-endian chunks and folded with the two
/// input permutation, starting from the input length.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoseidonHasher;

impl Hasher for PoseidonHasher {
    fn name(&self) -> &'static str {
        "poseidon"
    }

    fn hash(&self, inputs: &[&[u8]]) -> Vec<u8> {
        let bytes = inputs.concat();
        let mut poseidon =
            Poseidon::<Fr>::new_circom(2).expect("circom parameters cover two inputs");
        let mut acc = Fr::from(bytes.len() as u64);
        let mut chunks: Vec<&[u8]> = bytes.chunks(POSEIDON_CHUNK).collect();
        if chunks.is_empty() {
            chunks.push(&[]);
        }
        for chunk in chunks {
            let element = Fr::from_be_bytes_mod_order(chunk);
            acc = poseidon
                .hash(&[acc, element])
                .expect("two inputs match the permutation width");
        }
        let out = acc.into_bigint().to_bytes_be();
        let mut word = vec![0u8; HASH_LEN.saturating_sub(out.len())];
        word.extend_from_slice(&out);
        word
    }
}

/// Configurable name of a [`Hasher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashKind {
    #[default]
    Sha256,
    Poseidon,
}

impl HashKind {
    pub fn hasher(&self) -> Arc<dyn Hasher> {
        match self {
            HashKind::Sha256 => Arc::new(Sha256Hasher),
            HashKind::Poseidon => Arc::new(PoseidonHasher),
        }
    }
}

impl FromStr for HashKind {
    type Err = SmtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sha256" => Ok(HashKind::Sha256),
            "poseidon" => Ok(HashKind::Poseidon),
            other => Err(SmtError::UnknownHash(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_concatenates_inputs() {
        let h = Sha256Hasher;
        assert_eq!(h.hash(&[&b"ab"[..], &b"c"[..]]), h.hash(&[&b"abc"[..]]));
        assert_eq!(
            hex::encode(h.hash(&[&b"abc"[..]])),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_hash_kind_names() {
        assert_eq!("sha256".parse::<HashKind>().unwrap(), HashKind::Sha256);
        assert_eq!("poseidon".parse::<HashKind>().unwrap(), HashKind::Poseidon);
        assert!("md5".parse::<HashKind>().is_err());
        assert_eq!(HashKind::default().hasher().name(), "sha256");
        assert_eq!(HashKind::Poseidon.hasher().name(), "poseidon");
    }

    #[test]
    fn test_poseidon_hashes_into_the_field() {
        let h = PoseidonHasher;
        let long = [0x5au8; 100];
        let digest = h.hash(&[&long[..]]);
        assert_eq!(digest.len(), HASH_LEN);
        assert_eq!(digest, h.hash(&[&long[..40], &long[40..]]));
        assert_ne!(digest, h.hash(&[&long[..99]]));
        assert_ne!(h.hash(&[]), h.hash(&[&[0u8][..]]));
        assert_ne!(digest, Sha256Hasher.hash(&[&long[..]]));
        // canonical field element
        assert_eq!(Fr::from_be_bytes_mod_order(&digest).into_bigint().to_bytes_be(), digest);
    }
}
