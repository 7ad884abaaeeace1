// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{Hasher, Result, SmtError, EMPTY_HASH, HASH_LEN};

const LEAF: u8 = 0x01;
const INTERNAL: u8 = 0x02;

/// Stored form of a tree node.
///
/// Leaf:     `[0x01][key len][key][value]`
/// Internal: `[0x02][left hash][right hash]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node {
    Empty,
    Leaf { key: Vec<u8>, value: Vec<u8> },
    Internal { left: Vec<u8>, right: Vec<u8> },
}

impl Node {
    pub fn hash(&self, hasher: &dyn Hasher) -> Vec<u8> {
        match self {
            Node::Empty => EMPTY_HASH.to_vec(),
            Node::Leaf { key, value } => leaf_hash(hasher, key, value),
            Node::Internal { left, right } => hasher.hash(&[left.as_slice(), right.as_slice()]),
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        match self {
            Node::Empty => Vec::new(),
            Node::Leaf { key, value } => {
                let mut out = Vec::with_capacity(2 + key.len() + value.len());
                out.push(LEAF);
                // key length is validated to fit a byte before a leaf is built
                out.push(key.len() as u8);
                out.extend_from_slice(key);
                out.extend_from_slice(value);
                out
            }
            Node::Internal { left, right } => {
                let mut out = Vec::with_capacity(1 + 2 * HASH_LEN);
                out.push(INTERNAL);
                out.extend_from_slice(left);
                out.extend_from_slice(right);
                out
            }
        }
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        match bytes.first() {
            Some(&LEAF) if bytes.len() >= 2 => {
                let key_len = bytes[1] as usize;
                if bytes.len() < 2 + key_len {
                    return Err(SmtError::CorruptNode("truncated leaf".to_string()));
                }
                Ok(Node::Leaf {
                    key: bytes[2..2 + key_len].to_vec(),
                    value: bytes[2 + key_len..].to_vec(),
                })
            }
            Some(&INTERNAL) if bytes.len() == 1 + 2 * HASH_LEN => Ok(Node::Internal {
                left: bytes[1..1 + HASH_LEN].to_vec(),
                right: bytes[1 + HASH_LEN..].to_vec(),
            }),
            _ => Err(SmtError::CorruptNode(format!(
                "unrecognized encoding of {} bytes",
                bytes.len()
            ))),
        }
    }
}

/// `H(key len || key || value || 0x01)`.
pub(crate) fn leaf_hash(hasher: &dyn Hasher, key: &[u8], value: &[u8]) -> Vec<u8> {
    let key_len = [key.len() as u8];
    hasher.hash(&[&key_len[..], key, value, &[LEAF][..]])
}

pub(crate) fn is_empty_hash(hash: &[u8]) -> bool {
    hash == EMPTY_HASH
}

/// Bit of `key` selecting the child at `level`: `true` goes right.
pub(crate) fn path_bit(key: &[u8], level: usize) -> bool {
    key.get(level / 8)
        .map(|byte| (byte >> (level % 8)) & 1 == 1)
        .unwrap_or(false)
}
