// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use thiserror::Error;

pub type Result<T, E = SmtError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum SmtError {
    #[error("key 0x{0} already exists")]
    KeyExists(String),

    #[error("key 0x{0} not found")]
    KeyNotFound(String),

    /// Keys must be between 1 and 255 bytes
    #[error("invalid key length {0}")]
    InvalidKeyLength(usize),

    /// Two distinct keys share a path of `max_levels` bits
    #[error("max levels ({0}) reached")]
    MaxLevelsReached(usize),

    #[error("invalid max levels {0}")]
    InvalidMaxLevels(usize),

    /// The tree was committed to after the transaction began
    #[error("transaction base root is no longer the tree root")]
    StaleTransaction,

    #[error("unknown hash function: {0}")]
    UnknownHash(String),

    #[error("corrupt node: {0}")]
    CorruptNode(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl SmtError {
    pub(crate) fn key_exists(key: &[u8]) -> Self {
        SmtError::KeyExists(hex::encode(key))
    }

    pub(crate) fn key_not_found(key: &[u8]) -> Self {
        SmtError::KeyNotFound(hex::encode(key))
    }
}
