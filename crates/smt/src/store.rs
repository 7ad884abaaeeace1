// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::Result;

/// Key/value pairs written together.
pub type InsertBatch = Vec<(Vec<u8>, Vec<u8>)>;

/// Byte oriented storage behind a tree.
///
/// `insert_batch` must be atomic: after a crash either every pair of the batch is visible or
/// none is.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    fn insert_batch(&self, batch: InsertBatch) -> Result<()>;
}
