// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{
    sled_utils::{clear_all_caches, get_or_open_db_tree},
    InsertBatch, KvStore,
};
use anyhow::{Context, Result};
use std::path::Path;

/// [`KvStore`] on a named tree of a sled database.
///
/// Several stores may share one database directory by using different tree names, which is
/// how each voting process gets its own namespace.
pub struct SledStore {
    db: sled::Tree,
}

impl SledStore {
    pub fn new(path: impl AsRef<Path>, tree: &str) -> Result<Self> {
        let db = get_or_open_db_tree(path.as_ref(), tree)?;
        Ok(Self { db })
    }

    /// Drops every cached database handle of this process.
    pub fn close_all_connections() {
        clear_all_caches()
    }

    pub fn flush(&self) -> Result<()> {
        self.db.flush().context("Could not flush db")?;
        Ok(())
    }
}

impl KvStore for SledStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let res = self
            .db
            .get(key)
            .with_context(|| format!("Failed to fetch 0x{}", hex::encode(key)))?;
        Ok(res.map(|v| v.to_vec()))
    }

    fn insert_batch(&self, batch: InsertBatch) -> Result<()> {
        let mut sled_batch = sled::Batch::default();
        for (key, value) in batch {
            sled_batch.insert(key, value);
        }
        self.db
            .apply_batch(sled_batch)
            .context("Could not apply batch to db")?;
        Ok(())
    }
}
