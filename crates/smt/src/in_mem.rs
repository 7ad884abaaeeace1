// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{InsertBatch, KvStore};
use anyhow::{Context, Result};
use std::{collections::BTreeMap, sync::RwLock};

#[derive(Debug, Default)]
pub struct InMemStore {
    db: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl InMemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.db.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get_dump(&self) -> Result<Vec<u8>> {
        let db = self.db.read().unwrap_or_else(|e| e.into_inner());
        bincode::serialize(&*db).context("Error serializing BTreeMap")
    }

    /// Rebuilds a store from the output of [`InMemStore::get_dump`].
    pub fn from_dump(dump: &[u8]) -> Result<Self> {
        Ok(Self {
            db: RwLock::new(bincode::deserialize(dump).context("Error deserializing BTreeMap")?),
        })
    }
}

impl KvStore for InMemStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let db = self.db.read().unwrap_or_else(|e| e.into_inner());
        Ok(db.get(key).cloned())
    }

    fn insert_batch(&self, batch: InsertBatch) -> Result<()> {
        let mut db = self.db.write().unwrap_or_else(|e| e.into_inner());
        db.extend(batch);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_round_trip() -> Result<()> {
        let store = InMemStore::new();
        store.insert_batch(vec![
            (b"a".to_vec(), b"1".to_vec()),
            (b"b".to_vec(), b"2".to_vec()),
        ])?;
        let restored = InMemStore::from_dump(&store.get_dump()?)?;
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.get(b"b")?, Some(b"2".to_vec()));
        assert_eq!(restored.get(b"c")?, None);
        Ok(())
    }
}
