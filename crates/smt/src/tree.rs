// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{
    node::{is_empty_hash, leaf_hash, path_bit, Node},
    ArboProof, ArboTransition, Hasher, InsertBatch, KvStore, Result, SmtError, EMPTY_HASH,
};
use std::{collections::BTreeMap, sync::Arc};
use tracing::debug;

/// Store key holding the committed root.
pub const ROOT_KEY: &[u8] = b"root";

/// Longest supported key, in bytes.
pub const MAX_KEY_LEN: usize = u8::MAX as usize;

fn validate_key(key: &[u8]) -> Result<()> {
    if key.is_empty() || key.len() > MAX_KEY_LEN {
        return Err(SmtError::InvalidKeyLength(key.len()));
    }
    Ok(())
}

/// A sparse Merkle tree persisted in `S`.
pub struct Tree<S: KvStore> {
    store: Arc<S>,
    hasher: Arc<dyn Hasher>,
    max_levels: usize,
    root: Vec<u8>,
}

impl<S: KvStore> Tree<S> {
    /// Opens the tree stored in `store`, or an empty one.
    pub fn open(store: Arc<S>, hasher: Arc<dyn Hasher>, max_levels: usize) -> Result<Self> {
        if max_levels == 0 || max_levels > 8 * MAX_KEY_LEN {
            return Err(SmtError::InvalidMaxLevels(max_levels));
        }
        let root = store.get(ROOT_KEY)?.unwrap_or_else(|| EMPTY_HASH.to_vec());
        debug!(root = %hex::encode(&root), max_levels, hash = hasher.name(), "Opened tree");
        Ok(Self {
            store,
            hasher,
            max_levels,
            root,
        })
    }

    pub fn root(&self) -> &[u8] {
        &self.root
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    pub fn hasher(&self) -> &Arc<dyn Hasher> {
        &self.hasher
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Starts a write transaction on the current root. Dropping it discards every change.
    pub fn begin(&self) -> TreeTx<S> {
        TreeTx {
            store: self.store.clone(),
            hasher: self.hasher.clone(),
            max_levels: self.max_levels,
            base_root: self.root.clone(),
            root: self.root.clone(),
            pending: BTreeMap::new(),
        }
    }

    /// Writes the nodes of `tx` and its root in a single batch.
    pub fn commit(&mut self, tx: TreeTx<S>) -> Result<()> {
        if tx.base_root != self.root {
            return Err(SmtError::StaleTransaction);
        }
        let root = tx.root;
        let nodes = tx.pending.len();
        let mut batch: InsertBatch = tx.pending.into_iter().collect();
        batch.push((ROOT_KEY.to_vec(), root.clone()));
        self.store.insert_batch(batch)?;
        debug!(root = %hex::encode(&root), nodes, "Committed tree transaction");
        self.root = root;
        Ok(())
    }

    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.begin().get(key)
    }

    pub fn gen_proof(&self, key: &[u8]) -> Result<ArboProof> {
        self.begin().gen_proof(key)
    }

    pub fn add(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        let mut tx = self.begin();
        tx.add(key, value)?;
        self.commit(tx)
    }

    pub fn update(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        let mut tx = self.begin();
        tx.update(key, value)?;
        self.commit(tx)
    }

    pub fn delete(&mut self, key: &[u8]) -> Result<()> {
        let mut tx = self.begin();
        tx.delete(key)?;
        self.commit(tx)
    }
}

/// Buffered mutations over a base root.
///
/// Reads see the buffered nodes first and fall back to the store.
pub struct TreeTx<S: KvStore> {
    store: Arc<S>,
    hasher: Arc<dyn Hasher>,
    max_levels: usize,
    base_root: Vec<u8>,
    root: Vec<u8>,
    pending: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl<S: KvStore> TreeTx<S> {
    pub fn root(&self) -> &[u8] {
        &self.root
    }

    fn load(&self, hash: &[u8]) -> Result<Node> {
        if is_empty_hash(hash) {
            return Ok(Node::Empty);
        }
        let bytes = match self.pending.get(hash) {
            Some(bytes) => bytes.clone(),
            None => self.store.get(hash)?.ok_or_else(|| {
                SmtError::CorruptNode(format!("missing node 0x{}", hex::encode(hash)))
            })?,
        };
        Node::decode(&bytes)
    }

    fn put(&mut self, node: Node) -> Vec<u8> {
        let hash = node.hash(&*self.hasher);
        if node != Node::Empty {
            self.pending.insert(hash.clone(), node.encode());
        }
        hash
    }

    fn put_leaf(&mut self, key: &[u8], value: &[u8]) -> Vec<u8> {
        self.put(Node::Leaf {
            key: key.to_vec(),
            value: value.to_vec(),
        })
    }

    /// Hash of the internal node at `level` with `child` on the side of `key`.
    fn put_internal(
        &mut self,
        key: &[u8],
        level: usize,
        child: Vec<u8>,
        sibling: Vec<u8>,
    ) -> Vec<u8> {
        let node = if path_bit(key, level) {
            Node::Internal {
                left: sibling,
                right: child,
            }
        } else {
            Node::Internal {
                left: child,
                right: sibling,
            }
        };
        self.put(node)
    }

    /// Walks down the path of `key` and returns the siblings from the root down together
    /// with the empty or leaf node the walk ends on.
    fn descend(&self, key: &[u8]) -> Result<(Vec<Vec<u8>>, Node)> {
        let mut siblings = Vec::new();
        let mut hash = self.root.clone();
        loop {
            match self.load(&hash)? {
                Node::Internal { left, right } => {
                    let level = siblings.len();
                    if level >= self.max_levels {
                        return Err(SmtError::CorruptNode(format!(
                            "path deeper than {} levels",
                            self.max_levels
                        )));
                    }
                    if path_bit(key, level) {
                        siblings.push(left);
                        hash = right;
                    } else {
                        siblings.push(right);
                        hash = left;
                    }
                }
                terminal => return Ok((siblings, terminal)),
            }
        }
    }

    fn rebuild(&mut self, key: &[u8], mut hash: Vec<u8>, siblings: &[Vec<u8>]) -> Vec<u8> {
        for level in (0..siblings.len()).rev() {
            hash = self.put_internal(key, level, hash, siblings[level].clone());
        }
        hash
    }

    /// Builds the subtree at `depth` holding two leaves whose paths agree above `depth`.
    fn push_down(
        &mut self,
        key: &[u8],
        leaf: Vec<u8>,
        other_key: &[u8],
        other_leaf: Vec<u8>,
        depth: usize,
    ) -> Result<Vec<u8>> {
        let mut split = depth;
        loop {
            if split >= self.max_levels {
                return Err(SmtError::MaxLevelsReached(self.max_levels));
            }
            if path_bit(key, split) != path_bit(other_key, split) {
                break;
            }
            split += 1;
        }
        let mut hash = self.put_internal(key, split, leaf, other_leaf);
        for level in (depth..split).rev() {
            hash = self.put_internal(key, level, hash, EMPTY_HASH.to_vec());
        }
        Ok(hash)
    }

    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        match self.descend(key)?.1 {
            Node::Leaf { key: k, value } if k == key => Ok(Some(value)),
            _ => Ok(None),
        }
    }

    /// Inserts a new key. Fails if the key is present.
    pub fn add(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        validate_key(key)?;
        let (siblings, terminal) = self.descend(key)?;
        let subtree = match terminal {
            Node::Leaf { key: ref other, .. } if other == key => {
                return Err(SmtError::key_exists(key));
            }
            Node::Leaf {
                key: other,
                value: other_value,
            } => {
                let leaf = self.put_leaf(key, value);
                let other_leaf = leaf_hash(&*self.hasher, &other, &other_value);
                self.push_down(key, leaf, &other, other_leaf, siblings.len())?
            }
            _ => self.put_leaf(key, value),
        };
        self.root = self.rebuild(key, subtree, &siblings);
        Ok(())
    }

    /// Replaces the value of an existing key. Fails if the key is absent.
    pub fn update(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        validate_key(key)?;
        let (siblings, terminal) = self.descend(key)?;
        match terminal {
            Node::Leaf { key: ref k, .. } if k == key => {}
            _ => return Err(SmtError::key_not_found(key)),
        }
        let leaf = self.put_leaf(key, value);
        self.root = self.rebuild(key, leaf, &siblings);
        Ok(())
    }

    /// Removes a key, collapsing subtrees left with a single leaf.
    pub fn delete(&mut self, key: &[u8]) -> Result<()> {
        validate_key(key)?;
        let (siblings, terminal) = self.descend(key)?;
        match terminal {
            Node::Leaf { key: ref k, .. } if k == key => {}
            _ => return Err(SmtError::key_not_found(key)),
        }

        let mut hash = EMPTY_HASH.to_vec();
        let mut collapsing = true;
        for level in (0..siblings.len()).rev() {
            let sibling = &siblings[level];
            if collapsing {
                if is_empty_hash(&hash) {
                    match self.load(sibling)? {
                        Node::Leaf { .. } => {
                            hash = sibling.clone();
                            continue;
                        }
                        Node::Empty => continue,
                        Node::Internal { .. } => {}
                    }
                } else if is_empty_hash(sibling) {
                    // a lone leaf moves up
                    continue;
                }
                collapsing = false;
            }
            hash = self.put_internal(key, level, hash, sibling.clone());
        }
        self.root = hash;
        Ok(())
    }

    /// Inclusion proof of `key`, or an exclusion proof carrying the leaf found on its path.
    pub fn gen_proof(&self, key: &[u8]) -> Result<ArboProof> {
        let (siblings, terminal) = self.descend(key)?;
        let (existence, key, value) = match terminal {
            Node::Leaf { key: k, value } => (k == key, k, value),
            _ => (false, Vec::new(), Vec::new()),
        };
        Ok(ArboProof {
            root: self.root.clone(),
            siblings,
            key,
            value,
            existence,
        })
    }

    /// Adds or updates `key` and returns the proven transition.
    pub fn set_with_transition(&mut self, key: &[u8], value: &[u8]) -> Result<ArboTransition> {
        let before = self.gen_proof(key)?;
        if before.existence {
            self.update(key, value)?;
        } else {
            self.add(key, value)?;
        }
        let after = self.gen_proof(key)?;
        Ok(ArboTransition::new(before, after))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InMemStore, Sha256Hasher};

    fn tree(max_levels: usize) -> Tree<InMemStore> {
        Tree::open(Arc::new(InMemStore::new()), Arc::new(Sha256Hasher), max_levels).unwrap()
    }

    #[test]
    fn test_single_leaf_sits_at_root() {
        let mut t = tree(16);
        t.add(&[7], b"seven").unwrap();
        assert_eq!(t.root(), leaf_hash(&Sha256Hasher, &[7], b"seven"));
        assert!(t.gen_proof(&[7]).unwrap().siblings.is_empty());
    }

    #[test]
    fn test_push_down_splits_on_first_differing_bit() {
        let mut t = tree(16);
        // 0x01 and 0x05 agree on bits 0 and 1 and differ on bit 2
        t.add(&[0x01], b"a").unwrap();
        t.add(&[0x05], b"b").unwrap();
        let proof = t.gen_proof(&[0x01]).unwrap();
        assert_eq!(proof.siblings.len(), 3);
        assert_eq!(proof.siblings[0], EMPTY_HASH.to_vec());
        assert_eq!(proof.siblings[1], EMPTY_HASH.to_vec());
        assert_eq!(proof.siblings[2], leaf_hash(&Sha256Hasher, &[0x05], b"b"));
    }

    #[test]
    fn test_max_levels() {
        let mut t = tree(2);
        t.add(&[0x00], b"a").unwrap();
        assert!(matches!(
            t.add(&[0x04], b"b"),
            Err(SmtError::MaxLevelsReached(2))
        ));
        assert!(matches!(
            Tree::open(Arc::new(InMemStore::new()), Arc::new(Sha256Hasher), 0),
            Err(SmtError::InvalidMaxLevels(0))
        ));
    }

    #[test]
    fn test_stale_transaction_is_rejected() {
        let mut t = tree(16);
        let mut stale = t.begin();
        stale.add(&[1], b"x").unwrap();
        t.add(&[2], b"y").unwrap();
        assert!(matches!(t.commit(stale), Err(SmtError::StaleTransaction)));
        assert_eq!(t.get(&[1]).unwrap(), None);
    }

    #[test]
    fn test_invalid_keys() {
        let mut t = tree(16);
        assert!(matches!(t.add(&[], b"x"), Err(SmtError::InvalidKeyLength(0))));
        assert!(matches!(
            t.add(&[0u8; 256], b"x"),
            Err(SmtError::InvalidKeyLength(256))
        ));
    }
}
