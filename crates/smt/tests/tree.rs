// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::Result;
use proptest::prelude::*;
use std::{collections::BTreeMap, sync::Arc};
use tempfile::tempdir;
use zkvote_smt::{
    ArboTransition, HashKind, InMemStore, KvStore, PoseidonHasher, Sha256Hasher, SledStore,
    SmtError, TransitionKind, Tree, EMPTY_HASH,
};
use zkvote_test_helpers::{random_bytes, seeded_rng};

fn mem_tree() -> Tree<InMemStore> {
    Tree::open(Arc::new(InMemStore::new()), Arc::new(Sha256Hasher), 64).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_root_is_independent_of_insertion_order(
        entries in proptest::collection::btree_map(any::<[u8; 8]>(), any::<u8>(), 1..24)
    ) {
        let mut forward = mem_tree();
        let mut backward = mem_tree();
        for (k, v) in entries.iter() {
            forward.add(k, &[*v]).unwrap();
        }
        for (k, v) in entries.iter().rev() {
            backward.add(k, &[*v]).unwrap();
        }
        prop_assert_eq!(forward.root(), backward.root());

        for (k, v) in entries.iter() {
            let proof = forward.gen_proof(k).unwrap();
            prop_assert!(proof.existence);
            prop_assert_eq!(&proof.value, &vec![*v]);
            prop_assert!(proof.verify(&Sha256Hasher, k));
        }
    }

    #[test]
    fn test_delete_restores_previous_root(
        entries in proptest::collection::btree_map(any::<[u8; 8]>(), any::<u8>(), 2..24)
    ) {
        let mut tree = mem_tree();
        let mut iter = entries.iter();
        let (last_key, last_value) = iter.next_back().unwrap();
        for (k, v) in iter {
            tree.add(k, &[*v]).unwrap();
        }
        let before = tree.root().to_vec();
        tree.add(last_key, &[*last_value]).unwrap();
        prop_assert_ne!(tree.root(), before.as_slice());
        tree.delete(last_key).unwrap();
        prop_assert_eq!(tree.root(), before.as_slice());
        prop_assert_eq!(tree.get(last_key).unwrap(), None);
    }
}

#[test]
fn test_exclusion_proofs() -> Result<()> {
    let mut tree = mem_tree();
    let empty = tree.gen_proof(&[1])?;
    assert!(!empty.existence && empty.is_old0());
    assert_eq!(empty.root, EMPTY_HASH.to_vec());
    assert!(empty.verify(&Sha256Hasher, &[1]));

    tree.add(&[0x01], b"one")?;
    tree.add(&[0x02], b"two")?;

    // 0x03 shares its first bit with 0x01 and lands on that leaf
    let collision = tree.gen_proof(&[0x03])?;
    assert!(!collision.existence);
    assert_eq!(collision.key, vec![0x01]);
    assert_eq!(collision.value, b"one".to_vec());
    assert!(collision.verify(&Sha256Hasher, &[0x03]));

    // A proof never verifies for a different key or a tampered value.
    let inclusion = tree.gen_proof(&[0x02])?;
    assert!(!inclusion.verify(&Sha256Hasher, &[0x01]));
    let mut tampered = inclusion.clone();
    tampered.value = b"three".to_vec();
    assert!(!tampered.verify(&Sha256Hasher, &[0x02]));
    Ok(())
}

#[test]
fn test_add_update_errors() -> Result<()> {
    let mut tree = mem_tree();
    tree.add(b"key", b"v1")?;
    assert!(matches!(tree.add(b"key", b"v2"), Err(SmtError::KeyExists(_))));
    assert!(matches!(
        tree.update(b"missing", b"v"),
        Err(SmtError::KeyNotFound(_))
    ));
    assert!(matches!(tree.delete(b"missing"), Err(SmtError::KeyNotFound(_))));
    tree.update(b"key", b"v2")?;
    assert_eq!(tree.get(b"key")?, Some(b"v2".to_vec()));
    Ok(())
}

#[test]
fn test_transaction_is_atomic() -> Result<()> {
    let store = Arc::new(InMemStore::new());
    let mut tree = Tree::open(store.clone(), Arc::new(Sha256Hasher), 64)?;
    tree.add(&[9], b"nine")?;
    let committed = tree.root().to_vec();

    let mut tx = tree.begin();
    tx.add(&[1], b"one")?;
    tx.update(&[9], b"NINE")?;
    assert_eq!(tx.get(&[1])?, Some(b"one".to_vec()));
    assert_eq!(tree.get(&[1])?, None);
    drop(tx);
    assert_eq!(tree.root(), committed.as_slice());

    let mut tx = tree.begin();
    tx.add(&[1], b"one")?;
    let root = tx.root().to_vec();
    tree.commit(tx)?;
    assert_eq!(tree.root(), root.as_slice());
    assert_eq!(store.get(zkvote_smt::ROOT_KEY)?, Some(root));
    Ok(())
}

#[test]
fn test_transition_shapes() -> Result<()> {
    let mut tree = mem_tree();
    let mut tx = tree.begin();

    let insert = tx.set_with_transition(&[0x01], b"a")?;
    assert_eq!(insert.kind(), TransitionKind::Insert);
    assert!((insert.fnc0, insert.fnc1, insert.is_old0) == (true, false, true));

    // pushes 0x01 down: the insert takes the deeper after-path
    let push = tx.set_with_transition(&[0x03], b"b")?;
    assert_eq!(push.kind(), TransitionKind::Insert);
    assert!(!push.is_old0);
    assert_eq!(push.before.key, vec![0x01]);
    assert_eq!(push.siblings, push.after.siblings);
    assert_eq!(push.siblings.len(), 2);

    let update = tx.set_with_transition(&[0x03], b"c")?;
    assert_eq!(update.kind(), TransitionKind::Update);
    assert_eq!(update.old_root(), push.new_root());
    assert_eq!(update.siblings, update.before.siblings);

    let before = tx.gen_proof(&[0x03])?;
    tx.delete(&[0x03])?;
    let delete = ArboTransition::new(before, tx.gen_proof(&[0x03])?);
    assert_eq!(delete.kind(), TransitionKind::Delete);
    assert!((delete.fnc0, delete.fnc1) == (true, true));
    assert_eq!(delete.new_root(), insert.new_root());

    tree.commit(tx)?;
    assert_eq!(tree.root(), insert.new_root());
    Ok(())
}

#[test]
fn test_sled_tree_survives_reopen() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("smt.db");
    let mut rng = seeded_rng(21);
    let entries: BTreeMap<Vec<u8>, Vec<u8>> = (0..50)
        .map(|_| (random_bytes(&mut rng, 20), random_bytes(&mut rng, 64)))
        .collect();

    let root = {
        let store = Arc::new(SledStore::new(&path, "process")?);
        let mut tree = Tree::open(store, Arc::new(Sha256Hasher), 160)?;
        let mut tx = tree.begin();
        for (k, v) in &entries {
            tx.add(k, v)?;
        }
        tree.commit(tx)?;
        tree.store().flush()?;
        tree.root().to_vec()
    };
    SledStore::close_all_connections();

    let store = Arc::new(SledStore::new(&path, "process")?);
    let tree = Tree::open(store, Arc::new(Sha256Hasher), 160)?;
    assert_eq!(tree.root(), root.as_slice());
    for (k, v) in &entries {
        assert_eq!(tree.get(k)?.as_ref(), Some(v));
        assert!(tree.gen_proof(k)?.verify(&Sha256Hasher, k));
    }
    Ok(())
}

#[test]
fn test_hash_kind_changes_roots() -> Result<()> {
    let mut rng = seeded_rng(8);
    let entries: Vec<(Vec<u8>, Vec<u8>)> = (0..12)
        .map(|_| (random_bytes(&mut rng, 32), random_bytes(&mut rng, 128)))
        .collect();

    let mut roots = Vec::new();
    for kind in [HashKind::Sha256, HashKind::Poseidon] {
        let mut tree = Tree::open(Arc::new(InMemStore::new()), kind.hasher(), 160)?;
        for (k, v) in &entries {
            tree.add(k, v)?;
        }
        roots.push(tree.root().to_vec());
    }
    assert_ne!(roots[0], roots[1]);

    let mut tree = Tree::open(Arc::new(InMemStore::new()), Arc::new(PoseidonHasher), 160)?;
    for (k, v) in &entries {
        tree.add(k, v)?;
    }
    assert_eq!(tree.root(), roots[1].as_slice());
    let (key, _) = &entries[3];
    let proof = tree.gen_proof(key)?;
    assert!(proof.verify(&PoseidonHasher, key));
    assert!(!proof.verify(&Sha256Hasher, key));
    Ok(())
}
