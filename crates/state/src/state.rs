// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{
    ballot_key, commitment_key, BallotMode, BatchSlot, ProcessProofs, Result, StateError, Vote,
    VotesProofs, KEY_BALLOT_MODE, KEY_CENSUS_ROOT, KEY_ENCRYPTION_KEY, KEY_PROCESS_ID,
    KEY_RESULTS_ADD, KEY_RESULTS_SUB, VOTER_TREE_KEY_LEN,
};
use num_bigint::BigUint;
use std::sync::Arc;
use tracing::{debug, info, warn};
use zkvote_config::ProcessConfig;
use zkvote_curves::{biguint_from_be, Point};
use zkvote_elgamal::Ballot;
use zkvote_smt::{ArboTransition, KvStore, Tree, TreeTx};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Initialized,
    BatchOpen,
}

/// Everything `end_batch` produces before the transaction is committed.
struct Finalized<P: Point> {
    root_hash_before: Vec<u8>,
    process_proofs: ProcessProofs,
    votes_proofs: VotesProofs,
    new_results_add: Ballot<P>,
    new_results_sub: Ballot<P>,
}

/// Authenticated state of one voting process.
///
/// Single writer: `start_batch`, `add_vote` and `end_batch` take `&mut self`. Readers see the
/// last committed root until `end_batch` commits.
pub struct State<P: Point, S: KvStore> {
    tree: Tree<S>,
    max_votes_per_batch: usize,
    fields_per_ballot: usize,
    phase: Phase,
    tx: Option<TreeTx<S>>,

    old_results_add: Ballot<P>,
    old_results_sub: Ballot<P>,
    new_results_add: Option<Ballot<P>>,
    new_results_sub: Option<Ballot<P>>,
    ballot_sum: Ballot<P>,
    overwrite_sum: Ballot<P>,
    ballot_count: usize,
    overwrite_count: usize,
    votes: Vec<Vote<P>>,
    overwritten_ballots: Vec<Ballot<P>>,

    root_hash_before: Option<Vec<u8>>,
    process_proofs: Option<ProcessProofs>,
    votes_proofs: Option<VotesProofs>,
}

impl<P: Point, S: KvStore> State<P, S> {
    /// Creates the state of a process on `store`, picking up a previously initialized tree.
    pub fn new(store: Arc<S>, config: &ProcessConfig) -> Result<Self> {
        config.validate()?;
        let configured = config.curve_type();
        if configured != P::CURVE {
            return Err(StateError::CurveMismatch {
                expected: P::CURVE,
                configured,
            });
        }
        if config.smt_max_levels < 8 * VOTER_TREE_KEY_LEN {
            warn!(
                levels = config.smt_max_levels,
                "Tree is shallower than a voter key, batches with close keys will abort"
            );
        }
        let tree = Tree::open(store, config.hash.hasher(), config.smt_max_levels)?;
        let phase = match tree.get(KEY_PROCESS_ID)? {
            Some(_) => Phase::Initialized,
            None => Phase::Uninitialized,
        };
        let fields = config.fields_per_ballot;
        info!(
            curve = %P::CURVE,
            root = %hex::encode(tree.root()),
            ?phase,
            "Opened process state"
        );
        Ok(Self {
            tree,
            max_votes_per_batch: config.max_votes_per_batch,
            fields_per_ballot: fields,
            phase,
            tx: None,
            old_results_add: Ballot::new(fields),
            old_results_sub: Ballot::new(fields),
            new_results_add: None,
            new_results_sub: None,
            ballot_sum: Ballot::new(fields),
            overwrite_sum: Ballot::new(fields),
            ballot_count: 0,
            overwrite_count: 0,
            votes: Vec::new(),
            overwritten_ballots: Vec::new(),
            root_hash_before: None,
            process_proofs: None,
            votes_proofs: None,
        })
    }

    /// Reopens a process that was initialized earlier.
    pub fn open(store: Arc<S>, config: &ProcessConfig) -> Result<Self> {
        let state = Self::new(store, config)?;
        if state.phase == Phase::Uninitialized {
            return Err(StateError::NotInitialized);
        }
        Ok(state)
    }

    /// Seeds the process metadata and zero accumulators.
    pub fn initialize(
        &mut self,
        process_id: &[u8],
        census_root: &[u8],
        ballot_mode: &BallotMode,
        encryption_key: &P,
    ) -> Result<()> {
        if self.phase != Phase::Uninitialized {
            return Err(StateError::AlreadyInitialized);
        }
        ballot_mode.validate()?;
        let zero = Ballot::<P>::new(self.fields_per_ballot).marshal();

        let mut tx = self.tree.begin();
        tx.add(KEY_PROCESS_ID, process_id)?;
        tx.add(KEY_CENSUS_ROOT, census_root)?;
        tx.add(KEY_BALLOT_MODE, &ballot_mode.marshal())?;
        tx.add(KEY_ENCRYPTION_KEY, &encryption_key.marshal())?;
        tx.add(KEY_RESULTS_ADD, &zero)?;
        tx.add(KEY_RESULTS_SUB, &zero)?;
        self.tree.commit(tx)?;

        self.phase = Phase::Initialized;
        info!(
            process_id = %hex::encode(process_id),
            root = %hex::encode(self.tree.root()),
            "Initialized process state"
        );
        Ok(())
    }

    /// Opens a batch on the committed root and resets the batch scratch data and the proofs of
    /// the previous batch.
    pub fn start_batch(&mut self) -> Result<()> {
        match self.phase {
            Phase::Uninitialized => return Err(StateError::NotInitialized),
            Phase::BatchOpen => return Err(StateError::BatchAlreadyOpen),
            Phase::Initialized => {}
        }
        let tx = self.tree.begin();
        let old_results_add = self.read_ballot(&tx, KEY_RESULTS_ADD)?;
        let old_results_sub = self.read_ballot(&tx, KEY_RESULTS_SUB)?;

        let fields = self.fields_per_ballot;
        self.old_results_add = old_results_add;
        self.old_results_sub = old_results_sub;
        self.new_results_add = None;
        self.new_results_sub = None;
        self.ballot_sum = Ballot::new(fields);
        self.overwrite_sum = Ballot::new(fields);
        self.ballot_count = 0;
        self.overwrite_count = 0;
        self.votes.clear();
        self.overwritten_ballots.clear();
        self.root_hash_before = None;
        self.process_proofs = None;
        self.votes_proofs = None;

        self.tx = Some(tx);
        self.phase = Phase::BatchOpen;
        debug!(root = %hex::encode(self.tree.root()), "Started batch");
        Ok(())
    }

    /// Accepts a vote into the open batch.
    ///
    /// When the nullifier was already used, either earlier in this batch or in the committed
    /// tree, the ballot it replaces is added to the overwrite sum. A rejected vote leaves the
    /// batch untouched.
    pub fn add_vote(&mut self, vote: Vote<P>) -> Result<()> {
        let tx = match (self.phase, self.tx.as_ref()) {
            (Phase::BatchOpen, Some(tx)) => tx,
            _ => return Err(StateError::BatchNotOpen),
        };
        if self.votes.len() >= self.max_votes_per_batch {
            return Err(StateError::BatchFull(self.max_votes_per_batch));
        }
        vote.validate(self.fields_per_ballot)?;

        let key = ballot_key(&vote.nullifier);
        let pending = self.votes.iter().rev().find(|v| ballot_key(&v.nullifier) == key);
        let replaced = match pending {
            Some(pending) => Some(pending.ballot.clone()),
            None => self.read_optional_ballot(tx, &key)?,
        };
        let ballot_sum = self.ballot_sum.add(&vote.ballot)?;
        let overwrite = match replaced {
            Some(old) => {
                let sum = self.overwrite_sum.add(&old)?;
                Some((old, sum))
            }
            None => None,
        };

        self.ballot_sum = ballot_sum;
        self.ballot_count += 1;
        if let Some((old, sum)) = overwrite {
            self.overwrite_sum = sum;
            self.overwritten_ballots.push(old);
            self.overwrite_count += 1;
            debug!(nullifier = %hex::encode(&vote.nullifier), "Vote overwrites a previous ballot");
        }
        debug!(
            nullifier = %hex::encode(&vote.nullifier),
            votes = self.ballot_count,
            "Added vote to batch"
        );
        self.votes.push(vote);
        Ok(())
    }

    /// Applies the batch to the tree and commits it.
    ///
    /// On failure nothing is committed, the phase returns to `Initialized` and the batch
    /// scratch data stays readable until the next `start_batch`.
    pub fn end_batch(&mut self) -> Result<()> {
        let mut tx = match (self.phase, self.tx.take()) {
            (Phase::BatchOpen, Some(tx)) => tx,
            _ => return Err(StateError::BatchNotOpen),
        };
        self.phase = Phase::Initialized;

        let finalized = match self.finalize(&mut tx) {
            Ok(finalized) => finalized,
            Err(e) => {
                warn!(error = %e, "Batch aborted, transaction discarded");
                return Err(e);
            }
        };
        if let Err(e) = self.tree.commit(tx) {
            warn!(error = %e, "Batch commit failed");
            return Err(e.into());
        }

        self.root_hash_before = Some(finalized.root_hash_before);
        self.process_proofs = Some(finalized.process_proofs);
        self.votes_proofs = Some(finalized.votes_proofs);
        self.new_results_add = Some(finalized.new_results_add);
        self.new_results_sub = Some(finalized.new_results_sub);
        info!(
            votes = self.ballot_count,
            overwrites = self.overwrite_count,
            root = %hex::encode(self.tree.root()),
            "Committed batch"
        );
        Ok(())
    }

    fn finalize(&self, tx: &mut TreeTx<S>) -> Result<Finalized<P>> {
        let root_hash_before = tx.root().to_vec();
        let process_proofs = ProcessProofs {
            process_id: tx.gen_proof(KEY_PROCESS_ID)?,
            census_root: tx.gen_proof(KEY_CENSUS_ROOT)?,
            ballot_mode: tx.gen_proof(KEY_BALLOT_MODE)?,
            encryption_key: tx.gen_proof(KEY_ENCRYPTION_KEY)?,
        };

        let mut ballot = Vec::with_capacity(self.max_votes_per_batch);
        let mut commitment = Vec::with_capacity(self.max_votes_per_batch);
        for slot in 0..self.max_votes_per_batch {
            match self.votes.get(slot) {
                Some(vote) => {
                    let nullifier = ballot_key(&vote.nullifier);
                    let address = commitment_key(&vote.address);
                    ballot.push(tx.set_with_transition(&nullifier, &vote.ballot.marshal())?);
                    commitment.push(tx.set_with_transition(&address, &vote.commitment_bytes())?);
                }
                None => {
                    ballot.push(ArboTransition::noop(tx.root()));
                    commitment.push(ArboTransition::noop(tx.root()));
                }
            }
        }

        let new_results_add = self.old_results_add.add(&self.ballot_sum)?;
        let new_results_sub = self.old_results_sub.add(&self.overwrite_sum)?;
        let results_add = tx.set_with_transition(KEY_RESULTS_ADD, &new_results_add.marshal())?;
        let results_sub = tx.set_with_transition(KEY_RESULTS_SUB, &new_results_sub.marshal())?;

        Ok(Finalized {
            root_hash_before,
            process_proofs,
            votes_proofs: VotesProofs {
                ballot,
                commitment,
                results_add,
                results_sub,
            },
            new_results_add,
            new_results_sub,
        })
    }

    /// The batch votes followed by padding, always `max_votes_per_batch` slots long.
    pub fn padded_votes(&self) -> Vec<BatchSlot<P>> {
        let mut slots: Vec<BatchSlot<P>> =
            self.votes.iter().cloned().map(BatchSlot::Real).collect();
        slots.resize_with(self.max_votes_per_batch.max(self.votes.len()), || {
            BatchSlot::Padding(Vote::padding(self.fields_per_ballot))
        });
        slots
    }

    fn read_ballot(&self, tx: &TreeTx<S>, key: &[u8]) -> Result<Ballot<P>> {
        self.read_optional_ballot(tx, key)?
            .ok_or(StateError::NotInitialized)
    }

    fn read_optional_ballot(&self, tx: &TreeTx<S>, key: &[u8]) -> Result<Option<Ballot<P>>> {
        match tx.get(key)? {
            Some(bytes) => Ok(Some(Ballot::unmarshal(&bytes, self.fields_per_ballot)?)),
            None => Ok(None),
        }
    }

    pub(crate) fn committed(&self, key: &[u8]) -> Result<Vec<u8>> {
        self.tree.get(key)?.ok_or(StateError::NotInitialized)
    }

    pub(crate) fn tree(&self) -> &Tree<S> {
        &self.tree
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Committed root.
    pub fn root(&self) -> &[u8] {
        self.tree.root()
    }

    pub fn max_votes_per_batch(&self) -> usize {
        self.max_votes_per_batch
    }

    pub fn fields_per_ballot(&self) -> usize {
        self.fields_per_ballot
    }

    pub fn process_id(&self) -> Result<Vec<u8>> {
        self.committed(KEY_PROCESS_ID)
    }

    pub fn census_root(&self) -> Result<Vec<u8>> {
        self.committed(KEY_CENSUS_ROOT)
    }

    pub fn ballot_mode(&self) -> Result<BallotMode> {
        BallotMode::unmarshal(&self.committed(KEY_BALLOT_MODE)?)
    }

    pub fn encryption_key(&self) -> Result<P> {
        Ok(P::unmarshal(&self.committed(KEY_ENCRYPTION_KEY)?)?)
    }

    /// Committed sum of every accepted ballot.
    pub fn results_add(&self) -> Result<Ballot<P>> {
        Ok(Ballot::unmarshal(
            &self.committed(KEY_RESULTS_ADD)?,
            self.fields_per_ballot,
        )?)
    }

    /// Committed sum of every overwritten ballot.
    pub fn results_sub(&self) -> Result<Ballot<P>> {
        Ok(Ballot::unmarshal(
            &self.committed(KEY_RESULTS_SUB)?,
            self.fields_per_ballot,
        )?)
    }

    /// Committed ballot stored under `nullifier`.
    pub fn encrypted_ballot(&self, nullifier: &[u8]) -> Result<Option<Ballot<P>>> {
        match self.tree.get(&ballot_key(nullifier))? {
            Some(bytes) => Ok(Some(Ballot::unmarshal(&bytes, self.fields_per_ballot)?)),
            None => Ok(None),
        }
    }

    /// Committed commitment stored under `address`.
    pub fn commitment(&self, address: &[u8]) -> Result<Option<BigUint>> {
        Ok(self
            .tree
            .get(&commitment_key(address))?
            .map(|bytes| biguint_from_be(&bytes)))
    }

    pub fn old_results_add(&self) -> &Ballot<P> {
        &self.old_results_add
    }

    pub fn old_results_sub(&self) -> &Ballot<P> {
        &self.old_results_sub
    }

    pub fn new_results_add(&self) -> Option<&Ballot<P>> {
        self.new_results_add.as_ref()
    }

    pub fn new_results_sub(&self) -> Option<&Ballot<P>> {
        self.new_results_sub.as_ref()
    }

    pub fn ballot_sum(&self) -> &Ballot<P> {
        &self.ballot_sum
    }

    pub fn overwrite_sum(&self) -> &Ballot<P> {
        &self.overwrite_sum
    }

    pub fn ballot_count(&self) -> usize {
        self.ballot_count
    }

    pub fn overwrite_count(&self) -> usize {
        self.overwrite_count
    }

    pub fn votes(&self) -> &[Vote<P>] {
        &self.votes
    }

    pub fn overwritten_ballots(&self) -> &[Ballot<P>] {
        &self.overwritten_ballots
    }

    /// Root the last committed batch started from, cleared when the next batch opens.
    pub fn root_hash_before(&self) -> Option<&[u8]> {
        self.root_hash_before.as_deref()
    }

    pub fn process_proofs(&self) -> Option<&ProcessProofs> {
        self.process_proofs.as_ref()
    }

    pub fn votes_proofs(&self) -> Option<&VotesProofs> {
        self.votes_proofs.as_ref()
    }
}
