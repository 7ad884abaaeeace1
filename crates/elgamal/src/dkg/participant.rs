// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use super::{PrivateShare, PublicCommitments};
use crate::{keys::random_nonzero_scalar, Ballot, Ciphertext, DkgError};
use num_bigint::{BigUint, RandBigInt};
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};
use zkvote_curves::Point;

/// One trustee of the distributed key generation.
#[derive(Debug, Clone)]
pub struct Participant<P: Point> {
    id: u64,
    threshold: usize,
    peers: Vec<u64>,
    coefficients: Vec<BigUint>,
    commitments: Vec<P>,
    received: BTreeMap<u64, BigUint>,
    private_share: Option<BigUint>,
    public_key: Option<P>,
}

/// Evaluates `Σ coefficients[j]·x^j mod order` with Horner's rule.
fn evaluate_polynomial(coefficients: &[BigUint], x: u64, order: &BigUint) -> BigUint {
    coefficients
        .iter()
        .rev()
        .fold(BigUint::from(0u32), |acc, c| (acc * x + c) % order)
}

impl<P: Point> Participant<P> {
    /// `peers` lists every other participant. `threshold` participants are needed to decrypt.
    pub fn new(id: u64, threshold: usize, peers: Vec<u64>) -> Result<Self, DkgError> {
        let participants = peers.len() + 1;
        if threshold == 0 || threshold > participants {
            return Err(DkgError::InvalidThreshold {
                threshold,
                participants,
            });
        }
        let mut seen = BTreeSet::from([id]);
        for &peer in &peers {
            if !seen.insert(peer) {
                return Err(DkgError::InvalidParticipants(format!(
                    "participant id {peer} appears twice"
                )));
            }
        }
        if seen.contains(&0) {
            return Err(DkgError::InvalidParticipants(
                "participant id 0 is reserved".to_string(),
            ));
        }

        Ok(Self {
            id,
            threshold,
            peers,
            coefficients: Vec::new(),
            commitments: Vec::new(),
            received: BTreeMap::new(),
            private_share: None,
            public_key: None,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn peers(&self) -> &[u64] {
        &self.peers
    }

    /// Samples the secret polynomial of degree `threshold - 1` and its commitments. The
    /// constant term is this participant's contribution to the joint secret.
    pub fn generate_secret_polynomial(&mut self, rng: &mut (impl Rng + ?Sized)) {
        let order = P::order();
        let mut coefficients = Vec::with_capacity(self.threshold);
        coefficients.push(random_nonzero_scalar::<P>(rng));
        for _ in 1..self.threshold {
            coefficients.push(rng.gen_biguint_below(order));
        }
        self.commitments = coefficients.iter().map(P::scalar_base_mult).collect();
        self.coefficients = coefficients;
        // A new polynomial invalidates everything derived from the previous one.
        self.received.clear();
        self.private_share = None;
        self.public_key = None;
    }

    fn ensure_polynomial(&self) -> Result<(), DkgError> {
        if self.coefficients.is_empty() {
            return Err(DkgError::PolynomialNotGenerated);
        }
        Ok(())
    }

    pub fn public_commitments(&self) -> Result<PublicCommitments<P>, DkgError> {
        self.ensure_polynomial()?;
        Ok(PublicCommitments {
            from: self.id,
            commitments: self.commitments.clone(),
        })
    }

    /// One share per peer, `f(peer)`.
    pub fn compute_shares(&self) -> Result<Vec<PrivateShare>, DkgError> {
        self.ensure_polynomial()?;
        Ok(self
            .peers
            .iter()
            .map(|&peer| PrivateShare {
                from: self.id,
                to: peer,
                value: evaluate_polynomial(&self.coefficients, peer, P::order()),
            })
            .collect())
    }

    /// Verifies a share against the sender's commitments and stores it.
    ///
    /// Checks `value·G == Σ C_j·id^j`. A share that fails the check is rejected and not stored.
    pub fn receive_share(
        &mut self,
        share: &PrivateShare,
        sender_commitments: &PublicCommitments<P>,
    ) -> Result<(), DkgError> {
        if share.to != self.id {
            return Err(DkgError::MisaddressedShare {
                from: share.from,
                to: share.to,
                me: self.id,
            });
        }
        if !self.peers.contains(&share.from) || sender_commitments.from != share.from {
            return Err(DkgError::UnknownParticipant(share.from));
        }
        if sender_commitments.commitments.len() != self.threshold {
            return Err(DkgError::CommitmentCount {
                from: share.from,
                expected: self.threshold,
                got: sender_commitments.commitments.len(),
            });
        }

        if !verify_share::<P>(self.id, &share.value, &sender_commitments.commitments) {
            warn!(me = self.id, from = share.from, "Rejected share failing Feldman check");
            return Err(DkgError::InvalidShare { from: share.from });
        }
        debug!(me = self.id, from = share.from, "Accepted share");
        self.received.insert(share.from, share.value.clone());
        Ok(())
    }

    /// Sums the own evaluation with every received share into the private key share.
    ///
    /// Fails with [`DkgError::MissingShares`] until a share from every peer has been received.
    pub fn aggregate_shares(&mut self) -> Result<BigUint, DkgError> {
        self.ensure_polynomial()?;
        let missing: Vec<u64> = self
            .peers
            .iter()
            .filter(|peer| !self.received.contains_key(*peer))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(DkgError::MissingShares(missing));
        }
        let order = P::order();
        let own = evaluate_polynomial(&self.coefficients, self.id, order);
        let share = self
            .received
            .values()
            .fold(own, |acc, value| (acc + value) % order);
        info!(id = self.id, "Aggregated private share");
        self.private_share = Some(share.clone());
        Ok(share)
    }

    /// Joint public key: the sum of every participant's constant term commitment.
    pub fn aggregate_public_key(
        &mut self,
        all_commitments: &[PublicCommitments<P>],
    ) -> Result<P, DkgError> {
        let expected: BTreeSet<u64> = self
            .peers
            .iter()
            .copied()
            .chain(std::iter::once(self.id))
            .collect();
        let mut seen = BTreeSet::new();
        let mut key = P::identity();
        for commitments in all_commitments {
            if !expected.contains(&commitments.from) {
                return Err(DkgError::UnknownParticipant(commitments.from));
            }
            if !seen.insert(commitments.from) {
                return Err(DkgError::InvalidParticipants(format!(
                    "commitments from {} given twice",
                    commitments.from
                )));
            }
            let constant = commitments.commitments.first().ok_or(DkgError::CommitmentCount {
                from: commitments.from,
                expected: self.threshold,
                got: 0,
            })?;
            key = key.add(constant);
        }
        let missing: Vec<u64> = expected.difference(&seen).copied().collect();
        if !missing.is_empty() {
            return Err(DkgError::MissingCommitments(missing));
        }
        self.public_key = Some(key.clone());
        Ok(key)
    }

    pub fn private_share(&self) -> Option<&BigUint> {
        self.private_share.as_ref()
    }

    pub fn public_key(&self) -> Option<&P> {
        self.public_key.as_ref()
    }

    /// `share·G`, the public counterpart of the aggregated share.
    pub fn public_share(&self) -> Result<P, DkgError> {
        let share = self.private_share.as_ref().ok_or(DkgError::NotAggregated)?;
        Ok(P::scalar_base_mult(share))
    }

    /// `share·C1`.
    pub fn partial_decrypt(&self, ct: &Ciphertext<P>) -> Result<P, DkgError> {
        let share = self.private_share.as_ref().ok_or(DkgError::NotAggregated)?;
        Ok(ct.c1.scalar_mult(share))
    }

    pub fn partial_decrypt_ballot(&self, ballot: &Ballot<P>) -> Result<Vec<P>, DkgError> {
        ballot
            .ciphertexts()
            .iter()
            .map(|ct| self.partial_decrypt(ct))
            .collect()
    }
}

/// Feldman check of a share `value` for recipient `id`.
pub fn verify_share<P: Point>(id: u64, value: &BigUint, commitments: &[P]) -> bool {
    let order = P::order();
    let x = BigUint::from(id);
    let mut power = BigUint::from(1u32);
    let mut expected = P::identity();
    for commitment in commitments {
        expected = expected.add(&commitment.scalar_mult(&power));
        power = (power * &x) % order;
    }
    P::scalar_base_mult(value) == expected
}
