// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{Ciphertext, DiscreteLogTable, ElGamalError, Result, CIPHERTEXT_SIZE};
use num_bigint::{BigInt, BigUint};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use zkvote_curves::Point;

/// A fixed length vector of ciphertexts, one per ballot field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct Ballot<P: Point> {
    ciphertexts: Vec<Ciphertext<P>>,
}

impl<P: Point> Ballot<P> {
    /// Ballot of `fields` identity ciphertexts.
    pub fn new(fields: usize) -> Self {
        Self {
            ciphertexts: vec![Ciphertext::new(); fields],
        }
    }

    /// Encrypts one value per field with fresh randomness. Returns the randomness per field.
    pub fn encrypt(values: &[BigInt], pk: &P) -> Result<(Self, Vec<BigUint>)> {
        let (ciphertexts, ks): (Vec<_>, Vec<_>) = values
            .iter()
            .map(|m| Ciphertext::encrypt(m, pk))
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .unzip();
        Ok((Self { ciphertexts }, ks))
    }

    pub fn encrypt_with_k(values: &[BigInt], pk: &P, ks: &[BigUint]) -> Result<Self> {
        if values.len() != ks.len() {
            return Err(ElGamalError::FieldCountMismatch {
                expected: values.len(),
                got: ks.len(),
            });
        }
        let ciphertexts = values
            .iter()
            .zip(ks)
            .map(|(m, k)| Ciphertext::encrypt_with_k(m, pk, k))
            .collect::<Result<_>>()?;
        Ok(Self { ciphertexts })
    }

    pub fn fields(&self) -> usize {
        self.ciphertexts.len()
    }

    pub fn ciphertexts(&self) -> &[Ciphertext<P>] {
        &self.ciphertexts
    }

    fn check_fields(&self, other: &Self) -> Result<()> {
        if self.fields() != other.fields() {
            return Err(ElGamalError::FieldCountMismatch {
                expected: self.fields(),
                got: other.fields(),
            });
        }
        Ok(())
    }

    /// Field-wise homomorphic addition.
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.check_fields(other)?;
        let ciphertexts = self
            .ciphertexts
            .iter()
            .zip(&other.ciphertexts)
            .map(|(a, b)| a.add(b))
            .collect();
        Ok(Self { ciphertexts })
    }

    pub fn decrypt(&self, sk: &BigUint, max_message: u64) -> Result<Vec<BigUint>> {
        self.decrypt_with_table(sk, &DiscreteLogTable::new(max_message))
    }

    pub fn decrypt_with_table(
        &self,
        sk: &BigUint,
        table: &DiscreteLogTable<P>,
    ) -> Result<Vec<BigUint>> {
        self.ciphertexts
            .par_iter()
            .map(|ct| ct.decrypt_with_table(sk, table))
            .collect()
    }

    /// Flat list of canonical coordinates, four per field.
    pub fn big_ints(&self) -> Vec<BigUint> {
        self.ciphertexts
            .iter()
            .flat_map(Ciphertext::big_ints)
            .collect()
    }

    pub fn marshal(&self) -> Vec<u8> {
        self.ciphertexts.iter().flat_map(|ct| ct.marshal()).collect()
    }

    /// Decodes a ballot of exactly `fields` ciphertexts.
    pub fn unmarshal(bytes: &[u8], fields: usize) -> Result<Self> {
        let expected = fields * CIPHERTEXT_SIZE;
        if bytes.len() != expected {
            return Err(ElGamalError::InvalidLength {
                expected,
                got: bytes.len(),
            });
        }
        let ciphertexts = bytes
            .chunks_exact(CIPHERTEXT_SIZE)
            .map(Ciphertext::unmarshal)
            .collect::<Result<_>>()?;
        Ok(Self { ciphertexts })
    }
}

/// A ballot accumulator shared between worker threads.
#[derive(Debug)]
pub struct SharedBallot<P: Point> {
    inner: Mutex<Ballot<P>>,
}

impl<P: Point> SharedBallot<P> {
    pub fn new(fields: usize) -> Self {
        Self {
            inner: Mutex::new(Ballot::new(fields)),
        }
    }

    pub fn safe_add(&self, other: &Ballot<P>) -> Result<()> {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        *guard = guard.add(other)?;
        Ok(())
    }

    pub fn get(&self) -> Ballot<P> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn into_inner(self) -> Ballot<P> {
        self.inner.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zkvote_curves::BjjReduced;

    #[test]
    fn test_new_ballot_is_identity() {
        let ballot = Ballot::<BjjReduced>::new(8);
        assert_eq!(ballot.fields(), 8);
        assert!(ballot.ciphertexts().iter().all(Ciphertext::is_zero));
        assert_eq!(ballot.big_ints().len(), 32);
        assert_eq!(ballot.marshal().len(), 8 * CIPHERTEXT_SIZE);
    }

    #[test]
    fn test_field_count_mismatch() {
        let a = Ballot::<BjjReduced>::new(2);
        let b = Ballot::<BjjReduced>::new(3);
        assert_eq!(
            a.add(&b),
            Err(ElGamalError::FieldCountMismatch {
                expected: 2,
                got: 3
            })
        );
        assert!(Ballot::<BjjReduced>::unmarshal(&a.marshal(), 3).is_err());
    }
}
