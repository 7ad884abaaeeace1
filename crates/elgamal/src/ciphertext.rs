// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{keys::random_nonzero_scalar, DiscreteLogTable, ElGamalError, Result};
use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use zkvote_curves::{Point, POINT_SIZE};

/// Serialized width of one ciphertext: `C1 || C2`.
pub const CIPHERTEXT_SIZE: usize = 2 * POINT_SIZE;

/// Reduces an arbitrary integer into `[0, order)` with the Euclidean modulus.
pub fn reduce_message<P: Point>(message: &BigInt) -> BigUint {
    let order = BigInt::from_biguint(Sign::Plus, P::order().clone());
    // mod_floor of a positive modulus is never negative
    message.mod_floor(&order).magnitude().clone()
}

/// ElGamal ciphertext `(C1, C2) = (k·G, m·G + k·PK)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Ciphertext<P: Point> {
    pub c1: P,
    pub c2: P,
}

impl<P: Point> Ciphertext<P> {
    /// The encryption of zero with zero randomness, neutral for [`Ciphertext::add`].
    pub fn new() -> Self {
        Self {
            c1: P::identity(),
            c2: P::identity(),
        }
    }

    /// Encrypts `message` with fresh randomness and returns the ciphertext together with the
    /// randomness used. Negative and oversized messages wrap modulo the group order.
    pub fn encrypt(message: &BigInt, pk: &P) -> Result<(Self, BigUint)> {
        let k = random_nonzero_scalar::<P>(&mut rand::thread_rng());
        let ct = Self::encrypt_with_k(message, pk, &k)?;
        Ok((ct, k))
    }

    /// Deterministic encryption with caller provided randomness.
    pub fn encrypt_with_k(message: &BigInt, pk: &P, k: &BigUint) -> Result<Self> {
        let k = k % P::order();
        if k.is_zero() {
            return Err(ElGamalError::ZeroRandomness);
        }
        let m = reduce_message::<P>(message);
        Ok(Self {
            c1: P::scalar_base_mult(&k),
            c2: P::scalar_base_mult(&m).add(&pk.scalar_mult(&k)),
        })
    }

    pub fn add(&self, other: &Self) -> Self {
        Self {
            c1: self.c1.add(&other.c1),
            c2: self.c2.add(&other.c2),
        }
    }

    /// `m·G = C2 - sk·C1`.
    pub fn decrypt_point(&self, sk: &BigUint) -> P {
        self.c2.sub(&self.c1.scalar_mult(sk))
    }

    /// Recovers the plaintext if it lies in `[0, max_message]`.
    ///
    /// A wrong key is not detected: the result is either an unrelated scalar or
    /// [`ElGamalError::MessageOutOfBound`].
    pub fn decrypt(&self, sk: &BigUint, max_message: u64) -> Result<BigUint> {
        self.decrypt_with_table(sk, &DiscreteLogTable::new(max_message))
    }

    pub fn decrypt_with_table(&self, sk: &BigUint, table: &DiscreteLogTable<P>) -> Result<BigUint> {
        table.solve(&self.decrypt_point(sk))
    }

    pub fn is_zero(&self) -> bool {
        self.c1.is_identity() && self.c2.is_identity()
    }

    /// `[C1.x, C1.y, C2.x, C2.y]` in canonical coordinates.
    pub fn big_ints(&self) -> Vec<BigUint> {
        let (c1x, c1y) = self.c1.canonical_coordinates();
        let (c2x, c2y) = self.c2.canonical_coordinates();
        vec![c1x, c1y, c2x, c2y]
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut out = self.c1.marshal();
        out.extend(self.c2.marshal());
        out
    }

    pub fn unmarshal(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != CIPHERTEXT_SIZE {
            return Err(ElGamalError::InvalidLength {
                expected: CIPHERTEXT_SIZE,
                got: bytes.len(),
            });
        }
        Ok(Self {
            c1: P::unmarshal(&bytes[..POINT_SIZE])?,
            c2: P::unmarshal(&bytes[POINT_SIZE..])?,
        })
    }
}

impl<P: Point> Default for Ciphertext<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate_keypair;
    use zkvote_curves::BjjStd;
    use zkvote_test_helpers::seeded_rng;

    #[test]
    fn test_reduce_message_wraps() {
        let order = BjjStd::order().clone();
        let order_int = BigInt::from_biguint(Sign::Plus, order.clone());
        assert_eq!(reduce_message::<BjjStd>(&order_int), BigUint::zero());
        assert_eq!(reduce_message::<BjjStd>(&BigInt::from(-1)), &order - 1u32);
        assert_eq!(
            reduce_message::<BjjStd>(&BigInt::from(5)),
            BigUint::from(5u32)
        );
    }

    #[test]
    fn test_zero_randomness_is_rejected() {
        let (pk, _) = generate_keypair::<BjjStd>(&mut seeded_rng(1));
        assert_eq!(
            Ciphertext::encrypt_with_k(&BigInt::from(1), &pk, &BigUint::zero()),
            Err(ElGamalError::ZeroRandomness)
        );
        assert_eq!(
            Ciphertext::encrypt_with_k(&BigInt::from(1), &pk, BjjStd::order()),
            Err(ElGamalError::ZeroRandomness)
        );
    }

    #[test]
    fn test_identity_ciphertext_decrypts_to_zero() {
        let ct = Ciphertext::<BjjStd>::new();
        assert!(ct.is_zero());
        assert_eq!(ct.decrypt(&BigUint::from(99u32), 10), Ok(BigUint::zero()));
    }

    #[test]
    fn test_marshal_length_is_checked() {
        assert_eq!(
            Ciphertext::<BjjStd>::unmarshal(&[0u8; 5]),
            Err(ElGamalError::InvalidLength {
                expected: CIPHERTEXT_SIZE,
                got: 5
            })
        );
    }
}
