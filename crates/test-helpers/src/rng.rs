// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use num_bigint::{BigUint, RandBigInt};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Seeded generator so failures reproduce.
pub fn seeded_rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

pub fn random_bytes(rng: &mut impl Rng, len: usize) -> Vec<u8> {
    let mut out = vec![0u8; len];
    rng.fill(out.as_mut_slice());
    out
}

/// Uniform scalar in `[1, order - 1]`.
pub fn random_scalar(rng: &mut impl Rng, order: &BigUint) -> BigUint {
    rng.gen_biguint_range(&BigUint::from(1u32), order)
}

/// A 20 byte account address.
pub fn random_address(rng: &mut impl Rng) -> Vec<u8> {
    random_bytes(rng, 20)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let a = random_bytes(&mut seeded_rng(7), 32);
        let b = random_bytes(&mut seeded_rng(7), 32);
        let c = random_bytes(&mut seeded_rng(8), 32);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_random_scalar_in_range() {
        let order = BigUint::from(11u32);
        let mut rng = seeded_rng(1);
        for _ in 0..100 {
            let k = random_scalar(&mut rng, &order);
            assert!(k >= BigUint::from(1u32) && k < order);
        }
    }
}
