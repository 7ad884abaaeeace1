// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use num_bigint::{BigUint, RandBigInt};
use rand::Rng;
use zkvote_curves::Point;

/// Uniform scalar in `[1, order - 1]`.
pub fn random_nonzero_scalar<P: Point>(rng: &mut (impl Rng + ?Sized)) -> BigUint {
    rng.gen_biguint_range(&BigUint::from(1u32), P::order())
}

/// Returns `(pk, sk)` with `pk = sk·G`.
pub fn generate_keypair<P: Point>(rng: &mut (impl Rng + ?Sized)) -> (P, BigUint) {
    let sk = random_nonzero_scalar::<P>(rng);
    (P::scalar_base_mult(&sk), sk)
}

#[cfg(test)]
mod tests {
    use super::*;
    use zkvote_curves::BjjStd;
    use zkvote_test_helpers::seeded_rng;

    #[test]
    fn test_keypair_matches() {
        let mut rng = seeded_rng(3);
        let (pk, sk): (BjjStd, _) = generate_keypair(&mut rng);
        assert!(sk > BigUint::from(0u32) && &sk < BjjStd::order());
        assert_eq!(pk, BjjStd::scalar_base_mult(&sk));
    }
}
