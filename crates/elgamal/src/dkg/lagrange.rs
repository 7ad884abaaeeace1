// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{Ballot, Ciphertext, DiscreteLogTable, DkgError};
use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::One;
use zkvote_curves::Point;

/// Lagrange coefficient of participant `i` for interpolation at zero over `ids`:
/// `λ_i = Π_{j≠i} x_j / (x_j - x_i) mod order`.
///
/// Fails with [`DkgError::NoInverse`] when a denominator vanishes, which is the case when
/// `i` appears more than once in `ids`.
pub fn lagrange_coefficient(i: u64, ids: &[u64], order: &BigUint) -> Result<BigUint, DkgError> {
    let position = ids
        .iter()
        .position(|&j| j == i)
        .ok_or(DkgError::UnknownParticipant(i))?;
    let modulus = BigInt::from_biguint(Sign::Plus, order.clone());

    let mut num = BigUint::one();
    let mut den = BigUint::one();
    for (idx, &j) in ids.iter().enumerate() {
        if idx == position {
            continue;
        }
        num = (num * j) % order;
        let diff = (BigInt::from(j) - BigInt::from(i)).mod_floor(&modulus);
        den = (den * diff.magnitude()) % order;
    }
    let den_inv = den.modinv(order).ok_or(DkgError::NoInverse(i))?;
    Ok((num * den_inv) % order)
}

/// Combines partial decryptions `(id, sk_id·C1)` into the plaintext of `ct`.
///
/// Any set of at least `threshold` distinct participants yields the same result.
pub fn combine_partial_decryptions<P: Point>(
    ct: &Ciphertext<P>,
    partials: &[(u64, P)],
    threshold: usize,
    max_message: u64,
) -> Result<BigUint, DkgError> {
    let table = DiscreteLogTable::new(max_message);
    combine_with_table(ct, partials, threshold, &table)
}

fn combine_with_table<P: Point>(
    ct: &Ciphertext<P>,
    partials: &[(u64, P)],
    threshold: usize,
    table: &DiscreteLogTable<P>,
) -> Result<BigUint, DkgError> {
    if partials.len() < threshold {
        return Err(DkgError::NotEnoughPartials {
            threshold,
            got: partials.len(),
        });
    }
    let ids: Vec<u64> = partials.iter().map(|(id, _)| *id).collect();
    let mut shared = P::identity();
    for (id, partial) in partials {
        let lambda = lagrange_coefficient(*id, &ids, P::order())?;
        shared = shared.add(&partial.scalar_mult(&lambda));
    }
    Ok(table.solve(&ct.c2.sub(&shared))?)
}

/// Threshold decryption of every field of a ballot. `partials` holds, per participant, one
/// partial decryption per field.
pub fn decrypt_ballot_threshold<P: Point>(
    ballot: &Ballot<P>,
    partials: &[(u64, Vec<P>)],
    threshold: usize,
    max_message: u64,
) -> Result<Vec<BigUint>, DkgError> {
    for (_, fields) in partials {
        if fields.len() != ballot.fields() {
            return Err(crate::ElGamalError::FieldCountMismatch {
                expected: ballot.fields(),
                got: fields.len(),
            }
            .into());
        }
    }
    let table = DiscreteLogTable::new(max_message);
    ballot
        .ciphertexts()
        .iter()
        .enumerate()
        .map(|(field, ct)| {
            let field_partials: Vec<(u64, P)> = partials
                .iter()
                .map(|(id, points)| (*id, points[field].clone()))
                .collect();
            combine_with_table(ct, &field_partials, threshold, &table)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficients_interpolate_constant() {
        // f(x) = 7 + 3x over Z_11, shares at 1, 2, 4
        let order = BigUint::from(11u32);
        let f = |x: u64| BigUint::from((7 + 3 * x) % 11);
        let ids = [1u64, 2, 4];
        let secret = ids.iter().fold(BigUint::from(0u32), |acc, &i| {
            let lambda = lagrange_coefficient(i, &ids, &order).unwrap();
            (acc + lambda * f(i)) % &order
        });
        assert_eq!(secret, BigUint::from(7u32));
    }

    #[test]
    fn test_duplicate_ids_have_no_inverse() {
        let order = BigUint::from(11u32);
        assert_eq!(
            lagrange_coefficient(2, &[1, 2, 2], &order),
            Err(DkgError::NoInverse(2))
        );
        assert_eq!(
            lagrange_coefficient(5, &[1, 2], &order),
            Err(DkgError::UnknownParticipant(5))
        );
    }
}
