// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{
    point::impl_point_serde,
    utils::{biguint_to_field, field_modulus, field_to_biguint},
    CurveError, CurveType, Point,
};
use ark_bn254::{Fq, Fr, G1Affine, G1Projective};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{PrimeField, Zero};
use num_bigint::BigUint;
use once_cell::sync::Lazy;

static ORDER: Lazy<BigUint> = Lazy::new(field_modulus::<Fr>);

/// A point of the BN254 G1 group. The identity is encoded as `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bn254Point(G1Projective);

impl Point for Bn254Point {
    const CURVE: CurveType = CurveType::Bn254;

    fn identity() -> Self {
        Self(G1Projective::zero())
    }

    fn generator() -> Self {
        Self(G1Affine::generator().into_group())
    }

    fn order() -> &'static BigUint {
        &ORDER
    }

    fn add(&self, other: &Self) -> Self {
        Self(self.0 + other.0)
    }

    fn neg(&self) -> Self {
        Self(-self.0)
    }

    fn scalar_mult(&self, k: &BigUint) -> Self {
        let k = Fr::from_le_bytes_mod_order(&k.to_bytes_le());
        Self(self.0 * k)
    }

    fn coordinates(&self) -> (BigUint, BigUint) {
        let affine = self.0.into_affine();
        if affine.infinity {
            return (BigUint::from(0u32), BigUint::from(0u32));
        }
        (field_to_biguint(&affine.x), field_to_biguint(&affine.y))
    }

    fn from_coordinates(x: &BigUint, y: &BigUint) -> Result<Self, CurveError> {
        let x: Fq = biguint_to_field(x).ok_or(CurveError::CoordinateOutOfRange)?;
        let y: Fq = biguint_to_field(y).ok_or(CurveError::CoordinateOutOfRange)?;
        if x.is_zero() && y.is_zero() {
            return Ok(Self::identity());
        }
        let affine = G1Affine::new_unchecked(x, y);
        if !affine.is_on_curve() {
            return Err(CurveError::NotOnCurve);
        }
        if !affine.is_in_correct_subgroup_assuming_on_curve() {
            return Err(CurveError::NotInSubgroup);
        }
        Ok(Self(affine.into_group()))
    }
}

impl_point_serde!(Bn254Point);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_coordinates() {
        // G1 generator of BN254 is (1, 2)
        assert_eq!(
            Bn254Point::generator().coordinates(),
            (BigUint::from(1u32), BigUint::from(2u32))
        );
    }

    #[test]
    fn test_identity_encoding() {
        let id = Bn254Point::identity();
        assert_eq!(id.marshal(), vec![0u8; crate::POINT_SIZE]);
        assert_eq!(Bn254Point::unmarshal(&id.marshal()), Ok(id));
    }

    #[test]
    fn test_rejects_point_off_curve() {
        assert_eq!(
            Bn254Point::from_coordinates(&BigUint::from(1u32), &BigUint::from(3u32)),
            Err(CurveError::NotOnCurve)
        );
    }
}
