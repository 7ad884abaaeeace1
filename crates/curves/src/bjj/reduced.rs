// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use super::{reduced_to_standard, standard_to_reduced, Fq, PARAMS};
use crate::{
    point::impl_point_serde,
    utils::{biguint_to_field, double_and_add, field_to_biguint},
    CurveError, CurveType, Point,
};
use ark_ff::{Field, One, Zero};
use num_bigint::BigUint;

/// BabyJubJub point in reduced form (`a = -1`), extended coordinates `(X:Y:T:Z)` with
/// `x = X/Z`, `y = Y/Z` and `x·y = T/Z`.
#[derive(Debug, Clone, Copy)]
pub struct BjjReduced {
    x: Fq,
    y: Fq,
    t: Fq,
    z: Fq,
}

impl BjjReduced {
    fn from_affine(x: Fq, y: Fq) -> Self {
        Self {
            x,
            y,
            t: x * y,
            z: Fq::one(),
        }
    }

    fn affine(&self) -> (Fq, Fq) {
        let z_inv = self.z.inverse().unwrap_or_default();
        (self.x * z_inv, self.y * z_inv)
    }

    fn is_on_curve(x: &Fq, y: &Fq) -> bool {
        let x2 = x.square();
        let y2 = y.square();
        y2 - x2 == Fq::one() + PARAMS.d_reduced * x2 * y2
    }

    /// Unified addition for `a = -1` (Hisil, Wong, Carter, Dawson 2008).
    fn add_extended(&self, other: &Self) -> Self {
        let a = (self.y - self.x) * (other.y - other.x);
        let b = (self.y + self.x) * (other.y + other.x);
        let c = self.t * PARAMS.k_reduced * other.t;
        let d = (self.z + self.z) * other.z;
        let e = b - a;
        let f = d - c;
        let g = d + c;
        let h = b + a;
        Self {
            x: e * f,
            y: g * h,
            t: e * h,
            z: f * g,
        }
    }
}

impl PartialEq for BjjReduced {
    fn eq(&self, other: &Self) -> bool {
        self.x * other.z == other.x * self.z && self.y * other.z == other.y * self.z
    }
}

impl Eq for BjjReduced {}

impl Point for BjjReduced {
    const CURVE: CurveType = CurveType::BjjReduced;

    fn identity() -> Self {
        Self::from_affine(Fq::zero(), Fq::one())
    }

    fn generator() -> Self {
        let (x, y) = PARAMS.generator;
        Self::from_affine(x * PARAMS.f, y)
    }

    fn order() -> &'static BigUint {
        &PARAMS.order
    }

    fn add(&self, other: &Self) -> Self {
        self.add_extended(other)
    }

    fn neg(&self) -> Self {
        Self {
            x: -self.x,
            y: self.y,
            t: -self.t,
            z: self.z,
        }
    }

    fn scalar_mult(&self, k: &BigUint) -> Self {
        let k = k % Self::order();
        double_and_add(self, &k, Self::identity(), Self::add_extended)
    }

    fn coordinates(&self) -> (BigUint, BigUint) {
        let (x, y) = self.affine();
        (field_to_biguint(&x), field_to_biguint(&y))
    }

    fn from_coordinates(x: &BigUint, y: &BigUint) -> Result<Self, CurveError> {
        let x: Fq = biguint_to_field(x).ok_or(CurveError::CoordinateOutOfRange)?;
        let y: Fq = biguint_to_field(y).ok_or(CurveError::CoordinateOutOfRange)?;
        if !Self::is_on_curve(&x, &y) {
            return Err(CurveError::NotOnCurve);
        }
        let point = Self::from_affine(x, y);
        let torsion = double_and_add(
            &point,
            Self::order(),
            Self::identity(),
            Self::add_extended,
        );
        if torsion != Self::identity() {
            return Err(CurveError::NotInSubgroup);
        }
        Ok(point)
    }

    /// Serialized forms always carry standard form coordinates.
    fn canonical_coordinates(&self) -> (BigUint, BigUint) {
        let (x, y) = self.coordinates();
        reduced_to_standard(&x, &y).unwrap_or((x, y))
    }

    fn from_canonical_coordinates(x: &BigUint, y: &BigUint) -> Result<Self, CurveError> {
        let (x, y) = standard_to_reduced(x, y).ok_or(CurveError::CoordinateOutOfRange)?;
        Self::from_coordinates(&x, &y)
    }
}

impl_point_serde!(BjjReduced);
