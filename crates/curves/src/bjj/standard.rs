// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use super::{Fq, PARAMS};
use crate::{
    point::impl_point_serde,
    utils::{biguint_to_field, double_and_add, field_to_biguint},
    CurveError, CurveType, Point,
};
use ark_ff::{Field, One, Zero};
use num_bigint::BigUint;

/// BabyJubJub point in standard form, affine coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BjjStd {
    x: Fq,
    y: Fq,
}

impl BjjStd {
    fn is_on_curve(x: &Fq, y: &Fq) -> bool {
        let x2 = x.square();
        let y2 = y.square();
        PARAMS.a * x2 + y2 == Fq::one() + PARAMS.d * x2 * y2
    }

    fn add_unreduced(&self, other: &Self) -> Self {
        let x1y2 = self.x * other.y;
        let y1x2 = self.y * other.x;
        let x1x2 = self.x * other.x;
        let y1y2 = self.y * other.y;
        let dxxyy = PARAMS.d * x1x2 * y1y2;
        // The denominators never vanish for points on the curve since `d` is a non-square.
        let x3 = (x1y2 + y1x2) * (Fq::one() + dxxyy).inverse().unwrap_or_default();
        let y3 = (y1y2 - PARAMS.a * x1x2) * (Fq::one() - dxxyy).inverse().unwrap_or_default();
        Self { x: x3, y: y3 }
    }
}

impl Point for BjjStd {
    const CURVE: CurveType = CurveType::BjjStd;

    fn identity() -> Self {
        Self {
            x: Fq::zero(),
            y: Fq::one(),
        }
    }

    fn generator() -> Self {
        let (x, y) = PARAMS.generator;
        Self { x, y }
    }

    fn order() -> &'static BigUint {
        &PARAMS.order
    }

    fn add(&self, other: &Self) -> Self {
        self.add_unreduced(other)
    }

    fn neg(&self) -> Self {
        Self {
            x: -self.x,
            y: self.y,
        }
    }

    fn scalar_mult(&self, k: &BigUint) -> Self {
        let k = k % Self::order();
        double_and_add(self, &k, Self::identity(), Self::add_unreduced)
    }

    fn coordinates(&self) -> (BigUint, BigUint) {
        (field_to_biguint(&self.x), field_to_biguint(&self.y))
    }

    fn from_coordinates(x: &BigUint, y: &BigUint) -> Result<Self, CurveError> {
        let x: Fq = biguint_to_field(x).ok_or(CurveError::CoordinateOutOfRange)?;
        let y: Fq = biguint_to_field(y).ok_or(CurveError::CoordinateOutOfRange)?;
        if !Self::is_on_curve(&x, &y) {
            return Err(CurveError::NotOnCurve);
        }
        let point = Self { x, y };
        let torsion = double_and_add(
            &point,
            Self::order(),
            Self::identity(),
            Self::add_unreduced,
        );
        if torsion != Self::identity() {
            return Err(CurveError::NotInSubgroup);
        }
        Ok(point)
    }
}

impl_point_serde!(BjjStd);
