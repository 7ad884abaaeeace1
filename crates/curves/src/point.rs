// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{
    utils::{biguint_from_be, biguint_to_fixed_be},
    CurveError, CurveType,
};
use num_bigint::BigUint;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;

/// Width of one serialized coordinate.
pub const COORDINATE_SIZE: usize = 32;

/// Width of a serialized point: `x || y`.
pub const POINT_SIZE: usize = 2 * COORDINATE_SIZE;

/// An element of a prime order elliptic curve group.
///
/// Points are values: operations return new points and never mutate their inputs. The
/// only shared mutable accumulator is [`crate::SharedPoint`].
pub trait Point:
    Clone + Debug + PartialEq + Eq + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// The backend this point belongs to.
    const CURVE: CurveType;

    /// The neutral element.
    fn identity() -> Self;

    /// The fixed generator of the prime order subgroup.
    fn generator() -> Self;

    /// Order of the prime subgroup.
    fn order() -> &'static BigUint;

    fn add(&self, other: &Self) -> Self;

    fn neg(&self) -> Self;

    /// Multiplies the point by `k`. Scalars are taken modulo [`Point::order`].
    fn scalar_mult(&self, k: &BigUint) -> Self;

    /// Affine coordinates in the backend's native representation.
    fn coordinates(&self) -> (BigUint, BigUint);

    /// Builds a point from native affine coordinates, rejecting anything that is not an
    /// element of the prime order subgroup.
    fn from_coordinates(x: &BigUint, y: &BigUint) -> Result<Self, CurveError>;

    /// Coordinates used for every serialized form.
    ///
    /// Backends implementing the same group in different coordinate systems override this
    /// so their encodings agree.
    fn canonical_coordinates(&self) -> (BigUint, BigUint) {
        self.coordinates()
    }

    fn from_canonical_coordinates(x: &BigUint, y: &BigUint) -> Result<Self, CurveError> {
        Self::from_coordinates(x, y)
    }

    fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    fn scalar_base_mult(k: &BigUint) -> Self {
        Self::generator().scalar_mult(k)
    }

    fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    fn set_zero(&mut self) {
        *self = Self::identity();
    }

    fn set_generator(&mut self) {
        *self = Self::generator();
    }

    fn add_assign(&mut self, other: &Self) {
        *self = self.add(other);
    }

    /// Fixed width big-endian `x || y` of the canonical coordinates.
    fn marshal(&self) -> Vec<u8> {
        let (x, y) = self.canonical_coordinates();
        let mut out = biguint_to_fixed_be(&x, COORDINATE_SIZE);
        out.extend(biguint_to_fixed_be(&y, COORDINATE_SIZE));
        out
    }

    fn unmarshal(bytes: &[u8]) -> Result<Self, CurveError> {
        if bytes.len() != POINT_SIZE {
            return Err(CurveError::InvalidLength {
                expected: POINT_SIZE,
                got: bytes.len(),
            });
        }
        let x = biguint_from_be(&bytes[..COORDINATE_SIZE]);
        let y = biguint_from_be(&bytes[COORDINATE_SIZE..]);
        Self::from_canonical_coordinates(&x, &y)
    }
}

/// Implements serde for a backend as an ordered pair of decimal coordinate strings.
macro_rules! impl_point_serde {
    ($point:ty) => {
        impl serde::Serialize for $point {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                let (x, y) = $crate::Point::canonical_coordinates(self);
                serde::Serialize::serialize(&(x.to_str_radix(10), y.to_str_radix(10)), serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $point {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                use serde::de::Error;
                let (x, y): (String, String) = serde::Deserialize::deserialize(deserializer)?;
                let parse = |s: &str| {
                    num_bigint::BigUint::parse_bytes(s.as_bytes(), 10).ok_or_else(|| {
                        D::Error::custom($crate::CurveError::InvalidEncoding(s.to_string()))
                    })
                };
                let (x, y) = (parse(&x)?, parse(&y)?);
                <$point as $crate::Point>::from_canonical_coordinates(&x, &y)
                    .map_err(D::Error::custom)
            }
        }
    };
}

pub(crate) use impl_point_serde;
