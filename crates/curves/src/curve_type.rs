// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::CurveError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Identifies a curve backend by family name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveType {
    /// BabyJubJub, standard twisted Edwards form
    BjjStd,
    /// BabyJubJub, reduced twisted Edwards form
    BjjReduced,
    /// BN254 G1
    Bn254,
}

impl CurveType {
    pub const ALL: [CurveType; 3] = [CurveType::BjjStd, CurveType::BjjReduced, CurveType::Bn254];

    pub fn name(&self) -> &'static str {
        match self {
            CurveType::BjjStd => "bjj_std",
            CurveType::BjjReduced => "bjj_reduced",
            CurveType::Bn254 => "bn254",
        }
    }

    /// Resolves a curve by name at construction time.
    ///
    /// An unknown name is a configuration error and aborts the process.
    pub fn must_parse(name: &str) -> Self {
        match name.parse() {
            Ok(curve) => curve,
            Err(e) => panic!("{e}"),
        }
    }
}

impl FromStr for CurveType {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bjj_std" | "bjj_iden3" => Ok(CurveType::BjjStd),
            "bjj_reduced" | "bjj_gnark" => Ok(CurveType::BjjReduced),
            "bn254" => Ok(CurveType::Bn254),
            other => Err(CurveError::UnknownCurve(other.to_string())),
        }
    }
}

impl fmt::Display for CurveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Runs `$body` with `$P` bound to the point type of `$curve`.
///
/// ```ignore
/// let identity = with_curve!(CurveType::BjjStd, P => P::identity().marshal());
/// ```
#[macro_export]
macro_rules! with_curve {
    ($curve:expr, $P:ident => $body:expr) => {
        match $curve {
            $crate::CurveType::BjjStd => {
                type $P = $crate::BjjStd;
                $body
            }
            $crate::CurveType::BjjReduced => {
                type $P = $crate::BjjReduced;
                $body
            }
            $crate::CurveType::Bn254 => {
                type $P = $crate::Bn254Point;
                $body
            }
        }
    };
}
