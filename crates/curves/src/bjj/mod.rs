// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! BabyJubJub over the BN254 scalar field.
//!
//! The curve is defined in standard twisted Edwards form `a·x² + y² = 1 + d·x²·y²` with
//! `a = 168700` and `d = 168696`. Substituting `x' = x·f` with `f² = -a` yields the reduced
//! form `-x'² + y² = 1 + d'·x'²·y²` where `d' = -d/a`. Both describe the same group and
//! the map leaves `y` unchanged.

mod reduced;
mod standard;

pub use reduced::BjjReduced;
pub use standard::BjjStd;

use crate::utils::{biguint_to_field, field_to_biguint, parse_field};
use ark_bn254::Fr;
use ark_ff::{Field, PrimeField};
use num_bigint::BigUint;
use once_cell::sync::Lazy;

/// Base field of BabyJubJub.
pub(crate) type Fq = Fr;

pub(crate) struct Params {
    /// Standard form `a`.
    pub a: Fq,
    /// Standard form `d`.
    pub d: Fq,
    /// Reduced form `d' = -d/a`.
    pub d_reduced: Fq,
    /// `2·d'`, used by the extended coordinate addition law.
    pub k_reduced: Fq,
    /// Scaling factor `f = sqrt(-a)` mapping standard `x` to reduced `x`.
    pub f: Fq,
    pub f_inv: Fq,
    /// Generator `B8` in standard form.
    pub generator: (Fq, Fq),
    pub order: BigUint,
}

pub(crate) static PARAMS: Lazy<Params> = Lazy::new(|| {
    let a = Fq::from(168700u64);
    let d = Fq::from(168696u64);
    let a_inv = a.inverse().expect("a is nonzero");
    let d_reduced = -(d * a_inv);

    let root = (-a).sqrt().expect("-a is a quadratic residue");
    // Two roots exist; the smaller canonical one is fixed as the conversion factor.
    let f = if root.into_bigint() <= (-root).into_bigint() {
        root
    } else {
        -root
    };
    let f_inv = f.inverse().expect("f is nonzero");

    let generator = (
        parse_field(
            "5299619240641551281634865583518297030282874472190772894086521144482721001553",
        ),
        parse_field(
            "16950150798460657717958625567821834550301663161624707787222815936182638968203",
        ),
    );
    let order = BigUint::parse_bytes(
        b"2736030358979909402780800718157159386076813972158567259200215660948447373041",
        10,
    )
    .expect("subgroup order is a decimal");

    Params {
        a,
        d,
        d_reduced,
        k_reduced: d_reduced + d_reduced,
        f,
        f_inv,
        generator,
        order,
    }
});

/// Maps reduced form affine coordinates to standard form.
///
/// Returns `None` when either coordinate is not a canonical field element.
pub fn reduced_to_standard(x: &BigUint, y: &BigUint) -> Option<(BigUint, BigUint)> {
    let x: Fq = biguint_to_field(x)?;
    let y: Fq = biguint_to_field(y)?;
    Some((field_to_biguint(&(x * PARAMS.f_inv)), field_to_biguint(&y)))
}

/// Maps standard form affine coordinates to reduced form.
pub fn standard_to_reduced(x: &BigUint, y: &BigUint) -> Option<(BigUint, BigUint)> {
    let x: Fq = biguint_to_field(x)?;
    let y: Fq = biguint_to_field(y)?;
    Some((field_to_biguint(&(x * PARAMS.f)), field_to_biguint(&y)))
}
