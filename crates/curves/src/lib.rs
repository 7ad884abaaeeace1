// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! # Curves
//!
//! A prime order group abstraction used by the homomorphic tally.
//!
//! Every backend implements [`Point`] on its own concrete type. Generic code such as
//! ciphertexts or the process state is written against `P: Point` and monomorphized, so two
//! backends are never mixed within one operation.
//!
//! ## Backends
//!
//! - [`BjjStd`]: BabyJubJub in standard twisted Edwards form (`a = 168700`, `d = 168696`).
//! - [`BjjReduced`]: the same group in reduced form (`a = -1`), extended coordinates.
//! - [`Bn254Point`]: the BN254 G1 group.
//!
//! Both BabyJubJub backends produce byte-identical [`Point::marshal`] output. Their native
//! [`Point::coordinates`] differ by the conversion in [`bjj::reduced_to_standard`].

pub mod bjj;
mod bn254;
mod curve_type;
mod errors;
mod point;
mod shared;
mod utils;

pub use bjj::{BjjReduced, BjjStd};
pub use bn254::Bn254Point;
pub use curve_type::CurveType;
pub use errors::CurveError;
pub use point::*;
pub use shared::SharedPoint;
pub use utils::{biguint_from_be, biguint_to_fixed_be};
