// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! # ElGamal
//!
//! Exponential ElGamal over any [`zkvote_curves::Point`] backend. A message `m` is encoded
//! as `m·G`, so ciphertexts add homomorphically and decryption ends in a bounded discrete
//! logarithm search.
//!
//! The [`dkg`] module shares the decryption key among trustees with Feldman verifiable
//! secret sharing so that any `threshold` of them can jointly open a tally.

pub mod dkg;
mod ballot;
mod ciphertext;
mod dlog;
mod errors;
mod keys;

pub use ballot::*;
pub use ciphertext::*;
pub use dlog::DiscreteLogTable;
pub use errors::*;
pub use keys::*;
