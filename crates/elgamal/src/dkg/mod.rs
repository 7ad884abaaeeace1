// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Distributed key generation with Feldman verifiable secret sharing.
//!
//! Every participant deals a random polynomial of degree `threshold - 1`, publishes
//! commitments to its coefficients and sends each peer the evaluation at the peer's id. The
//! joint secret is the sum of the constant terms and is never reconstructed: any `threshold`
//! participants decrypt by combining partial decryptions with Lagrange coefficients.
//!
//! Participant ids are the nonzero evaluation points, so `0` is not a valid id.

mod lagrange;
mod messages;
mod participant;

pub use lagrange::*;
pub use messages::*;
pub use participant::*;
