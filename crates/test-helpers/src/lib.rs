// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Fixtures shared by the zkvote test suites.
//!
//! Depends on no other zkvote crate so any crate can use it as a dev-dependency.

mod rng;

pub use rng::*;
