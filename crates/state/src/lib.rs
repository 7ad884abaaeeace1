// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! # Process state
//!
//! Holds the authenticated state of one voting process in a sparse Merkle tree and turns
//! batches of encrypted votes into fixed size lists of tree transitions.
//!
//! ```text
//! Uninitialized --initialize--> Initialized --start_batch--> BatchOpen
//!                                    ^                          |
//!                                    +-------- end_batch -------+
//! ```

mod ballot_mode;
mod errors;
mod keys;
mod proofs;
mod state;
mod vote;
mod witness;

pub use ballot_mode::*;
pub use errors::*;
pub use keys::*;
pub use proofs::*;
pub use state::*;
pub use vote::*;
