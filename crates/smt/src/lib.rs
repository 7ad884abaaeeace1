// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! # Sparse Merkle tree
//!
//! A compact sparse Merkle tree: a leaf sits at the shallowest level where its key path is
//! unique, and empty subtrees hash to zero. Paths are read from the key bits, least
//! significant bit of the first byte first.
//!
//! Nodes are content addressed and stored in a [`KvStore`]. Mutations happen inside a
//! [`TreeTx`] that buffers every written node and lands them, together with the new root, in
//! one atomic batch on [`Tree::commit`].

mod errors;
mod hasher;
mod in_mem;
mod node;
mod proof;
mod sled_store;
mod sled_utils;
mod store;
mod transition;
mod tree;

pub use errors::*;
pub use hasher::*;
pub use in_mem::*;
pub use proof::*;
pub use sled_store::*;
pub use store::*;
pub use transition::*;
pub use tree::*;
