// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{ElGamalError, Result};
use num_bigint::BigUint;
use num_integer::Roots;
use std::collections::HashMap;
use tracing::trace;
use zkvote_curves::Point;

/// Baby-step giant-step solver for `m·G = M` with `m` in `[0, max]`.
///
/// Building the table costs `O(sqrt(max))` group operations and memory. It is immutable once
/// built and can be shared across threads to decrypt many ciphertexts against the same bound.
#[derive(Debug, Clone)]
pub struct DiscreteLogTable<P: Point> {
    max: u64,
    step: u64,
    baby_steps: HashMap<Vec<u8>, u64>,
    giant_step: P,
}

impl<P: Point> DiscreteLogTable<P> {
    pub fn new(max: u64) -> Self {
        let step = max.saturating_add(1).sqrt() + 1;

        let g = P::generator();
        let mut baby_steps = HashMap::with_capacity(step as usize);
        let mut acc = P::identity();
        for j in 0..step {
            baby_steps.entry(acc.marshal()).or_insert(j);
            acc = acc.add(&g);
        }
        // acc == step·G
        let giant_step = acc.neg();
        trace!(max, step, "built discrete log table");

        Self {
            max,
            step,
            baby_steps,
            giant_step,
        }
    }

    pub fn max(&self) -> u64 {
        self.max
    }

    /// Finds `m` in `[0, max]` with `m·G == target`.
    pub fn solve(&self, target: &P) -> Result<BigUint> {
        let mut gamma = target.clone();
        for i in 0..=(self.max / self.step) {
            if let Some(j) = self.baby_steps.get(&gamma.marshal()) {
                let m = i * self.step + j;
                if m <= self.max {
                    return Ok(BigUint::from(m));
                }
                break;
            }
            gamma = gamma.add(&self.giant_step);
        }
        Err(ElGamalError::MessageOutOfBound { max: self.max })
    }
}
