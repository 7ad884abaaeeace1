// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::Point;
use std::sync::Mutex;

/// A point accumulator that many workers may add into concurrently.
///
/// The lock is held for exactly one group addition.
#[derive(Debug)]
pub struct SharedPoint<P: Point> {
    inner: Mutex<P>,
}

impl<P: Point> SharedPoint<P> {
    pub fn new(point: P) -> Self {
        Self {
            inner: Mutex::new(point),
        }
    }

    pub fn identity() -> Self {
        Self::new(P::identity())
    }

    /// Adds `other` into the accumulator.
    pub fn safe_add(&self, other: &P) {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        *guard = guard.add(other);
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> P {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn into_inner(self) -> P {
        self.inner.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<P: Point> Default for SharedPoint<P> {
    fn default() -> Self {
        Self::identity()
    }
}
