// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::ArboProof;
use serde::{Deserialize, Serialize};

/// What a transition does to its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionKind {
    Noop,
    Update,
    Insert,
    Delete,
}

impl TransitionKind {
    /// Kind implied by the existence of the key before and after.
    pub fn from_existence(before: bool, after: bool) -> Self {
        match (before, after) {
            (false, false) => TransitionKind::Noop,
            (true, true) => TransitionKind::Update,
            (false, true) => TransitionKind::Insert,
            (true, false) => TransitionKind::Delete,
        }
    }

    /// The `(fnc0, fnc1)` selector of a state transition circuit.
    pub fn function_code(&self) -> (bool, bool) {
        match self {
            TransitionKind::Noop => (false, false),
            TransitionKind::Update => (false, true),
            TransitionKind::Insert => (true, false),
            TransitionKind::Delete => (true, true),
        }
    }
}

/// Before and after proofs of one key sharing a single sibling path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArboTransition {
    pub before: ArboProof,
    pub after: ArboProof,
    pub siblings: Vec<Vec<u8>>,
    pub fnc0: bool,
    pub fnc1: bool,
    pub is_old0: bool,
}

impl ArboTransition {
    pub fn new(before: ArboProof, after: ArboProof) -> Self {
        let kind = TransitionKind::from_existence(before.existence, after.existence);
        let (fnc0, fnc1) = kind.function_code();
        // An insert may push the new leaf deeper than the old path, so its siblings are the
        // longer ones.
        let siblings = match kind {
            TransitionKind::Insert => after.siblings.clone(),
            _ => before.siblings.clone(),
        };
        let is_old0 = before.is_old0();
        Self {
            before,
            after,
            siblings,
            fnc0,
            fnc1,
            is_old0,
        }
    }

    /// Transition that leaves `root` unchanged, used for unused batch slots.
    pub fn noop(root: &[u8]) -> Self {
        let proof = ArboProof {
            root: root.to_vec(),
            siblings: Vec::new(),
            key: Vec::new(),
            value: Vec::new(),
            existence: false,
        };
        Self::new(proof.clone(), proof)
    }

    pub fn kind(&self) -> TransitionKind {
        TransitionKind::from_existence(self.before.existence, self.after.existence)
    }

    pub fn old_root(&self) -> &[u8] {
        &self.before.root
    }

    pub fn new_root(&self) -> &[u8] {
        &self.after.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_codes() {
        let cases = [
            (false, false, (false, false)),
            (true, true, (false, true)),
            (false, true, (true, false)),
            (true, false, (true, true)),
        ];
        for (before, after, code) in cases {
            assert_eq!(
                TransitionKind::from_existence(before, after).function_code(),
                code
            );
        }
    }

    #[test]
    fn test_noop_keeps_root() {
        let t = ArboTransition::noop(&[1; 32]);
        assert_eq!(t.kind(), TransitionKind::Noop);
        assert_eq!(t.old_root(), t.new_root());
        assert!(t.is_old0 && !t.fnc0 && !t.fnc1);
    }
}
