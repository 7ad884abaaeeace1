// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{Result, StateError};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use zkvote_curves::{biguint_from_be, biguint_to_fixed_be};

const WORD: usize = 32;
const WORDS: usize = 8;

/// Width of [`BallotMode::marshal`].
pub const BALLOT_MODE_SIZE: usize = WORD * WORDS;

/// Rules a ballot must satisfy, stored under [`crate::KEY_BALLOT_MODE`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotMode {
    pub max_count: u64,
    pub force_uniqueness: bool,
    pub max_value: BigUint,
    pub min_value: BigUint,
    pub max_total_cost: BigUint,
    pub min_total_cost: BigUint,
    pub cost_exponent: u64,
    pub cost_from_weight: bool,
}

impl BallotMode {
    /// The eight parameters in storage order, booleans as 0 or 1.
    pub fn big_ints(&self) -> [BigUint; WORDS] {
        [
            BigUint::from(self.max_count),
            BigUint::from(self.force_uniqueness as u8),
            self.max_value.clone(),
            self.min_value.clone(),
            self.max_total_cost.clone(),
            self.min_total_cost.clone(),
            BigUint::from(self.cost_exponent),
            BigUint::from(self.cost_from_weight as u8),
        ]
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_value > self.max_value {
            return Err(StateError::InvalidBallotMode(format!(
                "min_value {} exceeds max_value {}",
                self.min_value, self.max_value
            )));
        }
        if self.min_total_cost > self.max_total_cost {
            return Err(StateError::InvalidBallotMode(format!(
                "min_total_cost {} exceeds max_total_cost {}",
                self.min_total_cost, self.max_total_cost
            )));
        }
        for n in [
            &self.max_value,
            &self.min_value,
            &self.max_total_cost,
            &self.min_total_cost,
        ] {
            if n.bits() > (WORD * 8) as u64 {
                return Err(StateError::InvalidBallotMode(format!(
                    "{n} does not fit in {WORD} bytes"
                )));
            }
        }
        Ok(())
    }

    pub fn marshal(&self) -> Vec<u8> {
        self.big_ints()
            .iter()
            .flat_map(|n| biguint_to_fixed_be(n, WORD))
            .collect()
    }

    pub fn unmarshal(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != BALLOT_MODE_SIZE {
            return Err(StateError::InvalidBallotMode(format!(
                "expected {BALLOT_MODE_SIZE} bytes, got {}",
                bytes.len()
            )));
        }
        let words: Vec<BigUint> = bytes.chunks(WORD).map(biguint_from_be).collect();
        Ok(Self {
            max_count: to_u64(&words[0], "max_count")?,
            force_uniqueness: to_bool(&words[1], "force_uniqueness")?,
            max_value: words[2].clone(),
            min_value: words[3].clone(),
            max_total_cost: words[4].clone(),
            min_total_cost: words[5].clone(),
            cost_exponent: to_u64(&words[6], "cost_exponent")?,
            cost_from_weight: to_bool(&words[7], "cost_from_weight")?,
        })
    }
}

fn to_u64(n: &BigUint, name: &str) -> Result<u64> {
    u64::try_from(n)
        .map_err(|_| StateError::InvalidBallotMode(format!("{name} {n} does not fit in u64")))
}

fn to_bool(n: &BigUint, name: &str) -> Result<bool> {
    match to_u64(n, name)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(StateError::InvalidBallotMode(format!(
            "{name} must be 0 or 1, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mode() -> BallotMode {
        BallotMode {
            max_count: 5,
            force_uniqueness: true,
            max_value: BigUint::from(16u32),
            min_value: BigUint::from(0u32),
            max_total_cost: BigUint::from(1280u32),
            min_total_cost: BigUint::from(5u32),
            cost_exponent: 2,
            cost_from_weight: false,
        }
    }

    #[test]
    fn test_marshal_is_eight_words() {
        let bytes = mode().marshal();
        assert_eq!(bytes.len(), BALLOT_MODE_SIZE);
        assert_eq!(bytes[WORD - 1], 5);
        assert_eq!(bytes[2 * WORD - 1], 1);
        assert_eq!(BallotMode::unmarshal(&bytes).unwrap(), mode());
    }

    #[test]
    fn test_rejects_bad_flags_and_lengths() {
        let mut bytes = mode().marshal();
        bytes[2 * WORD - 1] = 2;
        assert!(matches!(
            BallotMode::unmarshal(&bytes),
            Err(StateError::InvalidBallotMode(_))
        ));
        assert!(BallotMode::unmarshal(&bytes[1..]).is_err());
    }

    #[test]
    fn test_validate_checks_ranges() {
        assert!(mode().validate().is_ok());
        let inverted = BallotMode {
            min_value: BigUint::from(17u32),
            ..mode()
        };
        assert!(inverted.validate().is_err());
        let wide = BallotMode {
            max_total_cost: BigUint::from(1u8) << 256,
            ..mode()
        };
        assert!(wide.validate().is_err());
    }
}
