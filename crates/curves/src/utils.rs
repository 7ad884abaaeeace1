// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use ark_ff::{BigInteger, PrimeField};
use num_bigint::BigUint;

/// Big-endian encoding of `n` left padded with zeros to `width` bytes.
///
/// Values wider than `width` keep their low order bytes.
pub fn biguint_to_fixed_be(n: &BigUint, width: usize) -> Vec<u8> {
    let bytes = n.to_bytes_be();
    let mut out = vec![0u8; width];
    if bytes.len() >= width {
        out.copy_from_slice(&bytes[bytes.len() - width..]);
    } else {
        out[width - bytes.len()..].copy_from_slice(&bytes);
    }
    out
}

pub fn biguint_from_be(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

pub(crate) fn field_to_biguint<F: PrimeField>(f: &F) -> BigUint {
    BigUint::from_bytes_le(&f.into_bigint().to_bytes_le())
}

pub(crate) fn field_modulus<F: PrimeField>() -> BigUint {
    BigUint::from_bytes_le(&F::MODULUS.to_bytes_le())
}

/// Canonical conversion, `None` when `n` is not below the field modulus.
pub(crate) fn biguint_to_field<F: PrimeField>(n: &BigUint) -> Option<F> {
    if *n >= field_modulus::<F>() {
        return None;
    }
    Some(F::from_le_bytes_mod_order(&n.to_bytes_le()))
}

pub(crate) fn parse_field<F: PrimeField>(decimal: &str) -> F {
    let n = BigUint::parse_bytes(decimal.as_bytes(), 10).expect("curve constant is a decimal");
    biguint_to_field(&n).expect("curve constant is reduced")
}

/// Left to right double-and-add over the bits of `k`.
pub(crate) fn double_and_add<P: Clone>(
    base: &P,
    k: &BigUint,
    identity: P,
    add: impl Fn(&P, &P) -> P,
) -> P {
    let mut acc = identity;
    for i in (0..k.bits()).rev() {
        acc = add(&acc, &acc);
        if k.bit(i) {
            acc = add(&acc, base);
        }
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_width_encoding() {
        let n = BigUint::from(0x0102u32);
        assert_eq!(biguint_to_fixed_be(&n, 4), vec![0, 0, 1, 2]);
        assert_eq!(biguint_from_be(&[0, 0, 1, 2]), n);
        assert_eq!(biguint_to_fixed_be(&BigUint::from(0u32), 2), vec![0, 0]);
    }

    #[test]
    fn test_double_and_add_on_integers() {
        let k = BigUint::from(37u32);
        let result = double_and_add(&5u64, &k, 0u64, |a, b| a + b);
        assert_eq!(result, 185);
    }
}
