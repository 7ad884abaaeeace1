// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use num_bigint::BigUint;
use proptest::prelude::*;
use rayon::prelude::*;
use zkvote_curves::{
    bjj::reduced_to_standard, BjjReduced, BjjStd, Bn254Point, CurveError, Point, SharedPoint,
    POINT_SIZE,
};
use zkvote_test_helpers::{random_scalar, seeded_rng};

fn scalar(n: u64) -> BigUint {
    BigUint::from(n)
}

fn check_group_laws<P: Point>(a: u64, b: u64) {
    let g = P::generator();
    let pa = P::scalar_base_mult(&scalar(a));
    let pb = P::scalar_base_mult(&scalar(b));

    // (a + b)·G == a·G + b·G
    assert_eq!(pa.add(&pb), P::scalar_base_mult(&scalar(a + b)));
    assert_eq!(pa.add(&pb), pb.add(&pa));
    assert_eq!(pa.add(&P::identity()), pa);
    assert_eq!(pa.sub(&pa), P::identity());
    assert_eq!(pa.add(&pa.neg()), P::identity());
    assert_eq!(g.scalar_mult(&scalar(a)), pa);
    assert_eq!(g.scalar_mult(P::order()), P::identity());
}

fn check_marshal_round_trip<P: Point>(k: u64) {
    let p = P::scalar_base_mult(&scalar(k));
    let bytes = p.marshal();
    assert_eq!(bytes.len(), POINT_SIZE);
    assert_eq!(P::unmarshal(&bytes), Ok(p));

    let id = P::identity();
    assert_eq!(P::unmarshal(&id.marshal()), Ok(id));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn test_group_laws_bjj_std(a in 0u64..1_000_000, b in 0u64..1_000_000) {
        check_group_laws::<BjjStd>(a, b);
    }

    #[test]
    fn test_group_laws_bjj_reduced(a in 0u64..1_000_000, b in 0u64..1_000_000) {
        check_group_laws::<BjjReduced>(a, b);
    }

    #[test]
    fn test_group_laws_bn254(a in 0u64..1_000_000, b in 0u64..1_000_000) {
        check_group_laws::<Bn254Point>(a, b);
    }

    #[test]
    fn test_marshal_round_trip(k in 0u64..u64::MAX) {
        check_marshal_round_trip::<BjjStd>(k);
        check_marshal_round_trip::<BjjReduced>(k);
        check_marshal_round_trip::<Bn254Point>(k);
    }
}

#[test]
fn test_bjj_backends_agree_after_conversion() {
    let mut rng = seeded_rng(42);
    for _ in 0..8 {
        let k = random_scalar(&mut rng, BjjStd::order());
        let std = BjjStd::scalar_base_mult(&k);
        let red = BjjReduced::scalar_base_mult(&k);

        let (rx, ry) = red.coordinates();
        assert_eq!(reduced_to_standard(&rx, &ry), Some(std.coordinates()));
        assert_eq!(std.marshal(), red.marshal());
        assert_eq!(BjjReduced::unmarshal(&std.marshal()), Ok(red));
    }
}

#[test]
fn test_scalars_reduce_modulo_order() {
    let k = scalar(12345);
    let wrapped = BjjStd::order() + &k;
    assert_eq!(
        BjjStd::scalar_base_mult(&wrapped),
        BjjStd::scalar_base_mult(&k)
    );
    let wrapped = Bn254Point::order() + &k;
    assert_eq!(
        Bn254Point::scalar_base_mult(&wrapped),
        Bn254Point::scalar_base_mult(&k)
    );
}

#[test]
fn test_set_zero_and_generator() {
    let mut p = BjjReduced::scalar_base_mult(&scalar(9));
    p.set_zero();
    assert!(p.is_identity());
    p.set_generator();
    assert_eq!(p, BjjReduced::generator());
    p.add_assign(&BjjReduced::generator());
    assert_eq!(p, BjjReduced::scalar_base_mult(&scalar(2)));
}

#[test]
fn test_unmarshal_rejects_bad_input() {
    assert_eq!(
        BjjStd::unmarshal(&[0u8; 10]),
        Err(CurveError::InvalidLength {
            expected: POINT_SIZE,
            got: 10
        })
    );
    assert_eq!(
        BjjStd::unmarshal(&[0xffu8; POINT_SIZE]),
        Err(CurveError::CoordinateOutOfRange)
    );
    let mut bytes = vec![0u8; POINT_SIZE];
    bytes[POINT_SIZE - 1] = 2;
    assert_eq!(BjjStd::unmarshal(&bytes), Err(CurveError::NotOnCurve));
}

#[test]
fn test_serde_encodings() -> anyhow::Result<()> {
    let p = BjjStd::scalar_base_mult(&scalar(77));
    let json = serde_json::to_string(&p)?;
    let (x, y) = p.coordinates();
    assert_eq!(json, format!("[\"{x}\",\"{y}\"]"));
    assert_eq!(serde_json::from_str::<BjjStd>(&json)?, p);

    // Both forms of BabyJubJub share the JSON encoding.
    let red: BjjReduced = serde_json::from_str(&json)?;
    assert_eq!(red, BjjReduced::scalar_base_mult(&scalar(77)));

    let q = Bn254Point::scalar_base_mult(&scalar(5));
    let bytes = bincode::serialize(&q)?;
    assert_eq!(bincode::deserialize::<Bn254Point>(&bytes)?, q);

    assert!(serde_json::from_str::<BjjStd>("[\"1\",\"2\"]").is_err());
    assert!(serde_json::from_str::<BjjStd>("[\"x\",\"2\"]").is_err());
    Ok(())
}

#[test]
fn test_shared_point_parallel_accumulation() {
    let acc = SharedPoint::<BjjReduced>::identity();
    (1..=64u64).into_par_iter().for_each(|i| {
        acc.safe_add(&BjjReduced::scalar_base_mult(&scalar(i)));
    });
    // 1 + 2 + ... + 64
    assert_eq!(acc.into_inner(), BjjReduced::scalar_base_mult(&scalar(2080)));
}
