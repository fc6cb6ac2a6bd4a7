// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Candidate stream ordering, checked against a digit-string rendering of
//! the four nested stages.

mod common;

use common::{hex, uhex};
use keyspace_explorer::transform::{generate, BIT_WIDTH, CANDIDATES_PER_SEED, HEX_WIDTH};
use num_bigint::{BigInt, BigUint};
use proptest::prelude::*;

/// Render the nested loops directly on strings of '0'/'1' and hex digits.
fn reference_candidates(seed: &BigUint) -> Vec<BigUint> {
    let width = BIT_WIDTH as usize;
    let mask = (BigUint::from(1u8) << width) - 1u8;
    let seed_bits = format!("{:0width$b}", seed & &mask, width = width);

    let mut out = Vec::with_capacity(CANDIDATES_PER_SEED);
    for invert in [false, true] {
        for reverse in [false, true] {
            let mut base: String = if invert {
                seed_bits
                    .chars()
                    .map(|c| if c == '0' { '1' } else { '0' })
                    .collect()
            } else {
                seed_bits.clone()
            };
            if reverse {
                base = base.chars().rev().collect();
            }
            for rotate in 0..width {
                let rotated = format!("{}{}", &base[rotate..], &base[..rotate]);
                let value = BigUint::parse_bytes(rotated.as_bytes(), 2).unwrap();
                let digits = format!("{:0w$x}", value, w = HEX_WIDTH as usize);
                for step in 0..16u32 {
                    let stepped: String = digits
                        .chars()
                        .map(|c| {
                            let d = (c.to_digit(16).unwrap() + step) % 16;
                            std::char::from_digit(d, 16).unwrap()
                        })
                        .collect();
                    out.push(uhex(&format!("1{}", stepped)));
                }
            }
        }
    }
    out
}

#[test]
fn test_stream_length() {
    assert_eq!(CANDIDATES_PER_SEED, 4 * 72 * 16);
    assert_eq!(generate(&BigInt::from(7)).count(), 4608);
}

#[test]
fn test_seed_zero_first_candidate() {
    assert_eq!(
        generate(&BigInt::from(0)).next(),
        Some(uhex("1000000000000000000"))
    );
}

#[test]
fn test_nibble_wraparound() {
    // Every digit f steps to 0, keeping the leading 1.
    let all_f = hex("ffffffffffffffffff");
    let mut stream = generate(&all_f);
    assert_eq!(stream.next(), Some(uhex("1ffffffffffffffffff")));
    assert_eq!(stream.next(), Some(uhex("1000000000000000000")));
    assert_eq!(stream.next(), Some(uhex("1111111111111111111")));
}

#[test]
fn test_known_positions() {
    let all: Vec<BigUint> = generate(&hex("123456789abcdef012")).collect();
    let expected = [
        (0, "1123456789abcdef012"),
        (1, "123456789abcdef0123"),
        (15, "10123456789abcdef01"),
        (16, "12468acf13579bde024"),
        (17, "13579bd02468acef135"),
        (1151, "1f8091a2b3c4d5e67f8"),
        (1152, "1480f7b3d591e6a2c48"),
        (1153, "159108c4e6a2f7b3d59"),
        (2304, "1edcba9876543210fed"),
        (4607, "1cae73150426fb9d8ca"),
    ];
    for (index, value) in expected {
        assert_eq!(all[index], uhex(value), "candidate {}", index);
    }
}

#[test]
fn test_matches_reference_rendering() {
    let seed = hex("123456789abcdef012");
    let actual: Vec<BigUint> = generate(&seed).collect();
    assert_eq!(actual, reference_candidates(seed.magnitude()));
}

#[test]
fn test_wide_seed_uses_low_bits() {
    let seed = hex("123456789abcdef012");
    let wide = &seed + (BigInt::from(0x5a) << 72);
    assert!(generate(&wide).eq(generate(&seed)));
}

#[test]
fn test_negative_seed_uses_twos_complement() {
    assert_eq!(
        generate(&BigInt::from(-1)).next(),
        Some(uhex("1ffffffffffffffffff"))
    );
}

#[test]
fn test_every_candidate_has_leading_one() {
    let low = BigUint::from(1u8) << 72;
    let high = BigUint::from(1u8) << 73;
    for candidate in generate(&hex("0f0f0f0f0f0f0f0f0f")) {
        assert!(candidate >= low && candidate < high);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_matches_reference_for_any_seed(seed in any::<u128>()) {
        let seed = BigUint::from(seed);
        let actual: Vec<BigUint> = generate(&BigInt::from(seed.clone())).collect();
        prop_assert_eq!(actual, reference_candidates(&seed));
    }

    #[test]
    fn prop_generation_is_deterministic(seed in any::<u64>(), skip in 0usize..4608) {
        let seed = BigInt::from(seed);
        let first: Vec<BigUint> = generate(&seed).skip(skip).collect();
        let second: Vec<BigUint> = generate(&seed).skip(skip).collect();
        prop_assert_eq!(first, second);
    }
}
