//! Reference vector tests.
//!
//! `testdata/test_hashes.json` holds reference digests for arities 1..=16 and
//! inputs `[j; arity]`, `j = 0..100`, in the layout written by the
//! `poseidon-lite` generator script.

use std::collections::HashSet;

use ark_bn254::Fr;

use crate::field::{fr_to_biguint, modulus, parse_fr};
use crate::poseidon::poseidon;
use crate::vectors::{vector_inputs, TestVectors, DEFAULT_COUNT, DEFAULT_MAX_ARITY};

const REFERENCE: &str = include_str!("../testdata/test_hashes.json");

fn reference() -> TestVectors {
    TestVectors::from_json(REFERENCE).unwrap()
}

#[test]
fn test_reference_shape() {
    let vectors = reference();
    assert_eq!(vectors.max_arity(), DEFAULT_MAX_ARITY);
    assert!(vectors.rows().iter().all(|row| row.len() == DEFAULT_COUNT));
}

#[test]
fn test_spec_examples() {
    let vectors = reference();
    let h = poseidon(1, &[Fr::from(0u64)]).unwrap();
    assert_eq!(h, parse_fr(vectors.expected(1, 0).unwrap()).unwrap());

    let h = poseidon(2, &[Fr::from(5u64), Fr::from(5u64)]).unwrap();
    assert_eq!(h, parse_fr(vectors.expected(2, 5).unwrap()).unwrap());
}

#[test]
fn test_compare_hashes() {
    let vectors = reference();
    for (i, row) in vectors.rows().iter().enumerate() {
        let arity = i + 1;
        for (j, expected) in row.iter().enumerate() {
            let hash = poseidon(arity, &vector_inputs(arity, j as u64)).unwrap();
            assert_eq!(
                fr_to_biguint(&hash).to_str_radix(16),
                expected[2..],
                "arity {arity}, input {j}"
            );
        }
    }
}

#[test]
fn test_generated_file_is_byte_identical() {
    let generated = TestVectors::generate(DEFAULT_MAX_ARITY, DEFAULT_COUNT).unwrap();
    assert_eq!(generated.to_json().unwrap(), REFERENCE.trim_end());
}

#[test]
fn test_reference_digests_in_range() {
    for row in reference().rows() {
        for digest in row {
            let value = parse_fr(digest).unwrap();
            assert!(&fr_to_biguint(&value) < modulus());
        }
    }
}

#[test]
fn test_reference_has_no_collisions() {
    let vectors = reference();
    let mut seen = HashSet::new();
    for row in vectors.rows() {
        for digest in row {
            assert!(seen.insert(digest.as_str()), "duplicate digest {digest}");
        }
    }
    assert_eq!(seen.len(), DEFAULT_MAX_ARITY * DEFAULT_COUNT);
}
