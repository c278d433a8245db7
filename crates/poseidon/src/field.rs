//! BN254 scalar field helpers.
//!
//! Arithmetic itself is provided by `ark_bn254::Fr` (Montgomery form over four
//! 64-bit limbs, products reduced from a double-width intermediate). This module
//! adds the S-box power and the conversions used at the crate boundary.
//!
//! Range policy: integers and strings entering the crate must already be
//! canonical (`< p`). Anything else is rejected with
//! [`PoseidonError::InvalidFieldElement`]. Callers who want the reference
//! library's implicit reduction opt in through [`fr_from_biguint_reduced`].

use std::sync::OnceLock;

use ark_bn254::Fr;
use ark_ff::{BigInteger, Field, PrimeField};
use num_bigint::BigUint;
use num_traits::Num;

use crate::error::{PoseidonError, PoseidonResult};

/// The BN254 scalar field modulus p.
pub fn modulus() -> &'static BigUint {
    static MODULUS: OnceLock<BigUint> = OnceLock::new();
    MODULUS.get_or_init(|| BigUint::from_bytes_le(&Fr::MODULUS.to_bytes_le()))
}

/// (a + b) mod p
#[inline]
pub fn add(a: Fr, b: Fr) -> Fr {
    a + b
}

/// (a * b) mod p
#[inline]
pub fn mul(a: Fr, b: Fr) -> Fr {
    a * b
}

/// The Poseidon S-box, a^5 mod p.
#[inline]
pub fn pow5(a: Fr) -> Fr {
    let square = a.square();
    let quad = square.square();
    quad * a
}

/// Canonical integer value of a field element.
pub fn fr_to_biguint(value: &Fr) -> BigUint {
    BigUint::from_bytes_le(&value.into_bigint().to_bytes_le())
}

/// Convert an integer to a field element, rejecting values `>= p`.
pub fn fr_from_biguint(value: &BigUint) -> PoseidonResult<Fr> {
    if value >= modulus() {
        return Err(PoseidonError::InvalidFieldElement(format!(
            "{value} is not below the field modulus"
        )));
    }
    Ok(Fr::from_le_bytes_mod_order(&value.to_bytes_le()))
}

/// Convert an integer to a field element, reducing it modulo p.
pub fn fr_from_biguint_reduced(value: &BigUint) -> Fr {
    Fr::from_le_bytes_mod_order(&value.to_bytes_le())
}

/// Format as `0x` followed by lowercase hex digits without leading zeros.
///
/// This is the digest format of the test-vector files (`0x0` for zero).
pub fn fr_to_hex(value: &Fr) -> String {
    format!("0x{}", fr_to_biguint(value).to_str_radix(16))
}

/// Parse a `0x`-prefixed hex string or a decimal string into a field element.
pub fn parse_fr(input: &str) -> PoseidonResult<Fr> {
    let input = input.trim();
    let value = match input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        Some(digits) => parse_hex_digits(digits)?,
        None => parse_decimal_digits(input)?,
    };
    fr_from_biguint(&value)
}

fn parse_decimal_digits(digits: &str) -> PoseidonResult<BigUint> {
    // from_str_radix alone would accept "+1" and "1_000"
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PoseidonError::InvalidFieldElement(format!(
            "{digits:?} is not a decimal integer"
        )));
    }
    BigUint::from_str_radix(digits, 10)
        .map_err(|e| PoseidonError::InvalidFieldElement(format!("{digits:?}: {e}")))
}

fn parse_hex_digits(digits: &str) -> PoseidonResult<BigUint> {
    if digits.is_empty() {
        return Err(PoseidonError::InvalidFieldElement(
            "empty hex literal".to_string(),
        ));
    }
    // hex::decode wants whole bytes
    let padded = if digits.len() % 2 == 1 {
        format!("0{digits}")
    } else {
        digits.to_string()
    };
    let bytes = hex::decode(&padded)
        .map_err(|e| PoseidonError::InvalidFieldElement(format!("Invalid hex 0x{digits}: {e}")))?;
    Ok(BigUint::from_bytes_be(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ff::{One, Zero};

    const MODULUS_HEX: &str =
        "0x30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000001";

    #[test]
    fn test_modulus_value() {
        assert_eq!(format!("0x{}", modulus().to_str_radix(16)), MODULUS_HEX);
    }

    #[test]
    fn test_arithmetic_wraps_at_modulus() {
        let minus_one = -Fr::one();
        assert_eq!(add(minus_one, Fr::one()), Fr::zero());
        assert_eq!(mul(minus_one, minus_one), Fr::one());
        assert_eq!(fr_to_biguint(&minus_one), modulus() - 1u32);
    }

    #[test]
    fn test_pow5_matches_pow() {
        for v in [0u64, 1, 2, 3, 12345, u64::MAX] {
            let x = Fr::from(v);
            assert_eq!(pow5(x), x.pow([5u64]));
        }
        assert_eq!(pow5(Fr::from(2u64)), Fr::from(32u64));
    }

    #[test]
    fn test_hex_format() {
        assert_eq!(fr_to_hex(&Fr::zero()), "0x0");
        assert_eq!(fr_to_hex(&Fr::from(255u64)), "0xff");
        assert_eq!(fr_to_hex(&Fr::from(4096u64)), "0x1000");
    }

    #[test]
    fn test_parse_hex_and_decimal() {
        assert_eq!(parse_fr("0xff").unwrap(), Fr::from(255u64));
        assert_eq!(parse_fr("0xF").unwrap(), Fr::from(15u64));
        assert_eq!(parse_fr("0X10").unwrap(), Fr::from(16u64));
        assert_eq!(parse_fr("12345").unwrap(), Fr::from(12345u64));
        assert_eq!(parse_fr(" 7 ").unwrap(), Fr::from(7u64));
    }

    #[test]
    fn test_parse_round_trips_hex() {
        let x = -Fr::from(3u64);
        assert_eq!(parse_fr(&fr_to_hex(&x)).unwrap(), x);
    }

    #[test]
    fn test_rejects_modulus_and_above() {
        assert!(matches!(
            parse_fr(MODULUS_HEX),
            Err(PoseidonError::InvalidFieldElement(_))
        ));
        let above = modulus() + 5u32;
        assert!(matches!(
            fr_from_biguint(&above),
            Err(PoseidonError::InvalidFieldElement(_))
        ));
        let largest = modulus() - 1u32;
        assert_eq!(fr_from_biguint(&largest).unwrap(), -Fr::one());
    }

    #[test]
    fn test_reduced_conversion_wraps() {
        let above = modulus() + 5u32;
        assert_eq!(fr_from_biguint_reduced(&above), Fr::from(5u64));
        assert_eq!(fr_from_biguint_reduced(modulus()), Fr::zero());
    }

    #[test]
    fn test_rejects_garbage() {
        for bad in ["", "0x", "0xzz", "-1", "12a", "+1", "1_000", "0x1_0", "1 000"] {
            assert!(
                matches!(parse_fr(bad), Err(PoseidonError::InvalidFieldElement(_))),
                "accepted {bad:?}"
            );
        }
    }
}
