//! Cross-implementation test vectors.
//!
//! A vector file is a JSON array with one entry per arity (index `i` is arity
//! `i + 1`). Each entry lists the digests of `poseidon(arity, [j; arity])` for
//! `j = 0..count`, formatted as `0x`-prefixed lowercase hex without padding.
//! The reference files hold 16 arities of 100 digests each.

use ark_bn254::Fr;
use ark_std::cfg_into_iter;
use serde::{Deserialize, Serialize};
use tracing::info;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{PoseidonError, PoseidonResult};
use crate::field::fr_to_hex;
use crate::poseidon::{check_arity, hash_with_params, standard_params, MAX_ARITY};

/// Digests per arity in the reference files.
pub const DEFAULT_COUNT: usize = 100;

/// Arities covered by the reference files.
pub const DEFAULT_MAX_ARITY: usize = MAX_ARITY;

/// Inputs for entry `index` of arity `arity`: `[index; arity]`.
pub fn vector_inputs(arity: usize, index: u64) -> Vec<Fr> {
    vec![Fr::from(index); arity]
}

/// Digests for `arity` over inputs `0..count`, in order.
pub fn generate_row(arity: usize, count: usize) -> PoseidonResult<Vec<String>> {
    let params = standard_params(arity)?;
    cfg_into_iter!(0..count as u64)
        .map(|j| hash_with_params(params, &vector_inputs(arity, j)).map(|h| fr_to_hex(&h)))
        .collect()
}

fn is_hex_digest(digest: &str) -> bool {
    match digest.strip_prefix("0x") {
        Some(digits) => {
            !digits.is_empty()
                && digits
                    .bytes()
                    .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        }
        None => false,
    }
}

/// A digest that differs from the recomputed value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VectorMismatch {
    pub arity: usize,
    pub index: usize,
    pub expected: String,
    pub actual: String,
}

/// A parsed or generated vector file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestVectors {
    entries: Vec<Vec<String>>,
}

impl TestVectors {
    /// Compute vectors for arities `1..=max_arity`, `count` digests each.
    pub fn generate(max_arity: usize, count: usize) -> PoseidonResult<Self> {
        check_arity(max_arity)?;
        let entries = cfg_into_iter!(1..=max_arity)
            .map(|arity| generate_row(arity, count))
            .collect::<PoseidonResult<Vec<_>>>()?;
        info!(max_arity, count, "generated Poseidon test vectors");
        Ok(Self { entries })
    }

    /// Assemble vectors from rows, row `i` holding arity `i + 1`.
    pub fn from_rows(entries: Vec<Vec<String>>) -> PoseidonResult<Self> {
        let vectors = Self { entries };
        vectors.validate()?;
        Ok(vectors)
    }

    fn validate(&self) -> PoseidonResult<()> {
        if self.entries.is_empty() || self.entries.len() > MAX_ARITY {
            return Err(PoseidonError::MalformedVectors(format!(
                "expected 1..={MAX_ARITY} arities, found {}",
                self.entries.len()
            )));
        }
        for (i, row) in self.entries.iter().enumerate() {
            if let Some(bad) = row.iter().find(|d| !is_hex_digest(d)) {
                return Err(PoseidonError::MalformedVectors(format!(
                    "arity {}: {bad:?} is not a 0x-prefixed lowercase hex digest",
                    i + 1
                )));
            }
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> PoseidonResult<Self> {
        let entries: Vec<Vec<String>> = serde_json::from_str(json)?;
        Self::from_rows(entries)
    }

    /// Compact JSON, byte-identical to `JSON.stringify` of the same data.
    pub fn to_json(&self) -> PoseidonResult<String> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    /// Highest arity present.
    pub fn max_arity(&self) -> usize {
        self.entries.len()
    }

    /// Digest rows, row `i` holding arity `i + 1`.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.entries
    }

    /// Expected digest for `poseidon(arity, [index; arity])`.
    pub fn expected(&self, arity: usize, index: usize) -> Option<&str> {
        let row = self.entries.get(arity.checked_sub(1)?)?;
        row.get(index).map(String::as_str)
    }

    /// Recompute one arity and report every differing digest.
    pub fn verify_arity(&self, arity: usize) -> PoseidonResult<Vec<VectorMismatch>> {
        let row = arity
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
            .ok_or_else(|| {
                PoseidonError::MalformedVectors(format!("no digests for arity {arity}"))
            })?;
        let actual = generate_row(arity, row.len())?;

        Ok(row
            .iter()
            .zip(actual)
            .enumerate()
            .filter(|(_, (expected, actual))| *expected != actual)
            .map(|(index, (expected, actual))| VectorMismatch {
                arity,
                index,
                expected: expected.clone(),
                actual,
            })
            .collect())
    }

    /// Recompute every arity and report every differing digest.
    pub fn verify(&self) -> PoseidonResult<Vec<VectorMismatch>> {
        let mut mismatches = Vec::new();
        for arity in 1..=self.max_arity() {
            mismatches.extend(self.verify_arity(arity)?);
        }
        Ok(mismatches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_inputs() {
        assert_eq!(vector_inputs(3, 7), vec![Fr::from(7u64); 3]);
    }

    #[test]
    fn test_generate_small_shape() {
        let vectors = TestVectors::generate(3, 4).unwrap();
        assert_eq!(vectors.max_arity(), 3);
        assert!(vectors.rows().iter().all(|row| row.len() == 4));
        assert_eq!(
            vectors.expected(1, 1),
            Some("0x29176100eaa962bdc1fe6c654d6a3c130e96a4d1168b33848b897dc502820133")
        );
        assert_eq!(vectors.expected(4, 0), None);
        assert_eq!(vectors.expected(0, 0), None);
        assert_eq!(vectors.expected(1, 4), None);
    }

    #[test]
    fn test_generate_rejects_bad_arity() {
        assert!(matches!(
            TestVectors::generate(0, 1),
            Err(PoseidonError::InvalidArity(_))
        ));
        assert!(matches!(
            TestVectors::generate(17, 1),
            Err(PoseidonError::InvalidArity(_))
        ));
    }

    #[test]
    fn test_json_layout() {
        let vectors = TestVectors::generate(2, 2).unwrap();
        let json = vectors.to_json().unwrap();
        assert!(json.starts_with("[[\"0x2a09a9fd93c590c26b91effbb2499f07e8f7aa12e2b4940a3aed2411cb65e11c\",\""));
        assert!(!json.contains(' '));
        assert_eq!(TestVectors::from_json(&json).unwrap(), vectors);
    }

    #[test]
    fn test_verify_reports_tampered_entry() {
        let mut rows = TestVectors::generate(2, 3).unwrap().rows().to_vec();
        rows[1][2] = "0x1".to_string();
        let vectors = TestVectors::from_rows(rows).unwrap();

        let mismatches = vectors.verify().unwrap();
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].arity, 2);
        assert_eq!(mismatches[0].index, 2);
        assert_eq!(mismatches[0].expected, "0x1");
    }

    #[test]
    fn test_rejects_malformed_files() {
        assert!(matches!(
            TestVectors::from_json("[]"),
            Err(PoseidonError::MalformedVectors(_))
        ));
        assert!(matches!(
            TestVectors::from_json(r#"[["12"]]"#),
            Err(PoseidonError::MalformedVectors(_))
        ));
        for bad in [r#"[["0xzz"]]"#, r#"[["0xABC"]]"#, r#"[["0x"]]"#, r#"[["0x12","0x1 "]]"#] {
            assert!(
                matches!(
                    TestVectors::from_json(bad),
                    Err(PoseidonError::MalformedVectors(_))
                ),
                "accepted {bad}"
            );
        }
        let too_many = vec![vec!["0x0".to_string()]; 17];
        assert!(matches!(
            TestVectors::from_rows(too_many),
            Err(PoseidonError::MalformedVectors(_))
        ));
        assert!(matches!(
            TestVectors::from_json("{\"a\":1}"),
            Err(PoseidonError::Json(_))
        ));
    }
}
