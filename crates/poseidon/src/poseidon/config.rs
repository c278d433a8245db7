//! Poseidon parameters for the BN254 scalar field.
//!
//! Instantiated with the same parameters as the circomlib Poseidon: state width
//! `t = arity + 1`, 8 full rounds, a per-arity number of partial rounds and the
//! x^5 S-box. Constants come from the Grain LFSR (see [`super::grain`]).

use ark_bn254::Fr;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::grain::GrainLfsr;
use crate::error::{PoseidonError, PoseidonResult};
use crate::field::{fr_to_hex, parse_fr};

/// Largest arity with published parameters.
pub const MAX_ARITY: usize = 16;

/// Number of full rounds (beginning + end), identical for every arity
pub const FULL_ROUNDS: usize = 8;

/// S-box exponent
pub const ALPHA: u64 = 5;

/// Partial rounds for arity 1..=16 (t = 2..=17)
const PARTIAL_ROUNDS: [usize; MAX_ARITY] = [
    56, 57, 56, 60, 60, 63, 64, 63, 60, 66, 60, 65, 70, 60, 64, 68,
];

/// Fail with `InvalidArity` unless `1 <= arity <= MAX_ARITY`.
pub fn check_arity(arity: usize) -> PoseidonResult<()> {
    if arity == 0 || arity > MAX_ARITY {
        return Err(PoseidonError::InvalidArity(format!(
            "{arity} is outside the supported range 1..={MAX_ARITY}"
        )));
    }
    Ok(())
}

/// Number of partial rounds used for `arity`.
pub fn partial_rounds(arity: usize) -> PoseidonResult<usize> {
    check_arity(arity)?;
    Ok(PARTIAL_ROUNDS[arity - 1])
}

/// Representation for use with serde, matching the circomlib JSON layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoseidonParamsSerialized {
    /// Round constants, round-major, `(full + partial) * t` entries
    #[serde(rename = "C")]
    pub c: Vec<String>,
    /// MDS matrix rows
    #[serde(rename = "M")]
    pub m: Vec<Vec<String>>,
}

/// Parameters for one arity, validated and ready for the permutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoseidonParams {
    arity: usize,
    full_rounds: usize,
    partial_rounds: usize,
    /// One row of `t` constants per round
    round_constants: Vec<Vec<Fr>>,
    mds: Vec<Vec<Fr>>,
}

impl PoseidonParams {
    /// Build parameters from flat round constants and an MDS matrix.
    pub fn new(
        arity: usize,
        full_rounds: usize,
        partial_rounds: usize,
        round_constants: Vec<Fr>,
        mds: Vec<Vec<Fr>>,
    ) -> PoseidonResult<Self> {
        check_arity(arity)?;
        let width = arity + 1;

        if full_rounds == 0 || full_rounds % 2 != 0 {
            return Err(PoseidonError::MalformedParams(format!(
                "full rounds must be even and non-zero, got {full_rounds}"
            )));
        }
        let expected = full_rounds
            .checked_add(partial_rounds)
            .and_then(|total| total.checked_mul(width))
            .ok_or_else(|| {
                PoseidonError::MalformedParams(format!(
                    "{full_rounds} full and {partial_rounds} partial rounds overflow the constant count"
                ))
            })?;
        if round_constants.len() != expected {
            return Err(PoseidonError::MalformedParams(format!(
                "expected {expected} round constants for t={width}, got {}",
                round_constants.len()
            )));
        }
        if mds.len() != width || mds.iter().any(|row| row.len() != width) {
            return Err(PoseidonError::MalformedParams(format!(
                "MDS matrix must be {width}x{width}"
            )));
        }

        let round_constants = round_constants
            .chunks(width)
            .map(|round| round.to_vec())
            .collect();

        Ok(Self {
            arity,
            full_rounds,
            partial_rounds,
            round_constants,
            mds,
        })
    }

    /// Derive the standard parameters for `arity` with the Grain LFSR.
    pub fn generate(arity: usize) -> PoseidonResult<Self> {
        let partial = partial_rounds(arity)?;
        let width = arity + 1;

        let mut grain = GrainLfsr::new(width, FULL_ROUNDS, partial);
        let constants = (0..(FULL_ROUNDS + partial) * width)
            .map(|_| grain.next_field_element())
            .collect();
        let mds = grain.cauchy_matrix(width);

        debug!(arity, width, partial_rounds = partial, "generated Poseidon parameters");
        Self::new(arity, FULL_ROUNDS, partial, constants, mds)
    }

    /// Number of inputs absorbed per call.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// State width `t = arity + 1`.
    pub fn width(&self) -> usize {
        self.arity + 1
    }

    pub fn full_rounds(&self) -> usize {
        self.full_rounds
    }

    pub fn partial_rounds(&self) -> usize {
        self.partial_rounds
    }

    pub fn total_rounds(&self) -> usize {
        self.full_rounds + self.partial_rounds
    }

    /// Constants added at the start of `round`.
    pub fn round_constants(&self, round: usize) -> &[Fr] {
        &self.round_constants[round]
    }

    pub fn mds(&self) -> &[Vec<Fr>] {
        &self.mds
    }

    /// Whether `round` applies the S-box to every lane.
    pub fn is_full_round(&self, round: usize) -> bool {
        let half = self.full_rounds / 2;
        round < half || round >= half + self.partial_rounds
    }

    /// Hex representation in the circomlib layout.
    pub fn to_serialized(&self) -> PoseidonParamsSerialized {
        PoseidonParamsSerialized {
            c: self
                .round_constants
                .iter()
                .flatten()
                .map(fr_to_hex)
                .collect(),
            m: self
                .mds
                .iter()
                .map(|row| row.iter().map(fr_to_hex).collect())
                .collect(),
        }
    }

    /// Parse a serialized parameter set. Partial rounds are derived from the
    /// number of constants, assuming [`FULL_ROUNDS`] full rounds.
    pub fn from_serialized(
        arity: usize,
        serialized: &PoseidonParamsSerialized,
    ) -> PoseidonResult<Self> {
        check_arity(arity)?;
        let width = arity + 1;

        if serialized.c.len() % width != 0 || serialized.c.len() / width <= FULL_ROUNDS {
            return Err(PoseidonError::MalformedParams(format!(
                "{} round constants do not fit t={width} with {FULL_ROUNDS} full rounds",
                serialized.c.len()
            )));
        }
        let partial = serialized.c.len() / width - FULL_ROUNDS;

        let hex_str_to_field_element = |(i, x): (usize, &String)| {
            parse_fr(x).map_err(|e| PoseidonError::MalformedParams(format!("entry {i}: {e}")))
        };
        let constants = serialized
            .c
            .iter()
            .enumerate()
            .map(hex_str_to_field_element)
            .collect::<PoseidonResult<Vec<Fr>>>()?;
        let mds = serialized
            .m
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(hex_str_to_field_element)
                    .collect::<PoseidonResult<Vec<Fr>>>()
            })
            .collect::<PoseidonResult<Vec<Vec<Fr>>>>()?;

        Self::new(arity, FULL_ROUNDS, partial, constants, mds)
    }

    /// Deserialize from the circomlib-style JSON document.
    pub fn from_json(arity: usize, json: &str) -> PoseidonResult<Self> {
        let serialized: PoseidonParamsSerialized = serde_json::from_str(json)?;
        Self::from_serialized(arity, &serialized)
    }

    pub fn to_json(&self) -> PoseidonResult<String> {
        Ok(serde_json::to_string(&self.to_serialized())?)
    }
}
