//! Grain LFSR used to derive the Poseidon round constants and MDS matrix.
//!
//! This reproduces the generator of the Poseidon reference parameter script
//! (`generate_parameters_grain.sage`), so the constants match the ones
//! published with circomlib bit for bit.

use std::collections::HashSet;

use ark_bn254::Fr;
use ark_ff::{BigInt, Field, PrimeField};

/// Bit size of the BN254 scalar field, as fed to the generator.
pub const FIELD_BITS: usize = 254;

const STATE_BITS: usize = 80;

/// 80-bit Grain register; bit `i` of `state` is position `i` of the sequence.
#[derive(Clone, Debug)]
pub struct GrainLfsr {
    state: u128,
}

impl GrainLfsr {
    /// Seed the register for a [`FIELD_BITS`]-bit prime field instance with an
    /// x^alpha S-box. Every draw is [`FIELD_BITS`] wide.
    pub fn new(width: usize, full_rounds: usize, partial_rounds: usize) -> Self {
        let mut seed = SeedBuilder::default();
        seed.push(1, 2); // prime field
        seed.push(0, 4); // x^alpha S-box
        seed.push(FIELD_BITS as u128, 12);
        seed.push(width as u128, 12);
        seed.push(full_rounds as u128, 10);
        seed.push(partial_rounds as u128, 10);
        seed.push((1u128 << 30) - 1, 30);
        debug_assert_eq!(seed.len, STATE_BITS);

        let mut lfsr = Self { state: seed.state };
        for _ in 0..160 {
            lfsr.clock();
        }
        lfsr
    }

    fn clock(&mut self) -> bool {
        let s = self.state;
        let bit = ((s >> 62) ^ (s >> 51) ^ (s >> 38) ^ (s >> 23) ^ (s >> 13) ^ s) & 1;
        self.state = (s >> 1) | (bit << (STATE_BITS - 1));
        bit == 1
    }

    /// Self-shrinking output: clock pairs, keep the second bit when the first is set.
    fn next_bit(&mut self) -> bool {
        loop {
            let keep = self.clock();
            let bit = self.clock();
            if keep {
                return bit;
            }
        }
    }

    /// Next `bits` output bits as a big-endian integer in little-endian limbs.
    fn next_limbs(&mut self, bits: usize) -> [u64; 4] {
        let mut limbs = [0u64; 4];
        for _ in 0..bits {
            let mut carry = u64::from(self.next_bit());
            for limb in limbs.iter_mut() {
                let out = *limb >> 63;
                *limb = (*limb << 1) | carry;
                carry = out;
            }
        }
        limbs
    }

    /// Draw with rejection sampling until the value is below p.
    pub fn next_field_element(&mut self) -> Fr {
        loop {
            if let Some(value) = Fr::from_bigint(BigInt::new(self.next_limbs(FIELD_BITS))) {
                return value;
            }
        }
    }

    /// Draw and reduce modulo p.
    pub fn next_field_element_reduced(&mut self) -> Fr {
        let bytes: Vec<u8> = self
            .next_limbs(FIELD_BITS)
            .iter()
            .flat_map(|limb| limb.to_le_bytes())
            .collect();
        Fr::from_le_bytes_mod_order(&bytes)
    }

    /// Cauchy matrix `M[i][j] = 1 / (x_i + y_j)` over `2 * width` fresh draws.
    ///
    /// The draws are repeated from scratch while they contain duplicates or
    /// while some `x_i + y_j` is zero.
    pub fn cauchy_matrix(&mut self, width: usize) -> Vec<Vec<Fr>> {
        'draw: loop {
            let mut draws = self.distinct_draws(2 * width);
            let ys = draws.split_off(width);
            let xs = draws;

            let mut mds = Vec::with_capacity(width);
            for x in &xs {
                let mut row = Vec::with_capacity(width);
                for y in &ys {
                    match (*x + y).inverse() {
                        Some(entry) => row.push(entry),
                        None => continue 'draw,
                    }
                }
                mds.push(row);
            }
            return mds;
        }
    }

    fn distinct_draws(&mut self, count: usize) -> Vec<Fr> {
        loop {
            let draws: Vec<Fr> = (0..count)
                .map(|_| self.next_field_element_reduced())
                .collect();
            let unique: HashSet<&Fr> = draws.iter().collect();
            if unique.len() == draws.len() {
                return draws;
            }
        }
    }
}

#[derive(Default)]
struct SeedBuilder {
    state: u128,
    len: usize,
}

impl SeedBuilder {
    /// Append `bits` bits of `value`, most significant first.
    fn push(&mut self, value: u128, bits: usize) {
        for i in (0..bits).rev() {
            self.state |= ((value >> i) & 1) << self.len;
            self.len += 1;
        }
    }
}
