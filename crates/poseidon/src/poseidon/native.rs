//! Poseidon hash entry points (single permutation, one squeezed lane).

use ark_bn254::Fr;
use ark_ff::Zero;
use num_bigint::BigUint;

use super::config::{check_arity, PoseidonParams};
use super::permutation::permute;
use super::registry::standard_params;
use crate::error::{PoseidonError, PoseidonResult};
use crate::field::fr_from_biguint;

fn check_input_count(arity: usize, inputs: usize) -> PoseidonResult<()> {
    if inputs != arity {
        return Err(PoseidonError::InvalidArity(format!(
            "expected {arity} inputs, received {inputs}"
        )));
    }
    Ok(())
}

/// Hash `inputs` with explicit parameters.
///
/// The state starts as `[0, inputs...]`; after the permutation lane 0 is the
/// digest, which is the circomlib output convention.
pub fn hash_with_params(params: &PoseidonParams, inputs: &[Fr]) -> PoseidonResult<Fr> {
    check_input_count(params.arity(), inputs.len())?;

    let mut state = Vec::with_capacity(params.width());
    state.push(Fr::zero());
    state.extend_from_slice(inputs);

    permute(&mut state, params)?;
    Ok(state[0])
}

/// Calculate the Poseidon hash on the BN254 scalar field with the circomlib
/// parameters.
///
/// The arity is passed separately so that accidentally sized input slices are
/// caught: the call fails with `InvalidArity` unless `1 <= arity <= 16` and
/// `inputs.len() == arity`.
pub fn poseidon(arity: usize, inputs: &[Fr]) -> PoseidonResult<Fr> {
    check_arity(arity)?;
    check_input_count(arity, inputs.len())?;
    hash_with_params(standard_params(arity)?, inputs)
}

/// Hash integer inputs, rejecting any value that is not below the modulus.
///
/// All inputs are validated before hashing starts.
pub fn poseidon_biguint(arity: usize, inputs: &[BigUint]) -> PoseidonResult<Fr> {
    check_arity(arity)?;
    check_input_count(arity, inputs.len())?;
    let elements = inputs
        .iter()
        .map(fr_from_biguint)
        .collect::<PoseidonResult<Vec<Fr>>>()?;
    poseidon(arity, &elements)
}

/// Hash a single field element.
pub fn poseidon_hash(input: Fr) -> PoseidonResult<Fr> {
    poseidon(1, &[input])
}

/// Hash two field elements.
pub fn poseidon_hash_two(a: Fr, b: Fr) -> PoseidonResult<Fr> {
    poseidon(2, &[a, b])
}
