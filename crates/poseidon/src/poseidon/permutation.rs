//! Poseidon permutation.
//!
//! Each round:
//! 1. Add the round constants to every lane
//! 2. S-box (x^5) on every lane in full rounds, on lane 0 in partial rounds
//! 3. MDS matrix multiplication
//!
//! Rounds run as RF/2 full, RP partial, RF/2 full.

use ark_bn254::Fr;
use ark_ff::Zero;

use super::config::PoseidonParams;
use crate::error::{PoseidonError, PoseidonResult};
use crate::field::pow5;

fn add_round_constants(state: &mut [Fr], constants: &[Fr]) {
    for (lane, c) in state.iter_mut().zip(constants) {
        *lane += c;
    }
}

fn full_sbox(state: &mut [Fr]) {
    for lane in state.iter_mut() {
        *lane = pow5(*lane);
    }
}

fn partial_sbox(state: &mut [Fr]) {
    state[0] = pow5(state[0]);
}

/// state' = MDS * state, using `scratch` as the output buffer.
fn mix(state: &mut [Fr], mds: &[Vec<Fr>], scratch: &mut Vec<Fr>) {
    scratch.clear();
    scratch.extend(mds.iter().map(|row| {
        row.iter()
            .zip(state.iter())
            .fold(Fr::zero(), |acc, (m, x)| acc + *m * x)
    }));
    state.copy_from_slice(scratch);
}

fn apply_round(state: &mut [Fr], params: &PoseidonParams, round: usize, scratch: &mut Vec<Fr>) {
    add_round_constants(state, params.round_constants(round));
    if params.is_full_round(round) {
        full_sbox(state);
    } else {
        partial_sbox(state);
    }
    mix(state, params.mds(), scratch);
}

fn check_width(state: &[Fr], params: &PoseidonParams) -> PoseidonResult<()> {
    if state.len() != params.width() {
        return Err(PoseidonError::InvalidArity(format!(
            "state has {} lanes, parameters expect t={}",
            state.len(),
            params.width()
        )));
    }
    Ok(())
}

/// Apply the full permutation to `state` in place.
pub fn permute(state: &mut [Fr], params: &PoseidonParams) -> PoseidonResult<()> {
    check_width(state, params)?;
    let mut scratch = Vec::with_capacity(state.len());
    for round in 0..params.total_rounds() {
        apply_round(state, params, round, &mut scratch);
    }
    Ok(())
}

/// Permutation that also records the state after every round.
///
/// Meant for localizing the first diverging round against another
/// implementation.
pub fn permute_with_trace(
    state: &mut [Fr],
    params: &PoseidonParams,
) -> PoseidonResult<Vec<Vec<Fr>>> {
    check_width(state, params)?;
    let mut scratch = Vec::with_capacity(state.len());
    let mut traces = Vec::with_capacity(params.total_rounds());
    for round in 0..params.total_rounds() {
        apply_round(state, params, round, &mut scratch);
        traces.push(state.to_vec());
    }
    Ok(traces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poseidon::standard_params;
    use ark_ff::One;

    #[test]
    fn test_permute_deterministic() {
        let params = standard_params(2).unwrap();
        let mut a = vec![Fr::zero(), Fr::one(), Fr::from(2u64)];
        let mut b = a.clone();
        permute(&mut a, params).unwrap();
        permute(&mut b, params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_trace_matches_permute() {
        let params = standard_params(2).unwrap();
        let mut plain = vec![Fr::zero(), Fr::from(5u64), Fr::from(5u64)];
        let mut traced = plain.clone();

        permute(&mut plain, params).unwrap();
        let traces = permute_with_trace(&mut traced, params).unwrap();

        assert_eq!(traces.len(), params.total_rounds());
        assert_eq!(traces.last().unwrap(), &plain);
        assert_eq!(traced, plain);
    }

    #[test]
    fn test_wrong_width_rejected() {
        let params = standard_params(2).unwrap();
        let mut state = vec![Fr::zero(); 2];
        assert!(matches!(
            permute(&mut state, params),
            Err(PoseidonError::InvalidArity(_))
        ));
        // untouched on failure
        assert_eq!(state, vec![Fr::zero(); 2]);
    }

    #[test]
    fn test_mix_is_linear() {
        let params = standard_params(3).unwrap();
        let mut scratch = Vec::new();
        let a: Vec<Fr> = (1..=4u64).map(Fr::from).collect();
        let b: Vec<Fr> = (10..=13u64).map(Fr::from).collect();
        let mut sum: Vec<Fr> = a.iter().zip(&b).map(|(x, y)| *x + y).collect();
        let (mut a, mut b) = (a, b);

        mix(&mut a, params.mds(), &mut scratch);
        mix(&mut b, params.mds(), &mut scratch);
        mix(&mut sum, params.mds(), &mut scratch);

        for i in 0..4 {
            assert_eq!(a[i] + b[i], sum[i]);
        }
    }

    #[test]
    fn test_partial_sbox_touches_first_lane_only() {
        let mut state = vec![Fr::from(2u64), Fr::from(3u64), Fr::from(4u64)];
        partial_sbox(&mut state);
        assert_eq!(state, vec![Fr::from(32u64), Fr::from(3u64), Fr::from(4u64)]);
        full_sbox(&mut state);
        assert_eq!(state[1], Fr::from(243u64));
    }

    #[test]
    fn test_full_rounds_diffuse_single_change() {
        let params = standard_params(4).unwrap();
        let mut a = vec![Fr::zero(); 5];
        let mut b = vec![Fr::zero(); 5];
        b[4] = Fr::one();
        let ta = permute_with_trace(&mut a, params).unwrap();
        let tb = permute_with_trace(&mut b, params).unwrap();
        // after the first round every lane already differs
        for lane in 0..5 {
            assert_ne!(ta[0][lane], tb[0][lane]);
        }
    }
}
