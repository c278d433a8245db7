//! Hash two small integers and print the digest in the vector-file format.

use poseidon_bn254::field::fr_to_hex;
use poseidon_bn254::{poseidon, Fr, PoseidonError};

fn main() -> Result<(), PoseidonError> {
    let inputs = vec![Fr::from(99u64), Fr::from(100u64)];
    let result = poseidon(2, &inputs)?;
    println!("{}", fr_to_hex(&result));
    Ok(())
}
