//! Test-vector tooling for the BN254 Poseidon hash.
//!
//! This crate provides utilities for:
//! - Generating the cross-implementation vector file
//! - Checking a vector file against `poseidon-bn254`
//! - Exporting the standard parameters as JSON
//! - Reporting per-arity parameter sizes and hashing cost

pub mod check;
pub mod config;
pub mod error;
pub mod export;
pub mod generate;
pub mod stats;

pub use check::{check_file, check_vectors, CheckReport};
pub use config::VectorConfig;
pub use error::VectorsError;
pub use export::export_params;
pub use generate::{generate_vectors, write_vectors, ArityTiming};
pub use stats::{all_stats, arity_stats, ArityStats};
