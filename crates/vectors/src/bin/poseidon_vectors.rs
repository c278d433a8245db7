//! Poseidon vector CLI.
//!
//! Usage:
//!   poseidon-vectors generate > test_hashes.json
//!   poseidon-vectors check test_hashes.json
//!   poseidon-vectors export-params --dir params-json
//!   poseidon-vectors hash --arity 2 1 2
//!   poseidon-vectors stats
//!
//! Logs go to stderr; set `RUST_LOG` to adjust verbosity.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use poseidon_bn254::field::{fr_to_hex, parse_fr};
use poseidon_bn254::{poseidon, Fr, MAX_ARITY};
use poseidon_vectors::{
    all_stats, check_file, export_params, generate_vectors, write_vectors, VectorConfig,
    VectorsError,
};

#[derive(Parser)]
#[command(name = "poseidon-vectors")]
#[command(about = "Generate and check BN254 Poseidon test vectors", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the test-vector JSON file
    Generate {
        /// Highest arity to include
        #[arg(long, env = "POSEIDON_MAX_ARITY", default_value_t = MAX_ARITY)]
        max_arity: usize,
        /// Digests per arity
        #[arg(long, env = "POSEIDON_VECTOR_COUNT", default_value_t = 100)]
        count: usize,
        /// Output path (stdout when omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Recompute every digest of a vector file
    Check {
        path: PathBuf,
    },

    /// Write the standard parameters as `<arity>.json` files
    ExportParams {
        #[arg(long)]
        dir: PathBuf,
        /// Only this arity (all arities when omitted)
        #[arg(long)]
        arity: Option<usize>,
    },

    /// Hash decimal or 0x-hex inputs
    Hash {
        #[arg(long)]
        arity: usize,
        inputs: Vec<String>,
    },

    /// Print round counts, constant counts and hash timing per arity
    Stats {
        #[arg(long, env = "POSEIDON_MAX_ARITY", default_value_t = MAX_ARITY)]
        max_arity: usize,
        /// Hashes averaged per arity
        #[arg(long, default_value_t = 100)]
        samples: u32,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(command: Commands) -> Result<(), VectorsError> {
    match command {
        Commands::Generate {
            max_arity,
            count,
            output,
        } => {
            let config = VectorConfig::new(max_arity, count)?;
            let (vectors, _) = generate_vectors(&config)?;
            write_vectors(&vectors, output.as_deref(), &mut io::stdout().lock())
        }
        Commands::Check { path } => {
            let report = check_file(&path)?.into_result()?;
            println!("{} digests match", report.checked());
            Ok(())
        }
        Commands::ExportParams { dir, arity } => {
            let arities: Vec<usize> = match arity {
                Some(arity) => vec![arity],
                None => (1..=MAX_ARITY).collect(),
            };
            for path in export_params(&dir, &arities)? {
                println!("{}", path.display());
            }
            Ok(())
        }
        Commands::Hash { arity, inputs } => {
            let elements = inputs
                .iter()
                .map(|s| parse_fr(s))
                .collect::<Result<Vec<Fr>, _>>()?;
            println!("{}", fr_to_hex(&poseidon(arity, &elements)?));
            Ok(())
        }
        Commands::Stats {
            max_arity,
            samples,
            json,
        } => {
            let config = VectorConfig::new(max_arity, 1)?;
            let stats = all_stats(config.max_arity, samples)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
                return Ok(());
            }
            println!("arity  t   RF  RP  constants  sboxes  avg/hash");
            println!("------------------------------------------------");
            for s in &stats {
                println!(
                    "{:>5} {:>3} {:>3} {:>3} {:>10} {:>7} {:>8.1}us",
                    s.arity,
                    s.width,
                    s.full_rounds,
                    s.partial_rounds,
                    s.round_constants,
                    s.sboxes,
                    s.avg_hash_micros
                );
            }
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
