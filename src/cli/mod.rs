//! Command-line interface for genmetrics.
//!
//! Available commands:
//!
//! - **evaluate**: Compute coverage/duplicity metrics for a generated set
//!   against a reference set
//! - **compare**: Compare two individual structures
//! - **fingerprint**: Dump fingerprints for a structure set
//!
//! ## Usage
//!
//! ```text
//! # Benchmark a generated set against a test set
//! genmetrics evaluate test_set.json gen_set.json
//!
//! # Use the exact structure-equivalence strategy
//! genmetrics evaluate test_set.json gen_set.json --match-type exact
//!
//! # JSON output for scripting
//! genmetrics evaluate test_set.json gen_set.json --format json
//!
//! # Compare two structures directly
//! genmetrics compare a.json b.json
//! ```

use clap::{Parser, Subcommand};

pub mod compare;
pub mod evaluate;
pub mod fingerprint;

#[derive(Parser)]
#[command(name = "genmetrics")]
#[command(author = "Maven Materials")]
#[command(version)]
#[command(about = "Benchmark metrics for generative crystal structure models")]
#[command(
    long_about = "genmetrics evaluates a set of machine-generated crystal structures against a reference set.\n\nIt builds an all-pairs match matrix under a composition+structure fingerprint criterion (or an exact structural-equivalence predicate) and reports:\n- Coverage: how many reference structures are matched at least once\n- Match rate: coverage as a fraction of the reference set\n- Duplicity: redundant generation against already-covered references"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate a generated structure set against a reference set
    Evaluate(evaluate::EvaluateArgs),

    /// Compare two individual structures
    Compare(compare::CompareArgs),

    /// Dump fingerprints for a structure set
    Fingerprint(fingerprint::FingerprintArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
