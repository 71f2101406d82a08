use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::matching::{MatchStrategy, MatchingConfig, DEFAULT_COMP_CUTOFF, DEFAULT_STRUCT_CUTOFF};
use crate::metrics::{GenMetrics, MetricsReport};
use crate::parsing;

#[derive(Args)]
pub struct EvaluateArgs {
    /// Reference ("test") structure set (JSON)
    #[arg(required = true)]
    pub test_set: PathBuf,

    /// Generated structure set (JSON)
    #[arg(required = true)]
    pub gen_set: PathBuf,

    /// Matching strategy
    #[arg(long, default_value = "coverage")]
    pub match_type: String,

    /// Treat the two sets as one collection compared against itself
    #[arg(long)]
    pub symmetric: bool,

    /// Composition fingerprint distance cutoff
    #[arg(long, default_value_t = DEFAULT_COMP_CUTOFF)]
    pub comp_cutoff: f64,

    /// Structure fingerprint distance cutoff
    #[arg(long, default_value_t = DEFAULT_STRUCT_CUTOFF)]
    pub struct_cutoff: f64,
}

pub fn run(args: EvaluateArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    // Strategy parse fails before any file is touched
    let strategy: MatchStrategy = args.match_type.parse()?;

    let config = MatchingConfig {
        strategy,
        symmetric: args.symmetric,
        comp_cutoff: args.comp_cutoff,
        struct_cutoff: args.struct_cutoff,
        verbose,
    };

    let test_structures = parsing::load_structures(&args.test_set)
        .map_err(|e| anyhow::anyhow!("{}: {e}", args.test_set.display()))?;
    let gen_structures = parsing::load_structures(&args.gen_set)
        .map_err(|e| anyhow::anyhow!("{}: {e}", args.gen_set.display()))?;

    if verbose {
        eprintln!(
            "Loaded {} test and {} generated structures",
            test_structures.len(),
            gen_structures.len()
        );
    }

    let metrics = GenMetrics::new(test_structures, gen_structures, config)?;
    let report = metrics.report()?;

    match format {
        OutputFormat::Text => print_text_report(&args, &report),
        OutputFormat::Json => print_json_report(&report)?,
    }

    Ok(())
}

fn print_text_report(args: &EvaluateArgs, report: &MetricsReport) {
    println!("Generative Benchmark Results");
    println!("{}", "=".repeat(60));

    println!("\nReference set: {}", args.test_set.display());
    println!("  Structures: {}", report.num_test);
    println!("\nGenerated set: {}", args.gen_set.display());
    println!("  Structures: {}", report.num_gen);

    println!("\nMatching ({} strategy):", args.match_type);
    println!("  Match count: {}", report.match_count);
    println!("  Match rate: {:.2}%", report.match_rate * 100.0);
    println!("  Duplicity count: {}", report.duplicity_count);
    println!("  Duplicity rate: {:.4}", report.duplicity_rate);
}

fn print_json_report(report: &MetricsReport) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
