use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::fingerprint::{
    structure_fingerprint, CompositionFeaturizer, ElementPropertyFeaturizer, SiteStatsFeaturizer,
};
use crate::matching::{StructureComparator, ToleranceComparator};
use crate::parsing;

#[derive(Args)]
pub struct CompareArgs {
    /// First structure (JSON file with exactly one structure)
    #[arg(required = true)]
    pub input_a: PathBuf,

    /// Second structure (JSON file with exactly one structure)
    #[arg(required = true)]
    pub input_b: PathBuf,
}

pub fn run(args: CompareArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let a = parsing::load_structure(&args.input_a)
        .map_err(|e| anyhow::anyhow!("{}: {e}", args.input_a.display()))?;
    let b = parsing::load_structure(&args.input_b)
        .map_err(|e| anyhow::anyhow!("{}: {e}", args.input_b.display()))?;

    if verbose {
        eprintln!(
            "Input A: {} ({} sites), Input B: {} ({} sites)",
            a.composition(),
            a.num_sites(),
            b.composition(),
            b.num_sites()
        );
    }

    let comparator = ToleranceComparator::new();
    let equivalent = comparator.equivalent(&a, &b);

    let comp_featurizer = ElementPropertyFeaturizer::new();
    let comp_distance = euclidean(
        &comp_featurizer.featurize(&a.composition())?,
        &comp_featurizer.featurize(&b.composition())?,
    );

    let site_featurizer = SiteStatsFeaturizer::new();
    let struct_distance = euclidean(
        &structure_fingerprint(&site_featurizer, &a)?,
        &structure_fingerprint(&site_featurizer, &b)?,
    );

    match format {
        OutputFormat::Text => {
            println!("Comparison Results");
            println!("{}", "=".repeat(60));
            println!("\nInput A: {} ({})", args.input_a.display(), a.composition());
            println!("Input B: {} ({})", args.input_b.display(), b.composition());
            println!("\nStructurally equivalent: {equivalent}");
            println!("Composition fingerprint distance: {comp_distance:.4}");
            println!("Structure fingerprint distance: {struct_distance:.4}");
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "input_a": {
                    "path": args.input_a.display().to_string(),
                    "composition": a.composition().to_string(),
                    "num_sites": a.num_sites(),
                },
                "input_b": {
                    "path": args.input_b.display().to_string(),
                    "composition": b.composition().to_string(),
                    "num_sites": b.num_sites(),
                },
                "equivalent": equivalent,
                "comp_distance": comp_distance,
                "struct_distance": struct_distance,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}
