use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::fingerprint::{ElementPropertyFeaturizer, SiteStatsFeaturizer};
use crate::matching::distance::{composition_fingerprints, structure_fingerprints};
use crate::parsing;
use crate::progress;

#[derive(Args)]
pub struct FingerprintArgs {
    /// Structure set (JSON)
    #[arg(required = true)]
    pub set: PathBuf,

    /// Emit composition fingerprints instead of structure fingerprints
    #[arg(long)]
    pub composition_only: bool,
}

pub fn run(args: FingerprintArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let structures = parsing::load_structures(&args.set)
        .map_err(|e| anyhow::anyhow!("{}: {e}", args.set.display()))?;

    let sink = progress::sink_for_verbosity(verbose);
    let fingerprints = if args.composition_only {
        composition_fingerprints(&structures, &ElementPropertyFeaturizer::new(), sink.as_ref())?
    } else {
        structure_fingerprints(&structures, &SiteStatsFeaturizer::new(), sink.as_ref())?
    };

    match format {
        OutputFormat::Text => {
            let kind = if args.composition_only {
                "composition"
            } else {
                "structure"
            };
            println!(
                "{} {kind} fingerprints from {}",
                fingerprints.len(),
                args.set.display()
            );
            for (i, fp) in fingerprints.iter().enumerate() {
                let formatted: Vec<String> = fp.iter().map(|v| format!("{v:.4}")).collect();
                println!("{i}\t[{}]", formatted.join(", "));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&fingerprints)?);
        }
    }

    Ok(())
}
