use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod fingerprint;
mod matching;
mod metrics;
mod parsing;
mod progress;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("genmetrics=debug,info")
    } else {
        EnvFilter::new("genmetrics=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Evaluate(args) => {
            cli::evaluate::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Compare(args) => {
            cli::compare::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Fingerprint(args) => {
            cli::fingerprint::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
