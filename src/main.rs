//! carscout - used-car listing extraction and comparison CLI

use clap::Parser;
use tracing_subscriber::EnvFilter;

use carscout::cli::{Cli, Commands};
use carscout::error::Result;

mod commands;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        if let Some(hint) = e.hint() {
            eprintln!("Hint: {}", hint);
        }
        std::process::exit(1);
    }
}

/// Logs go to stderr so `--json` output on stdout stays clean
fn init_logging(verbose: bool) {
    let default_level = if verbose { "carscout=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("CARSCOUT_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze { url, tolerances, json } => commands::cmd_analyze(&url, &tolerances, json),
        Commands::Compare { reference, candidates, json } => {
            commands::cmd_compare(&reference, &candidates, json)
        }
        Commands::Inspect { file, url, tolerances, json } => {
            commands::cmd_inspect(&file, url.as_deref(), &tolerances, json)
        }
        Commands::Config { init } => commands::cmd_config(init),
        Commands::Completions { shell } => commands::cmd_completions(shell),
    }
}
