//! kube-tmuxp - Main entry point

use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};

use kube_tmuxp::{output_summary, run_manifest, Cli, Result, Settings};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    info!("Starting kube-tmuxp v{}", env!("CARGO_PKG_VERSION"));
    debug!(
        "CLI args: manifest={}, keep_going={}, dry_run={}, force_v2_api={}, format={}",
        cli.manifest.display(),
        cli.keep_going,
        cli.dry_run,
        cli.force_v2_api,
        cli.format
    );

    match run(&cli) {
        Ok(true) => {
            info!("Completed successfully");
            ExitCode::SUCCESS
        }
        Ok(false) => {
            info!("Completed with some errors");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every cluster was provisioned
fn run(cli: &Cli) -> Result<bool> {
    let settings = Settings::from_cli(cli)?;
    let summary = run_manifest(&settings, &cli.manifest)?;
    output_summary(&summary, &cli.format);
    Ok(!summary.has_failures())
}
