mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use clap::Parser;
use meshprep::engine::cancel::CancellationToken;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\nError: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    info!("meshprep CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    if let Some(num_threads) = cli.threads {
        info!(
            "Setting Rayon global thread pool to {} threads.",
            num_threads
        );
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| {
                CliError::Other(anyhow::anyhow!("Failed to build global thread pool: {}", e))
            })?;
    }

    let cancel = CancellationToken::new();
    let file_config = config::load_file_config(cli.config.as_deref(), &cli.set_values)?;

    let command_result = match cli.command {
        Commands::Vdw(args) => {
            info!("Dispatching to 'vdw' command.");
            commands::vdw::run(args, &file_config, &cancel, cli.quiet)
        }
        Commands::Xyzr(args) => {
            info!("Dispatching to 'xyzr' command.");
            commands::xyzr::run(args, &file_config, &cancel, cli.quiet)
        }
        Commands::Off(args) => {
            info!("Dispatching to 'off' command.");
            commands::off::run(args, &file_config, &cancel, cli.quiet)
        }
    };

    match &command_result {
        Ok(_) => info!("Command completed successfully."),
        Err(e) => error!("Command failed: {}", e),
    }

    command_result
}
