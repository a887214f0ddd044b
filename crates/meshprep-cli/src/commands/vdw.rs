use super::{batch_layout, finish_batch, load_molecules};
use crate::cli::VdwArgs;
use crate::config::{build_resolve_config, file::FileConfig};
use crate::error::{CliError, Result};
use crate::utils::interrupt::install_batch_handler;
use crate::utils::progress::CliProgressHandler;
use meshprep::engine::cancel::CancellationToken;
use meshprep::engine::progress::ProgressReporter;
use meshprep::workflows::vdw::{self, ResolutionSummary, VdwJob};
use tracing::info;

fn describe(summary: &ResolutionSummary) -> String {
    format!(
        "{}/{} atoms resolved, {} approximate, {} unresolved",
        summary.resolved, summary.atoms, summary.approximate, summary.unresolved
    )
}

pub fn run(
    args: VdwArgs,
    file_config: &FileConfig,
    cancel: &CancellationToken,
    quiet: bool,
) -> Result<()> {
    let config = build_resolve_config(&args, file_config)?;
    info!(
        "Resolving against '{}' (unresolved atoms: {}).",
        config.forcefield_path.display(),
        config.options.unresolved
    );

    if let Some(list_path) = &args.batch.molecules {
        let molecules = load_molecules(list_path)?;
        let layout = batch_layout(&args.batch, file_config);

        install_batch_handler(cancel)?;
        let progress_handler = CliProgressHandler::new(quiet);
        let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
        let report = vdw::run_batch(&config, &layout, &molecules, &reporter, cancel)?;
        return finish_batch("Parameter resolution", &report, &args.batch, describe);
    }

    let (Some(structure), Some(output)) = (args.pqr, args.output) else {
        return Err(CliError::Argument(
            "Either --pqr with --output, or --molecules, is required.".to_string(),
        ));
    };
    let mut job = VdwJob::new(structure, output);
    if let Some(topology) = args.topology {
        job = job.with_topology(topology);
    }

    let summary = vdw::run(&config, &job)?;
    println!(
        "{}; wrote {}",
        describe(&summary),
        job.output_path.display()
    );
    Ok(())
}
