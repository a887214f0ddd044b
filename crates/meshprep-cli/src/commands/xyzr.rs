use super::{batch_layout, finish_batch, load_molecules};
use crate::cli::XyzrArgs;
use crate::config::{build_radii_config, file::FileConfig};
use crate::error::{CliError, Result};
use crate::utils::interrupt::install_batch_handler;
use crate::utils::progress::CliProgressHandler;
use meshprep::engine::cancel::CancellationToken;
use meshprep::engine::progress::ProgressReporter;
use meshprep::workflows::radii::{self, RadiiJob, RadiiSummary};
use tracing::info;

fn describe(summary: &RadiiSummary) -> String {
    format!("{} spheres", summary.atoms)
}

pub fn run(
    args: XyzrArgs,
    file_config: &FileConfig,
    cancel: &CancellationToken,
    quiet: bool,
) -> Result<()> {
    let config = build_radii_config(&args, file_config)?;
    info!(
        "Preparing radii with scale {} and Stern offset {}.",
        config.scale, config.stern_offset
    );

    if let Some(list_path) = &args.batch.molecules {
        let molecules = load_molecules(list_path)?;
        let layout = batch_layout(&args.batch, file_config);

        install_batch_handler(cancel)?;
        let progress_handler = CliProgressHandler::new(quiet);
        let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
        let report = radii::run_batch(&config, &layout, &molecules, &reporter, cancel);
        return finish_batch("Radii preparation", &report, &args.batch, describe);
    }

    let (Some(input), Some(output)) = (args.input, args.output) else {
        return Err(CliError::Argument(
            "Either --input with --output, or --molecules, is required.".to_string(),
        ));
    };
    let mut job = RadiiJob::new(input, output);
    if let Some(stern_output) = args.stern_output {
        job = job.with_stern_output(stern_output);
    }

    let summary = radii::prepare_molecule(&job, &config)?;
    println!(
        "Wrote {} to {}",
        describe(&summary),
        job.output_path.display()
    );
    Ok(())
}
