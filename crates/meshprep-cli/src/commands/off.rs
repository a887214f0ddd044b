use super::{batch_layout, finish_batch, load_molecules};
use crate::cli::OffArgs;
use crate::config::file::FileConfig;
use crate::error::{CliError, Result};
use crate::utils::interrupt::install_batch_handler;
use crate::utils::progress::CliProgressHandler;
use meshprep::engine::cancel::CancellationToken;
use meshprep::engine::progress::ProgressReporter;
use meshprep::workflows::mesh::{self, MeshJob, MeshSummary};

fn describe(summary: &MeshSummary) -> String {
    format!("{} vertices, {} faces", summary.vertices, summary.faces)
}

pub fn run(
    args: OffArgs,
    file_config: &FileConfig,
    cancel: &CancellationToken,
    quiet: bool,
) -> Result<()> {
    if let Some(list_path) = &args.batch.molecules {
        let molecules = load_molecules(list_path)?;
        let layout = batch_layout(&args.batch, file_config);

        install_batch_handler(cancel)?;
        let progress_handler = CliProgressHandler::new(quiet);
        let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
        let report = mesh::run_batch(&layout, &molecules, &reporter, cancel);
        return finish_batch("Mesh conversion", &report, &args.batch, describe);
    }

    let Some(surface) = args.surface else {
        return Err(CliError::Argument(
            "Either --surface or --molecules is required.".to_string(),
        ));
    };
    let mut job = MeshJob::new(surface);
    if let Some(output) = args.output {
        job = job.with_output(output);
    }

    let summary = mesh::convert_molecule(&job)?;
    println!(
        "Wrote {} to {}",
        describe(&summary),
        job.output_path.display()
    );
    Ok(())
}
