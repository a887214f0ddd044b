pub mod off;
pub mod vdw;
pub mod xyzr;

use crate::cli::BatchArgs;
use crate::config::{build_naming, file::FileConfig};
use crate::error::{CliError, Result};
use crate::utils::report::{print_summary, write_batch_report};
use meshprep::core::io::molecules::MoleculeListReader;
use meshprep::core::io::traits::TextReader;
use meshprep::engine::batch::BatchReport;
use meshprep::engine::config::BatchLayout;
use meshprep::engine::error::EngineError;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Reads the molecule list; a missing list aborts the whole run.
fn load_molecules(path: &Path) -> Result<Vec<String>> {
    let molecules = MoleculeListReader.read_from_path(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            CliError::Core(EngineError::MissingInput {
                path: path.to_path_buf(),
            })
        } else {
            CliError::FileParsing {
                path: path.to_path_buf(),
                source: e.into(),
            }
        }
    })?;
    if molecules.is_empty() {
        warn!("Molecule list '{}' contains no molecules.", path.display());
    } else {
        info!(
            "Loaded {} molecule(s) from '{}'.",
            molecules.len(),
            path.display()
        );
    }
    Ok(molecules)
}

fn batch_layout(batch: &BatchArgs, file_config: &FileConfig) -> BatchLayout {
    let root = batch.root.clone().unwrap_or_else(|| PathBuf::from("."));
    BatchLayout::new(root, build_naming(file_config))
}

/// Prints the summary, writes the CSV report if requested, and fails if the batch
/// was interrupted before every molecule ran.
fn finish_batch<T>(
    label: &str,
    report: &BatchReport<T>,
    batch: &BatchArgs,
    describe: impl Fn(&T) -> String,
) -> Result<()> {
    print_summary(label, report);
    if let Some(path) = &batch.report {
        write_batch_report(path, report, describe)?;
    }
    if report.skipped() > 0 {
        return Err(CliError::Core(EngineError::Cancelled));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_molecule_list_is_missing_input() {
        let dir = tempdir().unwrap();
        let result = load_molecules(&dir.path().join("molecules.txt"));
        assert!(matches!(
            result,
            Err(CliError::Core(EngineError::MissingInput { .. }))
        ));
    }

    #[test]
    fn molecule_list_is_trimmed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("molecules.txt");
        fs::write(&path, "methane\n\n# pending\nethanol \n").unwrap();
        assert_eq!(load_molecules(&path).unwrap(), vec!["methane", "ethanol"]);
    }

    #[test]
    fn batch_root_defaults_to_current_directory() {
        let layout = batch_layout(&BatchArgs::default(), &FileConfig::default());
        assert_eq!(layout.structure("mol"), PathBuf::from("./mol/mol.pqr"));
    }
}
