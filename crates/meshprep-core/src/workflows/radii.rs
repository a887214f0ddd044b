use crate::core::io::pqr::PqrReader;
use crate::core::io::traits::{TextReader, TextWriter};
use crate::core::io::xyzr::{XyzrReader, XyzrWriter};
use crate::core::models::sphere::AtomSphere;
use crate::engine::batch::{self, BatchReport};
use crate::engine::cancel::CancellationToken;
use crate::engine::config::{BatchLayout, RadiiConfig};
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// The files of one molecule's radii preparation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadiiJob {
    /// An `.xyzr` file, or a `.pqr` structure file whose records carry coordinates.
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub stern_output_path: Option<PathBuf>,
}

impl RadiiJob {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            stern_output_path: None,
        }
    }

    pub fn with_stern_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.stern_output_path = Some(path.into());
        self
    }

    pub fn from_layout(layout: &BatchLayout, molecule: &str) -> Self {
        Self {
            input_path: layout.radii_input(molecule),
            output_path: layout.radii_output(molecule),
            stern_output_path: Some(layout.stern_output(molecule)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RadiiSummary {
    pub atoms: usize,
    pub stern_written: bool,
}

fn is_structure_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pqr"))
}

/// Reads atom spheres from an `.xyzr` file or a structure file.
pub fn load_spheres(path: &Path, config: &RadiiConfig) -> Result<Vec<AtomSphere>, EngineError> {
    if !is_structure_file(path) {
        return XyzrReader.read_from_path(path).map_err(|e| {
            EngineError::reading(path, e, |path, source| EngineError::Radii { path, source })
        });
    }

    let records = PqrReader::new(config.record_keywords.clone())
        .read_from_path(path)
        .map_err(|e| {
            EngineError::reading(path, e, |path, source| EngineError::Structure {
                path,
                source,
            })
        })?;
    records
        .iter()
        .map(|record| {
            AtomSphere::from_record(record).ok_or_else(|| EngineError::MissingCoordinates {
                path: path.to_path_buf(),
                atom: record.name.clone(),
            })
        })
        .collect()
}

/// Scales every radius, then derives the Stern-layer spheres from the scaled ones.
pub fn prepare_spheres(
    spheres: &[AtomSphere],
    config: &RadiiConfig,
) -> (Vec<AtomSphere>, Vec<AtomSphere>) {
    let scaled: Vec<AtomSphere> = spheres.iter().map(|s| s.scaled(config.scale)).collect();
    let stern = scaled
        .iter()
        .map(|s| s.inflated(config.stern_offset))
        .collect();
    (scaled, stern)
}

fn write_spheres(path: &Path, spheres: &[AtomSphere]) -> Result<(), EngineError> {
    XyzrWriter::default()
        .write_to_path(spheres, path)
        .map_err(|source| EngineError::Write {
            path: path.to_path_buf(),
            source,
        })
}

/// Writes the scaled radii file and, if requested, the Stern-layer file for one molecule.
#[instrument(skip_all, name = "radii_molecule", fields(input = %job.input_path.display()))]
pub fn prepare_molecule(job: &RadiiJob, config: &RadiiConfig) -> Result<RadiiSummary, EngineError> {
    let spheres = load_spheres(&job.input_path, config)?;
    let (scaled, stern) = prepare_spheres(&spheres, config);

    write_spheres(&job.output_path, &scaled)?;
    if let Some(stern_path) = &job.stern_output_path {
        write_spheres(stern_path, &stern)?;
    }

    info!(
        "Wrote {} spheres (scale {}, Stern offset {}) to '{}'.",
        scaled.len(),
        config.scale,
        config.stern_offset,
        job.output_path.display()
    );
    Ok(RadiiSummary {
        atoms: scaled.len(),
        stern_written: job.stern_output_path.is_some(),
    })
}

#[instrument(skip_all, name = "radii_batch", fields(molecules = molecules.len()))]
pub fn run_batch(
    config: &RadiiConfig,
    layout: &BatchLayout,
    molecules: &[String],
    reporter: &ProgressReporter,
    cancel: &CancellationToken,
) -> BatchReport<RadiiSummary> {
    batch::run_batch("Preparing radii", molecules, reporter, cancel, |molecule| {
        prepare_molecule(&RadiiJob::from_layout(layout, molecule), config)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn stern_offset_applies_after_scaling() {
        let spheres = [AtomSphere::new(Point3::origin(), 2.0)];
        let config = RadiiConfig::new(0.5, 1.4).unwrap();
        let (scaled, stern) = prepare_spheres(&spheres, &config);
        assert_eq!(scaled[0].radius, 1.0);
        assert!((stern[0].radius - 2.4).abs() < 1e-12);
    }

    #[test]
    fn writes_radii_and_stern_files_from_xyzr() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("test.xyzr");
        fs::write(&input, "1.0 2.0 3.0 1.5\n-1.0 0.0 0.5 2.0\n").unwrap();
        let job = RadiiJob::new(&input, dir.path().join("radii.xyzr"))
            .with_stern_output(dir.path().join("radii_stern.xyzr"));

        let summary = prepare_molecule(&job, &RadiiConfig::default()).unwrap();
        assert_eq!(
            summary,
            RadiiSummary {
                atoms: 2,
                stern_written: true
            }
        );
        assert_eq!(
            fs::read_to_string(&job.output_path).unwrap(),
            "1.000 2.000 3.000 1.500\n-1.000 0.000 0.500 2.000\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("radii_stern.xyzr")).unwrap(),
            "1.000 2.000 3.000 2.900\n-1.000 0.000 0.500 3.400\n"
        );
    }

    #[test]
    fn reads_spheres_from_structure_files() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("lig.pqr");
        fs::write(&input, "ATOM 1 C1 LIG 1 -1.500-2.300-3.100 0.500 1.9080\n").unwrap();

        let spheres = load_spheres(&input, &RadiiConfig::default()).unwrap();
        assert_eq!(spheres.len(), 1);
        assert_eq!(spheres[0].center, Point3::new(-1.5, -2.3, -3.1));
        assert_eq!(spheres[0].radius, 1.908);
    }

    #[test]
    fn structure_without_coordinates_is_an_error() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("lig.pqr");
        fs::write(&input, "ATOM 1 C1 LIG 1 1.9080\n").unwrap();

        let result = load_spheres(&input, &RadiiConfig::default());
        assert!(matches!(
            result,
            Err(EngineError::MissingCoordinates { ref atom, .. }) if atom == "C1"
        ));
    }
}
