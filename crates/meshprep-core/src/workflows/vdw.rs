use crate::core::forcefield::params::ForceFieldTable;
use crate::core::forcefield::resolver::{ParameterResolver, ResolvedParameter};
use crate::core::io::traits::{TextReader, TextWriter};
use crate::engine::batch::{self, BatchReport};
use crate::engine::cancel::CancellationToken;
use crate::engine::config::{BatchLayout, ResolveConfig, ResolveOptions};
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// The files of one molecule's parameter resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VdwJob {
    pub structure_path: PathBuf,
    /// With a topology, atoms are matched by index; without, by name and radius.
    pub topology_path: Option<PathBuf>,
    pub output_path: PathBuf,
}

impl VdwJob {
    pub fn new(structure_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            structure_path: structure_path.into(),
            topology_path: None,
            output_path: output_path.into(),
        }
    }

    pub fn with_topology(mut self, topology_path: impl Into<PathBuf>) -> Self {
        self.topology_path = Some(topology_path.into());
        self
    }

    pub fn from_layout(layout: &BatchLayout, molecule: &str) -> Self {
        Self {
            structure_path: layout.structure(molecule),
            topology_path: layout.topology(molecule),
            output_path: layout.parameters(molecule),
        }
    }
}

/// Counts of how a molecule's atoms were resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolutionSummary {
    pub atoms: usize,
    pub resolved: usize,
    /// Resolved through the substring or radius-only tier.
    pub approximate: usize,
    pub unresolved: usize,
}

impl ResolutionSummary {
    pub fn from_parameters(params: &[ResolvedParameter]) -> Self {
        params.iter().fold(
            Self {
                atoms: params.len(),
                ..Self::default()
            },
            |mut summary, param| {
                match param.match_kind() {
                    Some(kind) => {
                        summary.resolved += 1;
                        if kind.is_approximate() {
                            summary.approximate += 1;
                        }
                    }
                    None => summary.unresolved += 1,
                }
                summary
            },
        )
    }
}

/// Loads the force-field table named by `config`.
///
/// A table without the configured section is empty, not an error; every atom
/// resolved against it ends up unresolved.
pub fn load_table(config: &ResolveConfig) -> Result<ForceFieldTable, EngineError> {
    let path = &config.forcefield_path;
    let table = config
        .options
        .table_reader()
        .read_from_path(path)
        .map_err(|e| {
            EngineError::reading(path, e, |path, source| EngineError::ForceField {
                path,
                source,
            })
        })?;
    info!(
        "Loaded {} force-field entries from '{}'.",
        table.len(),
        path.display()
    );
    Ok(table)
}

/// Resolves every atom of the given structure and returns the parameters in atom order.
pub fn resolve_parameters(
    job: &VdwJob,
    table: &ForceFieldTable,
    options: &ResolveOptions,
) -> Result<Vec<ResolvedParameter>, EngineError> {
    let atoms = options
        .structure_reader()
        .read_from_path(&job.structure_path)
        .map_err(|e| {
            EngineError::reading(&job.structure_path, e, |path, source| {
                EngineError::Structure { path, source }
            })
        })?;

    let topology = job
        .topology_path
        .as_deref()
        .map(|path| read_topology(path, options))
        .transpose()?;

    let resolver = ParameterResolver::new(table).with_tolerance(options.radius_tolerance);
    Ok(resolver.resolve_all(&atoms, topology.as_deref())?)
}

fn read_topology(path: &Path, options: &ResolveOptions) -> Result<Vec<String>, EngineError> {
    options
        .topology_reader()
        .read_from_path(path)
        .map_err(|e| {
            EngineError::reading(path, e, |path, source| EngineError::Topology {
                path,
                source,
            })
        })
}

/// Resolves one molecule and writes its parameter report.
///
/// The report is replaced atomically; on any error the previous report, if one
/// exists, is left as it was.
#[instrument(skip_all, name = "vdw_molecule", fields(structure = %job.structure_path.display()))]
pub fn resolve_molecule(
    job: &VdwJob,
    table: &ForceFieldTable,
    options: &ResolveOptions,
) -> Result<ResolutionSummary, EngineError> {
    let params = resolve_parameters(job, table, options)?;
    options
        .report_writer()
        .write_to_path(params.as_slice(), &job.output_path)
        .map_err(|source| EngineError::Write {
            path: job.output_path.clone(),
            source,
        })?;

    let summary = ResolutionSummary::from_parameters(&params);
    info!(
        "Resolved {}/{} atoms ({} approximate, {} unresolved); wrote '{}'.",
        summary.resolved,
        summary.atoms,
        summary.approximate,
        summary.unresolved,
        job.output_path.display()
    );
    Ok(summary)
}

/// Loads the table and resolves a single molecule.
#[instrument(skip_all, name = "vdw_workflow")]
pub fn run(config: &ResolveConfig, job: &VdwJob) -> Result<ResolutionSummary, EngineError> {
    let table = load_table(config)?;
    resolve_molecule(job, &table, &config.options)
}

/// Loads the table once and resolves every listed molecule independently.
///
/// Only a table that cannot be loaded fails the whole batch.
#[instrument(skip_all, name = "vdw_batch", fields(molecules = molecules.len()))]
pub fn run_batch(
    config: &ResolveConfig,
    layout: &BatchLayout,
    molecules: &[String],
    reporter: &ProgressReporter,
    cancel: &CancellationToken,
) -> Result<BatchReport<ResolutionSummary>, EngineError> {
    let table = load_table(config)?;
    Ok(batch::run_batch(
        "Resolving parameters",
        molecules,
        reporter,
        cancel,
        |molecule| {
            let job = VdwJob::from_layout(layout, molecule);
            resolve_molecule(&job, &table, &config.options)
        },
    ))
}
