use super::cancel::CancellationToken;
use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use tracing::{debug, error, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// What happened to one molecule of a batch.
#[derive(Debug)]
pub enum MoleculeOutcome<T> {
    Completed(T),
    Failed(EngineError),
    /// Cancellation was requested before the molecule started.
    Skipped,
}

#[derive(Debug)]
pub struct MoleculeResult<T> {
    pub molecule: String,
    pub outcome: MoleculeOutcome<T>,
}

/// Per-molecule results of a batch, in the order the molecules were given.
#[derive(Debug)]
pub struct BatchReport<T> {
    pub results: Vec<MoleculeResult<T>>,
}

impl<T> BatchReport<T> {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn completed(&self) -> usize {
        self.count(|o| matches!(o, MoleculeOutcome::Completed(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, MoleculeOutcome::Failed(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, MoleculeOutcome::Skipped))
    }

    /// The molecules that failed, with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &EngineError)> {
        self.results.iter().filter_map(|r| match &r.outcome {
            MoleculeOutcome::Failed(err) => Some((r.molecule.as_str(), err)),
            _ => None,
        })
    }

    fn count(&self, pred: impl Fn(&MoleculeOutcome<T>) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.outcome)).count()
    }
}

/// Runs `job` once per molecule, isolating failures.
///
/// A molecule whose job returns an error is recorded as failed and logged; the
/// remaining molecules still run. Once `cancel` is set, molecules that have not
/// started are recorded as skipped.
pub fn run_batch<T, F>(
    phase: &'static str,
    molecules: &[String],
    reporter: &ProgressReporter,
    cancel: &CancellationToken,
    job: F,
) -> BatchReport<T>
where
    T: Send,
    F: Fn(&str) -> Result<T, EngineError> + Sync,
{
    reporter.report(Progress::PhaseStart { name: phase });
    reporter.report(Progress::TaskStart {
        total_steps: molecules.len() as u64,
    });

    let process = |molecule: &String| {
        let outcome = if cancel.is_cancelled() {
            debug!(molecule = %molecule, "Skipping molecule after cancellation.");
            MoleculeOutcome::Skipped
        } else {
            match job(molecule) {
                Ok(value) => MoleculeOutcome::Completed(value),
                Err(EngineError::Cancelled) => MoleculeOutcome::Skipped,
                Err(err) => {
                    error!(molecule = %molecule, "Molecule '{}' failed: {}", molecule, err);
                    MoleculeOutcome::Failed(err)
                }
            }
        };
        reporter.report(Progress::TaskIncrement);
        MoleculeResult {
            molecule: molecule.clone(),
            outcome,
        }
    };

    #[cfg(feature = "parallel")]
    let results: Vec<MoleculeResult<T>> = molecules.par_iter().map(process).collect();

    #[cfg(not(feature = "parallel"))]
    let results: Vec<MoleculeResult<T>> = molecules.iter().map(process).collect();

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    let report = BatchReport { results };
    info!(
        "{}: {} molecules, {} completed, {} failed, {} skipped.",
        phase,
        report.len(),
        report.completed(),
        report.failed(),
        report.skipped()
    );
    report
}
