/// Events emitted while a workflow runs.
///
/// A batch emits one `PhaseStart`, a `TaskStart` with the molecule count, one
/// `TaskIncrement` per finished, failed or skipped molecule, then `TaskFinish` and
/// `PhaseFinish`.
#[derive(Debug, Clone)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards progress events to an optional callback.
///
/// The callback may be invoked from several worker threads at once.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn reporter_without_callback_ignores_events() {
        ProgressReporter::new().report(Progress::TaskIncrement);
    }

    #[test]
    fn reporter_forwards_events_to_callback() {
        let seen = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::PhaseStart { name } = event {
                seen.lock().unwrap().push(name);
            }
        }));
        reporter.report(Progress::PhaseStart { name: "Converting meshes" });
        reporter.report(Progress::TaskIncrement);
        drop(reporter);
        assert_eq!(seen.into_inner().unwrap(), vec!["Converting meshes"]);
    }
}
