use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use meshprep::engine::progress::{Progress, ProgressCallback};
use std::time::Duration;

const TICK_INTERVAL: Duration = Duration::from_millis(100);
const BAR_TEMPLATE: &str =
    "{spinner:.green} {msg:<22} [{bar:32.cyan/blue}] {pos}/{len} molecules ({elapsed})";

/// Counts finished molecules of a batch on stderr.
///
/// `ProgressBar` handles share one state, so the callback owns a clone and can be
/// driven from the rayon workers directly.
#[derive(Clone)]
pub struct CliProgressHandler {
    bar: ProgressBar,
}

impl CliProgressHandler {
    /// A handler drawing on stderr, or drawing nothing when `quiet` is set.
    pub fn new(quiet: bool) -> Self {
        let target = if quiet {
            ProgressDrawTarget::hidden()
        } else {
            ProgressDrawTarget::stderr()
        };
        let bar = ProgressBar::with_draw_target(Some(0), target).with_style(bar_style());
        Self { bar }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let bar = self.bar.clone();
        Box::new(move |event| match event {
            Progress::PhaseStart { name } => {
                bar.set_message(name);
                bar.enable_steady_tick(TICK_INTERVAL);
            }
            Progress::TaskStart { total_steps } => {
                bar.set_length(total_steps);
                bar.set_position(0);
            }
            Progress::TaskIncrement => bar.inc(1),
            Progress::TaskFinish => bar.disable_steady_tick(),
            // The summary printed after the batch replaces the bar.
            Progress::PhaseFinish => bar.finish_and_clear(),
        })
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template(BAR_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn quiet_handler_never_draws() {
        let handler = CliProgressHandler::new(true);
        assert!(handler.bar.is_hidden());
        assert_eq!(handler.bar.length(), Some(0));
    }

    #[test]
    fn callback_counts_molecules_of_a_batch() {
        let handler = CliProgressHandler::new(true);
        let callback = handler.get_callback();

        callback(Progress::PhaseStart {
            name: "Resolving parameters",
        });
        assert_eq!(handler.bar.message(), "Resolving parameters");
        assert!(!handler.bar.is_finished());

        callback(Progress::TaskStart { total_steps: 3 });
        assert_eq!(handler.bar.length(), Some(3));
        assert_eq!(handler.bar.position(), 0);

        callback(Progress::TaskIncrement);
        callback(Progress::TaskIncrement);
        assert_eq!(handler.bar.position(), 2);

        callback(Progress::TaskFinish);
        callback(Progress::PhaseFinish);
        assert!(handler.bar.is_finished());
    }

    #[test]
    fn increments_from_worker_threads_are_all_counted() {
        let handler = CliProgressHandler::new(true);
        let callback = handler.get_callback();
        callback(Progress::TaskStart { total_steps: 8 });

        thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    callback(Progress::TaskIncrement);
                    callback(Progress::TaskIncrement);
                });
            }
        });

        assert_eq!(handler.bar.position(), 8);
    }
}
