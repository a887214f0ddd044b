use crate::error::{CliError, Result};
use meshprep::engine::cancel::CancellationToken;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::warn;

/// Exit status of a batch stopped by a second interrupt (128 + SIGINT).
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptAction {
    /// Stop starting molecules and let the ones in progress finish.
    Drain,
    /// Terminate the process now.
    Exit,
}

/// Decides what each Ctrl-C during a batch does.
///
/// The first interrupt cancels the batch; any later one exits, so a molecule stuck
/// on a blocking read can always be abandoned.
#[derive(Debug)]
pub struct InterruptState {
    cancel: CancellationToken,
    received: AtomicUsize,
}

impl InterruptState {
    pub fn new(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            received: AtomicUsize::new(0),
        }
    }

    pub fn on_interrupt(&self) -> InterruptAction {
        if self.received.fetch_add(1, Ordering::SeqCst) == 0 {
            self.cancel.cancel();
            InterruptAction::Drain
        } else {
            InterruptAction::Exit
        }
    }
}

/// Replaces the default SIGINT behaviour for the duration of a batch.
///
/// Single-molecule runs never call this and stop on the first Ctrl-C.
pub fn install_batch_handler(cancel: &CancellationToken) -> Result<()> {
    let state = InterruptState::new(cancel.clone());
    ctrlc::set_handler(move || match state.on_interrupt() {
        InterruptAction::Drain => warn!(
            "Interrupt received; finishing molecules in progress and skipping the rest. Press Ctrl-C again to exit immediately."
        ),
        InterruptAction::Exit => {
            eprintln!("\nInterrupted.");
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
    })
    .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to install interrupt handler: {}", e)))
}
