//! Terminal progress for a dispatched run.

use crate::client::{ProgressReporter, RunPhase};
use indicatif::ProgressBar;
use std::time::Duration;

/// Spinner showing the latest phase of the run; completion and the run link
/// are printed as regular lines so they stay in the scrollback.
pub struct SpinnerReporter {
    bar: ProgressBar,
}

impl SpinnerReporter {
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar }
    }
}

impl Default for SpinnerReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for SpinnerReporter {
    fn phase(&mut self, external_ref_id: &str, phase: &RunPhase) {
        let message = describe(external_ref_id, phase);
        if let RunPhase::Terminal { .. } = phase {
            self.bar.finish_and_clear();
            println!("{}", message);
        } else {
            self.bar.set_message(message);
        }
    }

    fn run_located(&mut self, external_ref_id: &str, _run_id: u64, url: &str) {
        self.bar.suspend(|| {
            println!(
                "Task {} started. Details available at {}",
                external_ref_id, url
            )
        });
    }
}

impl Drop for SpinnerReporter {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

/// One-line description of a phase.
pub fn describe(external_ref_id: &str, phase: &RunPhase) -> String {
    match phase {
        RunPhase::Submitted => format!("Task {} submitted", external_ref_id),
        RunPhase::Locating {
            attempt,
            max_attempts,
        } => format!(
            "Looking for the run of task {} ({}/{})",
            external_ref_id, attempt, max_attempts
        ),
        RunPhase::Polling {
            status, progress, ..
        } => match progress {
            Some(progress) if !progress.job_name.is_empty() => format!(
                "Task {} is currently {}: {} ({}/{})",
                external_ref_id,
                status,
                progress.display_name(),
                progress.current,
                progress.total
            ),
            Some(progress) => format!(
                "Task {} is currently {} ({}/{})",
                external_ref_id, status, progress.current, progress.total
            ),
            None => format!("Task {} is currently {}", external_ref_id, status),
        },
        RunPhase::Terminal { conclusion, .. } => {
            format!("Task {} finished with status {}", external_ref_id, conclusion)
        }
    }
}
