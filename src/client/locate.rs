//! Finding the run created by a dispatch.
//!
//! The workflow's "Prepare build" job names one of its steps after the
//! external ref id sent in the dispatch. Recent runs are scanned for that
//! step until it shows up or the attempt budget runs out.

use super::api::{WorkflowJob, WorkflowJobs, WorkflowRuns, decode};
use super::dispatch::Submission;
use super::engine::{ProgressReporter, RunPhase, WorkflowEngine};
use super::transport::HttpBackend;
use crate::error::{FactoryError, Result};
use chrono::{DateTime, TimeDelta, Utc};
use std::thread;

/// Job whose steps carry the external ref id.
pub const PREPARE_BUILD_JOB: &str = "Prepare build";

impl<B: HttpBackend> WorkflowEngine<B> {
    /// Find the id of the run started by `submission`.
    ///
    /// # Returns
    ///
    /// * `Ok(run_id)` - The first run, in API order, carrying the external ref id
    /// * `Err(FactoryError::RunNotFound)` - No match after every attempt
    pub fn locate(
        &self,
        submission: &Submission,
        reporter: &mut dyn ProgressReporter,
    ) -> Result<u64> {
        let created_after = TimeDelta::from_std(self.settings.locate_lookback)
            .ok()
            .and_then(|lookback| submission.submitted_at.checked_sub_signed(lookback))
            .ok_or_else(|| {
                FactoryError::UserError("locate look-back window is out of range".to_string())
            })?;
        let max_attempts = self.settings.locate_attempts.max(1);

        for attempt in 1..=max_attempts {
            reporter.phase(
                &submission.external_ref_id,
                &RunPhase::Locating {
                    attempt,
                    max_attempts,
                },
            );

            if let Some(run_id) = self.find_run(&submission.external_ref_id, created_after)? {
                log::info!(
                    "Found run {} for task {} on attempt {}",
                    run_id,
                    submission.external_ref_id,
                    attempt
                );
                return Ok(run_id);
            }

            log::info!(
                "Run for task {} not found yet ({}/{})",
                submission.external_ref_id,
                attempt,
                max_attempts
            );
            if attempt < max_attempts {
                thread::sleep(self.settings.locate_interval);
            }
        }

        Err(FactoryError::RunNotFound {
            external_ref_id: submission.external_ref_id.clone(),
            attempts: max_attempts,
        })
    }

    /// One list-then-scan pass over runs created after `created_after`.
    pub fn find_run(
        &self,
        external_ref_id: &str,
        created_after: DateTime<Utc>,
    ) -> Result<Option<u64>> {
        let url = self.endpoints.workflow_runs_url(created_after);
        let runs: WorkflowRuns = decode(&self.transport.get(&url)?, "workflow runs")?;
        log::debug!("{} candidate runs", runs.total_count);

        for run in &runs.workflow_runs {
            let jobs: WorkflowJobs = decode(&self.transport.get(&run.jobs_url)?, "jobs")?;
            if carries_reference(&jobs.jobs, external_ref_id) {
                return Ok(Some(run.id));
            }
        }

        Ok(None)
    }
}

fn carries_reference(jobs: &[WorkflowJob], external_ref_id: &str) -> bool {
    jobs.iter()
        .filter(|job| job.name == PREPARE_BUILD_JOB)
        .any(|job| job.steps.iter().any(|step| step.name == external_ref_id))
}
