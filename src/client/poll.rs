//! Polling a located run until it completes.

use super::api::{Conclusion, RunStatus, WorkflowJob, WorkflowJobs, WorkflowRun, decode};
use super::engine::{ProgressReporter, RunPhase, WorkflowEngine};
use super::transport::HttpBackend;
use crate::error::Result;
use std::thread;

/// Position of the active job within a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobProgress {
    /// 1-based index of the active job, or `total` when all are done.
    pub current: usize,
    pub total: usize,
    /// Name of the active job; empty when all are done.
    pub job_name: String,
}

impl JobProgress {
    /// Job name without its matrix suffix, e.g. `Build (amd64)` becomes `Build`.
    pub fn display_name(&self) -> &str {
        self.job_name
            .split(" (")
            .next()
            .unwrap_or(self.job_name.as_str())
    }
}

/// Progress of a run from its job list.
///
/// The active job is the first one queued or in progress. With none active
/// and the last job completed, the run counts as fully done. Any other
/// shape (no jobs, or jobs waiting on something) has no known progress.
pub fn job_progress(jobs: &[WorkflowJob]) -> Option<JobProgress> {
    let total = jobs.len();

    if let Some((index, job)) = jobs
        .iter()
        .enumerate()
        .find(|(_, job)| job.status.is_active())
    {
        return Some(JobProgress {
            current: index + 1,
            total,
            job_name: job.name.clone(),
        });
    }

    match jobs.last() {
        Some(last) if last.status == RunStatus::Completed => Some(JobProgress {
            current: total,
            total,
            job_name: String::new(),
        }),
        _ => None,
    }
}

impl<B: HttpBackend> WorkflowEngine<B> {
    /// Poll run `run_id` until it completes and return its conclusion.
    ///
    /// There is no overall timeout; the loop ends only when the run does.
    pub fn poll(
        &self,
        external_ref_id: &str,
        run_id: u64,
        reporter: &mut dyn ProgressReporter,
    ) -> Result<Conclusion> {
        let run_url = self.endpoints.run_url(run_id);
        let jobs_url = self.endpoints.run_jobs_url(run_id);

        loop {
            let run: WorkflowRun = decode(&self.transport.get(&run_url)?, "workflow run")?;

            if run.status == RunStatus::Completed {
                let conclusion = run.conclusion.unwrap_or(Conclusion::Unknown);
                log::info!("Run {} completed: {}", run_id, conclusion);
                reporter.phase(
                    external_ref_id,
                    &RunPhase::Terminal { run_id, conclusion },
                );
                return Ok(conclusion);
            }

            let jobs: WorkflowJobs = decode(&self.transport.get(&jobs_url)?, "jobs")?;
            for job in &jobs.jobs {
                log::debug!("Job {}: {} {:?}", job.name, job.status, job.conclusion);
            }
            reporter.phase(
                external_ref_id,
                &RunPhase::Polling {
                    run_id,
                    status: run.status,
                    progress: job_progress(&jobs.jobs),
                },
            );

            thread::sleep(self.settings.poll_interval);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jobs(statuses: &[RunStatus]) -> Vec<WorkflowJob> {
        statuses
            .iter()
            .enumerate()
            .map(|(i, status)| WorkflowJob {
                name: format!("Job {}", i + 1),
                status: *status,
                conclusion: None,
                steps: vec![],
            })
            .collect()
    }

    #[test]
    fn first_active_job_is_current() {
        let progress = job_progress(&jobs(&[
            RunStatus::Completed,
            RunStatus::InProgress,
            RunStatus::Queued,
        ]))
        .unwrap();
        assert_eq!(
            progress,
            JobProgress {
                current: 2,
                total: 3,
                job_name: "Job 2".to_string(),
            }
        );
    }

    #[test]
    fn queued_job_counts_as_active() {
        let progress = job_progress(&jobs(&[RunStatus::Completed, RunStatus::Queued])).unwrap();
        assert_eq!(progress.current, 2);
    }

    #[test]
    fn all_completed_is_fully_done() {
        let progress = job_progress(&jobs(&[
            RunStatus::Completed,
            RunStatus::Completed,
            RunStatus::Completed,
        ]))
        .unwrap();
        assert_eq!(progress.current, 3);
        assert_eq!(progress.total, 3);
        assert_eq!(progress.job_name, "");
    }

    #[test]
    fn no_jobs_has_no_progress() {
        assert_eq!(job_progress(&[]), None);
    }

    #[test]
    fn waiting_last_job_has_no_progress() {
        assert_eq!(
            job_progress(&jobs(&[RunStatus::Completed, RunStatus::Waiting])),
            None
        );
    }

    #[test]
    fn display_name_drops_matrix_suffix() {
        let progress = JobProgress {
            current: 1,
            total: 4,
            job_name: "Build rock (amd64, mock-rock)".to_string(),
        };
        assert_eq!(progress.display_name(), "Build rock");

        let plain = JobProgress {
            job_name: "Prepare build".to_string(),
            ..progress
        };
        assert_eq!(plain.display_name(), "Prepare build");
    }
}
