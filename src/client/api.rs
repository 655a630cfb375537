//! Response schemas of the GitHub Actions REST API, limited to the fields
//! the client reads.

use crate::error::{FactoryError, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fmt;

/// Status of a workflow run or job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Requested,
    Queued,
    InProgress,
    Waiting,
    Pending,
    Completed,
    /// Any status this client does not know about.
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Requested => "requested",
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::Waiting => "waiting",
            RunStatus::Pending => "pending",
            RunStatus::Completed => "completed",
            RunStatus::Unknown => "unknown",
        }
    }

    /// A job in one of these states is the one currently being worked on.
    pub fn is_active(&self) -> bool {
        matches!(self, RunStatus::InProgress | RunStatus::Queued)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().replace('_', " "))
    }
}

/// Conclusion of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Conclusion {
    Success,
    Failure,
    Cancelled,
    TimedOut,
    ActionRequired,
    Neutral,
    Skipped,
    Stale,
    #[serde(other)]
    Unknown,
}

impl Conclusion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Conclusion::Success => "success",
            Conclusion::Failure => "failure",
            Conclusion::Cancelled => "cancelled",
            Conclusion::TimedOut => "timed_out",
            Conclusion::ActionRequired => "action_required",
            Conclusion::Neutral => "neutral",
            Conclusion::Skipped => "skipped",
            Conclusion::Stale => "stale",
            Conclusion::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Conclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `GET .../workflows/{workflow}/runs`
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowRuns {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub workflow_runs: Vec<WorkflowRunSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowRunSummary {
    pub id: u64,
    pub jobs_url: String,
}

/// `GET .../runs/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowRun {
    pub status: RunStatus,
    pub conclusion: Option<Conclusion>,
}

/// `GET .../runs/{id}/jobs`
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowJobs {
    #[serde(default)]
    pub jobs: Vec<WorkflowJob>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowJob {
    pub name: String,
    pub status: RunStatus,
    pub conclusion: Option<Conclusion>,
    #[serde(default)]
    pub steps: Vec<WorkflowStep>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowStep {
    pub name: String,
}

/// Decode a JSON response body, naming the resource on failure.
pub(crate) fn decode<T: DeserializeOwned>(body: &[u8], what: &str) -> Result<T> {
    log::debug!("{} response: {}", what, String::from_utf8_lossy(body));
    serde_json::from_slice(body)
        .map_err(|e| FactoryError::Protocol(format!("unable to parse {} response: {}", what, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_status_from_json() {
        let run: WorkflowRun =
            decode(br#"{"status":"completed","conclusion":"success"}"#, "run").unwrap();
        assert_eq!(run.status, RunStatus::Completed);
        assert_eq!(run.conclusion, Some(Conclusion::Success));
    }

    #[test]
    fn null_conclusion_while_running() {
        let run: WorkflowRun =
            decode(br#"{"status":"in_progress","conclusion":null}"#, "run").unwrap();
        assert_eq!(run.status, RunStatus::InProgress);
        assert_eq!(run.conclusion, None);
    }

    #[test]
    fn unknown_values_are_tolerated() {
        let run: WorkflowRun =
            decode(br#"{"status":"brand_new","conclusion":"startup_failure"}"#, "run").unwrap();
        assert_eq!(run.status, RunStatus::Unknown);
        assert_eq!(run.conclusion, Some(Conclusion::Unknown));
    }

    #[test]
    fn jobs_without_steps() {
        let jobs: WorkflowJobs = decode(
            br#"{"jobs":[{"name":"Job 1","status":"completed"},{"name":"Job 2","status":"queued"}]}"#,
            "jobs",
        )
        .unwrap();
        assert_eq!(jobs.jobs.len(), 2);
        assert!(jobs.jobs[0].steps.is_empty());
        assert!(jobs.jobs[1].status.is_active());
    }

    #[test]
    fn malformed_body_is_protocol_error() {
        let err = decode::<WorkflowRuns>(b"<html>oops</html>", "workflow runs").unwrap_err();
        assert!(matches!(err, FactoryError::Protocol(_)));
        assert!(err.to_string().contains("workflow runs"));
    }

    #[test]
    fn status_display_uses_spaces() {
        assert_eq!(RunStatus::InProgress.to_string(), "in progress");
        assert_eq!(Conclusion::TimedOut.to_string(), "timed_out");
    }
}
