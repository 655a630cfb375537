use crate::config::Config;
use chrono::{DateTime, Utc};

/// URLs of the workflow and its runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    api_url: String,
    web_url: String,
    repository: String,
    workflow: String,
}

impl Endpoints {
    pub fn new(api_url: &str, web_url: &str, repository: &str, workflow: &str) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            web_url: web_url.trim_end_matches('/').to_string(),
            repository: repository.trim_matches('/').to_string(),
            workflow: workflow.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.api_url,
            &config.web_url,
            &config.repository,
            &config.workflow,
        )
    }

    fn workflow_url(&self) -> String {
        format!(
            "{}/repos/{}/actions/workflows/{}",
            self.api_url, self.repository, self.workflow
        )
    }

    pub fn dispatch_url(&self) -> String {
        format!("{}/dispatches", self.workflow_url())
    }

    /// Runs of the workflow created strictly after `created_after` (minute precision).
    pub fn workflow_runs_url(&self, created_after: DateTime<Utc>) -> String {
        format!(
            "{}/runs?created=%3E{}",
            self.workflow_url(),
            created_after.format("%Y-%m-%dT%H:%M")
        )
    }

    pub fn run_url(&self, run_id: u64) -> String {
        format!(
            "{}/repos/{}/actions/runs/{}",
            self.api_url, self.repository, run_id
        )
    }

    pub fn run_jobs_url(&self, run_id: u64) -> String {
        format!("{}/jobs", self.run_url(run_id))
    }

    /// Page of the run in the GitHub web UI.
    pub fn run_html_url(&self, run_id: u64) -> String {
        format!(
            "{}/{}/actions/runs/{}",
            self.web_url, self.repository, run_id
        )
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
