//! Dispatch-and-poll orchestration.
//!
//! A run moves through [`RunPhase`]s: submitted, located by its external ref
//! id, polled, and finally terminal with a conclusion. Each phase change is
//! handed to a [`ProgressReporter`].

use super::api::{Conclusion, RunStatus};
use super::dispatch::{DispatchPayload, Submission};
use super::endpoints::Endpoints;
use super::poll::JobProgress;
use super::token::TokenProvider;
use super::transport::{HttpBackend, ReqwestBackend, RetryPolicy, Transport};
use crate::config::Config;
use crate::error::Result;
use chrono::Utc;
use reqwest::{Method, StatusCode};
use std::time::Duration;

/// Where a dispatched run is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunPhase {
    /// Dispatch accepted by GitHub.
    Submitted,
    /// Searching recent runs for the external ref id.
    Locating { attempt: u32, max_attempts: u32 },
    /// Run found and still going.
    Polling {
        run_id: u64,
        status: RunStatus,
        progress: Option<JobProgress>,
    },
    /// Run completed.
    Terminal { run_id: u64, conclusion: Conclusion },
}

/// Receives phase changes of a run, identified by its external ref id.
pub trait ProgressReporter {
    fn phase(&mut self, external_ref_id: &str, phase: &RunPhase);

    /// Called once, when the run id becomes known.
    fn run_located(&mut self, external_ref_id: &str, run_id: u64, url: &str);
}

/// Timing of the locate and poll loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    pub locate_attempts: u32,
    pub locate_interval: Duration,
    /// How far before submission to look for the created run.
    pub locate_lookback: Duration,
    pub poll_interval: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            locate_attempts: 60,
            locate_interval: Duration::from_secs(5),
            locate_lookback: Duration::from_secs(5 * 60),
            poll_interval: Duration::from_secs(5),
        }
    }
}

impl EngineSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            locate_attempts: config.locate_attempts,
            locate_interval: config.locate_interval(),
            locate_lookback: config.locate_lookback(),
            poll_interval: config.poll_interval(),
        }
    }
}

/// Final state of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub external_ref_id: String,
    pub run_id: u64,
    pub conclusion: Conclusion,
}

pub struct WorkflowEngine<B> {
    pub(super) transport: Transport<B>,
    pub(super) endpoints: Endpoints,
    pub(super) settings: EngineSettings,
}

impl WorkflowEngine<ReqwestBackend> {
    /// Engine talking to GitHub, with the token taken from the configured
    /// environment variable or prompted for.
    pub fn from_config(config: &Config) -> Result<Self> {
        let backend = ReqwestBackend::new(config.request_timeout())?;
        let retry = RetryPolicy {
            attempts: config.retry_attempts,
            interval: config.retry_interval(),
        };
        let transport = Transport::new(
            backend,
            TokenProvider::from_env(config.token_env_var.clone()),
            retry,
        );

        Ok(Self::new(
            transport,
            Endpoints::from_config(config),
            EngineSettings::from_config(config),
        ))
    }
}

impl<B: HttpBackend> WorkflowEngine<B> {
    pub fn new(transport: Transport<B>, endpoints: Endpoints, settings: EngineSettings) -> Self {
        Self {
            transport,
            endpoints,
            settings,
        }
    }

    /// Resolve the access token, prompting for it if needed.
    ///
    /// Call this before any progress output starts so the prompt stays visible.
    pub fn authenticate(&self) -> Result<()> {
        self.transport.authenticate()
    }

    /// Dispatch the workflow.
    pub fn submit(
        &self,
        payload: &DispatchPayload,
        reporter: &mut dyn ProgressReporter,
    ) -> Result<Submission> {
        let body = payload.to_json()?;
        let submitted_at = Utc::now();

        self.transport.send(
            Method::POST,
            &self.endpoints.dispatch_url(),
            Some(body),
            StatusCode::NO_CONTENT,
        )?;
        log::info!("Dispatched task {}", payload.external_ref_id());

        reporter.phase(payload.external_ref_id(), &RunPhase::Submitted);
        Ok(Submission {
            external_ref_id: payload.external_ref_id().to_string(),
            submitted_at,
        })
    }

    /// Submit, locate and poll a run to completion.
    pub fn run(
        &self,
        payload: &DispatchPayload,
        reporter: &mut dyn ProgressReporter,
    ) -> Result<RunOutcome> {
        let submission = self.submit(payload, reporter)?;
        let run_id = self.locate(&submission, reporter)?;

        let url = self.endpoints.run_html_url(run_id);
        reporter.run_located(&submission.external_ref_id, run_id, &url);

        let conclusion = self.poll(&submission.external_ref_id, run_id, reporter)?;
        Ok(RunOutcome {
            external_ref_id: submission.external_ref_id,
            run_id,
            conclusion,
        })
    }
}
