//! GitHub Actions client for the OCI Factory `Image.yaml` workflow.
//!
//! The flow is: dispatch the workflow with the trigger document, find the
//! run the dispatch created (the dispatch API does not return its id), then
//! poll that run until it completes.
//!
//! Everything is blocking and single-threaded; waits between retries and
//! polls are plain sleeps.

mod api;
mod dispatch;
mod endpoints;
mod engine;
mod locate;
mod poll;
mod token;
mod transport;


pub use api::{Conclusion, RunStatus};
pub use dispatch::{DispatchPayload, Submission};
pub use endpoints::Endpoints;
pub use engine::{EngineSettings, ProgressReporter, RunOutcome, RunPhase, WorkflowEngine};
pub use poll::JobProgress;
pub use token::{TOKEN_ENV_VAR, TokenProvider};
pub use transport::{ApiRequest, ApiResponse, HttpBackend, RetryPolicy, Transport};
