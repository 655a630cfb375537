//! Error types for the oci-factory CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use crate::release::ReleaseError;
use thiserror::Error;

/// Main error type for oci-factory operations.
///
/// Each variant maps to an exit code; see [`FactoryError::exit_code`].
#[derive(Error, Debug)]
pub enum FactoryError {
    /// User provided invalid arguments or the checkout is in an invalid state.
    #[error("{0}")]
    UserError(String),

    /// A `--release` argument could not be parsed.
    #[error("error parsing release arguments: {0}")]
    Release(#[from] ReleaseError),

    /// The user declined the confirmation prompt.
    #[error("Cancelled")]
    Cancelled,

    /// Git operation failed.
    #[error("Git operation failed: {0}")]
    GitError(String),

    /// GitHub rejected the access token.
    #[error("request failed: {status}\nPlease check if your GitHub token is correct")]
    Unauthorized { status: String },

    /// The API answered with a status other than the expected one.
    #[error("request failed: {status}\nResponse: {body}")]
    HttpStatus { status: String, body: String },

    /// The request could not be sent or its response could not be read.
    #[error("failed to send request: {0}")]
    Transport(String),

    /// The API answered with a body that does not match the expected schema.
    #[error("unexpected response from GitHub: {0}")]
    Protocol(String),

    /// Data built by the CLI could not be encoded.
    #[error("failed to encode {0}")]
    Encoding(String),

    /// The dispatched run could not be correlated with a workflow run.
    #[error("run ID not found for task {external_ref_id} after {attempts} attempts")]
    RunNotFound {
        external_ref_id: String,
        attempts: u32,
    },

    /// The workflow run completed with a non-success conclusion.
    #[error("workflow run {run_id} finished with status {conclusion}")]
    RunFailed { run_id: u64, conclusion: String },
}

impl FactoryError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            FactoryError::UserError(_) => exit_codes::USER_ERROR,
            FactoryError::Release(_) => exit_codes::USER_ERROR,
            FactoryError::Cancelled => exit_codes::USER_ERROR,
            FactoryError::GitError(_) => exit_codes::GIT_FAILURE,
            FactoryError::Unauthorized { .. } => exit_codes::AUTH_FAILURE,
            FactoryError::HttpStatus { .. } => exit_codes::REMOTE_FAILURE,
            FactoryError::Transport(_) => exit_codes::REMOTE_FAILURE,
            FactoryError::Protocol(_) => exit_codes::REMOTE_FAILURE,
            FactoryError::RunNotFound { .. } => exit_codes::REMOTE_FAILURE,
            FactoryError::RunFailed { .. } => exit_codes::RUN_FAILED,
            FactoryError::Encoding(_) => exit_codes::INTERNAL_ERROR,
        }
    }
}

/// Result type alias for oci-factory operations.
pub type Result<T> = std::result::Result<T, FactoryError>;
