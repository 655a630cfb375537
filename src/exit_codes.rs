//! Exit code constants for the oci-factory CLI.
//!
//! - 0: Success (including "nothing to trigger")
//! - 1: User error (bad release arguments, missing rockcraft.yaml, cancelled)
//! - 2: Remote failure (unexpected HTTP status, malformed response, run not found)
//! - 3: Git operation failure
//! - 4: Authentication failure (GitHub rejected the token)
//! - 5: The triggered run finished with a conclusion other than success
//! - 6: Internal error (a request or trigger document could not be encoded)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: invalid arguments, invalid local state, or cancelled confirmation.
pub const USER_ERROR: i32 = 1;

/// Remote failure: the GitHub API answered unexpectedly or the run never showed up.
pub const REMOTE_FAILURE: i32 = 2;

/// Git operation failure: remote, HEAD or prefix could not be resolved.
pub const GIT_FAILURE: i32 = 3;

/// Authentication failure: the access token was rejected (HTTP 401).
pub const AUTH_FAILURE: i32 = 4;

/// The workflow run completed, but not successfully.
pub const RUN_FAILED: i32 = 5;

/// Internal error: data built by the CLI itself could not be encoded.
pub const INTERNAL_ERROR: i32 = 6;
