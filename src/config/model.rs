//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for the oci-factory client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // GitHub settings
    // =========================================================================
    /// Base URL of the GitHub REST API.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Base URL of the GitHub web UI, used for run links.
    #[serde(default = "default_web_url")]
    pub web_url: String,

    /// `owner/name` of the repository hosting the build workflow.
    #[serde(default = "default_repository")]
    pub repository: String,

    /// File name of the build workflow.
    #[serde(default = "default_workflow")]
    pub workflow: String,

    /// GitHub organization the rock checkout must belong to.
    #[serde(default = "default_source_org")]
    pub source_org: String,

    /// Environment variable holding the access token.
    #[serde(default = "default_token_env_var")]
    pub token_env_var: String,

    // =========================================================================
    // HTTP settings
    // =========================================================================
    /// Per-request timeout.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Total attempts for a request answered with 503.
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,

    #[serde(default = "default_retry_interval_secs")]
    pub retry_interval_secs: u64,

    // =========================================================================
    // Run tracking settings
    // =========================================================================
    /// Searches for the dispatched run before giving up.
    #[serde(default = "default_locate_attempts")]
    pub locate_attempts: u32,

    #[serde(default = "default_locate_interval_secs")]
    pub locate_interval_secs: u64,

    /// How far before the dispatch to look for the created run.
    #[serde(default = "default_locate_lookback_minutes")]
    pub locate_lookback_minutes: u64,

    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            web_url: default_web_url(),
            repository: default_repository(),
            workflow: default_workflow(),
            source_org: default_source_org(),
            token_env_var: default_token_env_var(),
            request_timeout_secs: default_request_timeout_secs(),
            retry_attempts: default_retry_attempts(),
            retry_interval_secs: default_retry_interval_secs(),
            locate_attempts: default_locate_attempts(),
            locate_interval_secs: default_locate_interval_secs(),
            locate_lookback_minutes: default_locate_lookback_minutes(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}
