//! Default values for the Config struct.

// Default value functions for serde
pub(crate) fn default_api_url() -> String {
    "https://api.github.com".to_string()
}
pub(crate) fn default_web_url() -> String {
    "https://github.com".to_string()
}
pub(crate) fn default_repository() -> String {
    "canonical/oci-factory".to_string()
}
pub(crate) fn default_workflow() -> String {
    "Image.yaml".to_string()
}
pub(crate) fn default_source_org() -> String {
    "canonical".to_string()
}
pub(crate) fn default_token_env_var() -> String {
    crate::client::TOKEN_ENV_VAR.to_string()
}
pub(crate) fn default_request_timeout_secs() -> u64 {
    30
}
pub(crate) fn default_retry_attempts() -> u32 {
    2
}
pub(crate) fn default_retry_interval_secs() -> u64 {
    5
}
pub(crate) fn default_locate_attempts() -> u32 {
    60
}
pub(crate) fn default_locate_interval_secs() -> u64 {
    5
}
pub(crate) fn default_locate_lookback_minutes() -> u64 {
    5
}
pub(crate) fn default_poll_interval_secs() -> u64 {
    5
}
