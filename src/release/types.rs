//! Release types and parse errors.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Stability tier of a release within a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Risk {
    Stable,
    Candidate,
    Beta,
    Edge,
}

impl Risk {
    /// All risks, most stable first.
    pub const ALL: [Risk; 4] = [Risk::Stable, Risk::Candidate, Risk::Beta, Risk::Edge];

    /// Parse a risk from its lowercase name.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|risk| risk.as_str() == s)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Risk::Stable => "stable",
            Risk::Candidate => "candidate",
            Risk::Beta => "beta",
            Risk::Edge => "edge",
        }
    }
}

impl fmt::Display for Risk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validated release instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSpec {
    /// Release track, e.g. `1.0-22.04`.
    pub track: String,
    /// Risks to release into, in order of first appearance, never empty.
    pub risks: Vec<Risk>,
    /// End of life as an RFC3339 instant at midnight UTC.
    pub end_of_life: String,
}

/// Errors produced while parsing `--release` and related arguments.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReleaseError {
    /// No `--release` argument was given at all.
    #[error("no release track specified, no build will be triggered")]
    NoReleaseTrack,

    /// A fragment could not be attributed to any `key=value` group.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A key other than `track`, `risks` or `eol`.
    #[error("invalid key-value pair: {key}={value}")]
    InvalidKeyValue { key: String, value: String },

    #[error("invalid track value: {0}")]
    InvalidTrack(String),

    #[error("invalid risk value: {0}")]
    InvalidRisk(String),

    #[error("invalid eol value: {0}")]
    InvalidEol(String),

    /// The `eol` value is not a real `YYYY-MM-DD` calendar date.
    #[error("invalid end-of-life date: {0}")]
    InvalidDate(String),

    /// The same key appeared twice in one argument.
    #[error("duplicated value for {0}")]
    DuplicatedValue(&'static str),

    /// Required keys are absent, in the order track, risks, eol.
    #[error("missing fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}
