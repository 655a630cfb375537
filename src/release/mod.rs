//! Release specification parsing for `upload --release`.
//!
//! Each `--release` argument is a comma-separated list of `key=value` groups:
//!
//! ```text
//! track=<track>,risks=<risk1>[,<risk2>...],eol=YYYY-MM-DD
//! ```
//!
//! Groups may appear in any order. Every argument yields exactly one
//! [`ReleaseSpec`]; the result is returned to the caller instead of being
//! accumulated anywhere.

mod date;
mod parser;
mod types;


pub use parser::{parse_ignored_vulnerabilities, parse_releases};
pub use types::{ReleaseError, ReleaseSpec, Risk};
