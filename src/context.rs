//! Build context resolution for oci-factory.
//!
//! The factory builds a rock from a directory of a GitHub repository at a
//! given commit. This module infers those three facts from the checkout the
//! CLI runs in, and reads the image name from the rock's `rockcraft.yaml`.

use crate::error::{FactoryError, Result};
use crate::git;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

/// Rock definition that must exist in the working directory.
pub const ROCKCRAFT_FILE: &str = "rockcraft.yaml";

/// Where the image is built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildContext {
    /// GitHub `org/repo` of the checkout.
    pub source: String,
    /// Full hash of `HEAD`.
    pub commit: String,
    /// Repository-relative directory, always starting with `./`.
    pub directory: String,
    /// Vulnerability findings to ignore during the build.
    pub ignored_vulnerabilities: Vec<String>,
}

impl BuildContext {
    /// Resolve the build context of the rock in `cwd`.
    ///
    /// # Returns
    ///
    /// * `Ok(BuildContext)` - With no ignored vulnerabilities
    /// * `Err(FactoryError::UserError)` - No `rockcraft.yaml`, not a git
    ///   checkout, or the remote does not belong to `source_org` on GitHub
    /// * `Err(FactoryError::GitError)` - A git query failed
    pub fn resolve_from<P: AsRef<Path>>(cwd: P, source_org: &str) -> Result<Self> {
        let cwd = cwd.as_ref();
        require_rockcraft_file(cwd)?;

        let remote_url = git::first_remote_url(cwd)?;
        let source = source_from_remote_url(&remote_url, source_org).ok_or_else(|| {
            FactoryError::UserError(format!(
                "oci-factory must be called in a git local repository belonging to the organization [{}]",
                source_org
            ))
        })?;
        log::debug!("Source: {}", source);

        let commit = git::head_commit(cwd)?;
        let directory = format!("./{}", git::show_prefix(cwd)?);
        log::debug!("Directory: {}", directory);

        Ok(Self {
            source,
            commit,
            directory,
            ignored_vulnerabilities: Vec::new(),
        })
    }

    /// Attach the vulnerability findings to ignore.
    pub fn with_ignored_vulnerabilities(mut self, ignored: Vec<String>) -> Self {
        self.ignored_vulnerabilities = ignored;
        self
    }
}

/// Extract `org/repo` from a GitHub remote URL (https or ssh form).
pub fn source_from_remote_url(remote_url: &str, source_org: &str) -> Option<String> {
    let pattern = format!(
        r"github\.com[:/]({}/[A-Za-z0-9_-]*)(\.git)?",
        regex::escape(source_org)
    );
    let regex = Regex::new(&pattern).ok()?;
    regex
        .captures(remote_url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[derive(Debug, Deserialize)]
struct RockcraftFile {
    name: String,
}

/// Read the image name from `rockcraft.yaml` in `dir`.
pub fn image_name<P: AsRef<Path>>(dir: P) -> Result<String> {
    let path = dir.as_ref().join(ROCKCRAFT_FILE);

    let content = std::fs::read_to_string(&path).map_err(|e| {
        FactoryError::UserError(format!(
            "unable to read {} in current working directory: {}",
            ROCKCRAFT_FILE, e
        ))
    })?;

    let rockcraft: RockcraftFile = serde_yaml::from_str(&content).map_err(|e| {
        FactoryError::UserError(format!("failed to parse {}: {}", path.display(), e))
    })?;

    log::debug!("Image name: {}", rockcraft.name);
    Ok(rockcraft.name)
}

fn require_rockcraft_file(cwd: &Path) -> Result<()> {
    if cwd.join(ROCKCRAFT_FILE).is_file() {
        Ok(())
    } else {
        Err(FactoryError::UserError(format!(
            "no {} found in current working directory",
            ROCKCRAFT_FILE
        )))
    }
}
