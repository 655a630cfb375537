//! Git command runner for oci-factory.
//!
//! Provides a thin wrapper around git commands with captured stdout/stderr
//! and structured error handling. All git queries go through this module.

use crate::error::{FactoryError, Result};
use std::path::Path;
use std::process::{Command, Output};

/// Result of a successful git command execution.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Standard output from the command (trimmed).
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
}

impl GitOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }

    /// Returns stdout lines as a vector.
    pub fn lines(&self) -> Vec<&str> {
        if self.stdout.is_empty() {
            Vec::new()
        } else {
            self.stdout.lines().collect()
        }
    }
}

/// Run a git command with the specified working directory.
///
/// # Returns
///
/// * `Ok(GitOutput)` - On successful execution (exit code 0)
/// * `Err(FactoryError::UserError)` - Not inside a git repository
/// * `Err(FactoryError::GitError)` - Any other non-zero exit code
pub fn run_git<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<GitOutput> {
    let cwd = cwd.as_ref();

    let output = Command::new("git")
        .current_dir(cwd)
        .args(args)
        .output()
        .map_err(|e| {
            FactoryError::GitError(format!(
                "failed to execute git {}: {} (is git installed?)",
                args.first().unwrap_or(&""),
                e
            ))
        })?;

    let git_output = GitOutput::from_output(&output);

    if output.status.success() {
        return Ok(git_output);
    }

    if git_output.stderr.contains("not a git repository") {
        return Err(FactoryError::UserError(
            "not inside a git repository. Run oci-factory from within a rock checkout.".to_string(),
        ));
    }

    let exit_code = output.status.code().unwrap_or(-1);
    let error_msg = if git_output.stderr.is_empty() {
        git_output.stdout
    } else {
        git_output.stderr
    };

    Err(FactoryError::GitError(format!(
        "git {} failed (exit code {}): {}",
        args.first().unwrap_or(&""),
        exit_code,
        error_msg
    )))
}

/// Get the URL of the first configured remote.
///
/// # Returns
///
/// * `Ok(String)` - The fetch URL of the first remote listed by `git remote`
/// * `Err(FactoryError::UserError)` - The repository has no remote
pub fn first_remote_url<P: AsRef<Path>>(cwd: P) -> Result<String> {
    let cwd = cwd.as_ref();
    let remotes = run_git(cwd, &["remote"])?;

    let Some(name) = remotes.lines().first().map(|name| name.to_string()) else {
        return Err(FactoryError::UserError(
            "no valid remote exists for this repository".to_string(),
        ));
    };

    let url = run_git(cwd, &["remote", "get-url", &name])?;
    log::debug!("Remote URL: {}", url.stdout);
    Ok(url.stdout)
}

/// Get the full hash of `HEAD`.
pub fn head_commit<P: AsRef<Path>>(cwd: P) -> Result<String> {
    let output = run_git(cwd, &["rev-parse", "HEAD"])?;
    log::debug!("HEAD: {}", output.stdout);
    Ok(output.stdout)
}

/// Get the path of `cwd` relative to the repository root, as printed by
/// `git rev-parse --show-prefix` (empty at the root, `a/b/` below it).
pub fn show_prefix<P: AsRef<Path>>(cwd: P) -> Result<String> {
    let output = run_git(cwd, &["rev-parse", "--show-prefix"])?;
    Ok(output.stdout)
}
