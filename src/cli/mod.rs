//! CLI argument parsing for oci-factory.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::config::CONFIG_ENV_VAR;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Trigger and track OCI Factory image builds and releases.
///
/// Run from inside a rock's directory (the one holding `rockcraft.yaml`)
/// in a checkout of a repository owned by the expected GitHub organization.
#[derive(Parser, Debug)]
#[command(name = "oci-factory")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true, arg_required_else_help = true)]
pub struct Cli {
    /// Skip the confirmation before uploading and releasing an image.
    #[arg(short = 'y', long = "yes", global = true)]
    pub skip_confirmation: bool,

    /// Path to a YAML config file overriding the GitHub endpoints and timings.
    #[arg(long, global = true, env = CONFIG_ENV_VAR, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for info, -vv for debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for oci-factory.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Trigger the build and release of the rock in the current directory.
    ///
    /// Builds the trigger document from the checkout and the `--release`
    /// arguments, shows it, and after confirmation dispatches the OCI Factory
    /// workflow and follows the run until it finishes.
    Upload(UploadArgs),
}

/// Arguments for the `upload` command.
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Release to perform, as `track=<track>,risks=<risk>[,<risk>...],eol=YYYY-MM-DD`.
    ///
    /// May be given more than once. Risks are stable, candidate, beta and edge.
    #[arg(long = "release", value_name = "SPEC")]
    pub releases: Vec<String>,

    /// Comma-separated vulnerability IDs to ignore during the build's scan.
    #[arg(long, value_name = "IDS", default_value = "")]
    pub ignored_vulnerabilities: String,
}

/// Options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub skip_confirmation: bool,
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Split into the global options and the command to run.
    pub fn into_parts(self) -> (GlobalArgs, Command) {
        (
            GlobalArgs {
                skip_confirmation: self.skip_confirmation,
                config: self.config,
            },
            self.command,
        )
    }
}
