//! Command implementations for oci-factory.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod confirm;
mod progress;
mod upload;

use crate::cli::{Command, GlobalArgs};
use crate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(global: GlobalArgs, command: Command) -> Result<()> {
    match command {
        Command::Upload(args) => upload::cmd_upload(&global, args),
    }
}
