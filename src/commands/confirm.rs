//! Interactive confirmation before dispatching a build.

use crate::error::{FactoryError, Result};
use std::io::{self, BufRead, IsTerminal, Write};

const PROMPT: &str = "Do you want to continue? [y/N]: ";

/// Ask on the terminal whether to go ahead.
///
/// # Returns
///
/// * `Ok(())` - The user answered yes
/// * `Err(FactoryError::Cancelled)` - The user answered no, or stdin closed
/// * `Err(FactoryError::UserError)` - stdin is not a terminal
pub fn require_confirmation() -> Result<()> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return Err(FactoryError::UserError(
            "non-interactive terminal detected, run with -y to skip the confirmation".to_string(),
        ));
    }

    if ask(&mut stdin.lock(), &mut io::stdout())? {
        Ok(())
    } else {
        Err(FactoryError::Cancelled)
    }
}

/// Prompt until the answer is yes or no. An empty answer or end of input means no.
fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<bool> {
    loop {
        write!(output, "{}", PROMPT).map_err(prompt_error)?;
        output.flush().map_err(prompt_error)?;

        let mut line = String::new();
        if input.read_line(&mut line).map_err(prompt_error)? == 0 {
            writeln!(output).map_err(prompt_error)?;
            return Ok(false);
        }

        match line.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "" | "n" | "no" => return Ok(false),
            other => {
                writeln!(output, "Please answer y or n (got '{}').", other).map_err(prompt_error)?
            }
        }
    }
}

fn prompt_error(e: io::Error) -> FactoryError {
    FactoryError::UserError(format!("failed to read confirmation: {}", e))
}
