//! Implementation of the `oci-factory upload` command.
//!
//! This command:
//! 1. Parses the `--release` arguments
//! 2. Resolves the build context from the git checkout and reads the image name
//! 3. Shows the trigger document and asks for confirmation (unless `--yes`)
//! 4. Dispatches the workflow, locates the run and follows it to completion
//!
//! A run that completes with any conclusion but `success` fails the command.

use super::confirm::require_confirmation;
use super::progress::SpinnerReporter;
use crate::cli::{GlobalArgs, UploadArgs};
use crate::client::{Conclusion, DispatchPayload, RunOutcome, WorkflowEngine};
use crate::config::Config;
use crate::context::{BuildContext, image_name};
use crate::error::{FactoryError, Result};
use crate::release::{ReleaseError, ReleaseSpec, parse_ignored_vulnerabilities, parse_releases};
use crate::trigger::TriggerDocument;
use std::env;
use std::path::Path;

/// Everything needed to dispatch a build, before any network access.
#[derive(Debug, Clone)]
pub struct UploadPlan {
    pub image_name: String,
    pub trigger_yaml: String,
}

/// Execute the `oci-factory upload` command.
pub fn cmd_upload(global: &GlobalArgs, args: UploadArgs) -> Result<()> {
    let releases = match parse_releases(&args.releases) {
        Ok(releases) => releases,
        Err(ReleaseError::NoReleaseTrack) => {
            println!("{}", capitalize(&ReleaseError::NoReleaseTrack.to_string()));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let config = Config::load_or_default(global.config.as_deref())?;
    let cwd = env::current_dir().map_err(|e| {
        FactoryError::UserError(format!("failed to get current working directory: {}", e))
    })?;

    let plan = prepare_upload(&cwd, &config, &releases, &args.ignored_vulnerabilities)?;

    println!(
        "The {} image will be built and released with following triggers:",
        plan.image_name
    );
    println!("{}", plan.trigger_yaml);

    if !global.skip_confirmation {
        require_confirmation()?;
    }

    let engine = WorkflowEngine::from_config(&config)?;
    // The token prompt must not share the terminal with a running spinner.
    engine.authenticate()?;

    let payload = DispatchPayload::new(&plan.image_name, &plan.trigger_yaml);
    let mut reporter = SpinnerReporter::new();
    let outcome = engine.run(&payload, &mut reporter)?;
    log::info!(
        "Task {} ended as run {}: {}",
        outcome.external_ref_id,
        outcome.run_id,
        outcome.conclusion
    );

    check_outcome(&outcome)
}

/// Build the trigger for the rock in `cwd`.
pub fn prepare_upload(
    cwd: &Path,
    config: &Config,
    releases: &[ReleaseSpec],
    ignored_vulnerabilities: &str,
) -> Result<UploadPlan> {
    let context = BuildContext::resolve_from(cwd, &config.source_org)?
        .with_ignored_vulnerabilities(parse_ignored_vulnerabilities(ignored_vulnerabilities));
    let image_name = image_name(cwd)?;

    let trigger_yaml = TriggerDocument::build(&context, releases, &image_name).to_yaml()?;

    Ok(UploadPlan {
        image_name,
        trigger_yaml,
    })
}

fn check_outcome(outcome: &RunOutcome) -> Result<()> {
    if outcome.conclusion == Conclusion::Success {
        Ok(())
    } else {
        Err(FactoryError::RunFailed {
            run_id: outcome.run_id,
            conclusion: outcome.conclusion.to_string(),
        })
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}
