//! Deploy command.
//!
//! Runs the full pipeline against gcloud and reports progress on the terminal.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::cli::output;
use crate::cli::DeployArgs;
use crate::core::config::{DeployConfig, FunctionConfig};
use crate::core::constants::ENDPOINTS;
use crate::core::env::EnvVars;
use crate::core::gcloud::Gcloud;
use crate::core::runner::{self, Options, Outcome, Reporter, Stage};
use crate::core::validation::Validated;
use crate::core::verify::{KeyStatus, VerifyReport};
use crate::error::{Error, Result};

/// Validate .env, deploy the function, verify and report.
pub fn execute(config: &DeployConfig, args: &DeployArgs) -> Result<()> {
    // Ctrl-C must not kill us while the env artifact is on disk. The handler
    // only raises a flag; the running deploy sees it, stops gcloud and
    // unwinds through cleanup.
    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = interrupted.clone();
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    })?;

    let tool = Gcloud::new(&config.tool.gcloud).with_interrupt(interrupted);
    let options = Options {
        verify: !args.no_verify,
        dry_run: args.dry_run,
        artifact_dir: None,
    };

    if args.dry_run {
        output::header("Dry run: nothing will be deployed");
    } else {
        output::header(&format!(
            "Deploying function '{}' to Google Cloud Functions",
            config.function.name
        ));
    }

    let mut reporter = Terminal::new(config);
    match runner::run(&tool, config, &options, &mut reporter)? {
        Outcome::DryRun => {}
        Outcome::Deployed { .. } => report(&config.function),
    }

    Ok(())
}

/// Print the function URL and its endpoints.
fn report(function: &FunctionConfig) {
    output::section("Function URL");
    println!("{}", output::highlight(function.url()));

    output::section("Endpoints");
    for (method, route, description) in ENDPOINTS {
        output::list_item(&format!("{} {:<28} {}", method, route, description));
    }

    println!();
    output::success("deployment complete");
}

/// Prints pipeline progress.
pub(crate) struct Terminal<'a> {
    config: &'a DeployConfig,
}

impl<'a> Terminal<'a> {
    pub(crate) fn new(config: &'a DeployConfig) -> Self {
        Self { config }
    }
}

impl Reporter for Terminal<'_> {
    fn stage(&mut self, stage: Stage) {
        match stage {
            Stage::Load => output::dimmed(&format!(
                "reading env vars from {}",
                self.config.env.file.display()
            )),
            Stage::Deploy => {
                output::section("Deploying");
                output::kv("function:", &self.config.function.name);
                output::kv("region:  ", &self.config.function.region);
                output::kv("runtime: ", &self.config.function.runtime);
                println!();
            }
            Stage::Verify => output::section("Verifying environment variables"),
            _ => {}
        }
    }

    fn validated(&mut self, vars: &EnvVars, validated: &Validated) {
        for key in &validated.missing_recommended {
            output::warn(&format!("{} is not defined in the env file", output::highlight(key)));
        }
        output::success(&format!("env vars verified ({} keys)", vars.len()));
    }

    fn artifact_written(&mut self, path: &Path) {
        output::success(&format!(
            "env file written: {}",
            output::highlight(path.display())
        ));
    }

    fn dry_run(&mut self, command_line: &str, vars: &EnvVars) {
        output::section("Would run");
        println!("{}", output::highlight(command_line));

        output::section("With variables");
        for key in vars.keys() {
            output::list_item(key);
        }
    }

    fn deployed(&mut self) {
        println!();
        output::success("deployment succeeded");
    }

    fn verified(&mut self, report: &VerifyReport) {
        print_report(report);
    }

    fn verify_failed(&mut self, error: &Error) {
        output::warn(&format!("could not verify deployment: {}", error));
    }

    fn cleanup_failed(&mut self, path: &Path, error: &std::io::Error) {
        output::warn(&format!(
            "failed to remove {}: {}",
            output::highlight(path.display()),
            error
        ));
    }
}

/// Print one line per required key.
pub(crate) fn print_report(report: &VerifyReport) {
    for (key, status) in &report.keys {
        match status {
            KeyStatus::Configured => output::success(&format!("{} is configured", output::highlight(key))),
            KeyStatus::InvalidJson => output::warn(&format!(
                "{} is configured but is not valid JSON",
                output::highlight(key)
            )),
            KeyStatus::Missing => {
                output::warn(&format!("{} is NOT configured", output::highlight(key)))
            }
        }
    }
}
