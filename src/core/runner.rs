//! The deployment pipeline.
//!
//! ```text
//! Preflight → Load → Validate → Materialize → Deploy → Verify → Cleanup
//! ```
//!
//! Failures before Materialize return straight away. From Materialize on, the
//! env artifact is owned by this module and removed on every path: explicitly
//! on return, by its destructor if the deploy tool panics. An interrupted
//! deploy comes back as `ToolError::Interrupted` and takes the return path.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::core::artifact::EnvArtifact;
use crate::core::config::DeployConfig;
use crate::core::env::EnvVars;
use crate::core::gcloud::DeployTool;
use crate::core::validation::{self, Validated};
use crate::core::verify::{self, VerifyReport};
use crate::error::{Error, Result, ToolError};

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Preflight,
    Load,
    Validate,
    Materialize,
    Deploy,
    Verify,
    Cleanup,
}

/// Progress sink for a pipeline run. All methods default to no-ops.
pub trait Reporter {
    fn stage(&mut self, _stage: Stage) {}
    fn validated(&mut self, _vars: &EnvVars, _validated: &Validated) {}
    fn artifact_written(&mut self, _path: &Path) {}
    fn dry_run(&mut self, _command_line: &str, _vars: &EnvVars) {}
    fn deployed(&mut self) {}
    fn verified(&mut self, _report: &VerifyReport) {}
    fn verify_failed(&mut self, _error: &Error) {}
    fn cleanup_failed(&mut self, _path: &Path, _error: &std::io::Error) {}
}

/// Reporter that discards everything.
#[derive(Debug, Default)]
pub struct Silent;

impl Reporter for Silent {}

/// Run options.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Describe the function after deploying it.
    pub verify: bool,
    /// Stop after Materialize and report what would run.
    pub dry_run: bool,
    /// Where to put the env artifact; the system temp dir if unset.
    pub artifact_dir: Option<PathBuf>,
}

/// Result of the verification step.
#[derive(Debug)]
pub enum Verification {
    Skipped,
    Report(VerifyReport),
    /// Verification could not run; a warning, never a failure.
    Failed(Error),
}

/// Result of a successful run.
#[derive(Debug)]
pub enum Outcome {
    Deployed { verification: Verification },
    DryRun,
}

/// Load and validate the env file without touching the deploy tool.
///
/// # Errors
///
/// Returns env file and validation errors.
pub fn check(
    config: &DeployConfig,
    reporter: &mut dyn Reporter,
) -> Result<(EnvVars, Validated)> {
    reporter.stage(Stage::Load);
    let vars = EnvVars::load(&config.env.file)?;

    reporter.stage(Stage::Validate);
    let validated = validation::validate(&vars)?;
    reporter.validated(&vars, &validated);

    Ok((vars, validated))
}

/// Run the full pipeline.
///
/// # Errors
///
/// Returns the first fatal error. The env artifact has been removed by the
/// time this returns, whatever the outcome.
pub fn run(
    tool: &dyn DeployTool,
    config: &DeployConfig,
    options: &Options,
    reporter: &mut dyn Reporter,
) -> Result<Outcome> {
    if !options.dry_run {
        reporter.stage(Stage::Preflight);
        tool.probe()?;
    }

    let (vars, _) = check(config, reporter)?;

    reporter.stage(Stage::Materialize);
    let artifact = match &options.artifact_dir {
        Some(dir) => EnvArtifact::create_in(dir, &vars)?,
        None => EnvArtifact::create(&vars)?,
    };
    reporter.artifact_written(artifact.path());

    let result = if options.dry_run {
        let command_line = tool.command_line(&config.function, artifact.path());
        reporter.dry_run(&command_line, &vars);
        Ok(Outcome::DryRun)
    } else {
        deploy_and_verify(tool, config, options, artifact.path(), reporter)
    };

    reporter.stage(Stage::Cleanup);
    let path = artifact.path().to_path_buf();
    if let Err(e) = artifact.close() {
        warn!(path = %path.display(), error = %e, "failed to remove env artifact");
        reporter.cleanup_failed(&path, &e);
    }

    result
}

fn deploy_and_verify(
    tool: &dyn DeployTool,
    config: &DeployConfig,
    options: &Options,
    env_file: &Path,
    reporter: &mut dyn Reporter,
) -> Result<Outcome> {
    reporter.stage(Stage::Deploy);
    match tool.deploy(&config.function, env_file)? {
        Some(0) => {}
        code => {
            return Err(ToolError::DeployFailed {
                binary: tool.name(),
                code,
            }
            .into())
        }
    }
    reporter.deployed();

    if !options.verify {
        return Ok(Outcome::Deployed {
            verification: Verification::Skipped,
        });
    }

    reporter.stage(Stage::Verify);
    let verification = match verify::verify(tool, &config.function) {
        Ok(report) => {
            reporter.verified(&report);
            Verification::Report(report)
        }
        Err(e) => {
            debug!(error = %e, "verification failed");
            reporter.verify_failed(&e);
            Verification::Failed(e)
        }
    };

    Ok(Outcome::Deployed { verification })
}
