//! Verify command.
//!
//! Describes the deployed function and reports its required env vars.

use crate::cli::deploy::print_report;
use crate::cli::output;
use crate::core::config::DeployConfig;
use crate::core::gcloud::{DeployTool, Gcloud};
use crate::core::verify;
use crate::error::Result;

/// Check the deployed function's environment variables.
///
/// Unlike verification after a deploy, a failing describe is an error here.
pub fn execute(config: &DeployConfig) -> Result<()> {
    let tool = Gcloud::new(&config.tool.gcloud);
    tool.probe()?;

    output::header(&format!(
        "Verifying function '{}' in {}",
        config.function.name, config.function.region
    ));
    let report = verify::verify(&tool, &config.function)?;
    print_report(&report);

    if !report.is_healthy() {
        output::hint("run: meli-deploy deploy");
    }

    Ok(())
}
