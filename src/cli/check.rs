//! Check command.
//!
//! Loads and validates the env file without calling gcloud.

use crate::cli::deploy::Terminal;
use crate::cli::output;
use crate::core::config::DeployConfig;
use crate::core::constants::REQUIRED_KEYS;
use crate::core::runner;
use crate::error::Result;

/// Validate the env file and list its keys.
pub fn execute(config: &DeployConfig) -> Result<()> {
    let mut reporter = Terminal::new(config);
    let (vars, _) = runner::check(config, &mut reporter)?;

    output::section("Variables");
    for key in vars.keys() {
        if REQUIRED_KEYS.contains(&key) {
            output::list_item(&format!("{} (required)", output::highlight(key)));
        } else {
            output::list_item(key);
        }
    }

    Ok(())
}
