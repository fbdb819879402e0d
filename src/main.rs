//! meli-deploy - Deploys the meli Cloud Function with variables from .env.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use meli_deploy::cli::output;
use meli_deploy::cli::{execute, Cli};
use meli_deploy::core::constants::REQUIRED_KEYS;
use meli_deploy::error::{EnvError, Error, ToolError, ValidationError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("MELI_DEPLOY_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("meli_deploy=debug")
        } else {
            EnvFilter::new("meli_deploy=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    // Errors come back here rather than exiting in place so the env
    // artifact is already dropped (and deleted) by the time we exit.
    if let Err(e) = execute(cli.command, &cli.global) {
        output::error(&e.to_string());
        if let Some(hint) = suggestion(&e) {
            output::hint(&hint);
        }
        std::process::exit(exit_code(&e));
    }
}

fn suggestion(e: &Error) -> Option<String> {
    match e {
        Error::Env(EnvError::NotFound(_)) => Some(format!(
            "create a .env file defining {}",
            REQUIRED_KEYS.join(", ")
        )),
        Error::Tool(ToolError::NotFound { .. }) => Some(
            "install the Google Cloud SDK: https://cloud.google.com/sdk/docs/install".to_string(),
        ),
        Error::Validation(ValidationError::MissingKey(key)) => {
            Some(format!("add {}=... to the env file", key))
        }
        Error::Tool(ToolError::Interrupted { .. }) => Some(
            "the function may be partially deployed; run: meli-deploy verify".to_string(),
        ),
        _ => None,
    }
}

/// 130 for an interrupted run, as a shell reports SIGINT; 1 otherwise.
fn exit_code(e: &Error) -> i32 {
    match e {
        Error::Tool(ToolError::Interrupted { .. }) => 130,
        _ => 1,
    }
}
