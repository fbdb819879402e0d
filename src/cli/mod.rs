//! Command-line interface.

pub mod check;
pub mod completions;
pub mod deploy;
pub mod output;
pub mod verify;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::config::DeployConfig;
use crate::error::Result;

/// meli-deploy - Deploys the meli Cloud Function with variables from .env.
#[derive(Parser)]
#[command(
    name = "meli-deploy",
    about = "Deploys the meli Cloud Function with environment variables from .env",
    version,
    after_help = "Runs `deploy` when no command is given."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose (debug) output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Flags shared by every command; they override `meli-deploy.toml`.
#[derive(Args, Debug, Default, Clone)]
pub struct GlobalArgs {
    /// Env file to read
    #[arg(long, global = true, env = "MELI_DEPLOY_ENV_FILE", value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Config file [default: meli-deploy.toml, if present]
    #[arg(long, global = true, env = "MELI_DEPLOY_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// gcloud binary to use
    #[arg(long, global = true, env = "MELI_DEPLOY_GCLOUD", value_name = "PATH")]
    pub gcloud: Option<PathBuf>,

    /// GCP project passed to gcloud
    #[arg(long, global = true, value_name = "ID")]
    pub project: Option<String>,

    /// Function region
    #[arg(long, global = true)]
    pub region: Option<String>,
}

impl GlobalArgs {
    /// Load the config file and apply flag overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be loaded.
    pub fn resolve(&self) -> Result<DeployConfig> {
        let mut config = DeployConfig::load(self.config.as_deref())?;

        if let Some(env_file) = &self.env_file {
            config.env.file = env_file.clone();
        }
        if let Some(gcloud) = &self.gcloud {
            config.tool.gcloud = gcloud.clone();
        }
        if let Some(project) = &self.project {
            config.function.project = Some(project.clone());
        }
        if let Some(region) = &self.region {
            config.function.region = region.clone();
        }

        Ok(config)
    }
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Validate .env and deploy the function (default)
    Deploy(DeployArgs),

    /// Validate .env without deploying
    Check,

    /// Check the environment variables of the deployed function
    Verify,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options for `deploy`.
#[derive(Args, Debug, Default, Clone)]
pub struct DeployArgs {
    /// Skip post-deployment verification
    #[arg(long)]
    pub no_verify: bool,

    /// Write the env file and print the gcloud command without running it
    #[arg(long)]
    pub dry_run: bool,
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub fn execute(command: Option<Command>, global: &GlobalArgs) -> Result<()> {
    use Command::*;

    match command.unwrap_or_else(|| Deploy(DeployArgs::default())) {
        Deploy(args) => deploy::execute(&global.resolve()?, &args),
        Check => check::execute(&global.resolve()?),
        Verify => verify::execute(&global.resolve()?),
        Completions { shell } => completions::execute(shell),
    }
}
