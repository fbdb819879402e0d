//! meli-deploy - Deploys the `meli` Cloud Function with its environment.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── deploy        # Full deployment flow (default command)
//! │   ├── check         # Validate .env without deploying
//! │   ├── verify        # Check the deployed function's env vars
//! │   ├── completions   # Shell completions
//! │   └── output        # Terminal output helpers
//! └── core/             # Core library components
//!     ├── config        # meli-deploy.toml and defaults
//!     ├── env           # .env parsing
//!     ├── validation    # Required keys and JSON credentials
//!     ├── artifact      # Scoped --env-vars-file temp file
//!     ├── gcloud        # DeployTool trait and gcloud backend
//!     ├── verify        # Post-deploy verification
//!     └── runner        # Preflight → … → Cleanup pipeline
//! ```

pub mod cli;
pub mod core;
pub mod error;
