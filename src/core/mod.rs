//! Core library components.
//!
//! Env file parsing, validation, the temp artifact, the deploy tool seam and
//! the pipeline that ties them together. Nothing here prints to the terminal.

pub mod artifact;
pub mod config;
pub mod constants;
pub mod env;
pub mod gcloud;
pub mod runner;
pub mod validation;
pub mod verify;
