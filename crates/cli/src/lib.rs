//! Command-line front end for the partition hashinator.
//!
//! Provides commands for:
//! - Computing the partition of a single key
//! - Running the conformance harness
//! - Checking the frozen reference vectors

pub mod commands;
pub mod config;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;
