//! Top-level CLI configuration and logging setup.

use anyhow::bail;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::commands::Command;

/// Route partitioning keys and check hashinator conformance.
#[derive(Parser, Debug)]
#[command(name = "hashinator-cli", version, about)]
pub struct CliConfig {
    /// Log filter used when RUST_LOG is not set (e.g. "info", "hashinator=debug").
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Print results as JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Installs the fmt subscriber on stderr, keeping stdout for results.
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.log_level))
            .unwrap_or_else(|_| EnvFilter::new("warn"));
        // Already installed when run more than once in-process
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Executes the selected command and prints its result.
    ///
    /// A failed conformance run or vector check is returned as an error so
    /// the process exits non-zero.
    pub fn run(self) -> anyhow::Result<()> {
        self.init_tracing();
        let result = self.command.execute()?;
        println!("{}", result.render(self.json)?);
        if !result.success() {
            bail!("{}", result.failure_summary());
        }
        Ok(())
    }
}
