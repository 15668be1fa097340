//! CLI command definitions and dispatch.

pub mod generate;
pub mod validate;

use appspec_common::constants::BIN_NAME;
use clap::{Parser, Subcommand};

/// appspec — Turn shorthand application files into Kubernetes manifests.
#[derive(Parser, Debug)]
#[command(name = BIN_NAME, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Log filter (e.g. `debug`, `appspec=trace`); overrides `RUST_LOG`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Populate application files and print the generated manifests.
    Generate(generate::GenerateArgs),
    /// Check application files without printing manifests.
    Validate(validate::ValidateArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Generate(args) => generate::execute(args),
        Command::Validate(args) => validate::execute(args),
    }
}
