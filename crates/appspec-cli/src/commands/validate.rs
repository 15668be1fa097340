//! `appspec validate` — Check application files without printing manifests.

use std::path::PathBuf;

use appspec_common::constants::DEFAULT_APP_FILE;
use clap::Args;

use super::generate::populate_file;
use crate::output;

/// Arguments for the `validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Application files to check.
    #[arg(short = 'f', long = "file", default_value = DEFAULT_APP_FILE)]
    pub files: Vec<PathBuf>,
}

/// Executes the `validate` command.
///
/// Runs loading, validation, and population for every file and prints a
/// one-line summary per file.
///
/// # Errors
///
/// Returns the first error encountered.
pub fn execute(args: ValidateArgs) -> anyhow::Result<()> {
    for path in &args.files {
        let (app, _) = populate_file(path, false)?;
        println!("{}  ok  {}", path.display(), output::summarize(&app));
    }
    Ok(())
}
