//! Command dispatch for pipfile-convert.
//!
//! Each subcommand loads the Pipfile through [`PipfileConverter`], works on
//! the dependency list, and (for commands that edit) dumps it back into the
//! same document.
//!
//! [`PipfileConverter`]: crate::pipfile::PipfileConverter

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};

use crate::cli;
use crate::pipfile::find_pipfile;
use crate::printer::Printer;

mod add;
mod deps;
mod normalize;
mod remove;

/// Exit status for pipfile-convert commands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// The command succeeded.
    Success,

    /// The command failed due to an error in the user input.
    Failure,

    /// The command failed with an unexpected error.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => Self::from(0),
            ExitStatus::Failure => Self::from(1),
            ExitStatus::Error => Self::from(2),
        }
    }
}

/// Dispatch a parsed CLI command to the appropriate handler.
///
/// `pipfile` is the explicit `--pipfile` path, if any.
pub fn dispatch(
    command: cli::Commands,
    pipfile: Option<&Path>,
    printer: Printer,
) -> Result<ExitStatus> {
    printer.debug(format_args!("Running `{}`", command.name()));
    match command {
        cli::Commands::Deps(args) => deps::execute(&args, pipfile, printer),
        cli::Commands::Normalize(args) => normalize::execute(&args, pipfile, printer),
        cli::Commands::Add(args) => add::execute(&args, pipfile, printer),
        cli::Commands::Remove(args) => remove::execute(&args, pipfile, printer),
    }
}

/// Locate an existing Pipfile, starting from the current directory.
fn discover(pipfile: Option<&Path>, printer: Printer) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("failed to determine the current directory")?;
    let path = find_pipfile(&cwd, pipfile)?;
    printer.debug(format_args!("Using {}", path.display()));
    Ok(path)
}
