//! pipfile-convert: convert between Pipfile manifests and a dependency model.
//!
//! The [`pipfile`] module holds the converter itself. This crate root
//! provides the entry point for the `pipfile-convert` binary, which parses CLI
//! arguments, installs logging, and dispatches to the command handlers.

#![deny(clippy::print_stdout, clippy::print_stderr)]

use std::ffi::OsString;
use std::process::ExitCode;

use clap::Parser;

use crate::cli::Cli;
use crate::commands::ExitStatus;
use crate::printer::{Printer, Verbosity};

pub mod cli;
pub mod commands;
mod logging;
pub mod pipfile;
pub mod printer;

/// Entry point for the pipfile-convert CLI.
pub fn main<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };

    let printer = Printer::new(Verbosity::from_flags(cli.verbose, cli.quiet));

    if let Err(err) = logging::setup_logging(cli.verbose, cli.quiet) {
        printer.warn(format_args!("failed to initialize logging: {err}"));
    }

    match commands::dispatch(cli.command, cli.pipfile.as_deref(), printer) {
        Ok(code) => code.into(),
        Err(err) => {
            printer.error(&err);
            ExitStatus::Error.into()
        }
    }
}
