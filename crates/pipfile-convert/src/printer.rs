//! User-facing output.
//!
//! Command results (the `deps` listing, `normalize --stdout`) go to stdout
//! and ignore `--quiet`. Status lines go to stderr, filtered by
//! [`Verbosity`]. Errors, including their cause chain, are always shown.

use std::fmt::Display;

use anstream::{eprintln, println};
use owo_colors::OwoColorize;

/// How much status output reaches stderr.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// `--quiet`: errors only.
    Quiet,
    Default,
    /// `-v` and above: also `debug:` lines.
    Verbose,
}

impl Verbosity {
    /// `--quiet` wins over any number of `-v` flags.
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Default,
            (false, _) => Self::Verbose,
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Printer {
    verbosity: Verbosity,
}

impl Printer {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    /// A command result, written to stdout.
    pub fn output(self, message: impl Display) {
        println!("{message}");
    }

    pub fn info(self, message: impl Display) {
        if self.verbosity >= Verbosity::Default {
            eprintln!("{message}");
        }
    }

    pub fn warn(self, message: impl Display) {
        if self.verbosity >= Verbosity::Default {
            eprintln!("{}: {message}", "warning".yellow().bold());
        }
    }

    pub fn debug(self, message: impl Display) {
        if self.verbosity >= Verbosity::Verbose {
            eprintln!("{}: {message}", "debug".dimmed());
        }
    }

    /// Print `err` and every error in its source chain as a `Caused by:` line.
    pub fn error(self, err: &anyhow::Error) {
        eprintln!("{}: {err}", "error".red().bold());
        for cause in err.chain().skip(1) {
            eprintln!(
                "  {}: {}",
                "Caused by".red().bold(),
                cause.to_string().trim()
            );
        }
    }
}
