//! CLI argument definitions for pipfile-convert.
//!
//! All clap derive structs live here. The [`Cli`] struct is the top-level
//! parser; [`Commands`] enumerates every subcommand.

use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};

/// Clap v3-style help menu colors.
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// Convert between Pipfile manifests and dependency lists.
#[derive(Parser, Debug)]
#[command(
    name = "pipfile-convert",
    author,
    version,
    about = "Convert between Pipfile manifests and dependency lists.",
    styles = STYLES,
    after_help = "Use `pipfile-convert help <command>` for more information on a specific command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the Pipfile. Defaults to the nearest `Pipfile` above the current directory.
    #[arg(global = true, long, env = "PIPENV_PIPFILE", value_name = "PATH")]
    pub pipfile: Option<PathBuf>,

    /// Increase logging verbosity.
    #[arg(global = true, short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except command results and errors.
    #[arg(global = true, short, long)]
    pub quiet: bool,
}

/// Top-level subcommands for pipfile-convert.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the dependencies declared under `[packages]`.
    Deps(DepsArgs),

    /// Rewrite every package entry in its most compact form.
    #[command(alias = "fmt")]
    Normalize(NormalizeArgs),

    /// Add packages to the Pipfile, creating it if needed.
    Add(AddArgs),

    /// Remove packages from the Pipfile.
    Remove(RemoveArgs),
}

impl Commands {
    /// Return the subcommand name as a static string (for diagnostics).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Deps(_) => "deps",
            Self::Normalize(_) => "normalize",
            Self::Add(_) => "add",
            Self::Remove(_) => "remove",
        }
    }
}

/// Arguments for `pipfile-convert deps`.
#[derive(Parser, Debug)]
pub struct DepsArgs {
    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `pipfile-convert normalize`.
#[derive(Parser, Debug)]
pub struct NormalizeArgs {
    /// Don't write the Pipfile; fail if it isn't normalized.
    #[arg(long)]
    pub check: bool,

    /// Print the normalized Pipfile instead of writing it.
    #[arg(long, conflicts_with = "check")]
    pub stdout: bool,
}

/// Arguments for `pipfile-convert add`.
#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Packages to add, e.g. `requests`, `requests>=2.0` or `requests[socks]`.
    #[arg(required = true)]
    pub packages: Vec<String>,

    /// Treat each package as a local path to install in editable mode.
    #[arg(short, long)]
    pub editable: bool,

    /// Specify the package index to use.
    #[arg(long)]
    pub index: Option<String>,
}

/// Arguments for `pipfile-convert remove`.
#[derive(Parser, Debug)]
pub struct RemoveArgs {
    /// Packages to remove.
    #[arg(required = true)]
    pub packages: Vec<String>,
}
