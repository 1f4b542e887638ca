//! `pipfile-convert deps`: list the dependencies declared under `[packages]`.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::DepsArgs;
use crate::commands::{ExitStatus, discover};
use crate::pipfile::PipfileConverter;
use crate::printer::Printer;

/// Execute `pipfile-convert deps`.
pub(crate) fn execute(
    args: &DepsArgs,
    pipfile: Option<&Path>,
    printer: Printer,
) -> Result<ExitStatus> {
    let path = discover(pipfile, printer)?;
    let root = PipfileConverter::load(&path)
        .with_context(|| format!("failed to load `{}`", path.display()))?;

    if args.json {
        let json = serde_json::to_string_pretty(root.dependencies())
            .context("failed to serialize dependencies")?;
        printer.output(json);
    } else {
        for dependency in root.dependencies() {
            printer.output(dependency);
        }
    }

    Ok(ExitStatus::Success)
}
