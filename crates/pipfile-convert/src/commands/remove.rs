//! `pipfile-convert remove`: remove packages from `[packages]`.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::RemoveArgs;
use crate::commands::{ExitStatus, discover};
use crate::pipfile::PipfileConverter;
use crate::printer::Printer;

/// Execute `pipfile-convert remove`.
pub(crate) fn execute(
    args: &RemoveArgs,
    pipfile: Option<&Path>,
    printer: Printer,
) -> Result<ExitStatus> {
    let path = discover(pipfile, printer)?;
    let content = fs_err::read_to_string(&path)?;

    let converter = PipfileConverter::for_pipfile(&path)?;
    let mut dependencies = converter
        .loads(&content)
        .with_context(|| format!("failed to load `{}`", path.display()))?
        .into_dependencies();

    let mut removed = false;
    for name in &args.packages {
        let before = dependencies.len();
        dependencies.retain(|dependency| dependency.name != *name);
        if dependencies.len() == before {
            printer.warn(format_args!("`{name}` is not in `[packages]`."));
        } else {
            removed = true;
            printer.info(format_args!("Removed `{name}` from Pipfile."));
        }
    }

    if !removed {
        return Ok(ExitStatus::Failure);
    }

    let content = converter.dumps(&dependencies, Some(&content))?;
    fs_err::write(&path, content)?;
    Ok(ExitStatus::Success)
}
