//! `pipfile-convert normalize`: rewrite package entries in their compact form.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::NormalizeArgs;
use crate::commands::{ExitStatus, discover};
use crate::pipfile::PipfileConverter;
use crate::printer::Printer;

/// Execute `pipfile-convert normalize`.
pub(crate) fn execute(
    args: &NormalizeArgs,
    pipfile: Option<&Path>,
    printer: Printer,
) -> Result<ExitStatus> {
    let path = discover(pipfile, printer)?;
    let content = fs_err::read_to_string(&path)?;

    let converter = PipfileConverter::for_pipfile(&path)?;
    let root = converter
        .loads(&content)
        .with_context(|| format!("failed to load `{}`", path.display()))?;
    let normalized = converter.dumps(root.dependencies(), Some(&content))?;

    if args.stdout {
        printer.output(normalized.trim_end());
        return Ok(ExitStatus::Success);
    }

    if normalized == content {
        printer.info(format_args!("`{}` is already normalized.", path.display()));
        return Ok(ExitStatus::Success);
    }

    if args.check {
        printer.warn(format_args!("`{}` is not normalized.", path.display()));
        return Ok(ExitStatus::Failure);
    }

    fs_err::write(&path, normalized)?;
    printer.info(format_args!("Normalized `{}`.", path.display()));
    Ok(ExitStatus::Success)
}
