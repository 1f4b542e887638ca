//! `pipfile-convert add`: add packages to `[packages]`.
//!
//! A missing Pipfile is created in the current directory with the default
//! `pypi` source.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::cli::AddArgs;
use crate::commands::ExitStatus;
use crate::pipfile::model::{Constraint, Dependency, DependencyUrl, Location, RootDependency};
use crate::pipfile::{PipfileConverter, find_or_new_pipfile, project_name_from_dir};
use crate::printer::Printer;

/// Execute `pipfile-convert add`.
pub(crate) fn execute(
    args: &AddArgs,
    pipfile: Option<&Path>,
    printer: Printer,
) -> Result<ExitStatus> {
    let cwd = std::env::current_dir().context("failed to determine the current directory")?;
    let path = find_or_new_pipfile(&cwd, pipfile);
    let converter = PipfileConverter::for_pipfile(&path)?;

    let existing = if path.is_file() {
        Some(fs_err::read_to_string(&path)?)
    } else {
        None
    };
    let root = match &existing {
        Some(content) => converter
            .loads(content)
            .with_context(|| format!("failed to load `{}`", path.display()))?,
        None => RootDependency::new(converter.project_name()),
    };

    let added = args
        .packages
        .iter()
        .map(|spec| parse_package_spec(&root, spec, args))
        .collect::<Result<Vec<_>>>()?;

    let mut dependencies = root.into_dependencies();
    for dependency in added {
        printer.info(format_args!("Added `{dependency}` to Pipfile."));
        match dependencies
            .iter_mut()
            .find(|existing| existing.name == dependency.name)
        {
            Some(existing) => *existing = dependency,
            None => dependencies.push(dependency),
        }
    }

    let content = converter.dumps(&dependencies, existing.as_deref())?;
    fs_err::write(&path, content)?;
    if existing.is_none() {
        printer.info(format_args!("Created new Pipfile at `{}`.", path.display()));
    }

    Ok(ExitStatus::Success)
}

/// Parse a package spec like `"requests"`, `"requests>=2.0"`, or `"requests[security]"`.
///
/// With `--editable`, the spec is a local path and the package is named
/// after its directory.
fn parse_package_spec(root: &RootDependency, spec: &str, args: &AddArgs) -> Result<Dependency> {
    if args.editable {
        if spec.trim().is_empty() {
            bail!("Expected a path for an editable package, found an empty string");
        }
        let name = fs_err::canonicalize(spec)
            .map(|path| project_name_from_dir(&path))
            .unwrap_or_else(|_| project_name_from_dir(Path::new(spec)));
        let mut dependency = Dependency::from_params(
            name,
            Constraint::any(root),
            BTreeSet::new(),
            None,
            Some(DependencyUrl::new(Location::Path(spec.to_owned()))),
        );
        dependency.editable = Some(true);
        return Ok(dependency);
    }

    let requirement = split_requirement(spec)?;
    let mut dependency = Dependency::from_params(
        requirement.name,
        Constraint::new(root, requirement.version),
        requirement.extras,
        requirement.marker.map(str::to_owned),
        None,
    );
    dependency.index.clone_from(&args.index);
    Ok(dependency)
}

/// The parts of a `name[extras]<version>; <marker>` spec.
#[derive(Debug, PartialEq, Eq)]
struct Requirement<'a> {
    name: &'a str,
    extras: BTreeSet<String>,
    version: &'a str,
    marker: Option<&'a str>,
}

/// Split a package spec into name, extras, version and marker.
///
/// Fails when the name is missing or the extras bracket is never closed.
///
/// Examples: `"requests>=2.0"` -> `("requests", {}, ">=2.0", None)`,
///           `"flask"` -> `("flask", {}, "", None)`,
///           `"requests[security]>=2.0"` -> `("requests", {"security"}, ">=2.0", None)`.
fn split_requirement(spec: &str) -> Result<Requirement<'_>> {
    let (requirement, marker) = match spec.split_once(';') {
        Some((requirement, marker)) => (requirement.trim(), Some(marker.trim())),
        None => (spec.trim(), None),
    };
    let (name, version) = split_name_version(requirement);
    let (name, extras) = match name.split_once('[') {
        Some((name, extras)) => {
            let Some(extras) = extras.trim_end().strip_suffix(']') else {
                bail!("Unclosed extras in package spec `{spec}`");
            };
            (name, extras)
        }
        None => (name, ""),
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("Missing package name in package spec `{spec}`");
    }
    Ok(Requirement {
        name,
        extras: extras
            .split(',')
            .map(str::trim)
            .filter(|extra| !extra.is_empty())
            .map(str::to_owned)
            .collect(),
        version: version.trim(),
        marker: marker.filter(|marker| !marker.is_empty()),
    })
}

/// Split a package spec into name and version parts.
fn split_name_version(spec: &str) -> (&str, &str) {
    for (i, c) in spec.char_indices() {
        if matches!(c, '>' | '<' | '=' | '!' | '~') {
            return (&spec[..i], &spec[i..]);
        }
    }
    (spec, "")
}
