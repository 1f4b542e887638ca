//! Pipfile discovery: walk up directories to find the nearest `Pipfile`.
//!
//! An explicit path (`--pipfile` / `PIPENV_PIPFILE`) always wins. Otherwise
//! the search is bounded by `PIPENV_MAX_DEPTH` parent directories.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use tracing::trace;

/// Default maximum directory traversal depth.
const DEFAULT_MAX_DEPTH: usize = 3;

/// The filename we're looking for.
pub const PIPFILE_NAME: &str = "Pipfile";

/// Discover the Pipfile for `start_dir`.
///
/// Resolution order:
/// 1. `explicit`, which must point at an existing file.
/// 2. Walk up from `start_dir` looking for `Pipfile`, up to `PIPENV_MAX_DEPTH`
///    parent directories (default: 3).
pub fn find_pipfile(start_dir: &Path, explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(explicit) = explicit {
        if explicit.is_file() {
            return Ok(explicit.to_path_buf());
        }
        bail!("Pipfile not found at `{}`", explicit.display());
    }

    let max_depth = max_depth();
    let mut current = start_dir.to_path_buf();
    for _ in 0..=max_depth {
        let candidate = current.join(PIPFILE_NAME);
        trace!("Checking {}", candidate.display());
        if candidate.is_file() {
            return Ok(candidate);
        }
        if !current.pop() {
            break;
        }
    }

    bail!(
        "No Pipfile found (searched up to {} parent directories from {})",
        max_depth,
        start_dir.display()
    );
}

/// Like [`find_pipfile`], but fall back to a (possibly missing) `Pipfile` in
/// `start_dir` instead of failing.
pub fn find_or_new_pipfile(start_dir: &Path, explicit: Option<&Path>) -> PathBuf {
    if let Some(explicit) = explicit {
        return explicit.to_path_buf();
    }
    find_pipfile(start_dir, None).unwrap_or_else(|_| start_dir.join(PIPFILE_NAME))
}

fn max_depth() -> usize {
    env::var("PIPENV_MAX_DEPTH")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(DEFAULT_MAX_DEPTH)
}

/// Derive a project name from the project root directory.
///
/// Falls back to `"project"` if the directory name can't be determined.
pub fn project_name_from_dir(project_dir: &Path) -> String {
    project_dir
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("project")
        .to_owned()
}
