//! Load a Pipfile into a [`RootDependency`] and dump dependencies back.
//!
//! Loading walks `[packages]` in document order. Dumping merges into an
//! existing document: `[[source]]` and every unrelated table are kept, stale
//! packages are dropped, and each dependency is rewritten in its most
//! compact form.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use crate::pipfile::discovery::project_name_from_dir;
use crate::pipfile::document::PipfileDocument;
use crate::pipfile::entry::Entry;
use crate::pipfile::error::Error;
use crate::pipfile::format::format_dependency;
use crate::pipfile::model::{Dependency, PipfileSource, RootDependency};
use crate::pipfile::parse::make_dependency;

/// Project name used when none is configured.
pub const DEFAULT_PROJECT_NAME: &str = "root";

/// Converts between Pipfile text and the dependency model.
#[derive(Debug, Clone)]
pub struct PipfileConverter {
    project_name: String,
}

impl Default for PipfileConverter {
    fn default() -> Self {
        Self::new(DEFAULT_PROJECT_NAME)
    }
}

impl PipfileConverter {
    /// Create a converter whose root dependency is named `project_name`.
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
        }
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Parse Pipfile text into a root dependency owning every `[packages]` entry.
    ///
    /// Entries are kept in document order and are not deduplicated. A
    /// document without `[packages]` yields no dependencies.
    pub fn loads(&self, content: &str) -> Result<RootDependency, Error> {
        let document: PipfileDocument = content.parse()?;
        let mut root = RootDependency::new(self.project_name.as_str());

        let mut dependencies = Vec::new();
        if let Some(packages) = document.packages()? {
            for (name, item) in packages.iter() {
                let dependency = Entry::from_item(item)
                    .and_then(|entry| make_dependency(&root, name, &entry))
                    .map_err(|source| Error::MalformedEntry {
                        name: name.to_owned(),
                        source,
                    })?;
                dependencies.push(dependency);
            }
        }

        debug!(
            "Loaded {} package(s) for `{}`",
            dependencies.len(),
            root.name()
        );
        root.attach_dependencies(dependencies);
        Ok(root)
    }

    /// Write `dependencies` into `content` (or a fresh document) and return the text.
    ///
    /// A default `pypi` source is added when the document has none. Packages
    /// not in `dependencies` are removed; the rest are rewritten in input
    /// order, keeping the position of names that were already present.
    pub fn dumps(&self, dependencies: &[Dependency], content: Option<&str>) -> Result<String, Error> {
        let mut document = match content {
            Some(content) if !content.is_empty() => content.parse::<PipfileDocument>()?,
            _ => PipfileDocument::new(),
        };

        document.ensure_source(&PipfileSource::pypi());

        let names: HashSet<&str> = dependencies
            .iter()
            .map(|dependency| dependency.name.as_str())
            .collect();
        document.retain_packages(|name| names.contains(name))?;

        for dependency in dependencies {
            document.upsert_package(&dependency.name, &format_dependency(dependency, true))?;
        }

        debug!("Dumped {} package(s)", dependencies.len());
        Ok(document.to_string())
    }

    /// Read and load the Pipfile at `path`.
    ///
    /// The root is named after the directory containing the file.
    pub fn load(path: &Path) -> Result<RootDependency, Error> {
        let content = fs_err::read_to_string(path)?;
        Self::for_pipfile(path)?.loads(&content)
    }

    /// Dump `dependencies` into the Pipfile at `path`, creating it if needed.
    pub fn dump(&self, dependencies: &[Dependency], path: &Path) -> Result<(), Error> {
        let existing = if path.is_file() {
            Some(fs_err::read_to_string(path)?)
        } else {
            None
        };
        let content = self.dumps(dependencies, existing.as_deref())?;
        fs_err::write(path, content)?;
        Ok(())
    }

    /// A converter named after the directory containing `path`.
    pub fn for_pipfile(path: &Path) -> Result<Self, Error> {
        let path = std::path::absolute(path)?;
        let name = path
            .parent()
            .map_or_else(|| DEFAULT_PROJECT_NAME.to_owned(), project_name_from_dir);
        Ok(Self::new(name))
    }
}
