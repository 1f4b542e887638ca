//! Dependency model the converter reads Pipfile entries into.
//!
//! A [`RootDependency`] names the project and owns the ordered list of
//! [`Dependency`] values declared under `[packages]`. Each dependency carries
//! a root-bound [`Constraint`] and exactly one source: the default registry
//! for plain version entries, or a [`DependencyUrl`] for VCS, path, file and
//! remote URI entries.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Serialize, Serializer};

/// Index URL of the `pypi` repository: it serves plain version entries and
/// is the source written into documents that don't declare one.
pub const DEFAULT_INDEX_URL: &str = "https://pypi.python.org/simple";

/// A version control system recognized in Pipfile entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Vcs {
    Git,
    Svn,
    Hg,
    Bzr,
}

impl Vcs {
    /// All systems, in the order entry keys are scanned.
    pub const ALL: [Self; 4] = [Self::Git, Self::Svn, Self::Hg, Self::Bzr];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Git => "git",
            Self::Svn => "svn",
            Self::Hg => "hg",
            Self::Bzr => "bzr",
        }
    }

    /// Split a `<vcs>+<location>` URL into the system and the location.
    fn strip_prefix(url: &str) -> Option<(Self, &str)> {
        let (scheme, location) = url.split_once('+')?;
        Self::ALL
            .into_iter()
            .find(|vcs| vcs.as_str() == scheme)
            .map(|vcs| (vcs, location))
    }
}

impl fmt::Display for Vcs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A package index a registry dependency is fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repository {
    pub name: String,
    pub url: String,
}

/// Return the repository that serves dependencies without an explicit location.
pub fn get_repo() -> Repository {
    Repository {
        name: "pypi".to_owned(),
        url: DEFAULT_INDEX_URL.to_owned(),
    }
}

/// A `[[source]]` entry in the Pipfile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipfileSource {
    /// Index URL.
    pub url: String,

    /// Whether to verify SSL certificates.
    pub verify_ssl: bool,

    /// Source name (e.g., `"pypi"`).
    pub name: String,
}

impl PipfileSource {
    /// The source written into documents that don't declare one.
    pub fn pypi() -> Self {
        Self {
            url: DEFAULT_INDEX_URL.to_owned(),
            verify_ssl: true,
            name: "pypi".to_owned(),
        }
    }
}

/// The synthetic node representing the project itself.
#[derive(Debug, Clone)]
pub struct RootDependency {
    name: Arc<str>,
    dependencies: Vec<Dependency>,
}

impl RootDependency {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            dependencies: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append dependencies, keeping their order. Duplicates are kept as-is.
    pub fn attach_dependencies(&mut self, dependencies: Vec<Dependency>) {
        self.dependencies.extend(dependencies);
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub fn into_dependencies(self) -> Vec<Dependency> {
        self.dependencies
    }
}

/// A version constraint, bound to the root it was declared under.
///
/// The empty string and `*` both mean "any version". Comma-separated
/// specifiers are trimmed but otherwise kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    root: Arc<str>,
    specifiers: String,
}

impl Constraint {
    pub fn new(root: &RootDependency, raw: &str) -> Self {
        let specifiers = raw
            .split(',')
            .map(str::trim)
            .filter(|specifier| !specifier.is_empty())
            .collect::<Vec<_>>()
            .join(",");
        let specifiers = if specifiers == "*" {
            String::new()
        } else {
            specifiers
        };
        Self {
            root: Arc::clone(&root.name),
            specifiers,
        }
    }

    /// A constraint accepting any version.
    pub fn any(root: &RootDependency) -> Self {
        Self::new(root, "")
    }

    pub fn is_any(&self) -> bool {
        self.specifiers.is_empty()
    }

    /// The name of the root this constraint belongs to.
    pub fn root(&self) -> &str {
        &self.root
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_any() {
            f.write_str("*")
        } else {
            f.write_str(&self.specifiers)
        }
    }
}

impl Serialize for Constraint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Where a non-registry dependency lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// A repository checkout, e.g. `git+https://github.com/org/repo`.
    Vcs { vcs: Vcs, url: String },
    /// A local directory.
    Path(String),
    /// A local or remote archive.
    File(String),
    /// Any other remote location.
    Uri(String),
}

/// A resolved dependency location with an optional VCS ref.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyUrl {
    pub location: Location,
    /// Branch, tag or commit.
    pub rev: Option<String>,
}

impl DependencyUrl {
    pub fn new(location: Location) -> Self {
        Self {
            location,
            rev: None,
        }
    }

    #[must_use]
    pub fn with_rev(mut self, rev: impl Into<String>) -> Self {
        self.rev = Some(rev.into());
        self
    }
}

impl FromStr for DependencyUrl {
    type Err = std::convert::Infallible;

    /// Classify a composed URL.
    ///
    /// `<vcs>+<location>[@<rev>]` is a VCS location; the ref is split off the
    /// path component, so `git+ssh://git@host/repo` keeps its user info.
    /// Anything with a scheme is a URI, everything else a path.
    fn from_str(url: &str) -> Result<Self, Self::Err> {
        let Some((vcs, rest)) = Vcs::strip_prefix(url) else {
            let location = if url.contains("://") {
                Location::Uri(url.to_owned())
            } else {
                Location::Path(url.to_owned())
            };
            return Ok(Self::new(location));
        };

        let path_start = match rest.find("://") {
            Some(scheme_end) => rest[scheme_end + 3..]
                .find('/')
                .map_or(rest.len(), |offset| scheme_end + 3 + offset),
            None => rest.find(':').map_or(0, |colon| colon + 1),
        };
        let (url, rev) = match rest[path_start..].rfind('@') {
            Some(offset) => {
                let at = path_start + offset;
                (&rest[..at], Some(rest[at + 1..].to_owned()))
            }
            None => (rest, None),
        };

        Ok(Self {
            location: Location::Vcs {
                vcs,
                url: url.to_owned(),
            },
            rev,
        })
    }
}

impl fmt::Display for DependencyUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Location::Vcs { vcs, url } => write!(f, "{vcs}+{url}")?,
            Location::Path(path) | Location::File(path) | Location::Uri(path) => {
                f.write_str(path)?;
            }
        }
        if let Some(rev) = &self.rev {
            write!(f, "@{rev}")?;
        }
        Ok(())
    }
}

impl Serialize for DependencyUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Where a dependency is installed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencySource {
    Registry(Repository),
    Url(DependencyUrl),
}

/// A single attribute value exposed by [`Dependency::attributes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    String(String),
    Bool(bool),
    Set(BTreeSet<String>),
    List(Vec<String>),
}

/// One declared package requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub name: String,
    pub constraint: Constraint,
    pub extras: BTreeSet<String>,
    pub marker: Option<String>,
    pub source: DependencySource,
    /// `None` when the entry doesn't say; an explicit `false` is kept.
    pub editable: Option<bool>,
    pub index: Option<String>,
    /// `None` when the entry doesn't say; an explicit empty list is kept.
    pub hashes: Option<Vec<String>>,
    pub subdirectory: Option<String>,
}

impl Dependency {
    /// A plain registry dependency: only a name and a constraint.
    pub fn new(name: impl Into<String>, constraint: Constraint, repo: Repository) -> Self {
        Self {
            name: name.into(),
            constraint,
            extras: BTreeSet::new(),
            marker: None,
            source: DependencySource::Registry(repo),
            editable: None,
            index: None,
            hashes: None,
            subdirectory: None,
        }
    }

    /// A dependency with extras, a marker and an optional location.
    ///
    /// Without a location the dependency is served by [`get_repo`].
    pub fn from_params(
        name: impl Into<String>,
        constraint: Constraint,
        extras: BTreeSet<String>,
        marker: Option<String>,
        url: Option<DependencyUrl>,
    ) -> Self {
        let source = match url {
            Some(url) => DependencySource::Url(url),
            None => DependencySource::Registry(get_repo()),
        };
        Self {
            extras,
            marker,
            source,
            ..Self::new(name, constraint, get_repo())
        }
    }

    /// The resolved location, for dependencies not served by a registry.
    pub fn url(&self) -> Option<&DependencyUrl> {
        match &self.source {
            DependencySource::Registry(_) => None,
            DependencySource::Url(url) => Some(url),
        }
    }

    /// Every attribute this dependency carries, as ordered `(key, value)` pairs.
    ///
    /// Absent attributes are skipped, as are an unconstrained version and
    /// empty extras. The list includes keys that have no Pipfile
    /// representation, such as `name` and `repo`.
    pub fn attributes(&self) -> Vec<(&'static str, AttributeValue)> {
        let mut attributes = vec![("name", AttributeValue::String(self.name.clone()))];

        if !self.constraint.is_any() {
            attributes.push(("version", AttributeValue::String(self.constraint.to_string())));
        }
        if let Some(editable) = self.editable {
            attributes.push(("editable", AttributeValue::Bool(editable)));
        }
        if !self.extras.is_empty() {
            attributes.push(("extras", AttributeValue::Set(self.extras.clone())));
        }
        if let Some(marker) = &self.marker {
            attributes.push(("markers", AttributeValue::String(marker.clone())));
        }

        match &self.source {
            DependencySource::Registry(repo) => {
                attributes.push(("repo", AttributeValue::String(repo.name.clone())));
            }
            DependencySource::Url(url) => {
                let (key, location) = match &url.location {
                    Location::Vcs { vcs, url } => (vcs.as_str(), url),
                    Location::Path(path) => ("path", path),
                    Location::File(file) => ("file", file),
                    Location::Uri(uri) => ("uri", uri),
                };
                attributes.push((key, AttributeValue::String(location.clone())));
                if let Some(rev) = &url.rev {
                    attributes.push(("ref", AttributeValue::String(rev.clone())));
                }
            }
        }

        if let Some(index) = &self.index {
            attributes.push(("index", AttributeValue::String(index.clone())));
        }
        if let Some(hashes) = &self.hashes {
            attributes.push(("hashes", AttributeValue::List(hashes.clone())));
        }
        if let Some(subdirectory) = &self.subdirectory {
            attributes.push(("subdirectory", AttributeValue::String(subdirectory.clone())));
        }

        attributes
    }
}

impl fmt::Display for Dependency {
    /// Render as a PEP 508 requirement, e.g. `requests[security]>=2.32; python_version < '4'`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.extras.is_empty() {
            let extras = self.extras.iter().map(String::as_str).collect::<Vec<_>>();
            write!(f, "[{}]", extras.join(","))?;
        }
        match self.url() {
            Some(url) => write!(f, " @ {url}")?,
            None if !self.constraint.is_any() => write!(f, "{}", self.constraint)?,
            None => {}
        }
        if let Some(marker) = &self.marker {
            // A space is required between a URL and the marker separator.
            let separator = if self.url().is_some() { " ; " } else { "; " };
            write!(f, "{separator}{marker}")?;
        }
        Ok(())
    }
}
