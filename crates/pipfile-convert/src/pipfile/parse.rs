//! Turn a single `[packages]` entry into a [`Dependency`].

use std::collections::BTreeSet;

use tracing::debug;

use crate::pipfile::entry::{Attributes, Entry, Field, FieldValue};
use crate::pipfile::error::EntryError;
use crate::pipfile::model::{
    Constraint, Dependency, DependencyUrl, Location, RootDependency, Vcs, get_repo,
};

/// Build the dependency declared as `name = <entry>` under `root`.
///
/// A bare string only sets the constraint. A table resolves a location from
/// `file`, `path`, `vcs`, the VCS keys (`git`, `svn`, `hg`, `bzr`), then
/// `uri`, in that order, and attaches `ref` to it.
pub fn make_dependency(
    root: &RootDependency,
    name: &str,
    entry: &Entry,
) -> Result<Dependency, EntryError> {
    let attributes = match entry {
        Entry::Version(version) => {
            return Ok(Dependency::new(
                name,
                Constraint::new(root, version),
                get_repo(),
            ));
        }
        Entry::Table(attributes) => attributes,
    };

    let url = resolve_url(attributes)?;
    if let Some(url) = &url {
        debug!("Resolved `{name}` to {url}");
    }

    let extras = list(attributes, Field::Extras)
        .map(|extras| extras.iter().cloned().collect())
        .unwrap_or_else(BTreeSet::new);
    let constraint = Constraint::new(root, string(attributes, Field::Version).unwrap_or_default());
    let marker = string(attributes, Field::Markers).map(str::to_owned);

    let mut dependency = Dependency::from_params(name, constraint, extras, marker, url);
    dependency.editable = attributes
        .get(&Field::Editable)
        .and_then(FieldValue::as_bool);
    dependency.index = string(attributes, Field::Index).map(str::to_owned);
    dependency.hashes = list(attributes, Field::Hashes).map(<[String]>::to_vec);
    dependency.subdirectory = string(attributes, Field::Subdirectory).map(str::to_owned);
    Ok(dependency)
}

/// Resolve the single location an entry points at, with its `ref` attached.
fn resolve_url(attributes: &Attributes) -> Result<Option<DependencyUrl>, EntryError> {
    let non_empty = |field| string(attributes, field).filter(|value| !value.is_empty());
    let rev = string(attributes, Field::Ref);

    let location = if let Some(file) = non_empty(Field::File) {
        Location::File(file.to_owned())
    } else if let Some(path) = non_empty(Field::Path) {
        Location::Path(path.to_owned())
    } else if let Some(vcs) = non_empty(Field::Vcs) {
        // `ref` goes after the composed url, past any ref it already carries.
        let composed = match rev {
            Some(rev) => format!("{vcs}@{rev}"),
            None => vcs.to_owned(),
        };
        let Ok(url) = composed.parse::<DependencyUrl>();
        return Ok(Some(url));
    } else if let Some(location) = Vcs::ALL.into_iter().find_map(|vcs| {
        string(attributes, Field::from(vcs)).map(|url| Location::Vcs {
            vcs,
            url: url.to_owned(),
        })
    }) {
        location
    } else if let Some(uri) = non_empty(Field::Uri) {
        Location::Uri(uri.to_owned())
    } else if rev.is_some() {
        return Err(EntryError::RefWithoutLocation);
    } else {
        return Ok(None);
    };

    let url = DependencyUrl::new(location);
    Ok(Some(match rev {
        Some(rev) => url.with_rev(rev),
        None => url,
    }))
}

fn string(attributes: &Attributes, field: Field) -> Option<&str> {
    attributes.get(&field).and_then(FieldValue::as_str)
}

fn list(attributes: &Attributes, field: Field) -> Option<&[String]> {
    attributes.get(&field).and_then(FieldValue::as_list)
}
