//! Turn a [`Dependency`] back into a `[packages]` entry.

use crate::pipfile::entry::{Attributes, Entry, Field, FieldValue, WILDCARD};
use crate::pipfile::model::Dependency;

/// Format a dependency as the most compact entry that describes it.
///
/// Only keys in [`Field::ALL`] are written. A dependency that only carries a
/// version becomes a bare string when `short` is set; in table form, a `*`
/// version is left implicit.
pub fn format_dependency(dependency: &Dependency, short: bool) -> Entry {
    let mut attributes = Attributes::new();
    for (key, value) in dependency.attributes() {
        if let Some(field) = Field::from_key(key) {
            attributes.insert(field, FieldValue::from(value));
        }
    }

    attributes
        .entry(Field::Version)
        .or_insert_with(|| FieldValue::String(WILDCARD.to_owned()));

    if short && attributes.len() == 1 {
        if let Some(FieldValue::String(version)) = attributes.swap_remove(&Field::Version) {
            return Entry::Version(version);
        }
    }

    if attributes.get(&Field::Version).and_then(FieldValue::as_str) == Some(WILDCARD) {
        attributes.shift_remove(&Field::Version);
    }

    Entry::Table(attributes)
}
