//! A format-preserving Pipfile document.
//!
//! Wraps a [`toml_edit::DocumentMut`] so comments, key order and unrelated
//! tables survive an edit. The `[packages]` table is exposed as an ordered
//! map with "retain by predicate" and "upsert in place" operations.

use std::fmt;
use std::str::FromStr;

use toml_edit::{ArrayOfTables, DocumentMut, Item, Table, TableLike, value};
use tracing::trace;

use crate::pipfile::entry::Entry;
use crate::pipfile::error::Error;
use crate::pipfile::model::PipfileSource;

const SOURCE: &str = "source";
const PACKAGES: &str = "packages";

#[derive(Debug, Clone, Default)]
pub struct PipfileDocument {
    doc: DocumentMut,
}

impl PipfileDocument {
    /// An empty document.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_source(&self) -> bool {
        self.doc.contains_key(SOURCE)
    }

    /// Append `source` as a single-element `[[source]]` array.
    ///
    /// An existing `source` item is left untouched.
    pub fn ensure_source(&mut self, source: &PipfileSource) {
        if self.has_source() {
            return;
        }
        trace!("Adding default `{}` source", source.name);
        let mut table = Table::new();
        table.insert("url", value(source.url.as_str()));
        table.insert("verify_ssl", value(source.verify_ssl));
        table.insert("name", value(source.name.as_str()));
        let mut sources = ArrayOfTables::new();
        sources.push(table);
        self.doc.insert(SOURCE, Item::ArrayOfTables(sources));
    }

    /// The `[packages]` table, if the document has one.
    pub fn packages(&self) -> Result<Option<&dyn TableLike>, Error> {
        match self.doc.get(PACKAGES) {
            None => Ok(None),
            Some(item) => item
                .as_table_like()
                .map(Some)
                .ok_or_else(|| Error::PackagesNotTable(item.type_name())),
        }
    }

    /// The `[packages]` table, created empty if the document has none.
    fn packages_mut(&mut self) -> Result<&mut dyn TableLike, Error> {
        let item = self
            .doc
            .entry(PACKAGES)
            .or_insert(Item::Table(Table::new()));
        let type_name = item.type_name();
        item.as_table_like_mut()
            .ok_or(Error::PackagesNotTable(type_name))
    }

    /// Keep only the packages whose name matches `keep`, in their current order.
    pub fn retain_packages<F>(&mut self, mut keep: F) -> Result<(), Error>
    where
        F: FnMut(&str) -> bool,
    {
        let packages = self.packages_mut()?;
        let stale: Vec<String> = packages
            .iter()
            .map(|(name, _)| name)
            .filter(|name| !keep(*name))
            .map(str::to_owned)
            .collect();
        for name in stale {
            trace!("Removing stale package `{name}`");
            packages.remove(&name);
        }
        Ok(())
    }

    /// Write `name = <entry>`, replacing an existing entry in place or
    /// appending a new one.
    pub fn upsert_package(&mut self, name: &str, entry: &Entry) -> Result<(), Error> {
        let packages = self.packages_mut()?;
        packages.insert(name, entry.to_item());
        Ok(())
    }
}

impl FromStr for PipfileDocument {
    type Err = Error;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        Ok(Self {
            doc: content.parse::<DocumentMut>()?,
        })
    }
}

impl fmt::Display for PipfileDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.doc)
    }
}
