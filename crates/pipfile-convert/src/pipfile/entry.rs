//! Raw `[packages]` entries.
//!
//! An entry is either a bare version string (`requests = ">=2.0"`) or a table
//! of attributes (`requests = {version = ">=2.0", extras = ["socks"]}`). Only
//! the keys in [`Field::ALL`] are recognized; the same list bounds what the
//! parser reads and what the formatter writes.

use std::fmt;

use indexmap::IndexMap;
use toml_edit::{Array, InlineTable, Item, TableLike, Value};
use tracing::debug;

use crate::pipfile::error::EntryError;
use crate::pipfile::model::{AttributeValue, Vcs};

/// The version written for dependencies without a constraint.
pub const WILDCARD: &str = "*";

/// A recognized key of a table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Version,
    Editable,
    Extras,
    Markers,
    Ref,
    Vcs,
    Index,
    Hashes,
    Subdirectory,
    Path,
    File,
    Uri,
    Git,
    Svn,
    Hg,
    Bzr,
}

/// The shape a field's value must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    String,
    Bool,
    List,
}

impl FieldKind {
    fn expected(self) -> &'static str {
        match self {
            Self::String => "a string",
            Self::Bool => "a boolean",
            Self::List => "an array of strings",
        }
    }
}

impl Field {
    /// Every recognized key.
    pub const ALL: [Self; 16] = [
        Self::Version,
        Self::Editable,
        Self::Extras,
        Self::Markers,
        Self::Ref,
        Self::Vcs,
        Self::Index,
        Self::Hashes,
        Self::Subdirectory,
        Self::Path,
        Self::File,
        Self::Uri,
        Self::Git,
        Self::Svn,
        Self::Hg,
        Self::Bzr,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Version => "version",
            Self::Editable => "editable",
            Self::Extras => "extras",
            Self::Markers => "markers",
            Self::Ref => "ref",
            Self::Vcs => "vcs",
            Self::Index => "index",
            Self::Hashes => "hashes",
            Self::Subdirectory => "subdirectory",
            Self::Path => "path",
            Self::File => "file",
            Self::Uri => "uri",
            Self::Git => "git",
            Self::Svn => "svn",
            Self::Hg => "hg",
            Self::Bzr => "bzr",
        }
    }

    /// Look up a recognized key, returning `None` for anything off the list.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == key)
    }

    fn kind(self) -> FieldKind {
        match self {
            Self::Editable => FieldKind::Bool,
            Self::Extras | Self::Hashes => FieldKind::List,
            _ => FieldKind::String,
        }
    }
}

impl From<Vcs> for Field {
    fn from(vcs: Vcs) -> Self {
        match vcs {
            Vcs::Git => Self::Git,
            Vcs::Svn => Self::Svn,
            Vcs::Hg => Self::Hg,
            Vcs::Bzr => Self::Bzr,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value of a recognized field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    String(String),
    Bool(bool),
    List(Vec<String>),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(values) => Some(values),
            _ => None,
        }
    }

    /// Read a value of the shape `field` requires.
    fn from_item(field: Field, item: &Item) -> Result<Self, EntryError> {
        let wrong_type = || EntryError::WrongType {
            field,
            expected: field.kind().expected(),
            found: item.type_name(),
        };
        match field.kind() {
            FieldKind::String => item
                .as_str()
                .map(|value| Self::String(value.to_owned()))
                .ok_or_else(wrong_type),
            FieldKind::Bool => item.as_bool().map(Self::Bool).ok_or_else(wrong_type),
            FieldKind::List => {
                let array = item.as_array().ok_or_else(wrong_type)?;
                array
                    .iter()
                    .map(|value| value.as_str().map(str::to_owned).ok_or_else(wrong_type))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Self::List)
            }
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Self::String(value) => Value::from(value.as_str()),
            Self::Bool(value) => Value::from(*value),
            Self::List(values) => Value::Array(values.iter().map(String::as_str).collect::<Array>()),
        }
    }
}

impl From<AttributeValue> for FieldValue {
    /// Sets become plain lists in their iteration order.
    fn from(value: AttributeValue) -> Self {
        match value {
            AttributeValue::String(value) => Self::String(value),
            AttributeValue::Bool(value) => Self::Bool(value),
            AttributeValue::Set(values) => Self::List(values.into_iter().collect()),
            AttributeValue::List(values) => Self::List(values),
        }
    }
}

/// Recognized attributes of a table entry, in document order.
pub type Attributes = IndexMap<Field, FieldValue>;

/// A single `[packages]` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// `name = "<constraint>"`
    Version(String),
    /// `name = { ... }`
    Table(Attributes),
}

impl Entry {
    /// Read an entry from the document tree.
    ///
    /// Standard and inline tables are both accepted. Unrecognized keys are
    /// dropped.
    pub fn from_item(item: &Item) -> Result<Self, EntryError> {
        if let Some(version) = item.as_str() {
            return Ok(Self::Version(version.to_owned()));
        }
        let table = item
            .as_table_like()
            .ok_or_else(|| EntryError::UnexpectedShape(item.type_name()))?;
        Self::from_table_like(table).map(Self::Table)
    }

    fn from_table_like(table: &dyn TableLike) -> Result<Attributes, EntryError> {
        let mut attributes = Attributes::new();
        for (key, item) in table.iter() {
            let Some(field) = Field::from_key(key) else {
                debug!("Dropping unrecognized key `{key}`");
                continue;
            };
            attributes.insert(field, FieldValue::from_item(field, item)?);
        }
        Ok(attributes)
    }

    /// Render as a document value: a string or an inline table.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Version(version) => Value::from(version.as_str()),
            Self::Table(attributes) => {
                let mut table = InlineTable::new();
                for (field, value) in attributes {
                    table.insert(field.as_str(), value.to_value());
                }
                Value::InlineTable(table)
            }
        }
    }

    pub fn to_item(&self) -> Item {
        Item::Value(self.to_value())
    }
}
