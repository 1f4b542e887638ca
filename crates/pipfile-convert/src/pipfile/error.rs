use thiserror::Error;

use crate::pipfile::entry::Field;

/// An error raised while converting a Pipfile.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml_edit::TomlError),

    #[error("`packages` must be a table, found {0}")]
    PackagesNotTable(&'static str),

    #[error("Malformed entry for package `{name}`")]
    MalformedEntry {
        name: String,
        #[source]
        source: EntryError,
    },
}

/// Why a single `[packages]` entry could not be read.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryError {
    #[error("expected a version string or a table, found {0}")]
    UnexpectedShape(&'static str),

    #[error("`{field}` must be {expected}, found {found}")]
    WrongType {
        field: Field,
        expected: &'static str,
        found: &'static str,
    },

    #[error("`ref` is set, but there is no `file`, `path`, `vcs`, `uri`, or VCS location to apply it to")]
    RefWithoutLocation,
}
