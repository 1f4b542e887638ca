//! Pipfile conversion.
//!
//! ## Architecture
//!
//! The central type is [`PipfileConverter`], which maps:
//!
//! - `[packages]` -> [`RootDependency`] with one [`Dependency`] per entry
//!   ([`PipfileConverter::loads`])
//! - a list of [`Dependency`] values -> `[packages]`, merged into an existing
//!   document ([`PipfileConverter::dumps`])
//!
//! Entries go through [`Entry`], which is either a bare version string or a
//! table of recognized attributes. Keys outside [`entry::Field::ALL`] are
//! dropped when reading and never written, so a round trip through the model
//! discards them.

pub mod converter;
pub mod discovery;
pub mod document;
pub mod entry;
pub mod error;
pub mod format;
pub mod model;
pub mod parse;

pub use converter::PipfileConverter;
pub use discovery::{find_or_new_pipfile, find_pipfile, project_name_from_dir};
pub use document::PipfileDocument;
pub use entry::Entry;
pub use error::{EntryError, Error};
pub use format::format_dependency;
pub use model::{Constraint, Dependency, DependencyUrl, Location, RootDependency, Vcs, get_repo};
pub use parse::make_dependency;
