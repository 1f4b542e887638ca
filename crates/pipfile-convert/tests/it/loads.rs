//! Tests for loading Pipfiles into the dependency model.
//!
//! These tests validate that the fixtures load into the expected
//! dependencies and that every entry shape maps onto the model.

use std::path::PathBuf;

use pipfile_convert::pipfile::model::{DependencySource, Location, Vcs, get_repo};
use pipfile_convert::pipfile::{Error, PipfileConverter};

use crate::common::{fixture, read_fixture};

#[test]
fn load_minimal_pipfile() {
    let root =
        PipfileConverter::load(&fixture("minimal")).expect("Failed to load minimal Pipfile");

    assert_eq!(root.name(), "minimal");
    assert_eq!(root.dependencies().len(), 1);

    let requests = &root.dependencies()[0];
    assert_eq!(requests.name, "requests");
    assert!(requests.constraint.is_any());
    assert_eq!(requests.source, DependencySource::Registry(get_repo()));
}

#[test]
fn load_complex_specs() {
    let root = PipfileConverter::default()
        .loads(&read_fixture("complex-specs"))
        .expect("Failed to load complex-specs");

    let names: Vec<_> = root
        .dependencies()
        .iter()
        .map(|dependency| dependency.name.as_str())
        .collect();
    // `[dev-packages]` is not part of the model.
    assert_eq!(names, ["requests", "stdeb", "legacy-cgi", "django", "pinned"]);

    let deps = root.dependencies();
    assert_eq!(deps[0].constraint.to_string(), ">=2.32.0");
    assert!(deps[0].extras.contains("security"));

    // `sys_platform` is not a recognized key and is dropped.
    assert!(deps[1].constraint.is_any());
    assert_eq!(deps[1].marker, None);

    assert_eq!(deps[2].marker.as_deref(), Some("python_version >= '3.13'"));
    assert_eq!(deps[3].constraint.to_string(), ">=4.2,<5.0");
    assert_eq!(
        deps[4].hashes,
        Some(vec!["sha256:abc".to_owned(), "sha256:def".to_owned()])
    );
    assert_eq!(deps[4].index.as_deref(), Some("pypi"));
}

#[test]
fn load_vcs_and_editable() {
    let root = PipfileConverter::default()
        .loads(&read_fixture("vcs-and-editable"))
        .expect("Failed to load vcs-and-editable");
    let deps = root.dependencies();

    let urls: Vec<_> = deps
        .iter()
        .map(|dependency| dependency.url().map(ToString::to_string))
        .collect();
    assert_eq!(
        urls,
        [
            Some("git+https://github.com/example/my-git-pkg.git@main".to_owned()),
            Some("./local-pkg".to_owned()),
            Some("hg+https://hg.example.com/repo".to_owned()),
            Some("https://files.example.com/wheel_pkg-1.0-py3-none-any.whl".to_owned()),
            Some("git+https://github.com/example/mono.git@v2.0".to_owned()),
        ]
    );

    assert_eq!(deps[1].editable, Some(true));
    assert_eq!(deps[0].editable, None);
    assert_eq!(
        deps[2].url().map(|url| url.location.clone()),
        Some(Location::Vcs {
            vcs: Vcs::Hg,
            url: "https://hg.example.com/repo".to_owned()
        })
    );
    assert_eq!(
        deps[3].url().map(|url| url.location.clone()),
        Some(Location::File(
            "https://files.example.com/wheel_pkg-1.0-py3-none-any.whl".to_owned()
        ))
    );
    assert_eq!(deps[4].subdirectory.as_deref(), Some("packages/sub"));
}

#[test]
fn load_index_pinned_package() {
    let root = PipfileConverter::default()
        .loads(&read_fixture("multiple-sources"))
        .expect("Failed to load multiple-sources");
    let internal = root
        .dependencies()
        .iter()
        .find(|dependency| dependency.name == "internal-lib")
        .expect("Missing internal-lib");
    assert_eq!(internal.index.as_deref(), Some("private"));
    assert_eq!(internal.constraint.to_string(), ">=1.0");
}

#[test]
fn duplicate_dependencies_dump_to_one_entry() {
    let root = PipfileConverter::default()
        .loads("[packages]\na = \"*\"\nb = \"*\"\n")
        .unwrap();
    let mut deps = root.into_dependencies();
    deps.push(deps[0].clone());
    let content = PipfileConverter::default().dumps(&deps, None).unwrap();
    let reloaded = PipfileConverter::default().loads(&content).unwrap();
    assert_eq!(reloaded.dependencies().len(), 2);
}

#[test]
fn malformed_entry_names_the_package() {
    let err = PipfileConverter::default()
        .loads("[packages]\nbad = { extras = \"socks\" }\n")
        .unwrap_err();
    assert!(matches!(&err, Error::MalformedEntry { name, .. } if name == "bad"));
}

#[test]
fn packages_must_be_a_table() {
    let err = PipfileConverter::default()
        .loads("packages = [\"requests\"]\n")
        .unwrap_err();
    assert_eq!(err.to_string(), "`packages` must be a table, found array");
}

#[test]
fn missing_pipfile_returns_error() {
    let result = PipfileConverter::load(&PathBuf::from("/nonexistent/Pipfile"));
    assert!(matches!(result, Err(Error::Io(_))));
}
