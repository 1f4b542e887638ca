// The `unreachable_pub` is to silence false positives in RustRover.
#![allow(dead_code, unreachable_pub)]

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Insta snapshot filters shared across pipfile-convert tests.
pub const INSTA_FILTERS: &[(&str, &str)] = &[
    // Rewrite Windows output to Unix output
    (r"\\([\w\d]|\.)", "/$1"),
    (r"pipfile-convert\.exe", "pipfile-convert"),
    // Trim end-of-line whitespaces
    (r"([^\s])[ \t]+(\r?\n)", "$1$2"),
];

/// Returns the pipfile-convert binary that cargo built before launching the tests.
pub fn get_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_pipfile-convert"))
}

/// Create a `pipfile-convert` command for testing.
pub fn pipfile_convert_command() -> Command {
    let mut command = Command::new(get_bin());
    // Clear environment variables that might interfere with tests.
    command.env_remove("PIPENV_PIPFILE");
    command.env_remove("PIPENV_MAX_DEPTH");
    command.env_remove("RUST_LOG");
    command
}

/// Return the path to a test fixture Pipfile.
pub fn fixture(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/fixtures");
    path.push(name);
    path.push("Pipfile");
    path
}

/// Read a test fixture Pipfile.
pub fn read_fixture(name: &str) -> String {
    fs_err::read_to_string(fixture(name)).expect("Failed to read fixture")
}

/// Copy a fixture Pipfile into a fresh temporary directory.
pub fn copy_fixture(name: &str) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temporary directory");
    fs_err::copy(fixture(name), dir.path().join("Pipfile")).expect("Failed to copy fixture");
    dir
}

/// Snapshot filters that also replace `dir` with `[TEMP]`.
pub fn temp_filters(dir: &Path) -> Vec<(String, String)> {
    let mut filters = vec![(
        regex::escape(&dir.display().to_string()),
        "[TEMP]".to_owned(),
    )];
    filters.extend(
        INSTA_FILTERS
            .iter()
            .map(|(pattern, replacement)| ((*pattern).to_owned(), (*replacement).to_owned())),
    );
    filters
}

/// Snapshot test helper macro. Runs a command and asserts against an insta snapshot.
#[macro_export]
macro_rules! pipfile_convert_snapshot {
    ($filters:expr, $command:expr, @$expected:literal) => {{
        let output = $command.output().expect("Failed to execute pipfile-convert");
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        let mut combined = format!(
            "success: {:?}\nexit_code: {}\n----- stdout -----\n{}\n----- stderr -----\n{}",
            output.status.success(),
            output.status.code().unwrap_or(-1),
            stdout.trim(),
            stderr.trim(),
        );

        // Apply filters
        for (pattern, replacement) in $filters.iter() {
            let re = regex::Regex::new(pattern.as_ref()).expect("Invalid filter regex");
            let replacement: &str = replacement.as_ref();
            combined = re.replace_all(&combined, replacement).to_string();
        }

        insta::assert_snapshot!(combined, @$expected);
    }};
}
