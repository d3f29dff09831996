//! Temporary project configurations for tests.

use cli_project::{ProcessParams, ProjectConfig};
use tempfile::TempDir;

/// Options carried by [`temp_config`] projects.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TestOptions {
    /// Free-form label for assertions.
    pub label: String,
}

/// Build a [`ProjectConfig`] rooted at `tmp/project`.
///
/// The root does not exist yet, so a [`cli_project::CliProject`] built from
/// it creates and later removes the directory. Two files are staged and
/// `out` is registered as a cleanup folder.
pub fn temp_config(tmp: &TempDir) -> ProjectConfig<TestOptions> {
    ProjectConfig::new(
        tmp.path().join("project"),
        "echo",
        TestOptions {
            label: "temp".into(),
        },
    )
    .with_name("temp-project")
    .with_file("README.md", "# fixture\n")
    .with_file("src/input.txt", "hello")
    .with_cleanup("out")
    .with_default_params(ProcessParams::new().with("color", false))
}
