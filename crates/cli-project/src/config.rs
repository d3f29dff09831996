//! Project fixture configuration.
//!
//! A [`ProjectConfig`] describes the directory a command-line tool runs in,
//! the executable, the files staged before a test and the caller's own
//! options. It can be built in code or loaded from a TOML file whose values
//! may be overridden by `CLI_PROJECT_` environment variables.

use std::io;
use std::path::{Path, PathBuf};

use cli_project_lib::ProcessParams;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ProjectError;

/// Default project name when none is provided.
const DEFAULT_NAME: &str = "cli-project";
/// Prefix of environment variables that override file values.
pub const ENV_PREFIX: &str = "CLI_PROJECT_";

/// Configuration for one project fixture.
///
/// `T` carries caller-defined options and is handed to the fixture
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: Deserialize<'de> + Default"
))]
pub struct ProjectConfig<T> {
    /// Label used in log output.
    #[serde(default = "default_name")]
    pub name: String,
    /// Working directory of the tool under test.
    pub root: PathBuf,
    /// Executable under test.
    pub bin: PathBuf,
    /// Parameters applied to every invocation unless overridden.
    #[serde(default)]
    pub default_params: ProcessParams,
    /// Files written by setup, keyed by path relative to `root`.
    #[serde(default)]
    pub files: IndexMap<PathBuf, String>,
    /// Folders relative to `root` whose contents are wiped on setup and
    /// teardown.
    #[serde(default)]
    pub cleanup: Vec<PathBuf>,
    /// Caller-defined options.
    #[serde(default)]
    pub options: T,
}

fn default_name() -> String {
    DEFAULT_NAME.to_owned()
}

impl<T> ProjectConfig<T> {
    /// Create a configuration with no staged files or default parameters.
    pub fn new(root: impl Into<PathBuf>, bin: impl Into<PathBuf>, options: T) -> Self {
        Self {
            name: default_name(),
            root: root.into(),
            bin: bin.into(),
            default_params: ProcessParams::new(),
            files: IndexMap::new(),
            cleanup: Vec::new(),
            options,
        }
    }

    /// Override the project name and return the updated configuration.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Add a file to stage and return the updated configuration.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }

    /// Add a folder to wipe and return the updated configuration.
    #[must_use]
    pub fn with_cleanup(mut self, folder: impl Into<PathBuf>) -> Self {
        self.cleanup.push(folder.into());
        self
    }

    /// Replace the default parameters and return the updated configuration.
    #[must_use]
    pub fn with_default_params(mut self, params: ProcessParams) -> Self {
        self.default_params = params;
        self
    }
}

impl<T: DeserializeOwned + Default> ProjectConfig<T> {
    /// Load the configuration from a TOML file, merging `CLI_PROJECT_*`
    /// environment variables over file values.
    ///
    /// Nested keys are separated by `__`, so `CLI_PROJECT_OPTIONS__MODE`
    /// sets `options.mode`. Tables pass through figment's sorted
    /// dictionaries, so `default_params` and `files` loaded this way are
    /// ordered by key rather than by their position in the file.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Read`] when the file is missing and
    /// [`ProjectError::Config`] when it is not valid TOML or does not
    /// describe a project.
    pub fn from_file(path: &Path) -> Result<Self, ProjectError> {
        if !path.is_file() {
            return Err(ProjectError::Read {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "configuration file not found"),
            });
        }
        Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| ProjectError::Config(Box::new(e)))
    }
}
