//! Project fixtures and the lifecycle hooks the harness drives.
//!
//! A fixture goes through four stages: [`Project::empty`] builds an inert
//! value, [`Project::init`] applies its configuration, [`Project::setup`]
//! prepares the working directory and [`Project::teardown`] removes
//! everything the fixture created. [`CliProject`] is the fixture for a
//! command-line tool running in a staged directory.

use std::future::Future;
use std::path::{Component, Path, PathBuf};

use cli_project_lib::ProcessParams;
use tokio::fs;
use tokio::process::Command;
use tracing::debug;

use crate::config::ProjectConfig;
use crate::error::{ProjectError, Result};
use crate::fs::{folder_content, remove_path, remove_paths};

/// Lifecycle hooks for a test fixture.
///
/// [`crate::factory::ProjectFactory`] calls `empty` and `init`;
/// [`crate::lifecycle`] calls `setup` and then `teardown` exactly once.
pub trait Project: Sized {
    /// Caller-defined options carried by the configuration.
    type Options;

    /// Build a fixture that has not seen its configuration yet.
    fn empty() -> Self;

    /// Apply `cfg`. Called once, by the factory.
    fn init(&mut self, cfg: ProjectConfig<Self::Options>) -> impl Future<Output = Result<()>>;

    /// Prepare the fixture for use by a test.
    fn setup(&mut self) -> impl Future<Output = Result<()>>;

    /// Release everything the fixture created.
    fn teardown(&mut self) -> impl Future<Output = Result<()>>;
}

/// Fixture for a command-line tool running inside a project directory.
#[derive(Debug)]
pub struct CliProject<T> {
    config: Option<ProjectConfig<T>>,
    created_root: bool,
    staged: Vec<PathBuf>,
    created_dirs: Vec<PathBuf>,
}

impl<T> Default for CliProject<T> {
    fn default() -> Self {
        Self {
            config: None,
            created_root: false,
            staged: Vec::new(),
            created_dirs: Vec::new(),
        }
    }
}

impl<T> CliProject<T> {
    /// Configuration applied by `init`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::NotInitialised`] before `init` has run.
    pub fn config(&self) -> Result<&ProjectConfig<T>> {
        self.config.as_ref().ok_or(ProjectError::NotInitialised)
    }

    /// Caller-defined options.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::NotInitialised`] before `init` has run.
    pub fn options(&self) -> Result<&T> {
        Ok(&self.config()?.options)
    }

    /// Project working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::NotInitialised`] before `init` has run.
    pub fn root(&self) -> Result<&Path> {
        Ok(&self.config()?.root)
    }

    /// Resolve `rel` against the project root.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::PathEscapesRoot`] for absolute paths or paths
    /// containing `..`, and [`ProjectError::NotInitialised`] before `init`.
    pub fn path(&self, rel: impl AsRef<Path>) -> Result<PathBuf> {
        let rel = rel.as_ref();
        ensure_contained(rel)?;
        Ok(self.root()?.join(rel))
    }

    /// Paths written by `setup` or [`Self::write_file`] that teardown will
    /// remove.
    pub fn staged(&self) -> &[PathBuf] {
        &self.staged
    }

    /// Write `contents` to `rel` inside the project, creating parent
    /// directories. The file is removed on teardown.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Stage`] when the write fails.
    pub async fn write_file(
        &mut self,
        rel: impl AsRef<Path>,
        contents: impl AsRef<[u8]>,
    ) -> Result<()> {
        let path = self.path(rel)?;
        self.stage(path, contents.as_ref()).await
    }

    /// Read `rel` from the project directory as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Read`] when the file cannot be read.
    pub async fn read_file(&self, rel: impl AsRef<Path>) -> Result<String> {
        let path = self.path(rel)?;
        fs::read_to_string(&path)
            .await
            .map_err(|source| ProjectError::Read { path, source })
    }

    /// Argument vector for one invocation: the configured default
    /// parameters overlaid with `params`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::NotInitialised`] before `init` has run.
    pub fn args(&self, params: &ProcessParams) -> Result<Vec<String>> {
        Ok(self.config()?.default_params.merged(params).to_args())
    }

    /// Build, but do not spawn, a command running the configured executable
    /// in the project root.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::NotInitialised`] before `init` has run.
    pub fn command(&self, params: &ProcessParams) -> Result<Command> {
        let cfg = self.config()?;
        let mut cmd = Command::new(&cfg.bin);
        cmd.args(self.args(params)?).current_dir(&cfg.root);
        Ok(cmd)
    }

    async fn stage(&mut self, path: PathBuf, contents: &[u8]) -> Result<()> {
        self.created_dirs.extend(stage_file(&path, contents).await?);
        if !self.staged.contains(&path) {
            self.staged.push(path);
        }
        Ok(())
    }

    fn cleanup_targets(&self) -> Result<Vec<PathBuf>> {
        let cfg = self.config()?;
        let folders: Vec<PathBuf> = cfg.cleanup.iter().map(|f| cfg.root.join(f)).collect();
        // Missing folders come back as themselves; drop them so only
        // folder contents are ever removed.
        Ok(folder_content(&folders)?
            .into_iter()
            .filter(|p| !folders.contains(p))
            .collect())
    }
}

impl<T> Project for CliProject<T> {
    type Options = T;

    fn empty() -> Self {
        Self::default()
    }

    async fn init(&mut self, cfg: ProjectConfig<T>) -> Result<()> {
        for rel in cfg.files.keys().chain(&cfg.cleanup) {
            ensure_contained(rel)?;
        }
        if let Some(rel) = cfg.cleanup.iter().find(|rel| !names_entry(rel)) {
            return Err(ProjectError::CleanupIsRoot(rel.clone()));
        }
        if !cfg.root.exists() {
            fs::create_dir_all(&cfg.root)
                .await
                .map_err(|source| ProjectError::Stage {
                    path: cfg.root.clone(),
                    source,
                })?;
            self.created_root = true;
        }
        debug!(
            project = %cfg.name,
            root = %cfg.root.display(),
            created = self.created_root,
            "project initialised"
        );
        self.config = Some(cfg);
        Ok(())
    }

    async fn setup(&mut self) -> Result<()> {
        remove_paths(self.cleanup_targets()?)?;
        let cfg = self.config()?;
        let files: Vec<(PathBuf, String)> = cfg
            .files
            .iter()
            .map(|(rel, contents)| (cfg.root.join(rel), contents.clone()))
            .collect();
        let name = cfg.name.clone();
        for (path, contents) in &files {
            self.stage(path.clone(), contents.as_bytes()).await?;
        }
        debug!(project = %name, files = files.len(), "project staged");
        Ok(())
    }

    async fn teardown(&mut self) -> Result<()> {
        // Nothing to undo if init never stored a configuration.
        let Some(cfg) = self.config.as_ref() else {
            return Ok(());
        };
        remove_paths(&self.staged)?;
        self.staged.clear();
        remove_paths(self.created_dirs.iter().rev())?;
        self.created_dirs.clear();
        remove_paths(self.cleanup_targets()?)?;
        if self.created_root {
            remove_path(&cfg.root)?;
            self.created_root = false;
        }
        debug!(project = %cfg.name, "project torn down");
        Ok(())
    }
}

/// Write `contents` to `path`, returning the directories created for it,
/// outermost first.
async fn stage_file(path: &Path, contents: &[u8]) -> Result<Vec<PathBuf>> {
    let stage_err = |source| ProjectError::Stage {
        path: path.to_path_buf(),
        source,
    };
    let mut created = Vec::new();
    if let Some(parent) = path.parent() {
        for dir in parent.ancestors() {
            if fs::try_exists(dir).await.map_err(stage_err)? {
                break;
            }
            created.push(dir.to_path_buf());
        }
        created.reverse();
        fs::create_dir_all(parent).await.map_err(stage_err)?;
    }
    fs::write(path, contents).await.map_err(stage_err)?;
    Ok(created)
}

/// Whether `rel` names something below the root rather than the root itself.
fn names_entry(rel: &Path) -> bool {
    rel.components().any(|c| matches!(c, Component::Normal(_)))
}

fn ensure_contained(rel: &Path) -> Result<()> {
    let escapes = rel
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(ProjectError::PathEscapesRoot(rel.to_path_buf()));
    }
    Ok(())
}
