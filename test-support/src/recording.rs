//! A scripted fake fixture that records its lifecycle.
//!
//! [`RecordingProject`] implements [`Project`] by appending a [`Stage`] to
//! a shared [`LifecycleLog`] on every hook, and fails whichever hooks its
//! [`Script`] asks it to. Tests hand it to
//! [`cli_project::with_project_using`] to observe ordering and teardown
//! guarantees without touching the filesystem.

use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use cli_project::{Project, ProjectConfig, ProjectError};

/// A lifecycle step observed by the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    Setup,
    Body,
    Teardown,
}

/// Shared, clonable record of lifecycle stages.
#[derive(Debug, Clone, Default)]
pub struct LifecycleLog(Arc<Mutex<Vec<Stage>>>);

impl LifecycleLog {
    pub fn record(&self, stage: Stage) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(stage);
    }

    /// Stages recorded so far, in order.
    pub fn stages(&self) -> Vec<Stage> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn count(&self, stage: Stage) -> usize {
        self.stages().iter().filter(|s| **s == stage).count()
    }
}

/// Which hooks fail, plus the log they write to.
#[derive(Debug, Clone, Default)]
pub struct Script {
    pub log: LifecycleLog,
    pub fail_init: bool,
    pub fail_setup: bool,
    pub fail_teardown: bool,
}

impl Script {
    /// A script where every hook succeeds.
    pub fn passing(log: &LifecycleLog) -> Self {
        Self {
            log: log.clone(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failing_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    #[must_use]
    pub fn failing_setup(mut self) -> Self {
        self.fail_setup = true;
        self
    }

    #[must_use]
    pub fn failing_teardown(mut self) -> Self {
        self.fail_teardown = true;
        self
    }
}

/// Fake fixture driven by a [`Script`].
#[derive(Debug, Default)]
pub struct RecordingProject {
    script: Option<Script>,
}

impl RecordingProject {
    /// Record that the test body ran against this fixture.
    pub fn record_body(&self) {
        if let Some(script) = &self.script {
            script.log.record(Stage::Body);
        }
    }

    fn step(&self, stage: Stage, fail: bool) -> Result<(), ProjectError> {
        let Some(script) = &self.script else {
            return Err(ProjectError::NotInitialised);
        };
        script.log.record(stage);
        if fail {
            return Err(injected(stage));
        }
        Ok(())
    }
}

impl Project for RecordingProject {
    type Options = Script;

    fn empty() -> Self {
        Self::default()
    }

    async fn init(&mut self, cfg: ProjectConfig<Script>) -> Result<(), ProjectError> {
        let fail = cfg.options.fail_init;
        self.script = Some(cfg.options);
        tokio::task::yield_now().await;
        self.step(Stage::Init, fail)
    }

    async fn setup(&mut self) -> Result<(), ProjectError> {
        tokio::task::yield_now().await;
        let fail = self.script.as_ref().is_some_and(|s| s.fail_setup);
        self.step(Stage::Setup, fail)
    }

    async fn teardown(&mut self) -> Result<(), ProjectError> {
        tokio::task::yield_now().await;
        let fail = self.script.as_ref().is_some_and(|s| s.fail_teardown);
        self.step(Stage::Teardown, fail)
    }
}

/// Build a [`ProjectConfig`] carrying `script`.
pub fn recording_config(script: Script) -> ProjectConfig<Script> {
    ProjectConfig::new("recording-root", "recording-bin", script).with_name("recording")
}

/// Error returned by a hook the script told to fail.
pub fn injected(stage: Stage) -> ProjectError {
    ProjectError::Stage {
        path: format!("<{stage:?}>").into(),
        source: io::Error::other(format!("injected {stage:?} failure")),
    }
}
