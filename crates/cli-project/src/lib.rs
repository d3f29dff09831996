#![cfg_attr(docsrs, feature(doc_cfg))]

//! Test fixtures for command-line tools.
//!
//! # Overview
//! This crate exposes:
//! - [`fs`] — listing and removal helpers that treat missing paths as
//!   no-ops.
//! - [`config::ProjectConfig`] — the description of a staged project,
//!   built in code or loaded from TOML with environment overrides.
//! - [`project::CliProject`] and the [`project::Project`] lifecycle trait.
//! - [`factory::ProjectFactory`] and [`lifecycle::with_project`], which
//!   build a fixture, run a test body against it and always tear it down.
//!
//! Parameter encoding lives in `cli-project-lib` and is re-exported here.
//!
//! # Examples
//! ```rust,no_run
//! use cli_project::{CliProject, ProcessParams, ProjectConfig, with_project};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let cfg = ProjectConfig::new("/tmp/demo", "my-tool", ())
//!     .with_default_params(ProcessParams::new().with("color", false));
//! with_project(cfg, async |project: &mut CliProject<()>| -> anyhow::Result<()> {
//!     let _cmd = project.command(&ProcessParams::new().positional("build"))?;
//!     Ok(())
//! })()
//! .await?;
//! # Ok(())
//! # }
//! ```
pub mod cli;
pub mod config;
pub mod error;
pub mod factory;
pub mod fs;
pub mod lifecycle;
pub mod logging;
pub mod project;

pub use cli_project_lib::{ParamValue, ProcessParams, process_params_to_args};
pub use config::ProjectConfig;
pub use error::{FsError, ProjectError};
pub use factory::ProjectFactory;
pub use lifecycle::{with_project, with_project_using};
pub use project::{CliProject, Project};
