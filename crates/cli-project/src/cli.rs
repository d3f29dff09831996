//! Command-line front end for the staging helpers.
//!
//! Lets shell scripts and CI steps reuse the argument encoding and the
//! missing-path-tolerant filesystem helpers without writing Rust.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cli_project_lib::ProcessParams;
use thiserror::Error;
use tracing::info;

use crate::error::FsError;
use crate::fs::{folder_content, remove_paths};

/// Command line arguments for the `cli-project` binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "cli-project", about = "Stage and inspect CLI test projects")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the argument vector for a JSON parameter object, one token per
    /// line.
    Args {
        /// Parameters as a JSON object, e.g. '{"verbose": true, "_": "run"}'.
        #[arg(value_parser = parse_params)]
        params: ProcessParams,
    },
    /// List the immediate contents of each folder. Missing folders are
    /// printed as given.
    Ls {
        #[arg(required = true)]
        folders: Vec<PathBuf>,
    },
    /// Remove files or directories, skipping paths that do not exist.
    Rm {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

fn parse_params(s: &str) -> Result<ProcessParams, String> {
    serde_json::from_str(s).map_err(|e| format!("invalid parameters: {e}"))
}

/// Errors raised while executing a subcommand.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Fs(#[from] FsError),
    /// Writing results to the output failed.
    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),
}

/// Execute `args`, writing results to `out`.
///
/// # Errors
///
/// Returns [`CliError::Fs`] when listing or removal fails and
/// [`CliError::Write`] when `out` rejects the output.
pub fn run<W: Write>(args: Args, out: &mut W) -> Result<(), CliError> {
    let lines: Vec<String> = match args.command {
        Command::Args { params } => params.to_args(),
        Command::Ls { folders } => folder_content(&folders)?
            .iter()
            .map(|p| p.display().to_string())
            .collect(),
        Command::Rm { paths } => {
            remove_paths(&paths)?;
            info!(count = paths.len(), "paths removed");
            Vec::new()
        }
    };
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
