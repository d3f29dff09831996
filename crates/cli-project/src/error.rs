//! Error types for fixture staging and lifecycle operations.

use std::path::PathBuf;

use thiserror::Error;

/// Filesystem failures raised by the staging utilities.
///
/// A path that does not exist is never reported here; listing and removal
/// treat absence as a no-op.
#[derive(Debug, Error)]
pub enum FsError {
    /// Listing a directory failed.
    #[error("failed to read directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Removing a file or directory failed.
    #[error("failed to remove {}: {source}", .path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while building, preparing or tearing down a project.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error(transparent)]
    Fs(#[from] FsError),
    /// Writing a staged file or creating its parent directory failed.
    #[error("failed to stage {}: {source}", .path.display())]
    Stage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Reading a file from the project directory failed.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A configured path is absolute or climbs out of the project root.
    #[error("path escapes the project root: {}", .0.display())]
    PathEscapesRoot(PathBuf),
    /// A cleanup folder resolves to the project root itself.
    #[error("cleanup folder must name a directory below the project root: {:?}", .0)]
    CleanupIsRoot(PathBuf),
    /// The project was used before its configuration was applied.
    #[error("project has not been initialised")]
    NotInitialised,
    /// Loading the project configuration failed.
    #[error("invalid project configuration: {0}")]
    Config(#[from] Box<figment::Error>),
}

pub type Result<T> = std::result::Result<T, ProjectError>;
