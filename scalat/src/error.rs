//! Error handling for the scalat CLI.
//!
//! Unreadable source files are not errors; the checker classifies them as
//! skips. This module covers the failures that abort the run itself.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a scalat run.
#[derive(Error, Debug)]
pub enum ScalatError {
    /// A root given on the command line does not exist.
    #[error("no such path: {0}")]
    MissingRoot(PathBuf),

    /// A directory could not be listed while discovering sources.
    #[error("failed to read directory {path}: {source}")]
    Walk {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The logging subscriber could not be installed.
    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

/// Result type alias using ScalatError.
pub type Result<T> = std::result::Result<T, ScalatError>;
