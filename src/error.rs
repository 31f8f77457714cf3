//! Library error type.
//!
//! Absence and malformed on-disk data are not errors here: discovery and cache
//! reads degrade to empty results. Only failures a caller has to report end up
//! in [`ScriptsError`].

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptsError {
    #[error("script '{name}' already exists in {}", .root.display())]
    DuplicateName { name: String, root: PathBuf },

    #[error("invalid script name '{0}': must be non-empty and contain no whitespace")]
    InvalidName(String),

    #[error("script command must not be empty")]
    EmptyCommand,

    #[error("failed to write override cache {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("terminal '{name}' failed: {source}")]
    Terminal {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = ScriptsError> = std::result::Result<T, E>;
