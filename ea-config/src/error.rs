//! Errors raised while loading a parameter file.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// A parameter file could not be turned into an [`EaConfig`](crate::EaConfig).
///
/// Validation rules never run when loading fails.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigLoadError {
    /// The file is missing or unreadable.
    #[error("cannot read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content is not well-formed JSON/YAML, or a field has the wrong type.
    #[error("malformed config file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// The top-level document is a scalar or a sequence.
    #[error("config file {} must contain a mapping at the top level", .path.display())]
    NotAMapping { path: PathBuf },
}

impl ConfigLoadError {
    /// Path of the offending file (`<inline>` for in-memory content).
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Parse { path, .. } | Self::NotAMapping { path } => path,
        }
    }

    pub(crate) fn with_path(self, new_path: PathBuf) -> Self {
        match self {
            Self::Io { source, .. } => Self::Io {
                path: new_path,
                source,
            },
            Self::Parse { message, .. } => Self::Parse {
                path: new_path,
                message,
            },
            Self::NotAMapping { .. } => Self::NotAMapping { path: new_path },
        }
    }
}
