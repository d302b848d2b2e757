//! Error types for repository access, configuration and output.

use std::path::PathBuf;

/// Boxed error from the git backend.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced by the library half of the crate.
///
/// Command entry points wrap these in `anyhow` with extra context.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The git metadata could not be opened or read. No version can be
    /// derived, so the caller must abort.
    #[error("failed to {action} in git repository at {}", path.display())]
    RepositoryAccess {
        path: PathBuf,
        action: &'static str,
        #[source]
        source: BoxError,
    },

    /// HEAD does not carry any tag.
    #[error("HEAD ({head}) is not tagged")]
    HeadNotTagged { head: String },

    /// The configuration file could not be read or is invalid.
    #[error("invalid configuration in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("invalid format: {0}")]
    InvalidFormat(String),
}

impl Error {
    pub(crate) fn repository_access(
        path: impl Into<PathBuf>,
        action: &'static str,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::RepositoryAccess {
            path: path.into(),
            action,
            source: source.into(),
        }
    }

    pub(crate) fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
