use crate::models::DirectoryRole;
use std::{io, path::PathBuf};

/// Error type shared by the runner and the filesystem boundary.
#[derive(thiserror::Error, Debug)]
pub enum IngestError {
    /// File system I/O failure.
    #[error("I/O error while accessing {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] io::Error),

    /// One of the well-known directories is absent.
    #[error("directory '{}' does not exist ({})", .0, .1.display())]
    MissingDirectory(DirectoryRole, PathBuf),

    /// A well-known name exists but is not a directory.
    #[error("'{}' is not a directory ({})", .0, .1.display())]
    NotADirectory(DirectoryRole, PathBuf),

    /// The destination already holds an entry with the same name.
    #[error("destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),

    /// A failed move could not be undone and `left_behind` still exists.
    #[error("{cause}; cleanup also failed, copy left at {}: {rollback}", .left_behind.display())]
    CleanupFailed {
        cause: Box<IngestError>,
        left_behind: PathBuf,
        rollback: Box<IngestError>,
    },

    /// A path is invalid for the current operation.
    #[error("invalid path: {0}")]
    InvalidPath(String),
}

impl IngestError {
    pub fn io(path: impl Into<PathBuf>, error: io::Error) -> Self {
        Self::Io(path.into(), error)
    }

    pub fn invalid_path(message: impl Into<String>) -> Self {
        Self::InvalidPath(message.into())
    }

    /// Returns the underlying I/O error, if any.
    pub fn io_source(&self) -> Option<&io::Error> {
        match self {
            Self::Io(_, err) => Some(err),
            _ => None,
        }
    }
}

/// Shared result alias for the crate.
pub type Result<T> = std::result::Result<T, IngestError>;
