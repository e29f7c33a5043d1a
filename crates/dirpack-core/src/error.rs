//! Error types for directory packing operations.

use std::io;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ArchiveError`.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Coarse classification of an [`ArchiveError`].
///
/// Callers that only care about what went wrong, not where, can match on
/// this instead of the individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The source root (or an archive to list) does not exist.
    NotFound,
    /// A file or directory could not be read, or the output could not be
    /// written.
    PermissionDenied,
    /// Any other I/O failure, including a malformed archive.
    Io,
    /// The configuration was rejected before touching the filesystem.
    Configuration,
}

/// Errors that can occur while packing a directory or listing an archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Source directory does not exist.
    #[error("source not found: {path}")]
    SourceNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// Source exists but is not a directory.
    #[error("source is not a directory: {path}")]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// A file could not be read or the output could not be written.
    #[error("permission denied: {path}")]
    PermissionDenied {
        /// The path the operation was denied on.
        path: PathBuf,
    },

    /// Existing archive is corrupted or not a zip file.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// Configuration was rejected by validation.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Why the configuration was rejected.
        reason: String,
    },
}

impl ArchiveError {
    /// Classifies an I/O error that happened on `path`.
    ///
    /// `PermissionDenied` keeps the path; every other kind is wrapped with the
    /// path prepended to its message.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirpack_core::ArchiveError;
    /// use std::io;
    /// use std::path::Path;
    ///
    /// let err = ArchiveError::from_io(
    ///     Path::new("secret.txt"),
    ///     io::Error::from(io::ErrorKind::PermissionDenied),
    /// );
    /// assert!(matches!(err, ArchiveError::PermissionDenied { .. }));
    /// ```
    #[must_use]
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::PermissionDenied {
            return Self::PermissionDenied {
                path: path.to_path_buf(),
            };
        }
        Self::Io(io::Error::new(
            err.kind(),
            format!("{}: {err}", path.display()),
        ))
    }

    /// Converts a directory walk failure.
    #[must_use]
    pub fn from_walk(err: walkdir::Error) -> Self {
        let path = err.path().map(Path::to_path_buf);
        match (err.into_io_error(), path) {
            (Some(io_err), Some(path)) => Self::from_io(&path, io_err),
            (Some(io_err), None) => Self::Io(io_err),
            (None, _) => Self::Io(io::Error::other("walkdir error: filesystem loop")),
        }
    }

    /// Returns the coarse category of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirpack_core::ArchiveError;
    /// use dirpack_core::ErrorCategory;
    /// use std::path::PathBuf;
    ///
    /// let err = ArchiveError::SourceNotFound {
    ///     path: PathBuf::from("missing"),
    /// };
    /// assert_eq!(err.category(), ErrorCategory::NotFound);
    /// ```
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SourceNotFound { .. } => ErrorCategory::NotFound,
            Self::PermissionDenied { .. } => ErrorCategory::PermissionDenied,
            Self::Io(err) => match err.kind() {
                io::ErrorKind::NotFound => ErrorCategory::NotFound,
                io::ErrorKind::PermissionDenied => ErrorCategory::PermissionDenied,
                _ => ErrorCategory::Io,
            },
            Self::NotADirectory { .. } | Self::InvalidConfiguration { .. } => {
                ErrorCategory::Configuration
            }
            Self::InvalidArchive(_) => ErrorCategory::Io,
        }
    }

    /// Returns the path this error refers to, if it carries one.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::SourceNotFound { path }
            | Self::NotADirectory { path }
            | Self::PermissionDenied { path } => Some(path),
            _ => None,
        }
    }
}

impl From<zip::result::ZipError> for ArchiveError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(io_err) => Self::Io(io_err),
            other => Self::InvalidArchive(other.to_string()),
        }
    }
}
