//! Error conversion utilities for CLI.
//!
//! Converts dirpack-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use dirpack_core::ArchiveError;
use std::path::Path;

/// Converts `ArchiveError` to a user-friendly anyhow error.
///
/// `subject` is the directory being packed or the archive being listed.
pub fn convert_archive_error(err: ArchiveError, subject: &Path) -> anyhow::Error {
    match err {
        ArchiveError::SourceNotFound { path } => {
            anyhow!(
                "Path not found: {}\n\
                 HINT: Check the path, or run from the project root so the default '.' resolves.",
                path.display()
            )
        }
        ArchiveError::NotADirectory { path } => {
            anyhow!(
                "Not a directory: {}\n\
                 HINT: Pass the directory to pack, not a file inside it.",
                path.display()
            )
        }
        ArchiveError::PermissionDenied { path } => {
            anyhow!(
                "Permission denied: {}\n\
                 HINT: Fix the permissions, or skip the path with --exclude-dir or --exclude.",
                path.display()
            )
        }
        ArchiveError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid archive '{}': {}\n\
                 HINT: The file may be corrupted or not a zip archive.",
                subject.display(),
                reason
            )
        }
        ArchiveError::InvalidConfiguration { reason } => {
            anyhow!(
                "Invalid configuration: {reason}\n\
                 HINT: Run 'dirpack create --help' for the accepted options."
            )
        }
        ArchiveError::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {}",
                subject.display(),
                io_err
            )
        }
    }
}

/// Adds context to a dirpack-core result.
pub fn add_archive_context<T>(
    result: Result<T, ArchiveError>,
    subject: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_archive_error(e, subject))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_convert_source_not_found() {
        let err = ArchiveError::SourceNotFound {
            path: PathBuf::from("missing_project"),
        };
        let msg = format!("{:?}", convert_archive_error(err, Path::new("missing_project")));
        assert!(msg.contains("Path not found"));
        assert!(msg.contains("missing_project"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_permission_denied() {
        let err = ArchiveError::PermissionDenied {
            path: PathBuf::from("src/secret.txt"),
        };
        let msg = format!("{:?}", convert_archive_error(err, Path::new(".")));
        assert!(msg.contains("src/secret.txt"));
        assert!(msg.contains("--exclude"));
    }

    #[test]
    fn test_convert_invalid_archive() {
        let err = ArchiveError::InvalidArchive("bad central directory".into());
        let msg = format!("{:?}", convert_archive_error(err, Path::new("site.zip")));
        assert!(msg.contains("site.zip"));
        assert!(msg.contains("bad central directory"));
    }

    #[test]
    fn test_convert_io_error() {
        let io_err = io::Error::new(io::ErrorKind::WriteZero, "disk full");
        let converted = convert_archive_error(ArchiveError::Io(io_err), Path::new("app"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("disk full"));
    }

    #[test]
    fn test_add_archive_context_passes_ok() {
        let result: Result<u8, ArchiveError> = Ok(7);
        assert_eq!(add_archive_context(result, Path::new(".")).ok(), Some(7));
    }
}
