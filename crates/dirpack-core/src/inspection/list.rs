//! Archive listing implementation.

use std::fs::File;
use std::io;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;

use crate::ArchiveError;
use crate::Result;

/// One entry of an existing archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    /// Entry name as stored in the central directory.
    pub name: String,

    /// Uncompressed size in bytes.
    pub size: u64,

    /// Compressed size in bytes.
    pub compressed_size: u64,

    /// Whether the entry is a directory marker.
    pub is_dir: bool,
}

/// Entries of an existing archive, in central-directory order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveListing {
    /// Path of the listed archive.
    pub path: PathBuf,

    /// Archive entries.
    pub entries: Vec<ListedEntry>,
}

impl ArchiveListing {
    /// Iterates over entry names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Sum of uncompressed entry sizes.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }

    /// Sum of compressed entry sizes.
    #[must_use]
    pub fn total_compressed_size(&self) -> u64 {
        self.entries.iter().map(|e| e.compressed_size).sum()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the archive has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lists archive contents without extracting.
///
/// # Errors
///
/// Returns error if:
/// - The archive does not exist (`SourceNotFound`)
/// - The archive cannot be read (`PermissionDenied` or `Io`)
/// - The file is not a valid ZIP archive (`InvalidArchive`)
///
/// # Examples
///
/// ```no_run
/// use dirpack_core::list_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let listing = list_archive("public/site.zip")?;
/// for entry in &listing.entries {
///     println!("{}: {} bytes", entry.name, entry.size);
/// }
/// # Ok(())
/// # }
/// ```
pub fn list_archive<P: AsRef<Path>>(archive_path: P) -> Result<ArchiveListing> {
    let archive_path = archive_path.as_ref();
    let file = File::open(archive_path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            ArchiveError::SourceNotFound {
                path: archive_path.to_path_buf(),
            }
        } else {
            ArchiveError::from_io(archive_path, e)
        }
    })?;

    let mut archive = zip::ZipArchive::new(BufReader::new(file))?;
    let mut entries = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let entry = archive.by_index_raw(i)?;
        entries.push(ListedEntry {
            name: entry.name().to_string(),
            size: entry.size(),
            compressed_size: entry.compressed_size(),
            is_dir: entry.is_dir(),
        });
    }

    Ok(ArchiveListing {
        path: archive_path.to_path_buf(),
        entries,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn write_sample(path: &Path) {
        let file = File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = SimpleFileOptions::default();
        zip.add_directory("docs/", options).unwrap();
        zip.start_file("docs/readme.md", options).unwrap();
        zip.write_all(b"# readme").unwrap();
        zip.start_file("index.html", options).unwrap();
        zip.write_all(b"<html></html>").unwrap();
        zip.finish().unwrap();
    }

    #[test]
    fn test_list_archive_entries() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sample.zip");
        write_sample(&path);

        let listing = list_archive(&path).unwrap();
        let names: Vec<_> = listing.names().collect();
        assert_eq!(names, vec!["docs/", "docs/readme.md", "index.html"]);
        assert!(listing.entries[0].is_dir);
        assert_eq!(listing.entries[1].size, 8);
        assert_eq!(listing.total_size(), 21);
        assert_eq!(listing.len(), 3);
        assert!(!listing.is_empty());
    }

    #[test]
    fn test_list_archive_missing() {
        let temp = TempDir::new().unwrap();
        let result = list_archive(temp.path().join("missing.zip"));
        assert!(matches!(result, Err(ArchiveError::SourceNotFound { .. })));
    }

    #[test]
    fn test_list_archive_not_a_zip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("fake.zip");
        fs::write(&path, "definitely not a zip archive\n".repeat(16)).unwrap();

        let result = list_archive(&path);
        assert!(result.is_err());
        assert!(!matches!(result, Err(ArchiveError::SourceNotFound { .. })));
    }
}
