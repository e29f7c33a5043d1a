//! Packing operation reporting.

use std::path::PathBuf;
use std::time::Duration;

/// Report of a packing operation.
///
/// # Examples
///
/// ```
/// use dirpack_core::CreationReport;
///
/// let mut report = CreationReport::default();
/// report.files_added = 10;
/// report.bytes_written = 1024;
/// report.bytes_compressed = 512;
///
/// assert_eq!(report.compression_ratio(), 2.0);
/// assert_eq!(report.compression_percentage(), 50.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CreationReport {
    /// Path of the persisted archive.
    pub output_path: PathBuf,

    /// Number of files added to the archive.
    pub files_added: usize,

    /// Total source bytes written into the archive (uncompressed).
    pub bytes_written: u64,

    /// Size of the final archive file.
    pub bytes_compressed: u64,

    /// Number of excluded directories that were not entered.
    pub dirs_pruned: usize,

    /// Number of files left out by exclusion rules.
    pub files_skipped: usize,

    /// Number of symlinks and other non-regular files left out.
    pub specials_skipped: usize,

    /// Duration of the whole operation, walk included.
    pub duration: Duration,

    /// Warnings generated while packing.
    pub warnings: Vec<String>,
}

impl CreationReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns the compression ratio (uncompressed / compressed).
    ///
    /// Returns 0.0 if either size is 0.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.bytes_compressed == 0 || self.bytes_written == 0 {
            return 0.0;
        }
        self.bytes_written as f64 / self.bytes_compressed as f64
    }

    /// Returns the space saved as a percentage of the uncompressed size.
    ///
    /// Returns 0.0 if `bytes_written` is 0, and never goes negative: an
    /// archive larger than its input reports 0.0.
    #[must_use]
    pub fn compression_percentage(&self) -> f64 {
        if self.bytes_written == 0 {
            return 0.0;
        }
        let saved = self.bytes_written.saturating_sub(self.bytes_compressed);
        (saved as f64 / self.bytes_written as f64) * 100.0
    }

    /// Total number of entries left out, for any reason.
    #[must_use]
    pub fn total_skipped(&self) -> usize {
        self.files_skipped + self.specials_skipped
    }
}
