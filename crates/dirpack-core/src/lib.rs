//! Directory-to-zip packing with directory and file exclusions.
//!
//! `dirpack-core` walks a source directory once, prunes excluded directories
//! before descending into them, skips excluded file names, and writes every
//! remaining regular file into a Deflate-compressed ZIP archive under its
//! root-relative path. The archive is written atomically: a failed run never
//! leaves a partial file at the output path.
//!
//! # Examples
//!
//! ```no_run
//! use dirpack_core::ArchiveConfig;
//! use dirpack_core::build_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ArchiveConfig::for_project(".")?;
//! let report = build_archive(&config)?;
//! println!("Packed {} files", report.files_added);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod creation;
pub mod error;
pub mod inspection;
pub mod report;

// Re-export main API types
pub use api::build_archive;
pub use api::build_archive_with_progress;
pub use api::plan_archive;
pub use creation::ArchiveConfig;
pub use creation::ArchiveEntry;
pub use creation::ArchivePlan;
pub use creation::CreationReport;
pub use creation::ExclusionRules;
pub use creation::FilePattern;
pub use error::ArchiveError;
pub use error::ErrorCategory;
pub use error::Result;
pub use inspection::ArchiveListing;
pub use inspection::ListedEntry;
pub use inspection::list_archive;
pub use report::NoopProgress;
pub use report::ProgressCallback;
