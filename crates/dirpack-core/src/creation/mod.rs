//! Archive creation module.
//!
//! Packing is split in two phases: the walker turns a source root and its
//! exclusion rules into an [`ArchivePlan`], then the zip writer streams the
//! planned files into a temporary archive that is renamed into place.

pub mod config;
pub mod report;
pub mod rules;
pub mod walker;
pub mod zip;

// Re-exports for public API
pub use config::ArchiveConfig;
pub use report::CreationReport;
pub use rules::ExclusionRules;
pub use rules::FilePattern;
pub use walker::ArchiveEntry;
pub use walker::ArchivePlan;
pub use walker::PlanWalker;
