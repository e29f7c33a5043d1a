//! Archive inspection without extraction.

pub mod list;

pub use list::ArchiveListing;
pub use list::ListedEntry;
pub use list::list_archive;
