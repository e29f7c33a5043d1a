//! Directory tree walking with exclusion rules.
//!
//! The walker produces an [`ArchivePlan`]: the ordered list of files that
//! will become archive entries, plus counters for everything left out. The
//! plan is computed before any output file is opened, so the output (and its
//! temporary file) can never end up inside the archive.

use crate::ArchiveError;
use crate::Result;
use crate::creation::rules::ExclusionRules;
use std::io;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;
use tracing::warn;
use walkdir::WalkDir;

/// A file selected for the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Full filesystem path to the source file.
    pub path: PathBuf,

    /// Entry name inside the archive: the path relative to the source root,
    /// joined with `/`.
    pub name: String,

    /// Size in bytes at planning time.
    pub size: u64,
}

/// Result of walking a source root.
///
/// # Examples
///
/// ```no_run
/// use dirpack_core::ExclusionRules;
/// use dirpack_core::creation::walker::PlanWalker;
/// use std::path::Path;
///
/// let rules = ExclusionRules::project_defaults();
/// let plan = PlanWalker::new(Path::new("."), &rules).plan()?;
/// for name in plan.names() {
///     println!("{name}");
/// }
/// # Ok::<(), dirpack_core::ArchiveError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchivePlan {
    /// Source root the plan was computed for.
    pub root: PathBuf,

    /// Files to archive, in walk order (sorted by file name per directory).
    pub entries: Vec<ArchiveEntry>,

    /// Number of excluded directories that were not entered.
    pub dirs_pruned: usize,

    /// Number of files left out by file rules, ancestor rules, or because
    /// they are the output archive.
    pub files_skipped: usize,

    /// Number of symlinks and other non-regular files left out.
    pub specials_skipped: usize,

    /// Human-readable notes about skipped special files.
    pub warnings: Vec<String>,
}

impl ArchivePlan {
    /// Creates an empty plan for `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Iterates over the planned entry names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Sum of planned file sizes.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }

    /// Number of planned entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether nothing would be archived.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }
}

/// Walks a source root and applies [`ExclusionRules`].
///
/// Excluded directories are pruned before descending, so their subtrees are
/// never read.
pub struct PlanWalker<'a> {
    root: &'a Path,
    rules: &'a ExclusionRules,
    skip_file: Option<&'a Path>,
}

impl<'a> PlanWalker<'a> {
    /// Creates a walker for `root`.
    #[must_use]
    pub fn new(root: &'a Path, rules: &'a ExclusionRules) -> Self {
        Self {
            root,
            rules,
            skip_file: None,
        }
    }

    /// Leaves out the file at this root-relative path (the output archive).
    #[must_use]
    pub fn skip_file(mut self, rel: Option<&'a Path>) -> Self {
        self.skip_file = rel;
        self
    }

    /// Walks the tree and returns the plan.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A directory cannot be listed (`PermissionDenied` or `Io`)
    /// - File metadata cannot be read
    /// - An entry name is not valid UTF-8
    pub fn plan(&self) -> Result<ArchivePlan> {
        let mut plan = ArchivePlan::new(self.root);
        let mut walker = WalkDir::new(self.root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        while let Some(entry) = walker.next() {
            let entry = entry.map_err(ArchiveError::from_walk)?;
            let rel = relative_path(entry.path(), self.root)?;
            let file_type = entry.file_type();

            if file_type.is_dir() {
                if !self.rules.should_descend(&rel) {
                    debug!(path = %rel.display(), "pruned excluded directory");
                    plan.dirs_pruned += 1;
                    walker.skip_current_dir();
                }
                continue;
            }

            if !self.rules.includes_file(&rel) {
                debug!(path = %rel.display(), "skipped excluded file");
                plan.files_skipped += 1;
                continue;
            }

            if !file_type.is_file() {
                let kind = if file_type.is_symlink() {
                    "symlink"
                } else {
                    "special file"
                };
                warn!(path = %rel.display(), kind, "skipped non-regular file");
                plan.specials_skipped += 1;
                plan.add_warning(format!("Skipped {kind}: {}", rel.display()));
                continue;
            }

            if self.skip_file.is_some_and(|skip| skip == rel) {
                debug!(path = %rel.display(), "skipped output archive");
                plan.files_skipped += 1;
                continue;
            }

            let metadata = entry.metadata().map_err(ArchiveError::from_walk)?;
            let name = archive_name(&rel)?;
            plan.entries.push(ArchiveEntry {
                path: entry.into_path(),
                name,
                size: metadata.len(),
            });
        }

        Ok(plan)
    }
}

fn relative_path(path: &Path, root: &Path) -> Result<PathBuf> {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .map_err(|_| {
            ArchiveError::Io(io::Error::other(format!(
                "path {} is not under root directory: {}",
                path.display(),
                root.display()
            )))
        })
}

/// Builds the POSIX entry name for a root-relative path.
///
/// Zip entry names always use `/`, whatever the platform separator.
///
/// # Errors
///
/// Returns an error if a component is not valid UTF-8.
pub fn archive_name(rel: &Path) -> Result<String> {
    let mut parts = Vec::new();
    for component in rel.components() {
        if let Component::Normal(part) = component {
            let part = part.to_str().ok_or_else(|| {
                ArchiveError::Io(io::Error::other(format!(
                    "path is not valid UTF-8: {}",
                    rel.display()
                )))
            })?;
            parts.push(part);
        }
    }
    Ok(parts.join("/"))
}
