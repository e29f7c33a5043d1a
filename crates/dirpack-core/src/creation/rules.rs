//! Exclusion rules for directory packing.
//!
//! Rules come in three flavors:
//! - directory base names pruned wherever they appear in the tree,
//! - file base name patterns (exact name or `*suffix`),
//! - forced paths, which override directory exclusions of their ancestors.
//!
//! All decisions are made on paths relative to the source root, so the same
//! rules give the same answer regardless of where the tree lives on disk.

use crate::ArchiveError;
use crate::Result;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// Predicate over a file's base name.
///
/// # Examples
///
/// ```
/// use dirpack_core::FilePattern;
///
/// let zip = FilePattern::parse("*.zip");
/// assert!(zip.matches("site.zip"));
/// assert!(!zip.matches("site.zip.bak"));
///
/// let script = FilePattern::parse("create_zip.py");
/// assert!(script.matches("create_zip.py"));
/// assert!(!script.matches("create_zip.pyc"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilePattern {
    /// Matches a base name exactly.
    Exact(String),
    /// Matches any base name ending with the suffix.
    Suffix(String),
}

impl FilePattern {
    /// Parses the textual form: a leading `*` makes a suffix pattern,
    /// anything else is an exact name.
    #[must_use]
    pub fn parse(pattern: &str) -> Self {
        pattern.strip_prefix('*').map_or_else(
            || Self::Exact(pattern.to_string()),
            |suffix| Self::Suffix(suffix.to_string()),
        )
    }

    /// Returns whether `name` matches this pattern.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Exact(exact) => name == exact,
            Self::Suffix(suffix) => name.ends_with(suffix.as_str()),
        }
    }
}

impl fmt::Display for FilePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(exact) => f.write_str(exact),
            Self::Suffix(suffix) => write!(f, "*{suffix}"),
        }
    }
}

impl From<&str> for FilePattern {
    fn from(pattern: &str) -> Self {
        Self::parse(pattern)
    }
}

/// Directory and file exclusion rules with force-include overrides.
///
/// # Examples
///
/// ```
/// use dirpack_core::ExclusionRules;
/// use std::path::Path;
///
/// let rules = ExclusionRules::new()
///     .exclude_dir("public")
///     .exclude_file("*.zip")
///     .force_include("public");
///
/// assert!(rules.should_descend(Path::new("public")));
/// assert!(rules.includes_file(Path::new("public/index.html")));
/// assert!(!rules.includes_file(Path::new("public/site.zip")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionRules {
    /// Directory base names pruned at any depth.
    pub excluded_dirs: BTreeSet<String>,

    /// Patterns over file base names; a match skips the file.
    pub excluded_files: Vec<FilePattern>,

    /// Root-relative paths included even when an ancestor is excluded.
    pub force_include: Vec<PathBuf>,
}

impl ExclusionRules {
    /// Creates an empty rule set that excludes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rules for packing a web project checkout.
    ///
    /// Prunes dependency caches, VCS metadata, build output and deployment
    /// caches. Skips prior zip outputs, compiled Python bytecode and the
    /// packaging scripts that used to live next to the project.
    #[must_use]
    pub fn project_defaults() -> Self {
        let mut rules = Self::new();
        for dir in ["node_modules", ".git", "dist", ".vercel", ".cache"] {
            rules = rules.exclude_dir(dir);
        }
        for file in [
            "*.zip",
            "*.pyc",
            "create_zip.py",
            "create_zip_v2.py",
            "zip_project.py",
        ] {
            rules = rules.exclude_file(file);
        }
        rules
    }

    /// Adds a directory base name to prune.
    #[must_use]
    pub fn exclude_dir(mut self, name: impl Into<String>) -> Self {
        self.excluded_dirs.insert(name.into());
        self
    }

    /// Adds a file pattern (`name` or `*suffix`).
    #[must_use]
    pub fn exclude_file(mut self, pattern: &str) -> Self {
        let pattern = FilePattern::parse(pattern);
        if !self.excluded_files.contains(&pattern) {
            self.excluded_files.push(pattern);
        }
        self
    }

    /// Adds a forced path, relative to the source root.
    ///
    /// `.` components are dropped so `./public` and `public` are the same
    /// rule.
    #[must_use]
    pub fn force_include(mut self, path: impl AsRef<Path>) -> Self {
        let normalized: PathBuf = path
            .as_ref()
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();
        if !self.force_include.contains(&normalized) {
            self.force_include.push(normalized);
        }
        self
    }

    /// Returns whether a directory with this base name is excluded.
    #[must_use]
    pub fn is_dir_name_excluded(&self, name: &str) -> bool {
        self.excluded_dirs.contains(name)
    }

    /// Returns whether a file with this base name matches any file pattern.
    #[must_use]
    pub fn is_file_name_excluded(&self, name: &str) -> bool {
        self.excluded_files.iter().any(|p| p.matches(name))
    }

    /// Decides whether the walker should enter the directory at `rel_dir`.
    ///
    /// An excluded directory is still entered when it is a forced path, lies
    /// inside one, or is an ancestor of one (so the forced path can be
    /// reached). Inside an ancestor-only directory, [`Self::includes_file`]
    /// keeps unrelated files out.
    #[must_use]
    pub fn should_descend(&self, rel_dir: &Path) -> bool {
        let depth = rel_dir.components().count();
        if !self.has_uncovered_exclusion(rel_dir, depth) {
            return true;
        }
        self.force_include
            .iter()
            .any(|forced| forced != rel_dir && forced.starts_with(rel_dir))
    }

    /// Decides whether the file at `rel_file` belongs in the archive.
    #[must_use]
    pub fn includes_file(&self, rel_file: &Path) -> bool {
        let forced_exactly = self.force_include.iter().any(|f| f == rel_file);
        if !forced_exactly
            && rel_file
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| self.is_file_name_excluded(name))
        {
            return false;
        }

        let parent_depth = rel_file.components().count().saturating_sub(1);
        !self.has_uncovered_exclusion(rel_file, parent_depth)
    }

    /// Validates forced paths.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if a forced path is empty, absolute, or
    /// contains `..`.
    pub fn validate(&self) -> Result<()> {
        for forced in &self.force_include {
            if forced.as_os_str().is_empty() {
                return Err(ArchiveError::InvalidConfiguration {
                    reason: "force-include path is empty".to_string(),
                });
            }
            if forced
                .components()
                .any(|c| !matches!(c, Component::Normal(_)))
            {
                return Err(ArchiveError::InvalidConfiguration {
                    reason: format!(
                        "force-include path must be relative without '..': {}",
                        forced.display()
                    ),
                });
            }
        }
        Ok(())
    }

    /// Number of leading components of `rel` covered by the longest forced
    /// path that is a prefix of it.
    fn covered_depth(&self, rel: &Path) -> usize {
        self.force_include
            .iter()
            .filter(|forced| rel.starts_with(forced))
            .map(|forced| forced.components().count())
            .max()
            .unwrap_or(0)
    }

    /// Checks the first `depth` components of `rel` for an excluded directory
    /// name that no forced prefix covers.
    fn has_uncovered_exclusion(&self, rel: &Path, depth: usize) -> bool {
        let covered = self.covered_depth(rel);
        rel.components().take(depth).skip(covered).any(|component| {
            component
                .as_os_str()
                .to_str()
                .is_some_and(|name| self.is_dir_name_excluded(name))
        })
    }
}
