//! Configuration for packing operations.

use crate::ArchiveError;
use crate::Result;
use crate::creation::rules::ExclusionRules;
use std::io;
use std::path::Path;
use std::path::PathBuf;

/// Directory, relative to the source root, that receives the archive when no
/// output path is given.
pub const DEFAULT_OUTPUT_DIR: &str = "public";

/// Configuration for a packing operation.
///
/// Replaces hardcoded paths and exclusion lists: everything the archiver
/// needs is passed in here.
///
/// # Examples
///
/// ```
/// use dirpack_core::ArchiveConfig;
/// use dirpack_core::ExclusionRules;
///
/// // Project defaults
/// let config = ArchiveConfig::new(".", "public/site.zip");
///
/// // Custom rules
/// let custom = ArchiveConfig::new("app", "out/app.zip")
///     .with_rules(ExclusionRules::new().exclude_dir("target"));
/// assert!(custom.rules.is_dir_name_excluded("target"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveConfig {
    /// Directory to pack. Must exist.
    pub source_root: PathBuf,

    /// Archive file to create or overwrite. Its parent is created if missing.
    pub output_path: PathBuf,

    /// Exclusion rules applied during the walk.
    ///
    /// Default: [`ExclusionRules::project_defaults`].
    pub rules: ExclusionRules,
}

impl ArchiveConfig {
    /// Creates a configuration using the project default rules.
    #[must_use]
    pub fn new(source_root: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            output_path: output_path.into(),
            rules: ExclusionRules::project_defaults(),
        }
    }

    /// Creates a configuration whose output is
    /// `<source_root>/public/<dir name>.zip`.
    ///
    /// # Errors
    ///
    /// Returns `SourceNotFound` if the source root does not exist, since its
    /// name has to be resolved.
    pub fn for_project(source_root: impl Into<PathBuf>) -> Result<Self> {
        let source_root = source_root.into();
        let output_path = default_output_path(&source_root)?;
        Ok(Self::new(source_root, output_path))
    }

    /// Replaces the exclusion rules.
    #[must_use]
    pub fn with_rules(mut self, rules: ExclusionRules) -> Self {
        self.rules = rules;
        self
    }

    /// Validates the configuration without checking the source root.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if:
    /// - The output path has no file name or names an existing directory
    /// - A forced path is not a plain relative path
    pub fn validate(&self) -> Result<()> {
        if self.output_path.file_name().is_none() {
            return Err(ArchiveError::InvalidConfiguration {
                reason: format!(
                    "output path has no file name: {}",
                    self.output_path.display()
                ),
            });
        }
        if self.output_path.is_dir() {
            return Err(ArchiveError::InvalidConfiguration {
                reason: format!(
                    "output path is a directory: {}",
                    self.output_path.display()
                ),
            });
        }
        self.rules.validate()
    }
}

/// Computes `<source_root>/public/<name>.zip`, where `<name>` is the base
/// name of the canonical source directory.
///
/// # Errors
///
/// Returns `SourceNotFound` if the source root does not exist.
///
/// # Examples
///
/// ```no_run
/// use dirpack_core::creation::config::default_output_path;
/// use std::path::Path;
///
/// let output = default_output_path(Path::new("ViajeMaisTour_CRM"))?;
/// assert_eq!(output, Path::new("ViajeMaisTour_CRM/public/ViajeMaisTour_CRM.zip"));
/// # Ok::<(), dirpack_core::ArchiveError>(())
/// ```
pub fn default_output_path(source_root: &Path) -> Result<PathBuf> {
    let canonical = source_root.canonicalize().map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            ArchiveError::SourceNotFound {
                path: source_root.to_path_buf(),
            }
        } else {
            ArchiveError::from_io(source_root, e)
        }
    })?;

    let name = canonical
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("archive");

    Ok(source_root
        .join(DEFAULT_OUTPUT_DIR)
        .join(format!("{name}.zip")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_new_uses_project_defaults() {
        let config = ArchiveConfig::new(".", "public/out.zip");
        assert_eq!(config.source_root, PathBuf::from("."));
        assert_eq!(config.output_path, PathBuf::from("public/out.zip"));
        assert_eq!(config.rules, ExclusionRules::project_defaults());
    }

    #[test]
    fn test_with_rules_replaces() {
        let config = ArchiveConfig::new(".", "out.zip").with_rules(ExclusionRules::new());
        assert!(config.rules.excluded_dirs.is_empty());
        assert!(config.rules.excluded_files.is_empty());
    }

    #[test]
    fn test_validate_ok() {
        let temp = TempDir::new().unwrap();
        let config = ArchiveConfig::new(temp.path(), temp.path().join("out.zip"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_directory_output() {
        let temp = TempDir::new().unwrap();
        let config = ArchiveConfig::new(temp.path(), temp.path());
        assert!(matches!(
            config.validate(),
            Err(ArchiveError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_output_without_file_name() {
        let config = ArchiveConfig::new(".", "..");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_checks_rules() {
        let config = ArchiveConfig::new(".", "out.zip")
            .with_rules(ExclusionRules::new().force_include("../escape"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_output_path_uses_dir_name() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("ViajeMaisTour_CRM");
        fs::create_dir(&project).unwrap();

        let output = default_output_path(&project).unwrap();
        assert_eq!(
            output,
            project.join("public").join("ViajeMaisTour_CRM.zip")
        );
    }

    #[test]
    fn test_for_project_missing_source() {
        let result = ArchiveConfig::for_project("/nonexistent/path/that/does/not/exist");
        assert!(matches!(
            result,
            Err(ArchiveError::SourceNotFound { .. })
        ));
    }
}
