//! High-level public API for packing a directory.

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use tracing::info;

use crate::ArchiveError;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::Result;
use crate::creation::ArchiveConfig;
use crate::creation::ArchivePlan;
use crate::creation::CreationReport;
use crate::creation::PlanWalker;
use crate::creation::zip::output_parent;
use crate::creation::zip::write_zip;

/// Packs `config.source_root` into a ZIP archive at `config.output_path`.
///
/// Excluded directories are pruned during a single walk, excluded files are
/// skipped, and every remaining file is stored under its root-relative path.
/// The archive is written to a temporary file and renamed into place, so the
/// output path either holds a complete archive or is left as it was.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid (`InvalidConfiguration`)
/// - The source root does not exist (`SourceNotFound`) or is not a directory
/// - A file cannot be read or the output cannot be written
///   (`PermissionDenied`, `Io`)
///
/// # Examples
///
/// ```no_run
/// use dirpack_core::ArchiveConfig;
/// use dirpack_core::build_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ArchiveConfig::new(".", "public/site.zip");
/// let report = build_archive(&config)?;
/// println!("Packed {} files", report.files_added);
/// # Ok(())
/// # }
/// ```
pub fn build_archive(config: &ArchiveConfig) -> Result<CreationReport> {
    build_archive_with_progress(config, &mut NoopProgress)
}

/// Same as [`build_archive`], reporting each entry to `progress`.
///
/// # Errors
///
/// See [`build_archive`].
pub fn build_archive_with_progress(
    config: &ArchiveConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<CreationReport> {
    let start = Instant::now();
    config.validate()?;
    let root = resolve_source_root(&config.source_root)?;

    let parent = output_parent(&config.output_path);
    fs::create_dir_all(parent).map_err(|e| ArchiveError::from_io(parent, e))?;

    let plan = plan_in(&root, config)?;
    let mut report = write_zip(&plan, &config.output_path, progress)?;
    report.duration = start.elapsed();
    progress.on_complete();

    info!(
        output = %config.output_path.display(),
        files = report.files_added,
        bytes = report.bytes_written,
        compressed = report.bytes_compressed,
        "archive created"
    );

    Ok(report)
}

/// Computes which files would be archived, without writing anything.
///
/// # Errors
///
/// Same as [`build_archive`], minus the output-side failures.
///
/// # Examples
///
/// ```no_run
/// use dirpack_core::ArchiveConfig;
/// use dirpack_core::plan_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let plan = plan_archive(&ArchiveConfig::new(".", "public/site.zip"))?;
/// for name in plan.names() {
///     println!("{name}");
/// }
/// # Ok(())
/// # }
/// ```
pub fn plan_archive(config: &ArchiveConfig) -> Result<ArchivePlan> {
    config.validate()?;
    let root = resolve_source_root(&config.source_root)?;
    plan_in(&root, config)
}

fn plan_in(root: &Path, config: &ArchiveConfig) -> Result<ArchivePlan> {
    let skip = output_relative_to(root, &config.output_path);
    PlanWalker::new(root, &config.rules)
        .skip_file(skip.as_deref())
        .plan()
}

/// Checks the source root and returns its canonical form.
fn resolve_source_root(source: &Path) -> Result<PathBuf> {
    let metadata = fs::metadata(source).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            ArchiveError::SourceNotFound {
                path: source.to_path_buf(),
            }
        } else {
            ArchiveError::from_io(source, e)
        }
    })?;

    if !metadata.is_dir() {
        return Err(ArchiveError::NotADirectory {
            path: source.to_path_buf(),
        });
    }

    source
        .canonicalize()
        .map_err(|e| ArchiveError::from_io(source, e))
}

/// Returns the output's path relative to `root` when it lies inside it.
///
/// Returns `None` when the output's parent does not exist yet, since no file
/// can be sitting at the output path then.
fn output_relative_to(root: &Path, output: &Path) -> Option<PathBuf> {
    let file_name = output.file_name()?;
    let parent = output_parent(output).canonicalize().ok()?;
    parent
        .join(file_name)
        .strip_prefix(root)
        .ok()
        .map(Path::to_path_buf)
}
