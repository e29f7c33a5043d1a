//! ZIP archive writing.
//!
//! Entries are written into a temporary file next to the output and the
//! temporary file is renamed onto the output path only after the archive has
//! been finished and flushed. Until then the temporary file is owned by a
//! `NamedTempFile` guard, so every early return removes it.

use crate::ArchiveError;
use crate::ProgressCallback;
use crate::Result;
use crate::creation::report::CreationReport;
use crate::creation::walker::ArchiveEntry;
use crate::creation::walker::ArchivePlan;
use std::fs;
use std::fs::File;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Writes every planned entry into a ZIP archive at `output`.
///
/// The output's parent directory must already exist. An existing file at
/// `output` is replaced atomically; on error it is left untouched.
///
/// # Errors
///
/// Returns an error if:
/// - The temporary file cannot be created in the output directory
/// - A source file cannot be opened or read
/// - The archive cannot be written, flushed, or renamed into place
pub fn write_zip(
    plan: &ArchivePlan,
    output: &Path,
    progress: &mut dyn ProgressCallback,
) -> Result<CreationReport> {
    let parent = output_parent(output);
    let temp = tempfile::Builder::new()
        .prefix(".dirpack-")
        .suffix(".zip.tmp")
        .tempfile_in(parent)
        .map_err(|e| ArchiveError::from_io(parent, e))?;
    debug!(temp = %temp.path().display(), "writing archive to temporary file");

    let mut report = CreationReport {
        output_path: output.to_path_buf(),
        dirs_pruned: plan.dirs_pruned,
        files_skipped: plan.files_skipped,
        specials_skipped: plan.specials_skipped,
        warnings: plan.warnings.clone(),
        ..CreationReport::default()
    };

    let mut zip = ZipWriter::new(temp);
    write_entries(&mut zip, &plan.entries, &mut report, progress)?;
    let temp = zip.finish()?;

    finalize_permissions(&temp).map_err(|e| ArchiveError::from_io(temp.path(), e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| ArchiveError::from_io(temp.path(), e))?;
    temp.persist(output)
        .map_err(|e| ArchiveError::from_io(output, e.error))?;

    report.bytes_compressed = fs::metadata(output)
        .map_err(|e| ArchiveError::from_io(output, e))?
        .len();

    Ok(report)
}

/// Writes entries with the Deflated method, reusing one copy buffer.
fn write_entries<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    entries: &[ArchiveEntry],
    report: &mut CreationReport,
    progress: &mut dyn ProgressCallback,
) -> Result<()> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let total = entries.len();
    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];

    for (idx, entry) in entries.iter().enumerate() {
        let name = Path::new(&entry.name);
        progress.on_entry_start(name, total, idx + 1);
        let bytes = add_file_to_zip(zip, entry, options, progress, &mut buffer)?;
        report.files_added += 1;
        report.bytes_written += bytes;
        progress.on_entry_complete(name);
    }

    Ok(())
}

/// Adds a single file to the ZIP archive and returns the bytes copied.
fn add_file_to_zip<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    entry: &ArchiveEntry,
    options: SimpleFileOptions,
    progress: &mut dyn ProgressCallback,
    buffer: &mut [u8],
) -> Result<u64> {
    let mut file = File::open(&entry.path).map_err(|e| ArchiveError::from_io(&entry.path, e))?;

    zip.start_file(entry.name.as_str(), options)?;

    let mut bytes_written = 0u64;
    loop {
        let bytes_read = file
            .read(buffer)
            .map_err(|e| ArchiveError::from_io(&entry.path, e))?;
        if bytes_read == 0 {
            break;
        }
        zip.write_all(&buffer[..bytes_read])?;
        bytes_written += bytes_read as u64;
        progress.on_bytes_written(bytes_read as u64);
    }

    Ok(bytes_written)
}

/// Directory that receives the temporary file: the output's parent, or the
/// current directory for a bare file name.
pub(crate) fn output_parent(output: &Path) -> &Path {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Temporary files are created owner-only; the finished archive gets the
/// usual world-readable mode.
#[cfg(unix)]
fn finalize_permissions(temp: &NamedTempFile) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    temp.as_file()
        .set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn finalize_permissions(_temp: &NamedTempFile) -> std::io::Result<()> {
    Ok(())
}
