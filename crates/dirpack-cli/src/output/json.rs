//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use dirpack_core::ArchiveListing;
use dirpack_core::ArchivePlan;
use dirpack_core::CreationReport;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct CreationOutput<'a> {
    output_path: String,
    files_added: usize,
    bytes_written: u64,
    bytes_compressed: u64,
    compression_ratio: f64,
    compression_percentage: f64,
    dirs_pruned: usize,
    files_skipped: usize,
    specials_skipped: usize,
    duration_ms: u128,
    warnings: &'a [String],
}

#[derive(Serialize)]
struct PlanOutput<'a> {
    dry_run: bool,
    output_path: String,
    entries: Vec<&'a str>,
    total_entries: usize,
    total_bytes: u64,
    dirs_pruned: usize,
    files_skipped: usize,
    warnings: &'a [String],
}

#[derive(Serialize)]
struct ListedEntryOutput<'a> {
    name: &'a str,
    size: u64,
    compressed_size: u64,
    is_dir: bool,
}

#[derive(Serialize)]
struct ListingOutput<'a> {
    archive: String,
    total_entries: usize,
    total_size: u64,
    entries: Vec<ListedEntryOutput<'a>>,
}

impl OutputFormatter for JsonFormatter {
    fn format_creation_result(&self, report: &CreationReport) -> Result<()> {
        let data = CreationOutput {
            output_path: report.output_path.display().to_string(),
            files_added: report.files_added,
            bytes_written: report.bytes_written,
            bytes_compressed: report.bytes_compressed,
            compression_ratio: report.compression_ratio(),
            compression_percentage: report.compression_percentage(),
            dirs_pruned: report.dirs_pruned,
            files_skipped: report.files_skipped,
            specials_skipped: report.specials_skipped,
            duration_ms: report.duration.as_millis(),
            warnings: &report.warnings,
        };

        Self::output(&JsonOutput::success("create", data))
    }

    fn format_plan(&self, output_path: &Path, plan: &ArchivePlan) -> Result<()> {
        let data = PlanOutput {
            dry_run: true,
            output_path: output_path.display().to_string(),
            entries: plan.names().collect(),
            total_entries: plan.len(),
            total_bytes: plan.total_bytes(),
            dirs_pruned: plan.dirs_pruned,
            files_skipped: plan.files_skipped,
            warnings: &plan.warnings,
        };

        Self::output(&JsonOutput::success("create", data))
    }

    fn format_listing(&self, listing: &ArchiveListing, _long: bool) -> Result<()> {
        let data = ListingOutput {
            archive: listing.path.display().to_string(),
            total_entries: listing.len(),
            total_size: listing.total_size(),
            entries: listing
                .entries
                .iter()
                .map(|e| ListedEntryOutput {
                    name: &e.name,
                    size: e.size,
                    compressed_size: e.compressed_size,
                    is_dir: e.is_dir,
                })
                .collect(),
        };

        Self::output(&JsonOutput::success("list", data))
    }

    fn format_error(&self, operation: &str, error: &anyhow::Error) {
        let output = JsonOutput::error(operation, format!("{error:?}"));
        let _ = Self::output(&output);
    }
}
