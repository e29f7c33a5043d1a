//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use dirpack_core::ArchiveListing;
use dirpack_core::ArchivePlan;
use dirpack_core::CreationReport;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        let mut count = 0;

        for c in s.chars().rev() {
            if count == 3 {
                result.push(',');
                count = 0;
            }
            result.push(c);
            count += 1;
        }

        result.chars().rev().collect()
    }

    fn write_success(&self, message: &str) {
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(message);
        }
    }

    fn write_warnings(&self, warnings: &[String]) {
        if warnings.is_empty() {
            return;
        }
        let _ = self.term.write_line("");
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{}", style("Warnings:").yellow().bold()));
        } else {
            let _ = self.term.write_line("Warnings:");
        }
        for warning in warnings {
            let _ = self.term.write_line(&format!("  - {warning}"));
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_creation_result(&self, report: &CreationReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.write_success(&format!(
            "Archive created: {}",
            report.output_path.display()
        ));

        let _ = self.term.write_line("");
        let _ = self.term.write_line(&format!(
            "  Files added:      {}",
            Self::format_number(report.files_added)
        ));
        let _ = self.term.write_line(&format!(
            "  Total size:       {}",
            Self::format_size(report.bytes_written)
        ));

        if report.bytes_compressed > 0 {
            let _ = self.term.write_line(&format!(
                "  Compressed size:  {}",
                Self::format_size(report.bytes_compressed)
            ));
            let _ = self.term.write_line(&format!(
                "  Compression:      {:.1}%",
                report.compression_percentage()
            ));
        }

        if self.verbose {
            let _ = self.term.write_line(&format!(
                "  Dirs pruned:      {}",
                Self::format_number(report.dirs_pruned)
            ));
            let _ = self.term.write_line(&format!(
                "  Files skipped:    {}",
                Self::format_number(report.total_skipped())
            ));
            let _ = self
                .term
                .write_line(&format!("  Duration:         {:?}", report.duration));
        } else if report.total_skipped() > 0 {
            let _ = self.term.write_line(&format!(
                "  Files skipped:    {}",
                Self::format_number(report.total_skipped())
            ));
        }

        self.write_warnings(&report.warnings);
        Ok(())
    }

    fn format_plan(&self, output_path: &Path, plan: &ArchivePlan) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for entry in &plan.entries {
            if self.verbose {
                let _ = self.term.write_line(&format!(
                    "{:>10}  {}",
                    Self::format_size(entry.size),
                    entry.name
                ));
            } else {
                let _ = self.term.write_line(&entry.name);
            }
        }

        let _ = self.term.write_line("");
        self.write_success(&format!(
            "Dry run: {} files ({}) would be packed into {}",
            Self::format_number(plan.len()),
            Self::format_size(plan.total_bytes()),
            output_path.display()
        ));
        self.write_warnings(&plan.warnings);
        Ok(())
    }

    fn format_listing(&self, listing: &ArchiveListing, long: bool) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if !long {
            for name in listing.names() {
                let _ = self.term.write_line(name);
            }
            return Ok(());
        }

        for entry in &listing.entries {
            let type_char = if entry.is_dir { "d" } else { "-" };
            let _ = self.term.write_line(&format!(
                "{type_char} {:>10} {:>10}  {}",
                Self::format_size(entry.size),
                Self::format_size(entry.compressed_size),
                entry.name
            ));
        }

        let _ = self.term.write_line("");
        let _ = self.term.write_line(&format!(
            "Total: {} entries, {} ({} compressed)",
            Self::format_number(listing.len()),
            Self::format_size(listing.total_size()),
            Self::format_size(listing.total_compressed_size())
        ));

        Ok(())
    }

    fn format_error(&self, _operation: &str, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        let stderr = Term::stderr();
        if console::colors_enabled_stderr() {
            let _ = stderr.write_line(&format!("{} {error:?}", style("Error:").red().bold()));
        } else {
            let _ = stderr.write_line(&format!("Error: {error:?}"));
        }
    }
}
