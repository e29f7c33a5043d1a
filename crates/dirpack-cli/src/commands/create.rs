//! Create command implementation

use crate::cli::CreateArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use dirpack_core::ArchiveConfig;
use dirpack_core::ExclusionRules;
use dirpack_core::build_archive;
use dirpack_core::build_archive_with_progress;
use dirpack_core::creation::config::default_output_path;
use dirpack_core::plan_archive;
use tracing::debug;

pub fn execute(
    args: &CreateArgs,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<()> {
    let config = build_config(args)?;
    debug!(
        source = %config.source_root.display(),
        output = %config.output_path.display(),
        excluded_dirs = config.rules.excluded_dirs.len(),
        excluded_files = config.rules.excluded_files.len(),
        forced = config.rules.force_include.len(),
        "resolved create configuration"
    );

    if args.dry_run {
        let plan = add_archive_context(plan_archive(&config), &config.source_root)?;
        return formatter.format_plan(&config.output_path, &plan);
    }

    let result = if show_progress && CliProgress::should_show() {
        let mut progress = CliProgress::new("Packing");
        build_archive_with_progress(&config, &mut progress)
    } else {
        build_archive(&config)
    };
    let mut report = add_archive_context(result, &config.source_root)?;

    if report.files_added == 0 {
        report.add_warning("No files matched the rules; the archive is empty");
    }

    formatter.format_creation_result(&report)
}

/// Maps CLI flags onto an `ArchiveConfig`.
fn build_config(args: &CreateArgs) -> Result<ArchiveConfig> {
    let output = match &args.output {
        Some(output) => output.clone(),
        None => add_archive_context(default_output_path(&args.source), &args.source)?,
    };

    let mut rules = if args.no_default_excludes {
        ExclusionRules::new()
    } else {
        ExclusionRules::project_defaults()
    };
    for name in &args.exclude_dirs {
        rules = rules.exclude_dir(name.as_str());
    }
    for pattern in &args.exclude {
        rules = rules.exclude_file(pattern);
    }
    for path in &args.include {
        rules = rules.force_include(path);
    }

    Ok(ArchiveConfig::new(&args.source, output).with_rules(rules))
}
