//! Example: Packing a project directory with dirpack-core
//!
//! Run with: `cargo run --example pack_project`

use dirpack_core::ArchiveConfig;
use dirpack_core::ExclusionRules;
use dirpack_core::build_archive;
use dirpack_core::list_archive;
use dirpack_core::plan_archive;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up a small project tree for the example
    let project = std::env::temp_dir().join("dirpack_example_project");
    std::fs::create_dir_all(project.join("src"))?;
    std::fs::create_dir_all(project.join("node_modules/left-pad"))?;
    std::fs::write(project.join("src/index.js"), "console.log('hi');")?;
    std::fs::write(project.join("node_modules/left-pad/index.js"), "module.exports = 1;")?;

    // Example 1: Project defaults, output under <project>/public/
    println!("Example 1: Project defaults");
    let config = ArchiveConfig::for_project(&project)?;
    let report = build_archive(&config)?;
    println!(
        "  Packed {} files into {}",
        report.files_added,
        report.output_path.display()
    );
    println!(
        "  Compression ratio: {:.1}%",
        report.compression_percentage()
    );
    println!("  Pruned {} directories", report.dirs_pruned);

    // Example 2: Custom rules, dry run
    println!("\nExample 2: Custom rules");
    let rules = ExclusionRules::new().exclude_dir("src").exclude_file("*.zip");
    let plan = plan_archive(&ArchiveConfig::new(&project, "custom.zip").with_rules(rules))?;
    for name in plan.names() {
        println!("  would pack {name}");
    }

    // Example 3: Listing the result
    println!("\nExample 3: Listing");
    for entry in list_archive(&report.output_path)?.entries {
        println!("  {} ({} bytes)", entry.name, entry.size);
    }

    // Cleanup
    std::fs::remove_dir_all(&project)?;

    println!("\nExamples completed successfully!");
    Ok(())
}
