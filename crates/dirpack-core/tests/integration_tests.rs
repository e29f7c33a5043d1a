//! Integration tests for dirpack-core.
//!
//! These tests pack real directory trees and read the results back with the
//! zip crate.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use dirpack_core::ArchiveConfig;
use dirpack_core::ArchiveError;
use dirpack_core::ErrorCategory;
use dirpack_core::ExclusionRules;
use dirpack_core::ProgressCallback;
use dirpack_core::build_archive;
use dirpack_core::build_archive_with_progress;
use dirpack_core::list_archive;
use dirpack_core::plan_archive;
use std::collections::BTreeMap;
use std::fs;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tempfile::TempDir;

fn touch(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn sorted_names(archive: &Path) -> Vec<String> {
    let mut names: Vec<String> = list_archive(archive)
        .unwrap()
        .names()
        .map(str::to_string)
        .collect();
    names.sort();
    names
}

fn read_entries(archive: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut zip = zip::ZipArchive::new(File::open(archive).unwrap()).unwrap();
    let mut entries = BTreeMap::new();
    for i in 0..zip.len() {
        let mut entry = zip.by_index(i).unwrap();
        let mut data = Vec::new();
        entry.read_to_end(&mut data).unwrap();
        entries.insert(entry.name().to_string(), data);
    }
    entries
}

/// Project layout mirroring a typical web app checkout.
fn web_project(root: &Path) {
    touch(root, "src/a.txt", "alpha");
    touch(root, "node_modules/x/y.js", "module.exports = 1;");
    touch(root, ".git/HEAD", "ref: refs/heads/main");
    touch(root, "public/index.html", "<html></html>");
    touch(root, "public/old.zip", "stale archive");
    touch(root, "create_zip.py", "print('zip')");
}

#[test]
fn test_project_defaults_scenario() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    web_project(root);
    let output = root.join("public/ViajeMaisTour_CRM.zip");

    let report = build_archive(&ArchiveConfig::new(root, &output)).unwrap();

    assert_eq!(
        sorted_names(&output),
        vec!["public/index.html", "src/a.txt"]
    );
    assert_eq!(report.files_added, 2);
    assert_eq!(report.dirs_pruned, 2);
    assert_eq!(report.files_skipped, 2);
}

#[test]
fn test_archive_round_trip_is_byte_identical() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("project");
    touch(&root, "README.md", "# project\n");
    touch(&root, "src/main.rs", "fn main() {}\n");
    touch(&root, "assets/logo.bin", &"\u{1}\u{2}\u{3}".repeat(4096));
    let output = temp.path().join("out/project.zip");

    build_archive(&ArchiveConfig::new(&root, &output)).unwrap();

    let entries = read_entries(&output);
    assert_eq!(entries.len(), 3);
    for (name, data) in &entries {
        assert_eq!(data, &fs::read(root.join(name)).unwrap(), "{name}");
    }
}

#[test]
fn test_missing_source_creates_nothing() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("public/out.zip");

    let err = build_archive(&ArchiveConfig::new(temp.path().join("missing"), &output))
        .unwrap_err();

    assert!(matches!(err, ArchiveError::SourceNotFound { .. }));
    assert_eq!(err.category(), ErrorCategory::NotFound);
    assert!(!output.exists());
    assert!(!temp.path().join("public").exists());
}

#[test]
fn test_source_is_a_file() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "file.txt", "x");

    let err = build_archive(&ArchiveConfig::new(
        temp.path().join("file.txt"),
        temp.path().join("out.zip"),
    ))
    .unwrap_err();

    assert!(matches!(err, ArchiveError::NotADirectory { .. }));
}

#[test]
fn test_repeated_runs_produce_same_entries() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    web_project(root);
    let output = root.join("public/site.zip");
    let config = ArchiveConfig::new(root, &output);

    build_archive(&config).unwrap();
    let first = read_entries(&output);
    build_archive(&config).unwrap();
    let second = read_entries(&output);

    assert_eq!(first, second);
}

#[test]
fn test_output_inside_source_never_archived() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    touch(root, "a.txt", "a");
    // Name that no file pattern matches.
    let output = root.join("bundle.archive");
    let config = ArchiveConfig::new(root, &output).with_rules(ExclusionRules::new());

    build_archive(&config).unwrap();
    build_archive(&config).unwrap();

    assert_eq!(sorted_names(&output), vec!["a.txt"]);
}

#[test]
fn test_output_parent_created() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "a.txt", "a");
    let output = temp.path().join("public/nested/out.zip");

    build_archive(&ArchiveConfig::new(temp.path(), &output)).unwrap();

    assert!(output.is_file());
}

#[test]
fn test_force_include_inside_excluded_directory() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    web_project(root);
    touch(root, "public/extra/robots.txt", "User-agent: *");
    let rules = ExclusionRules::project_defaults()
        .exclude_dir("public")
        .force_include("public");
    let output = temp.path().join("site.zip");

    build_archive(&ArchiveConfig::new(root, &output).with_rules(rules)).unwrap();

    assert_eq!(
        sorted_names(&output),
        vec!["public/extra/robots.txt", "public/index.html", "src/a.txt"]
    );
}

#[test]
fn test_excluded_public_without_force_include() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    web_project(root);
    let rules = ExclusionRules::project_defaults().exclude_dir("public");
    let output = temp.path().join("site.zip");

    build_archive(&ArchiveConfig::new(root, &output).with_rules(rules)).unwrap();

    assert_eq!(sorted_names(&output), vec!["src/a.txt"]);
}

#[test]
fn test_nested_excluded_directory_pruned() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    touch(root, "packages/app/node_modules/dep/index.js", "x");
    touch(root, "packages/app/index.js", "y");
    touch(root, "packages/app/dist/bundle.js", "z");

    let plan = plan_archive(&ArchiveConfig::new(root, root.join("public/out.zip"))).unwrap();

    assert_eq!(
        plan.names().collect::<Vec<_>>(),
        vec!["packages/app/index.js"]
    );
    assert_eq!(plan.dirs_pruned, 2);
}

#[test]
fn test_entries_in_sorted_order() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    touch(root, "b.txt", "b");
    touch(root, "a/z.txt", "z");
    touch(root, "a/b.txt", "b");
    touch(root, "c.txt", "c");
    let output = temp.path().join("public/out.zip");

    build_archive(&ArchiveConfig::new(root, &output)).unwrap();

    let names: Vec<String> = list_archive(&output)
        .unwrap()
        .names()
        .map(str::to_string)
        .collect();
    assert_eq!(names, vec!["a/b.txt", "a/z.txt", "b.txt", "c.txt"]);
}

#[test]
fn test_empty_source_produces_empty_archive() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("empty");
    fs::create_dir(&root).unwrap();
    let output = temp.path().join("empty.zip");

    let report = build_archive(&ArchiveConfig::new(&root, &output)).unwrap();

    assert_eq!(report.files_added, 0);
    assert!(list_archive(&output).unwrap().is_empty());
}

#[test]
fn test_existing_output_replaced() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "src/new.txt", "new");
    let output = temp.path().join("public/out.zip");
    touch(temp.path(), "public/out.zip", "garbage that is not a zip");

    build_archive(&ArchiveConfig::new(temp.path(), &output)).unwrap();

    assert_eq!(sorted_names(&output), vec!["src/new.txt"]);
}

#[test]
fn test_for_project_default_output() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("ViajeMaisTour_CRM");
    touch(&root, "index.html", "<html></html>");

    let config = ArchiveConfig::for_project(&root).unwrap();
    build_archive(&config).unwrap();

    let output = root.join("public/ViajeMaisTour_CRM.zip");
    assert!(output.is_file());
    assert_eq!(sorted_names(&output), vec!["index.html"]);
}

#[cfg(unix)]
#[test]
fn test_symlinks_skipped_with_warning() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    touch(root, "real.txt", "real");
    std::os::unix::fs::symlink(root.join("real.txt"), root.join("link.txt")).unwrap();
    let output = temp.path().join("public/out.zip");

    let report = build_archive(&ArchiveConfig::new(root, &output)).unwrap();

    assert_eq!(sorted_names(&output), vec!["real.txt"]);
    assert_eq!(report.specials_skipped, 1);
    assert!(report.has_warnings());
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_fails_without_partial_output() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let root = temp.path().join("src");
    touch(&root, "ok.txt", "ok");
    touch(&root, "secret.txt", "secret");
    let secret = root.join("secret.txt");
    fs::set_permissions(&secret, fs::Permissions::from_mode(0o000)).unwrap();
    // Root ignores file modes.
    if File::open(&secret).is_ok() {
        return;
    }

    let out_dir = temp.path().join("out");
    let output = out_dir.join("out.zip");
    let err = build_archive(&ArchiveConfig::new(&root, &output)).unwrap_err();

    assert!(matches!(err, ArchiveError::PermissionDenied { .. }));
    assert!(!output.exists());
    assert_eq!(fs::read_dir(&out_dir).unwrap().count(), 0);
}

#[derive(Default)]
struct Counter {
    started: usize,
    completed: usize,
    bytes: u64,
    finished: bool,
}

impl ProgressCallback for Counter {
    fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {
        self.started += 1;
    }

    fn on_bytes_written(&mut self, bytes: u64) {
        self.bytes += bytes;
    }

    fn on_entry_complete(&mut self, _path: &Path) {
        self.completed += 1;
    }

    fn on_complete(&mut self) {
        self.finished = true;
    }
}

#[test]
fn test_progress_reported() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "a.txt", "aaaa");
    touch(temp.path(), "b/c.txt", "cc");
    let output = temp.path().join("public/out.zip");
    let mut counter = Counter::default();

    build_archive_with_progress(&ArchiveConfig::new(temp.path(), &output), &mut counter)
        .unwrap();

    assert_eq!(counter.started, 2);
    assert_eq!(counter.completed, 2);
    assert_eq!(counter.bytes, 6);
    assert!(counter.finished);
}
