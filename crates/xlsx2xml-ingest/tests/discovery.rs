//! Tests for workbook discovery.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use xlsx2xml_ingest::{discover_workbooks, normalize_separators};

fn touch(dir: &Path, name: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(&path, "stub").expect("write file");
}

#[test]
fn discovers_nested_workbooks_in_stable_order() {
    let dir = TempDir::new().expect("temp dir");
    touch(dir.path(), "zeta.xlsx");
    touch(dir.path(), "alpha.xlsx");
    touch(dir.path(), "maps/world.xlsx");
    touch(dir.path(), "maps/~$world.xlsx");
    touch(dir.path(), "maps/readme.md");
    touch(dir.path(), "old/legacy.xls");

    let files = discover_workbooks(dir.path()).expect("discover");
    let relative: Vec<&str> = files.iter().map(|f| f.relative.as_str()).collect();
    assert_eq!(relative, vec!["alpha.xlsx", "maps/world.xlsx", "zeta.xlsx"]);
    for file in &files {
        assert!(file.path.starts_with(dir.path()));
        assert!(!file.relative.contains('\\'));
    }

    let again = discover_workbooks(dir.path()).expect("discover again");
    assert_eq!(files, again);
}

#[test]
fn windows_style_config_paths_are_normalized() {
    assert_eq!(normalize_separators(r"..\data\xlsx"), "../data/xlsx");
}
