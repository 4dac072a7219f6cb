//! Shared path helpers for output generation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Extension of generated markup documents.
pub const MARKUP_EXTENSION: &str = "xml";

/// Ensure a parent directory exists for a file path.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    Ok(())
}

/// Relative path with its extension swapped for `.xml`, keeping `/` separators.
fn markup_relative(relative: &str) -> String {
    let (dir, file) = match relative.rsplit_once('/') {
        Some((dir, file)) => (Some(dir), file),
        None => (None, relative),
    };
    let stem = match file.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file,
    };
    match dir {
        Some(dir) => format!("{dir}/{stem}.{MARKUP_EXTENSION}"),
        None => format!("{stem}.{MARKUP_EXTENSION}"),
    }
}

/// Where the document for a source workbook is written.
///
/// `relative` is the workbook path relative to the input root. The same
/// directory structure is mirrored under `output_root`.
pub fn markup_path(output_root: &Path, relative: &str) -> PathBuf {
    let mut path = output_root.to_path_buf();
    for part in markup_relative(relative).split('/') {
        if !part.is_empty() {
            path.push(part);
        }
    }
    path
}

/// Heading line of a workbook's schema block, e.g. `./sub/sheet1.xml`.
pub fn schema_heading(relative: &str) -> String {
    format!("./{}", markup_relative(relative.trim_start_matches('/')))
}
