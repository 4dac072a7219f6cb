//! Source workbook discovery.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{IngestError, Result};
use crate::paths::relative_path;

/// File extension of convertible workbooks.
pub const WORKBOOK_EXTENSION: &str = "xlsx";

/// Prefix of the lock files office suites leave next to open workbooks.
pub const LOCK_FILE_PREFIX: &str = "~$";

/// A workbook found under the input root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Full path to the workbook.
    pub path: PathBuf,
    /// Path relative to the input root, always with `/` separators.
    pub relative: String,
}

/// Returns true for `.xlsx` files that are not office lock files.
pub fn is_workbook_candidate(path: &Path) -> bool {
    let is_xlsx = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(WORKBOOK_EXTENSION))
        .unwrap_or(false);
    if !is_xlsx {
        return false;
    }
    let is_lock_file = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with(LOCK_FILE_PREFIX))
        .unwrap_or(false);
    !is_lock_file
}

/// Recursively lists all workbooks under `root`.
///
/// Returns files sorted by their relative path.
pub fn discover_workbooks(root: &Path) -> Result<Vec<SourceFile>> {
    if !root.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry_result in WalkDir::new(root).sort_by_file_name() {
        let entry = entry_result.map_err(|e| IngestError::DirectoryWalk {
            path: e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            source: e,
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if !is_workbook_candidate(path) {
            debug!(path = %path.display(), "skipping non-workbook file");
            continue;
        }

        files.push(SourceFile {
            path: path.to_path_buf(),
            relative: relative_path(root, path),
        });
    }

    files.sort_by(|a, b| a.relative.cmp(&b.relative));
    Ok(files)
}
