//! Path helpers shared by discovery and output layout.

use std::path::{Component, Path};

/// Replaces backslashes with forward slashes.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Path of `full` relative to `base`, joined with `/`.
///
/// Falls back to the normalized full path when `full` is not under `base`.
pub fn relative_path(base: &Path, full: &Path) -> String {
    match full.strip_prefix(base) {
        Ok(relative) => relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => normalize_separators(&full.to_string_lossy()),
    }
}
