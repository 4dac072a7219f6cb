//! Error types for workbook discovery and reading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating or reading source workbooks.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input root is missing or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Walking the input tree failed.
    #[error("failed to read directory {path}: {source}")]
    DirectoryWalk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// Workbook file not found.
    #[error("workbook not found: {path}")]
    FileNotFound { path: PathBuf },

    // === Workbook Errors ===
    /// The file is not a readable xlsx container.
    #[error("failed to open workbook {path}: {source}")]
    WorkbookOpen {
        path: PathBuf,
        #[source]
        source: calamine::XlsxError,
    },

    /// A worksheet could not be decoded.
    #[error("failed to read sheet '{sheet}' in {path}: {source}")]
    SheetRead {
        path: PathBuf,
        sheet: String,
        #[source]
        source: calamine::XlsxError,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
