//! Source workbook ingestion for xlsx2xml.
//!
//! # Features
//!
//! - **Discovery**: recursively find `.xlsx` files, skipping office lock files
//! - **Reading**: decode the first worksheet into plain cell text
//! - **Paths**: separator normalization and root-relative paths
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use xlsx2xml_ingest::{discover_workbooks, read_workbook};
//!
//! for source in discover_workbooks(Path::new("xlsx"))? {
//!     let workbook = read_workbook(&source.path)?;
//!     println!("{} -> {} sheets", source.relative, workbook.sheets.len());
//! }
//! ```

mod discovery;
mod error;
mod paths;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === File Discovery ===
pub use discovery::{
    LOCK_FILE_PREFIX, SourceFile, WORKBOOK_EXTENSION, discover_workbooks, is_workbook_candidate,
};

// === Paths ===
pub use paths::{normalize_separators, relative_path};

// === Workbook Reading ===
pub use reader::{cell_text, range_to_rows, read_workbook};
