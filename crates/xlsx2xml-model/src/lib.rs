//! Shared data model for xlsx2xml.
//!
//! - [`Workbook`] / [`Sheet`]: spreadsheet content as plain cell text
//! - [`RowKind`]: the fixed six-row sheet layout
//! - [`ExportUsage`] and [`TypeRegistry`]: immutable analyzer configuration
//! - [`Analysis`]: the analyzer's parallel output sequences
//! - [`AnalyzeError`]: per-workbook failures

pub mod analysis;
pub mod error;
pub mod registry;
pub mod usage;
pub mod workbook;

pub use analysis::{Analysis, FieldDescriptor};
pub use error::{AnalyzeError, DuplicateField, Result};
pub use registry::{TypeRegistry, TypeRule, Validator};
pub use usage::{DEFAULT_EXPORT_USAGE, ExportUsage};
pub use workbook::{Row, RowKind, Sheet, Workbook};
