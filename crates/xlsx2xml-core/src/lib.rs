//! Workbook analysis engine for xlsx2xml.
//!
//! The [`Analyzer`] reads the fixed six-row layout of a sheet:
//!
//! 1. title (ignored)
//! 2. declared type per column
//! 3. description per column
//! 4. usage scope per column, deciding which columns are exported
//! 5. field name per column
//! 6. data rows
//!
//! and produces an [`Analysis`](xlsx2xml_model::Analysis) holding the
//! exported keys, descriptions, types and one `<data .../>` fragment per
//! non-blank data row.

pub mod analyzer;
pub mod options;
pub mod record;
pub mod validity;

pub use analyzer::Analyzer;
pub use options::{AnalyzerOptions, ValueEscaping};
pub use record::{DATA_ELEMENT, DataRecord};
pub use validity::ColumnValidity;
