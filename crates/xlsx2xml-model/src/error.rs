//! Error types for workbook analysis.

use std::fmt;

use thiserror::Error;

/// A field name that occurs more than once in the field-name row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateField {
    pub name: String,
    pub count: usize,
}

impl fmt::Display for DuplicateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.count)
    }
}

/// Errors that terminate the analysis of a single workbook.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzeError {
    /// The first sheet is missing or does not reach the data section.
    #[error("no data in {source_name}: expected at least {required} rows, found {found}")]
    EmptySheet {
        source_name: String,
        required: usize,
        found: usize,
    },

    /// A cell failed the validator registered for its declared type.
    #[error("invalid data [column:{field};row:{row};type:{type_tag};data:{value}]")]
    InvalidData {
        field: String,
        /// 1-based row number as shown by spreadsheet applications.
        row: usize,
        type_tag: String,
        value: String,
    },

    /// The field-name row contains repeated names (checked over all columns).
    #[error("duplicate key found: {}", join_duplicates(.duplicates))]
    DuplicateKey { duplicates: Vec<DuplicateField> },
}

fn join_duplicates(duplicates: &[DuplicateField]) -> String {
    duplicates
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalyzeError>;
