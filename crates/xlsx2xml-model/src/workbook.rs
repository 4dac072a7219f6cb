//! In-memory workbook representation and the fixed row schema.

/// Cell texts of one row. A row ends at its last written cell.
pub type Row = Vec<String>;

/// One worksheet with rows addressed from A1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Row>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Returns the row for the given schema position, if present.
    pub fn row(&self, kind: RowKind) -> Option<&Row> {
        self.rows.get(kind.first_index())
    }
}

/// A workbook as delivered by a spreadsheet reader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workbook {
    /// Where the workbook came from; used in error messages.
    pub source_name: String,
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(source_name: impl Into<String>, sheets: Vec<Sheet>) -> Self {
        Self {
            source_name: source_name.into(),
            sheets,
        }
    }

    /// Only the first sheet of a workbook is converted.
    pub fn first_sheet(&self) -> Option<&Sheet> {
        self.sheets.first()
    }
}

/// Position of a row within the fixed sheet layout.
///
/// | index | kind          |
/// |-------|---------------|
/// | 0     | `Title`       |
/// | 1     | `Type`        |
/// | 2     | `Description` |
/// | 3     | `UsageScope`  |
/// | 4     | `FieldName`   |
/// | 5..   | `Data`        |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKind {
    Title,
    Type,
    Description,
    UsageScope,
    FieldName,
    Data,
}

impl RowKind {
    /// Minimum number of rows a sheet needs: the header plus one data row.
    pub const MIN_ROWS: usize = 6;

    /// Classifies a 0-based row index.
    pub fn classify(index: usize) -> Self {
        match index {
            0 => Self::Title,
            1 => Self::Type,
            2 => Self::Description,
            3 => Self::UsageScope,
            4 => Self::FieldName,
            _ => Self::Data,
        }
    }

    /// First row index carrying this kind.
    pub fn first_index(self) -> usize {
        match self {
            Self::Title => 0,
            Self::Type => 1,
            Self::Description => 2,
            Self::UsageScope => 3,
            Self::FieldName => 4,
            Self::Data => 5,
        }
    }
}
