//! Column validity set computed from the usage-scope row.

use std::collections::BTreeSet;

use xlsx2xml_model::{ExportUsage, Row};

/// Column indices whose usage-scope cell is on the export allow-list.
///
/// Built once per sheet and never modified afterwards. Columns without a
/// usage-scope cell are not valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnValidity {
    columns: BTreeSet<usize>,
}

impl ColumnValidity {
    pub fn from_usage_row(row: &Row, usage: &ExportUsage) -> Self {
        let columns = row
            .iter()
            .enumerate()
            .filter(|(_, cell)| usage.allows(cell))
            .map(|(index, _)| index)
            .collect();
        Self { columns }
    }

    pub fn contains(&self, column: usize) -> bool {
        self.columns.contains(&column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.columns.iter().copied()
    }
}
