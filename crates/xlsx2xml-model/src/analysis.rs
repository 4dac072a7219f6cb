//! Output of analyzing one workbook.

/// The `(name, type, description)` triple of one exported column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor<'a> {
    pub name: &'a str,
    pub type_tag: &'a str,
    pub description: &'a str,
}

/// Parallel sequences produced by the analyzer.
///
/// `keys`, `descriptions` and `types` hold one entry per exported column in
/// column order. `fragments` holds one serialized `<data .../>` element per
/// non-blank data row, in row order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    pub keys: Vec<String>,
    pub descriptions: Vec<String>,
    pub types: Vec<String>,
    pub fragments: Vec<String>,
    /// Data rows dropped because every exported value was empty.
    pub blank_rows: usize,
}

impl Analysis {
    /// Whether the workbook has at least one exported column.
    pub fn has_fields(&self) -> bool {
        !self.keys.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.fragments.len()
    }

    /// Field descriptors, stopping at the shortest of the three sequences.
    pub fn fields(&self) -> impl Iterator<Item = FieldDescriptor<'_>> {
        self.keys
            .iter()
            .zip(&self.types)
            .zip(&self.descriptions)
            .map(|((name, type_tag), description)| FieldDescriptor {
                name: name.as_str(),
                type_tag: type_tag.as_str(),
                description: description.as_str(),
            })
    }
}
