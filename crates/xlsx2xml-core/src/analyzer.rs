//! Workbook analysis: header classification, column validity, per-row
//! validation and duplicate field detection.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use xlsx2xml_model::{
    Analysis, AnalyzeError, DuplicateField, Result, Row, RowKind, Sheet, Workbook,
};

use crate::options::AnalyzerOptions;
use crate::record::DataRecord;
use crate::validity::ColumnValidity;

/// Converts the first sheet of a workbook into exportable sequences.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    options: AnalyzerOptions,
}

/// Unfiltered per-column header lists, indexed by column position.
#[derive(Debug, Default)]
struct ColumnHeaders<'a> {
    types: Vec<&'a str>,
    names: Vec<&'a str>,
}

impl Analyzer {
    pub fn new(options: AnalyzerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    /// Analyzes the first sheet of `workbook`.
    ///
    /// # Errors
    ///
    /// - [`AnalyzeError::EmptySheet`] when there is no sheet or it has fewer
    ///   than [`RowKind::MIN_ROWS`] rows.
    /// - [`AnalyzeError::InvalidData`] for the first cell rejected by the
    ///   validator of its declared type.
    /// - [`AnalyzeError::DuplicateKey`] when any field name, exported or not,
    ///   occurs more than once.
    pub fn analyze(&self, workbook: &Workbook) -> Result<Analysis> {
        let sheet = first_sheet(workbook)?;
        let validity = sheet
            .row(RowKind::UsageScope)
            .map(|row| ColumnValidity::from_usage_row(row, &self.options.export_usage))
            .unwrap_or_default();
        debug!(
            source = %workbook.source_name,
            sheet = %sheet.name,
            rows = sheet.rows.len(),
            valid_columns = validity.len(),
            "analyzing sheet"
        );
        if validity.is_empty() {
            debug!(source = %workbook.source_name, "no column is marked for export");
        }

        let mut analysis = Analysis::default();
        let mut headers = ColumnHeaders::default();
        for (index, row) in sheet.rows.iter().enumerate() {
            match RowKind::classify(index) {
                RowKind::Title | RowKind::UsageScope => {}
                RowKind::Type => {
                    headers.types.extend(row.iter().map(String::as_str));
                    analysis.types.extend(exported(row, &validity));
                }
                RowKind::Description => {
                    analysis.descriptions.extend(exported(row, &validity));
                }
                RowKind::FieldName => {
                    headers.names.extend(row.iter().map(String::as_str));
                    analysis.keys.extend(exported(row, &validity));
                }
                RowKind::Data => {
                    let record = self.collect_record(index, row, &validity, &headers)?;
                    if record.is_blank() {
                        trace!(row = index + 1, "skipping blank row");
                        analysis.blank_rows += 1;
                    } else {
                        analysis
                            .fragments
                            .push(record.to_fragment(self.options.escaping));
                    }
                }
            }
        }

        check_duplicates(&headers.names)?;
        debug!(
            source = %workbook.source_name,
            fields = analysis.keys.len(),
            records = analysis.record_count(),
            blank_rows = analysis.blank_rows,
            "sheet analyzed"
        );
        Ok(analysis)
    }

    /// Collects and validates the exported values of one data row.
    ///
    /// Attribute names come from the unfiltered name list so that they stay
    /// aligned with the column position. The scan stops at the first valid
    /// column beyond the named columns.
    fn collect_record<'a>(
        &self,
        index: usize,
        row: &'a Row,
        validity: &ColumnValidity,
        headers: &ColumnHeaders<'a>,
    ) -> Result<DataRecord<'a>> {
        let mut record = DataRecord::new();
        for (column, text) in row.iter().enumerate() {
            if !validity.contains(column) {
                continue;
            }
            let Some(&field) = headers.names.get(column) else {
                break;
            };
            if let Some(&type_tag) = headers.types.get(column)
                && let Some(validator) = self.options.types.validator(type_tag)
                && !validator.accepts(text)
            {
                return Err(AnalyzeError::InvalidData {
                    field: field.to_string(),
                    row: index + 1,
                    type_tag: type_tag.to_string(),
                    value: text.clone(),
                });
            }
            record.push(field, text);
        }
        Ok(record)
    }
}

fn first_sheet(workbook: &Workbook) -> Result<&Sheet> {
    let found = workbook.first_sheet().map_or(0, |sheet| sheet.rows.len());
    match workbook.first_sheet() {
        Some(sheet) if found >= RowKind::MIN_ROWS => Ok(sheet),
        _ => Err(AnalyzeError::EmptySheet {
            source_name: workbook.source_name.clone(),
            required: RowKind::MIN_ROWS,
            found,
        }),
    }
}

/// One value per valid column; a cell missing from a short row exports as `""`.
fn exported<'a>(
    row: &'a Row,
    validity: &'a ColumnValidity,
) -> impl Iterator<Item = String> + 'a {
    validity
        .iter()
        .map(|column| row.get(column).cloned().unwrap_or_default())
}

/// Fails when any name occurs more than once, listing all repeats by name.
fn check_duplicates(names: &[&str]) -> Result<()> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for name in names {
        *counts.entry(*name).or_insert(0) += 1;
    }
    let duplicates: Vec<DuplicateField> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, count)| DuplicateField {
            name: name.to_string(),
            count,
        })
        .collect();
    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(AnalyzeError::DuplicateKey { duplicates })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ValueEscaping;
    use xlsx2xml_model::{ExportUsage, TypeRegistry};

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|cell| (*cell).to_string()).collect()
    }

    fn workbook(rows: Vec<Row>) -> Workbook {
        Workbook::new("test.xlsx", vec![Sheet::new("Sheet1", rows)])
    }

    fn header(types: &[&str], usage: &[&str], names: &[&str]) -> Vec<Row> {
        let descriptions: Vec<String> = names.iter().map(|name| format!("d{name}")).collect();
        vec![
            row(&["title"]),
            row(types),
            descriptions,
            row(usage),
            row(names),
        ]
    }

    #[test]
    fn test_exports_only_valid_columns() {
        let mut rows = header(
            &["int", "string", "int"],
            &["Both", "Client", "Server"],
            &["id", "name", "price"],
        );
        rows.push(row(&["1", "Sword", "100"]));

        let analysis = Analyzer::default().analyze(&workbook(rows)).unwrap();
        assert_eq!(analysis.keys, vec!["id", "price"]);
        assert_eq!(analysis.types, vec!["int", "int"]);
        assert_eq!(analysis.descriptions, vec!["did", "dprice"]);
        assert_eq!(
            analysis.fragments,
            vec!["\t<data id=\"1\" price=\"100\" />\n"]
        );
    }

    #[test]
    fn test_blank_rows_are_dropped() {
        let mut rows = header(&["string", "string"], &["Both", "Both"], &["a", "b"]);
        rows.push(row(&["x", ""]));
        rows.push(row(&["", ""]));
        rows.push(Row::new());
        rows.push(row(&["", "y"]));

        let analysis = Analyzer::default().analyze(&workbook(rows)).unwrap();
        assert_eq!(analysis.record_count(), 2);
        assert_eq!(analysis.blank_rows, 2);
        assert_eq!(analysis.fragments[1], "\t<data a=\"\" b=\"y\" />\n");
    }

    #[test]
    fn test_blank_only_in_unexported_columns_is_blank() {
        let mut rows = header(&["string", "string"], &["Both", "Client"], &["a", "b"]);
        rows.push(row(&["", "client only"]));

        let analysis = Analyzer::default().analyze(&workbook(rows)).unwrap();
        assert!(analysis.fragments.is_empty());
        assert_eq!(analysis.blank_rows, 1);
    }

    #[test]
    fn test_invalid_integer_reports_position() {
        let mut rows = header(&["int", "int"], &["Both", "Both"], &["id", "level"]);
        rows.push(row(&["1", "42"]));
        rows.push(row(&["2", "12a"]));

        let err = Analyzer::default().analyze(&workbook(rows)).unwrap_err();
        assert_eq!(
            err,
            AnalyzeError::InvalidData {
                field: "level".to_string(),
                row: 7,
                type_tag: "int".to_string(),
                value: "12a".to_string(),
            }
        );
    }

    #[test]
    fn test_unexported_columns_are_not_validated() {
        let mut rows = header(&["int", "int"], &["Both", "Client"], &["id", "level"]);
        rows.push(row(&["1", "not a number"]));

        let analysis = Analyzer::default().analyze(&workbook(rows)).unwrap();
        assert_eq!(analysis.record_count(), 1);
    }

    #[test]
    fn test_unknown_types_are_not_validated() {
        let mut rows = header(&["weird"], &["Both"], &["x"]);
        rows.push(row(&["anything goes"]));

        let analysis = Analyzer::default().analyze(&workbook(rows)).unwrap();
        assert_eq!(analysis.types, vec!["weird"]);
        assert_eq!(analysis.record_count(), 1);
    }

    #[test]
    fn test_empty_registry_disables_validation() {
        let mut rows = header(&["int"], &["Both"], &["id"]);
        rows.push(row(&["12a"]));

        let analyzer = Analyzer::new(AnalyzerOptions::new().with_types(TypeRegistry::empty()));
        assert!(analyzer.analyze(&workbook(rows)).is_ok());
    }

    #[test]
    fn test_duplicates_counted_over_all_columns() {
        let mut rows = header(
            &["int", "string", "int"],
            &["Both", "Client", "Client"],
            &["id", "name", "id"],
        );
        rows.push(row(&["1", "a", "2"]));

        let err = Analyzer::default().analyze(&workbook(rows)).unwrap_err();
        assert_eq!(
            err,
            AnalyzeError::DuplicateKey {
                duplicates: vec![DuplicateField {
                    name: "id".to_string(),
                    count: 2,
                }],
            }
        );
    }

    #[test]
    fn test_duplicates_reported_after_full_scan() {
        let mut rows = header(&["string", "string"], &["Both", "Both"], &["a", "a"]);
        rows.push(row(&["x", "y"]));

        let err = Analyzer::default().analyze(&workbook(rows)).unwrap_err();
        assert!(matches!(err, AnalyzeError::DuplicateKey { .. }));
        assert_eq!(err.to_string(), "duplicate key found: a:2");
    }

    #[test]
    fn test_short_sheet_is_empty() {
        let rows = header(&["int"], &["Both"], &["id"]);
        let err = Analyzer::default().analyze(&workbook(rows)).unwrap_err();
        assert_eq!(
            err,
            AnalyzeError::EmptySheet {
                source_name: "test.xlsx".to_string(),
                required: 6,
                found: 5,
            }
        );
    }

    #[test]
    fn test_workbook_without_sheets_is_empty() {
        let err = Analyzer::default()
            .analyze(&Workbook::new("none.xlsx", Vec::new()))
            .unwrap_err();
        assert!(matches!(err, AnalyzeError::EmptySheet { found: 0, .. }));
    }

    #[test]
    fn test_data_beyond_named_columns_is_cut() {
        let mut rows = vec![
            row(&["title"]),
            row(&["string", "string", "string"]),
            row(&["da", "db", "dc"]),
            row(&["Both", "Both", "Both"]),
            row(&["a", "b"]),
        ];
        rows.push(row(&["1", "2", "3"]));

        let analysis = Analyzer::default().analyze(&workbook(rows)).unwrap();
        assert_eq!(analysis.keys, vec!["a", "b", ""]);
        assert_eq!(analysis.descriptions.len(), 3);
        assert_eq!(analysis.fragments, vec!["\t<data a=\"1\" b=\"2\" />\n"]);
    }

    #[test]
    fn test_missing_type_cell_skips_validation() {
        let mut rows = vec![
            row(&["title"]),
            row(&["int"]),
            row(&["da", "db"]),
            row(&["Both", "Both"]),
            row(&["a", "b"]),
        ];
        rows.push(row(&["1", "free text"]));

        let analysis = Analyzer::default().analyze(&workbook(rows)).unwrap();
        assert_eq!(analysis.types, vec!["int", ""]);
        assert_eq!(analysis.record_count(), 1);
    }

    #[test]
    fn test_short_header_rows_export_empty_values() {
        let rows = vec![
            row(&["title"]),
            row(&["int"]),
            row(&["ID"]),
            row(&["Both", "Server"]),
            row(&["id", "hp"]),
            row(&["1", "5"]),
        ];

        let analysis = Analyzer::default().analyze(&workbook(rows)).unwrap();
        assert_eq!(analysis.keys, vec!["id", "hp"]);
        assert_eq!(analysis.descriptions, vec!["ID", ""]);
        assert_eq!(analysis.types, vec!["int", ""]);
        assert_eq!(analysis.fields().count(), 2);
        assert_eq!(analysis.fragments, vec!["\t<data id=\"1\" hp=\"5\" />\n"]);
    }

    #[test]
    fn test_custom_usage_and_raw_values() {
        let mut rows = header(&["string"], &["Client"], &["note"]);
        rows.push(row(&["a & b"]));

        let analyzer = Analyzer::new(
            AnalyzerOptions::new()
                .with_export_usage(ExportUsage::new(["Client"]))
                .with_escaping(ValueEscaping::Raw),
        );
        let analysis = analyzer.analyze(&workbook(rows)).unwrap();
        assert_eq!(analysis.fragments, vec!["\t<data note=\"a & b\" />\n"]);
    }
}
