use std::path::PathBuf;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use xlsx2xml_cli::types::{BatchResult, FileSummary};
use xlsx2xml_model::{Analysis, TypeRegistry};

pub fn print_summary(result: &BatchResult) {
    println!("Input: {}", result.input_root.display());
    println!("Output: {}", result.output_root.display());
    if let Some(path) = &result.schema_file {
        println!("Schema file: {}", path.display());
    }
    if result.dry_run {
        println!("Dry run: no files written");
    }
    if !result.files.is_empty() {
        println!("{}", summary_table(result));
    }
    println!(
        "{} files converted in {:.2}s.",
        result.converted(),
        result.elapsed.as_secs_f64()
    );
    if result.has_errors() {
        eprintln!("Failed:");
        for failure in &result.failures {
            eprintln!("- {}: {}", failure.relative, failure.message);
        }
    }
}

fn summary_table(result: &BatchResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Fields"),
        header_cell("Records"),
        header_cell("Blank"),
        header_cell("Output"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for file in &result.files {
        table.add_row(file_row(file));
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(result.total_records()).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    table
}

fn file_row(file: &FileSummary) -> Vec<Cell> {
    vec![
        Cell::new(&file.relative)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        count_cell(file.fields),
        count_cell(file.records),
        count_cell(file.blank_rows),
        output_cell(file.output.as_ref()),
    ]
}

/// Exported fields of one analyzed workbook.
pub fn fields_table(analysis: &Analysis, registry: &TypeRegistry) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Type"),
        header_cell("Output type"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    for field in analysis.fields() {
        table.add_row(vec![
            Cell::new(field.name),
            Cell::new(field.type_tag),
            Cell::new(registry.output_type(field.type_tag)),
            Cell::new(field.description),
        ]);
    }
    table
}

pub fn types_table(registry: &TypeRegistry) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Type"),
        header_cell("Output"),
        header_cell("Validator"),
    ]);
    apply_table_style(&mut table);
    for (tag, rule) in registry.iter() {
        table.add_row(vec![
            Cell::new(tag),
            Cell::new(registry.output_type(tag)),
            match rule.validator {
                Some(validator) => Cell::new(validator.as_str()),
                None => dim_cell("-"),
            },
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn output_cell(path: Option<&PathBuf>) -> Cell {
    match path {
        Some(path) => Cell::new(path.display()).fg(Color::Green),
        None => dim_cell("-"),
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
