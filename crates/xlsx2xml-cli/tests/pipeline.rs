//! End-to-end tests for the batch pipeline.

use std::fs;
use std::path::Path;

use rust_xlsxwriter::Workbook as XlsxWriter;
use tempfile::TempDir;

use xlsx2xml_cli::pipeline::{BatchOptions, FailureMode, run_batch};

fn write_sheet(path: &Path, rows: &[&[&str]]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create fixture dir");
    }
    let mut book = XlsxWriter::new();
    let sheet = book.add_worksheet();
    for (row, cells) in rows.iter().enumerate() {
        for (col, text) in cells.iter().enumerate() {
            if !text.is_empty() {
                sheet
                    .write_string(row as u32, col as u16, *text)
                    .expect("write cell");
            }
        }
    }
    book.save(path).expect("save workbook");
}

fn write_item_sheet(path: &Path) {
    write_sheet(
        path,
        &[
            &["Items"],
            &["int", "string"],
            &["ID", "Name"],
            &["Both", "Both"],
            &["id", "name"],
            &["1", "sword"],
        ],
    );
}

fn batch(dir: &TempDir) -> BatchOptions {
    BatchOptions::new(dir.path().join("xlsx"), dir.path().join("xml"))
}

#[test]
fn converts_single_sheet_to_document() {
    let dir = TempDir::new().expect("temp dir");
    write_item_sheet(&dir.path().join("xlsx/sheet1.xlsx"));

    let result = run_batch(&batch(&dir)).expect("batch");
    assert_eq!(result.converted(), 1);
    assert!(!result.has_errors());

    let document = fs::read_to_string(dir.path().join("xml/sheet1.xml")).expect("read output");
    assert_eq!(
        document,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <!-- id=ID name=Name -->\n\
         <root>\n\
         \t<data id=\"1\" name=\"sword\" />\n\
         </root>\n"
    );
}

#[test]
fn mirrors_directories_and_skips_lock_files() {
    let dir = TempDir::new().expect("temp dir");
    write_item_sheet(&dir.path().join("xlsx/equip/armor.xlsx"));
    write_item_sheet(&dir.path().join("xlsx/~$armor.xlsx"));
    fs::write(dir.path().join("xlsx/readme.txt"), "ignored").expect("write readme");

    let result = run_batch(&batch(&dir)).expect("batch");
    assert_eq!(result.converted(), 1);
    assert_eq!(result.files[0].relative, "equip/armor.xlsx");
    assert!(dir.path().join("xml/equip/armor.xml").is_file());
    assert!(!dir.path().join("xml/~$armor.xml").exists());
}

#[test]
fn rerun_is_byte_identical() {
    let dir = TempDir::new().expect("temp dir");
    write_item_sheet(&dir.path().join("xlsx/a.xlsx"));
    write_item_sheet(&dir.path().join("xlsx/b/c.xlsx"));
    let mut options = batch(&dir);
    options.schema_file = Some(dir.path().join("fmt/format.txt"));

    run_batch(&options).expect("first batch");
    let first_doc = fs::read(dir.path().join("xml/b/c.xml")).expect("read doc");
    let first_schema = fs::read(dir.path().join("fmt/format.txt")).expect("read schema");

    run_batch(&options).expect("second batch");
    assert_eq!(fs::read(dir.path().join("xml/b/c.xml")).expect("read doc"), first_doc);
    assert_eq!(
        fs::read(dir.path().join("fmt/format.txt")).expect("read schema"),
        first_schema
    );
}

#[test]
fn schema_file_collects_one_block_per_file() {
    let dir = TempDir::new().expect("temp dir");
    write_item_sheet(&dir.path().join("xlsx/a.xlsx"));
    write_item_sheet(&dir.path().join("xlsx/sub/b.xlsx"));
    let mut options = batch(&dir);
    options.schema_file = Some(dir.path().join("format.txt"));

    let result = run_batch(&options).expect("batch");
    assert_eq!(result.schema_file, options.schema_file);

    let schema = fs::read_to_string(dir.path().join("format.txt")).expect("read schema");
    assert_eq!(
        schema,
        "./a.xml\n\
         \tId\tint64\t`xml:\"id,attr\"`\t//ID\n\
         \tName\tstring\t`xml:\"name,attr\"`\t//Name\n\
         \n\
         ./sub/b.xml\n\
         \tId\tint64\t`xml:\"id,attr\"`\t//ID\n\
         \tName\tstring\t`xml:\"name,attr\"`\t//Name\n\
         \n"
    );
}

#[test]
fn blank_trailing_header_cells_keep_their_field() {
    let dir = TempDir::new().expect("temp dir");
    write_sheet(
        &dir.path().join("xlsx/a.xlsx"),
        &[
            &["Stats"],
            &["int", "int"],
            &["ID", ""],
            &["Both", "Both"],
            &["id", "hp"],
            &["1", "5"],
        ],
    );
    write_sheet(
        &dir.path().join("xlsx/b.xlsx"),
        &[
            &["Stats"],
            &["int", ""],
            &["ID", ""],
            &["Both", "Server"],
            &["id", "mp"],
            &["1", "7"],
        ],
    );
    let mut options = batch(&dir);
    options.schema_file = Some(dir.path().join("format.txt"));

    run_batch(&options).expect("batch");

    let document = fs::read_to_string(dir.path().join("xml/a.xml")).expect("read doc");
    assert!(document.contains("<!-- id=ID hp= -->\n"), "{document}");
    assert!(document.contains("\t<data id=\"1\" hp=\"5\" />\n"), "{document}");

    let schema = fs::read_to_string(dir.path().join("format.txt")).expect("read schema");
    assert_eq!(
        schema,
        "./a.xml\n\
         \tId\tint64\t`xml:\"id,attr\"`\t//ID\n\
         \tHp\tint64\t`xml:\"hp,attr\"`\t//\n\
         \n\
         ./b.xml\n\
         \tId\tint64\t`xml:\"id,attr\"`\t//ID\n\
         \tMp\t\t`xml:\"mp,attr\"`\t//\n\
         \n"
    );
}

#[test]
fn fail_fast_stops_at_first_error() {
    let dir = TempDir::new().expect("temp dir");
    write_sheet(
        &dir.path().join("xlsx/a_bad.xlsx"),
        &[
            &["Items"],
            &["int"],
            &["ID"],
            &["Both"],
            &["id"],
            &["12a"],
        ],
    );
    write_item_sheet(&dir.path().join("xlsx/b_good.xlsx"));

    let error = run_batch(&batch(&dir)).expect_err("batch should fail");
    let message = format!("{error:#}");
    assert!(message.contains("a_bad.xlsx"), "{message}");
    assert!(
        message.contains("invalid data [column:id;row:6;type:int;data:12a]"),
        "{message}"
    );
    assert!(!dir.path().join("xml/a_bad.xml").exists());
    assert!(!dir.path().join("xml/b_good.xml").exists());
}

#[test]
fn keep_going_records_failures_and_continues() {
    let dir = TempDir::new().expect("temp dir");
    write_sheet(
        &dir.path().join("xlsx/a_dup.xlsx"),
        &[
            &["Items"],
            &["int", "string", "int"],
            &["ID", "Name", "Other"],
            &["Both", "Both", "Client"],
            &["id", "name", "id"],
            &["1", "sword", "2"],
        ],
    );
    write_sheet(&dir.path().join("xlsx/b_short.xlsx"), &[&["Items"], &["int"]]);
    write_item_sheet(&dir.path().join("xlsx/c_good.xlsx"));

    let mut options = batch(&dir);
    options.failure_mode = FailureMode::KeepGoing;
    let result = run_batch(&options).expect("batch");

    assert_eq!(result.converted(), 1);
    assert!(result.has_errors());
    assert_eq!(result.failures.len(), 2);
    assert_eq!(result.failures[0].relative, "a_dup.xlsx");
    assert!(result.failures[0].message.contains("duplicate key found: id:2"));
    assert_eq!(result.failures[1].relative, "b_short.xlsx");
    assert!(result.failures[1].message.contains("no data in"));

    assert!(!dir.path().join("xml/a_dup.xml").exists());
    assert!(dir.path().join("xml/c_good.xml").is_file());
}

#[test]
fn sheet_without_exported_columns_writes_nothing() {
    let dir = TempDir::new().expect("temp dir");
    write_sheet(
        &dir.path().join("xlsx/client.xlsx"),
        &[
            &["Items"],
            &["int"],
            &["ID"],
            &["Client"],
            &["id"],
            &["1"],
        ],
    );

    let result = run_batch(&batch(&dir)).expect("batch");
    assert_eq!(result.converted(), 1);
    assert_eq!(result.files[0].fields, 0);
    assert_eq!(result.files[0].output, None);
    assert!(!dir.path().join("xml/client.xml").exists());
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().expect("temp dir");
    write_item_sheet(&dir.path().join("xlsx/sheet1.xlsx"));
    let mut options = batch(&dir);
    options.schema_file = Some(dir.path().join("format.txt"));
    options.dry_run = true;

    let result = run_batch(&options).expect("batch");
    assert_eq!(result.converted(), 1);
    assert_eq!(result.files[0].records, 1);
    assert_eq!(result.schema_file, None);
    assert!(!dir.path().join("xml").exists());
    assert!(!dir.path().join("format.txt").exists());
}

#[test]
fn missing_input_root_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    let error = run_batch(&batch(&dir)).expect_err("missing input");
    assert!(format!("{error:#}").contains("directory not found"));
}
