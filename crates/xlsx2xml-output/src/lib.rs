//! Output generation for xlsx2xml.
//!
//! - **Markup documents**: one XML file per converted workbook
//! - **Schema file**: a single aggregated field listing for the whole batch

mod common;
mod document;
mod schema;

pub use common::{MARKUP_EXTENSION, ensure_parent_dir, markup_path, schema_heading};
pub use document::{ROOT_ELEMENT, field_comment, render_document, write_document};
pub use schema::{SchemaFile, public_identifier, render_schema};
