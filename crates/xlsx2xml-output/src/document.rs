//! Markup document rendering.
//!
//! A document is an XML declaration, one comment listing every exported
//! field with its description, and a `<root>` element wrapping the data
//! fragments produced by the analyzer. Fragments are already serialized,
//! so they are copied through verbatim.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::{debug, warn};

use xlsx2xml_model::Analysis;

use crate::common::ensure_parent_dir;

/// Name of the document element.
pub const ROOT_ELEMENT: &str = "root";

/// Body of the field comment: ` name=description ` for each field.
///
/// Pairs stop at the shorter of the two lists. No fields give a single space.
/// Text is copied verbatim; a `--` inside it is reported with a warning.
pub fn field_comment(keys: &[String], descriptions: &[String]) -> String {
    let mut comment = String::from(" ");
    for (key, description) in keys.iter().zip(descriptions) {
        if !is_comment_safe(key) || !is_comment_safe(description) {
            warn!(
                field = %key,
                "field comment contains \"--\", document will not be well-formed XML"
            );
        }
        comment.push_str(key);
        comment.push('=');
        comment.push_str(description);
        comment.push(' ');
    }
    comment
}

/// Whether `text` may appear inside an XML comment.
fn is_comment_safe(text: &str) -> bool {
    !text.contains("--")
}

/// Render a complete markup document.
pub fn render_document(
    keys: &[String],
    descriptions: &[String],
    fragments: &[String],
) -> Result<String> {
    let mut xml = Writer::new(Vec::new());

    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    xml.get_mut().push(b'\n');

    let comment = field_comment(keys, descriptions);
    xml.write_event(Event::Comment(BytesText::from_escaped(comment)))?;
    xml.get_mut().push(b'\n');

    xml.write_event(Event::Start(BytesStart::new(ROOT_ELEMENT)))?;
    xml.get_mut().push(b'\n');
    for fragment in fragments {
        xml.get_mut().extend_from_slice(fragment.as_bytes());
    }
    xml.write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))?;
    xml.get_mut().push(b'\n');

    String::from_utf8(xml.into_inner()).context("document is not valid UTF-8")
}

/// Write the document for one analyzed workbook, replacing any existing file.
pub fn write_document(output_path: &Path, analysis: &Analysis) -> Result<()> {
    let document = render_document(
        &analysis.keys,
        &analysis.descriptions,
        &analysis.fragments,
    )?;

    ensure_parent_dir(output_path)?;
    let file =
        File::create(output_path).with_context(|| format!("create {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(document.as_bytes())
        .with_context(|| format!("write {}", output_path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flush {}", output_path.display()))?;

    debug!(
        path = %output_path.display(),
        records = analysis.record_count(),
        bytes = document.len(),
        "wrote document"
    );
    Ok(())
}
