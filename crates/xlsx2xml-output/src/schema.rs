//! Aggregated schema file.
//!
//! The schema file collects one block per converted workbook: a heading
//! naming the generated document, one line per exported field, and a
//! blank separator line. It is truncated once at the start of a batch and
//! then only appended to, through a single [`SchemaFile`] owner.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use xlsx2xml_model::{Analysis, TypeRegistry};

use crate::common::ensure_parent_dir;

/// Field name with its first character upper-cased.
pub fn public_identifier(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render the schema block for one workbook.
///
/// Lines stop at the shortest of `keys`, `types` and `descriptions`.
pub fn render_schema(
    heading: &str,
    keys: &[String],
    descriptions: &[String],
    types: &[String],
    registry: &TypeRegistry,
) -> String {
    let mut block = String::new();
    block.push_str(heading);
    block.push('\n');
    for ((key, type_tag), description) in keys.iter().zip(types).zip(descriptions) {
        block.push_str(&format!(
            "\t{}\t{}\t`xml:\"{key},attr\"`\t//{description}\n",
            public_identifier(key),
            registry.output_type(type_tag),
        ));
    }
    block.push('\n');
    block
}

/// Append-only handle on the batch schema file.
#[derive(Debug)]
pub struct SchemaFile {
    path: PathBuf,
}

impl SchemaFile {
    /// Create or truncate the schema file.
    pub fn create(path: &Path) -> Result<Self> {
        ensure_parent_dir(path)?;
        File::create(path).with_context(|| format!("create {}", path.display()))?;
        debug!(path = %path.display(), "initialized schema file");
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a pre-rendered block.
    pub fn append(&mut self, block: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("open {}", self.path.display()))?;
        file.write_all(block.as_bytes())
            .with_context(|| format!("append to {}", self.path.display()))?;
        Ok(())
    }

    /// Render and append the block for one analyzed workbook.
    pub fn append_analysis(
        &mut self,
        heading: &str,
        analysis: &Analysis,
        registry: &TypeRegistry,
    ) -> Result<()> {
        let block = render_schema(
            heading,
            &analysis.keys,
            &analysis.descriptions,
            &analysis.types,
            registry,
        );
        self.append(&block)
    }
}
