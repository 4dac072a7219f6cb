//! Sequential batch conversion.
//!
//! The batch runs these stages in order:
//! 1. **Discover**: list `.xlsx` files under the input root
//! 2. **Read**: decode the first sheet of one workbook
//! 3. **Analyze**: classify rows, validate cells, build data fragments
//! 4. **Output**: write the document and append the schema block
//!
//! Files are processed one after another in discovery order. The schema
//! file is created once before the first file and owned by the loop.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, trace, warn};

use xlsx2xml_core::{Analyzer, AnalyzerOptions};
use xlsx2xml_ingest::{SourceFile, discover_workbooks, read_workbook};
use xlsx2xml_output::{SchemaFile, markup_path, schema_heading, write_document};

use crate::logging::redact_value;
use crate::types::{BatchResult, FileFailure, FileSummary};

/// What to do when a single file fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailureMode {
    /// Abort the batch with the first error.
    #[default]
    FailFast,
    /// Record the failure, skip the file and continue.
    KeepGoing,
}

/// Inputs of one batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub input_root: PathBuf,
    pub output_root: PathBuf,
    /// Aggregated schema file; `None` disables it.
    pub schema_file: Option<PathBuf>,
    pub analyzer: AnalyzerOptions,
    pub failure_mode: FailureMode,
    /// Analyze every file without writing anything.
    pub dry_run: bool,
}

impl BatchOptions {
    pub fn new(input_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            input_root: input_root.into(),
            output_root: output_root.into(),
            schema_file: None,
            analyzer: AnalyzerOptions::default(),
            failure_mode: FailureMode::default(),
            dry_run: false,
        }
    }
}

/// Convert every workbook under the input root.
pub fn run_batch(options: &BatchOptions) -> Result<BatchResult> {
    let span = info_span!(
        "batch",
        input = %options.input_root.display(),
        output = %options.output_root.display()
    );
    let _guard = span.enter();
    let start = Instant::now();

    let sources = discover_workbooks(&options.input_root)
        .with_context(|| format!("list {}", options.input_root.display()))?;
    info!(file_count = sources.len(), "discovered workbooks");

    let mut schema = match &options.schema_file {
        Some(path) if !options.dry_run => Some(SchemaFile::create(path)?),
        _ => None,
    };

    let analyzer = Analyzer::new(options.analyzer.clone());
    let mut files = Vec::new();
    let mut failures = Vec::new();

    for (index, source) in sources.iter().enumerate() {
        info!(index = index + 1, file = %source.relative, "parsing file");
        let file_span = info_span!("file", file = %source.relative);
        let converted = file_span.in_scope(|| {
            convert_file(
                source,
                &analyzer,
                &options.output_root,
                schema.as_mut(),
                options.dry_run,
            )
        });

        match converted {
            Ok(summary) => files.push(summary),
            Err(error) => match options.failure_mode {
                FailureMode::FailFast => {
                    return Err(error.context(format!("convert {}", source.relative)));
                }
                FailureMode::KeepGoing => {
                    warn!(file = %source.relative, error = %format!("{error:#}"), "skipping file");
                    failures.push(FileFailure {
                        relative: source.relative.clone(),
                        message: format!("{error:#}"),
                    });
                }
            },
        }
    }

    let elapsed = start.elapsed();
    info!(
        converted = files.len(),
        failed = failures.len(),
        duration_ms = elapsed.as_millis(),
        "batch complete"
    );

    Ok(BatchResult {
        input_root: options.input_root.clone(),
        output_root: options.output_root.clone(),
        schema_file: schema.map(|schema| schema.path().to_path_buf()),
        files,
        failures,
        elapsed,
        dry_run: options.dry_run,
    })
}

/// Read, analyze and write one workbook.
///
/// Nothing is written when the analysis fails or the sheet exports no column.
pub fn convert_file(
    source: &SourceFile,
    analyzer: &Analyzer,
    output_root: &Path,
    schema: Option<&mut SchemaFile>,
    dry_run: bool,
) -> Result<FileSummary> {
    let workbook = read_workbook(&source.path)?;
    let analysis = analyzer.analyze(&workbook)?;
    for fragment in &analysis.fragments {
        trace!(record = redact_value(fragment.trim()), "data record");
    }

    let output = if !analysis.has_fields() {
        debug!("no exported columns, skipping output");
        None
    } else if dry_run {
        None
    } else {
        let path = markup_path(output_root, &source.relative);
        write_document(&path, &analysis)?;
        if let Some(schema) = schema {
            schema.append_analysis(
                &schema_heading(&source.relative),
                &analysis,
                &analyzer.options().types,
            )?;
        }
        Some(path)
    };

    Ok(FileSummary {
        relative: source.relative.clone(),
        fields: analysis.keys.len(),
        records: analysis.record_count(),
        blank_rows: analysis.blank_rows,
        output,
    })
}
