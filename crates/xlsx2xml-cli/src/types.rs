use std::path::PathBuf;
use std::time::Duration;

/// Outcome of one batch run.
#[derive(Debug)]
pub struct BatchResult {
    pub input_root: PathBuf,
    pub output_root: PathBuf,
    pub schema_file: Option<PathBuf>,
    pub files: Vec<FileSummary>,
    /// Files skipped in keep-going mode.
    pub failures: Vec<FileFailure>,
    pub elapsed: Duration,
    pub dry_run: bool,
}

impl BatchResult {
    /// Number of workbooks analyzed successfully.
    pub fn converted(&self) -> usize {
        self.files.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn total_records(&self) -> usize {
        self.files.iter().map(|file| file.records).sum()
    }
}

#[derive(Debug, Clone)]
pub struct FileSummary {
    /// Source path relative to the input root.
    pub relative: String,
    pub fields: usize,
    pub records: usize,
    pub blank_rows: usize,
    /// Written document; `None` for dry runs and sheets without exported columns.
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct FileFailure {
    pub relative: String,
    pub message: String,
}
