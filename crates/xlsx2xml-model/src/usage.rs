//! Usage-scope allow-list deciding which columns are exported.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Usage-scope values exported by default.
pub const DEFAULT_EXPORT_USAGE: [&str; 2] = ["Both", "Server"];

/// Set of usage-scope cell texts that mark a column as exportable.
///
/// Matching is exact: `"both"` does not match `"Both"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExportUsage {
    values: BTreeSet<String>,
}

impl Default for ExportUsage {
    fn default() -> Self {
        Self::new(DEFAULT_EXPORT_USAGE)
    }
}

impl ExportUsage {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allows(&self, usage: &str) -> bool {
        self.values.contains(usage)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }
}
