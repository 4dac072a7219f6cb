//! Immutable configuration injected into the analyzer.

use xlsx2xml_model::{ExportUsage, TypeRegistry};

/// How cell text is embedded into attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueEscaping {
    /// Escape `&`, `<`, `>`, `"` and `'`.
    #[default]
    Escape,
    /// Embed cell text verbatim, byte-compatible with historical output.
    Raw,
}

/// Options controlling workbook analysis.
#[derive(Debug, Clone, Default)]
pub struct AnalyzerOptions {
    /// Usage-scope values that make a column exportable.
    pub export_usage: ExportUsage,
    /// Output types and validators per declared type tag.
    pub types: TypeRegistry,
    pub escaping: ValueEscaping,
}

impl AnalyzerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_export_usage(mut self, export_usage: ExportUsage) -> Self {
        self.export_usage = export_usage;
        self
    }

    pub fn with_types(mut self, types: TypeRegistry) -> Self {
        self.types = types;
        self
    }

    pub fn with_escaping(mut self, escaping: ValueEscaping) -> Self {
        self.escaping = escaping;
        self
    }
}
