//! Data records and their `<data .../>` fragments.

use std::borrow::Cow;

use quick_xml::escape::escape;

use crate::options::ValueEscaping;

/// Name of the element written for every data row.
pub const DATA_ELEMENT: &str = "data";

/// Exported `(field name, cell text)` pairs of one data row, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataRecord<'a> {
    values: Vec<(&'a str, &'a str)>,
}

impl<'a> DataRecord<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'a str, value: &'a str) {
        self.values.push((field, value));
    }

    /// A record is blank when every value is empty; blank rows are separators.
    pub fn is_blank(&self) -> bool {
        self.values.iter().all(|(_, value)| value.is_empty())
    }

    /// Serializes the record as `\t<data a="1" b="2" />\n`.
    pub fn to_fragment(&self, escaping: ValueEscaping) -> String {
        let mut fragment = String::with_capacity(16 + self.values.len() * 16);
        fragment.push('\t');
        fragment.push('<');
        fragment.push_str(DATA_ELEMENT);
        for (field, value) in &self.values {
            let value = match escaping {
                ValueEscaping::Escape => escape(*value),
                ValueEscaping::Raw => Cow::Borrowed(*value),
            };
            fragment.push(' ');
            fragment.push_str(field);
            fragment.push_str("=\"");
            fragment.push_str(&value);
            fragment.push('"');
        }
        fragment.push_str(" />\n");
        fragment
    }
}
