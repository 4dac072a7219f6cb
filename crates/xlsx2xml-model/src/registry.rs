//! Declared column types: output type names and cell validators.
//!
//! Type tags that are not registered pass through unchanged and are never
//! validated. This looseness is intentional: sheets commonly declare
//! free-form tags such as `string` or `[]int` that downstream consumers
//! understand without help from the converter.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Predicate applied to the raw text of a data cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Validator {
    /// Base-10 signed 64-bit integer.
    Integer,
    /// Decimal floating point number.
    Float,
    /// `1`, `t`, `true`, `0`, `f`, `false` in the usual spellings.
    Bool,
}

impl Validator {
    pub fn accepts(self, text: &str) -> bool {
        match self {
            Self::Integer => text.parse::<i64>().is_ok(),
            Self::Float => text.parse::<f64>().is_ok(),
            Self::Bool => matches!(
                text,
                "1" | "t" | "T" | "true" | "TRUE" | "True" | "0" | "f" | "F" | "false"
                    | "FALSE" | "False"
            ),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Bool => "bool",
        }
    }
}

/// How one declared type tag is exported and checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRule {
    /// Type name written to the schema file; the declared tag when absent.
    #[serde(default)]
    pub output: Option<String>,
    /// Validator applied to every data cell of the column.
    #[serde(default)]
    pub validator: Option<Validator>,
}

impl TypeRule {
    pub fn new(output: impl Into<String>, validator: Option<Validator>) -> Self {
        Self {
            output: Some(output.into()),
            validator,
        }
    }
}

/// Mapping from declared type tag to its [`TypeRule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeRegistry {
    rules: BTreeMap<String, TypeRule>,
}

impl Default for TypeRegistry {
    /// The built-in registry: `int` exports as `int64` and must parse as an integer.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.insert("int", TypeRule::new("int64", Some(Validator::Integer)));
        registry
    }
}

impl TypeRegistry {
    /// A registry without any rules; every tag passes through.
    pub fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, tag: impl Into<String>, rule: TypeRule) {
        self.rules.insert(tag.into(), rule);
    }

    /// Adds or replaces rules from `other`.
    #[must_use]
    pub fn merged(mut self, other: TypeRegistry) -> Self {
        self.rules.extend(other.rules);
        self
    }

    /// Output type for a declared tag. Unknown tags are returned as-is.
    pub fn output_type<'a>(&'a self, tag: &'a str) -> &'a str {
        self.rules
            .get(tag)
            .and_then(|rule| rule.output.as_deref())
            .unwrap_or(tag)
    }

    /// Validator for a declared tag. `None` means the cell is not checked.
    pub fn validator(&self, tag: &str) -> Option<Validator> {
        self.rules.get(tag).and_then(|rule| rule.validator)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeRule)> {
        self.rules.iter().map(|(tag, rule)| (tag.as_str(), rule))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
