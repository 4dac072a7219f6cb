//! Batch configuration loaded from a TOML file.
//!
//! ```toml
//! [path]
//! in = "xlsx"
//! out = "xml"
//!
//! [format_file]
//! enable = true
//! out_file = "fmt/format.txt"
//!
//! [analyzer]
//! export_usage = ["Both", "Server"]
//! escape_values = true
//!
//! [analyzer.types.int]
//! output = "int64"
//! validator = "integer"
//! ```
//!
//! Every section is optional. Path separators are normalized to `/`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use xlsx2xml_core::{AnalyzerOptions, ValueEscaping};
use xlsx2xml_ingest::normalize_separators;
use xlsx2xml_model::{ExportUsage, TypeRegistry};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "xlsx2xml.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {message}")]
    Invalid { message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub path: PathConfig,
    pub format_file: FormatFileConfig,
    pub analyzer: AnalyzerConfig,
}

/// `[path]`: input and output roots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    #[serde(rename = "in")]
    pub input: String,
    #[serde(rename = "out")]
    pub output: String,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            input: "xlsx".to_string(),
            output: "xml".to_string(),
        }
    }
}

/// `[format_file]`: the aggregated schema file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatFileConfig {
    pub enable: bool,
    #[serde(alias = "outFile")]
    pub out_file: String,
}

impl Default for FormatFileConfig {
    fn default() -> Self {
        Self {
            enable: false,
            out_file: "format.txt".to_string(),
        }
    }
}

/// `[analyzer]`: export allow-list, escaping and type overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub export_usage: ExportUsage,
    pub escape_values: bool,
    /// Merged over the built-in registry.
    pub types: TypeRegistry,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            export_usage: ExportUsage::default(),
            escape_values: true,
            types: TypeRegistry::empty(),
        }
    }
}

impl Config {
    /// Parse configuration text. Paths are normalized, values validated.
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Load a config file that must exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config = Self::from_toml_str(&content, path)?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `explicit` if given, otherwise [`DEFAULT_CONFIG_FILE`] when present.
    ///
    /// Only a missing default file falls back to built-in defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::load(Path::new(DEFAULT_CONFIG_FILE)) {
            Err(ConfigError::NotFound { .. }) => {
                info!("no {DEFAULT_CONFIG_FILE} found, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn input_root(&self) -> PathBuf {
        PathBuf::from(&self.path.input)
    }

    pub fn output_root(&self) -> PathBuf {
        PathBuf::from(&self.path.output)
    }

    /// Schema file path when the schema file is enabled.
    pub fn schema_file(&self) -> Option<PathBuf> {
        self.format_file
            .enable
            .then(|| PathBuf::from(&self.format_file.out_file))
    }

    /// Effective type registry: built-in rules with configured overrides.
    pub fn type_registry(&self) -> TypeRegistry {
        TypeRegistry::default().merged(self.analyzer.types.clone())
    }

    pub fn analyzer_options(&self) -> AnalyzerOptions {
        let escaping = if self.analyzer.escape_values {
            ValueEscaping::Escape
        } else {
            ValueEscaping::Raw
        };
        AnalyzerOptions::new()
            .with_export_usage(self.analyzer.export_usage.clone())
            .with_types(self.type_registry())
            .with_escaping(escaping)
    }

    fn normalize(&mut self) {
        self.path.input = normalize_separators(&self.path.input);
        self.path.output = normalize_separators(&self.path.output);
        self.format_file.out_file = normalize_separators(&self.format_file.out_file);
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.path.input.trim().is_empty() {
            return Err(ConfigError::Invalid {
                message: "path.in must not be empty".to_string(),
            });
        }
        if self.path.output.trim().is_empty() {
            return Err(ConfigError::Invalid {
                message: "path.out must not be empty".to_string(),
            });
        }
        if self.format_file.enable && self.format_file.out_file.trim().is_empty() {
            return Err(ConfigError::Invalid {
                message: "format_file.out_file must be set when format_file.enable is true"
                    .to_string(),
            });
        }
        if self.analyzer.export_usage.iter().next().is_none() {
            return Err(ConfigError::Invalid {
                message: "analyzer.export_usage must list at least one value".to_string(),
            });
        }
        Ok(())
    }
}
