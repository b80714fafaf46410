//! Configuration for the swrlb tool
//!
//! Provides a configuration system supporting:
//! - TOML configuration files
//! - Environment variable overrides
//! - Multiple config file locations
//!
//! # Configuration File Locations
//!
//! Configuration files are searched in order (first found wins):
//! 1. `./swrlb.toml` - Project-local configuration
//! 2. `~/.config/swrlb/config.toml` - User configuration (XDG)
//! 3. `~/.swrlb/config.toml` - User configuration (legacy)
//! 4. `/etc/swrlb/config.toml` - System-wide configuration
//!
//! # Environment Variables
//!
//! - `SWRLB_LOG_LEVEL` - Logging verbosity (quiet, normal, verbose, debug)
//! - `SWRLB_FORMAT` - Relation output format (table, json, csv)
//! - `SWRLB_MODE` - Evaluation mode (filter, bind)
//! - `SWRLB_VARIABLE_NAMESPACE` - Namespace for variable IRIs in XML
//!
//! # Example Configuration
//!
//! ```toml
//! [general]
//! log_level = "normal"
//! format = "table"
//!
//! [evaluation]
//! mode = "filter"
//!
//! [codec]
//! variable_namespace = "urn:swrl#"
//!
//! [prefixes]
//! ex = "http://example.org/"
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::ns;
use crate::error::{ErrorCode, SwrlError};
use crate::evaluator::EvaluationMode;
use crate::term::PrefixMap;

// ============================================================================
// Configuration Schema
// ============================================================================

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SwrlConfig {
    pub general: GeneralConfig,
    pub evaluation: EvaluationConfig,
    pub codec: CodecConfig,
    /// Extra prefixes on top of the standard ones
    pub prefixes: IndexMap<String, String>,
}

/// General configuration options
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: LogLevel,
    /// Output format for relations
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct EvaluationConfig {
    pub mode: EvaluationMode,
}

/// XML codec settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CodecConfig {
    /// Namespace prepended to variable names in `<Variable IRI="...">`
    pub variable_namespace: String,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            variable_namespace: ns::VARIABLE.to_string(),
        }
    }
}

// ============================================================================
// Enums
// ============================================================================

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "csv" => Some(OutputFormat::Csv),
            _ => None,
        }
    }
}

/// Log level options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Verbose => "verbose",
            LogLevel::Debug => "debug",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "quiet" | "q" | "0" => Some(LogLevel::Quiet),
            "normal" | "n" | "1" => Some(LogLevel::Normal),
            "verbose" | "v" | "2" => Some(LogLevel::Verbose),
            "debug" | "d" | "3" => Some(LogLevel::Debug),
            _ => None,
        }
    }

    /// Directive for a tracing filter
    pub fn filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Quiet => "error",
            LogLevel::Normal => "warn",
            LogLevel::Verbose => "info",
            LogLevel::Debug => "debug",
        }
    }
}

// ============================================================================
// Configuration Loading
// ============================================================================

impl SwrlConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from the first file found, then apply
    /// environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = Self::config_paths().into_iter().find(|p| p.exists()) {
            config = Self::load_from_file(&path)?;
        }

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(path.to_path_buf(), e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(path.to_path_buf(), e.to_string()))
    }

    /// Load configuration from a TOML string
    pub fn load_from_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(PathBuf::from("<string>"), e.to_string()))
    }

    /// Config file search paths, in priority order
    pub fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("./swrlb.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("swrlb").join("config.toml"));
        }

        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".swrlb").join("config.toml"));
        }

        #[cfg(unix)]
        paths.push(PathBuf::from("/etc/swrlb/config.toml"));

        paths
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Apply overrides from any key lookup; unparseable values are ignored
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("SWRLB_LOG_LEVEL").and_then(|v| LogLevel::from_str(&v)) {
            self.general.log_level = level;
        }

        if let Some(format) = lookup("SWRLB_FORMAT").and_then(|v| OutputFormat::from_str(&v)) {
            self.general.format = format;
        }

        if let Some(mode) = lookup("SWRLB_MODE").and_then(|v| EvaluationMode::from_str(&v)) {
            self.evaluation.mode = mode;
        }

        if let Some(namespace) = lookup("SWRLB_VARIABLE_NAMESPACE") {
            self.codec.variable_namespace = namespace;
        }
    }

    /// Standard prefixes extended with the configured ones
    pub fn prefix_map(&self) -> PrefixMap {
        let mut map = PrefixMap::default();
        for (prefix, namespace) in &self.prefixes {
            map.insert(prefix.as_str(), namespace.as_str());
        }
        map
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    /// Content of a commented default configuration file
    pub fn default_config_content() -> &'static str {
        r#"# swrlb configuration file

[general]
# Logging level: quiet, normal, verbose, debug
log_level = "normal"
# Relation output format: table, json, csv
format = "table"

[evaluation]
# filter keeps rows that satisfy the atom; bind also fills an empty result cell
mode = "filter"

[codec]
# Namespace for <Variable IRI="..."> elements
variable_namespace = "urn:swrl#"

[prefixes]
# Extra prefixes for notation and display
# ex = "http://example.org/"
"#
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// IO error reading a config file
    IoError(PathBuf, String),
    /// Parse error in a config file
    ParseError(PathBuf, String),
    SerializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(path, msg) => {
                write!(f, "IO error reading {}: {}", path.display(), msg)
            }
            ConfigError::ParseError(path, msg) => {
                write!(f, "Parse error in {}: {}", path.display(), msg)
            }
            ConfigError::SerializeError(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for SwrlError {
    fn from(err: ConfigError) -> Self {
        let code = match &err {
            ConfigError::IoError(..) => ErrorCode::ConfigNotFound,
            ConfigError::ParseError(..) => ErrorCode::InvalidConfigSyntax,
            ConfigError::SerializeError(_) => ErrorCode::ConfigError,
        };
        let error = SwrlError::new(code, err.to_string());
        match err {
            ConfigError::IoError(path, _) | ConfigError::ParseError(path, _) => {
                error.with_context("path", path.display().to_string())
            }
            ConfigError::SerializeError(_) => error,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = SwrlConfig::new();
        assert_eq!(config.general.format, OutputFormat::Table);
        assert_eq!(config.general.log_level, LogLevel::Normal);
        assert_eq!(config.evaluation.mode, EvaluationMode::Filter);
        assert_eq!(config.codec.variable_namespace, "urn:swrl#");
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [general]
            format = "csv"
            log_level = "verbose"

            [evaluation]
            mode = "bind"

            [codec]
            variable_namespace = "http://example.org/rule#"
        "#;

        let config = SwrlConfig::load_from_str(toml).unwrap();
        assert_eq!(config.general.format, OutputFormat::Csv);
        assert_eq!(config.general.log_level, LogLevel::Verbose);
        assert_eq!(config.evaluation.mode, EvaluationMode::Bind);
        assert_eq!(config.codec.variable_namespace, "http://example.org/rule#");
    }

    #[test]
    fn test_bad_config() {
        let err = SwrlConfig::load_from_str("[evaluation]\nmode = \"sideways\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(..)));
        assert_eq!(SwrlError::from(err).code, ErrorCode::InvalidConfigSyntax);
    }

    #[test]
    fn test_missing_file() {
        let err = SwrlConfig::load_from_file(Path::new("/nonexistent/swrlb.toml")).unwrap_err();
        let err = SwrlError::from(err);
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
        assert_eq!(err.context_field("path"), Some("/nonexistent/swrlb.toml"));
    }

    #[test]
    fn test_enum_names() {
        assert_eq!(OutputFormat::from_str("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("xml"), None);
        assert_eq!(LogLevel::from_str("d"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::Quiet.filter_directive(), "error");
        assert_eq!(LogLevel::Verbose.filter_directive(), "info");
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SWRLB_LOG_LEVEL", "debug"),
            ("SWRLB_FORMAT", "json"),
            ("SWRLB_MODE", "nonsense"),
            ("SWRLB_VARIABLE_NAMESPACE", "urn:v#"),
        ]
        .into_iter()
        .collect();

        let mut config = SwrlConfig::new();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.general.log_level, LogLevel::Debug);
        assert_eq!(config.general.format, OutputFormat::Json);
        assert_eq!(config.evaluation.mode, EvaluationMode::Filter);
        assert_eq!(config.codec.variable_namespace, "urn:v#");
    }

    #[test]
    fn test_prefixes() {
        let toml = r#"
            [prefixes]
            ex = "http://example.org/"
        "#;

        let config = SwrlConfig::load_from_str(toml).unwrap();
        let prefixes = config.prefix_map();
        assert_eq!(prefixes.namespace("ex"), Some("http://example.org/"));
        assert_eq!(prefixes.namespace("swrlb"), Some(ns::SWRLB));
    }

    #[test]
    fn test_default_content_parses() {
        let config = SwrlConfig::load_from_str(SwrlConfig::default_config_content()).unwrap();
        assert_eq!(config, SwrlConfig::default());
    }

    #[test]
    fn test_serialize_config() {
        let toml = SwrlConfig::new().to_toml().unwrap();
        assert!(toml.contains("[general]"));
        assert!(toml.contains("[evaluation]"));
        assert!(toml.contains("[codec]"));
        assert_eq!(SwrlConfig::load_from_str(&toml).unwrap(), SwrlConfig::default());
    }

    #[test]
    fn test_config_paths() {
        let paths = SwrlConfig::config_paths();
        assert!(paths[0].ends_with("swrlb.toml"));
    }
}
