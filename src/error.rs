//! Structured error handling for swrl-builtins
//!
//! Provides a unified error type with:
//! - Error codes for programmatic handling
//! - Structured, JSON-friendly error output
//! - Context preservation through error chains
//!
//! # Error Categories
//!
//! - Codec errors: malformed notation, XML or atom elements
//! - Builtin errors: unknown predicate, arity mismatch, missing argument
//! - Relation errors: duplicate columns, ragged rows
//! - Config errors: configuration file problems
//!
//! Codec, builtin and relation errors are *structural*: they describe a broken
//! rule definition or input and abort the evaluation call. A row that merely
//! fails a predicate is never an error; it is filtered out.
//!
//! # Example
//!
//! ```rust,ignore
//! use swrl_builtins::error::{SwrlError, ErrorCode};
//!
//! fn check(arity: usize) -> Result<(), SwrlError> {
//!     if arity != 3 {
//!         return Err(SwrlError::arity("swrlb:mod", "exactly 3", arity)
//!             .with_context("predicate", "http://www.w3.org/2003/11/swrlb#mod"));
//!     }
//!     Ok(())
//! }
//! ```

use std::collections::HashMap;
use std::fmt;
use serde::{Deserialize, Serialize};

// ============================================================================
// Error Codes
// ============================================================================

/// Unique error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Codec errors (1xxx)
    /// Generic parse error
    ParseError = 1000,
    /// Invalid compact atom notation
    InvalidNotation = 1001,
    /// Invalid XML document
    InvalidXml = 1002,
    /// Atom element is missing required parts
    MalformedAtom = 1003,
    /// Invalid literal value
    InvalidLiteral = 1004,
    /// Prefix not declared
    UndefinedPrefix = 1005,

    // Builtin errors (2xxx)
    /// Predicate identifier not in the registry
    UnknownBuiltin = 2001,
    /// Argument count does not match the predicate's arity
    ArityMismatch = 2002,
    /// Required argument missing at construction time
    MissingArgument = 2003,

    // Relation errors (3xxx)
    /// Column name appears twice
    DuplicateColumn = 3001,
    /// Row has a different number of cells than there are columns
    RowWidthMismatch = 3002,

    // Config errors (7xxx)
    /// Generic config error
    ConfigError = 7000,
    /// Config file not found
    ConfigNotFound = 7001,
    /// Invalid config syntax
    InvalidConfigSyntax = 7002,

    // I/O errors (8xxx)
    /// Generic I/O error
    IoError = 8000,
    /// File access denied
    FileAccessDenied = 8001,
}

/// Broad grouping of error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Codec,
    Builtin,
    Relation,
    Config,
    Io,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a short description of the error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::ParseError => "Parse error",
            ErrorCode::InvalidNotation => "Invalid atom notation",
            ErrorCode::InvalidXml => "Invalid XML",
            ErrorCode::MalformedAtom => "Malformed built-in atom",
            ErrorCode::InvalidLiteral => "Invalid literal value",
            ErrorCode::UndefinedPrefix => "Undefined prefix",

            ErrorCode::UnknownBuiltin => "Unknown built-in predicate",
            ErrorCode::ArityMismatch => "Argument count mismatch",
            ErrorCode::MissingArgument => "Missing required argument",

            ErrorCode::DuplicateColumn => "Duplicate column",
            ErrorCode::RowWidthMismatch => "Row width mismatch",

            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::ConfigNotFound => "Configuration file not found",
            ErrorCode::InvalidConfigSyntax => "Invalid configuration syntax",

            ErrorCode::IoError => "I/O error",
            ErrorCode::FileAccessDenied => "File access denied",
        }
    }

    /// Get the category this code belongs to
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorCode::ParseError
            | ErrorCode::InvalidNotation
            | ErrorCode::InvalidXml
            | ErrorCode::MalformedAtom
            | ErrorCode::InvalidLiteral
            | ErrorCode::UndefinedPrefix => ErrorCategory::Codec,
            ErrorCode::UnknownBuiltin | ErrorCode::ArityMismatch | ErrorCode::MissingArgument => {
                ErrorCategory::Builtin
            }
            ErrorCode::DuplicateColumn | ErrorCode::RowWidthMismatch => ErrorCategory::Relation,
            ErrorCode::ConfigError | ErrorCode::ConfigNotFound | ErrorCode::InvalidConfigSyntax => {
                ErrorCategory::Config
            }
            ErrorCode::IoError | ErrorCode::FileAccessDenied => ErrorCategory::Io,
        }
    }

    /// Whether this code describes a broken rule definition or input
    pub fn is_structural(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Codec | ErrorCategory::Builtin | ErrorCategory::Relation
        )
    }

    /// Process exit status used by the command-line front end
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Codec | ErrorCategory::Builtin | ErrorCategory::Relation => 2,
            ErrorCategory::Config => 3,
            ErrorCategory::Io => 4,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

// ============================================================================
// Error Context
// ============================================================================

/// Additional context information for an error
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Key-value pairs of context information
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub fields: HashMap<String, String>,
    /// Source location (file:line)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Stack of error causes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<String>,
}

impl ErrorContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// Main Error Type
// ============================================================================

/// The main error type for swrl-builtins
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwrlError {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,
    /// Hint for resolving the error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl SwrlError {
    /// Create a new error with a code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            hint: None,
        }
    }

    // ========================================================================
    // Factory methods for common error types
    // ========================================================================

    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ParseError, message)
    }

    /// Create an atom notation error
    pub fn notation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidNotation, message)
    }

    /// Create an XML error
    pub fn xml(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidXml, message)
    }

    /// Create a malformed atom error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MalformedAtom, message)
    }

    /// Create an unknown builtin error
    pub fn unknown_builtin(predicate: &str) -> Self {
        Self::new(
            ErrorCode::UnknownBuiltin,
            format!("No built-in registered for {}", predicate),
        )
        .with_context("predicate", predicate)
    }

    /// Create an arity mismatch error
    pub fn arity(predicate: &str, expected: impl fmt::Display, actual: usize) -> Self {
        Self::new(
            ErrorCode::ArityMismatch,
            format!(
                "{} expects {} arguments, got {}",
                predicate, expected, actual
            ),
        )
        .with_context("predicate", predicate)
    }

    /// Create a missing argument error
    pub fn missing_argument(predicate: &str, position: usize) -> Self {
        Self::new(
            ErrorCode::MissingArgument,
            format!("{} argument {} is missing", predicate, position + 1),
        )
        .with_context("predicate", predicate)
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Set the error code
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = code;
        self
    }

    /// Add context to the error
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::new);
        ctx.fields.insert(key.into(), value.into());
        self
    }

    /// Add a cause to the error chain
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::new);
        ctx.causes.push(cause.into());
        self
    }

    /// Add source location
    pub fn at(mut self, location: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::new);
        ctx.location = Some(location.into());
        self
    }

    /// Add a hint for resolving the error
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Check if this error describes a broken rule definition or input
    pub fn is_structural(&self) -> bool {
        self.code.is_structural()
    }

    /// Look up a context field
    pub fn context_field(&self, key: &str) -> Option<&str> {
        self.context
            .as_ref()
            .and_then(|ctx| ctx.fields.get(key))
            .map(String::as_str)
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"message":{:?}}}"#, self.code.code(), self.message)
        })
    }
}

impl fmt::Display for SwrlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)?;

        if let Some(ref ctx) = self.context {
            if let Some(ref loc) = ctx.location {
                write!(f, " at {}", loc)?;
            }
            if !ctx.causes.is_empty() {
                write!(f, "\nCaused by:")?;
                for cause in &ctx.causes {
                    write!(f, "\n  - {}", cause)?;
                }
            }
        }

        if let Some(ref hint) = self.hint {
            write!(f, "\nHint: {}", hint)?;
        }

        Ok(())
    }
}

impl std::error::Error for SwrlError {}

// ============================================================================
// Conversions from other error types
// ============================================================================

impl From<std::io::Error> for SwrlError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;
        let code = match err.kind() {
            ErrorKind::NotFound => ErrorCode::ConfigNotFound,
            ErrorKind::PermissionDenied => ErrorCode::FileAccessDenied,
            _ => ErrorCode::IoError,
        };
        SwrlError::new(code, err.to_string())
    }
}

impl From<serde_json::Error> for SwrlError {
    fn from(err: serde_json::Error) -> Self {
        SwrlError::parse(err.to_string()).with_context("format", "JSON")
    }
}

impl From<quick_xml::Error> for SwrlError {
    fn from(err: quick_xml::Error) -> Self {
        SwrlError::xml(err.to_string())
    }
}

impl From<toml::de::Error> for SwrlError {
    fn from(err: toml::de::Error) -> Self {
        SwrlError::config(err.to_string()).with_code(ErrorCode::InvalidConfigSyntax)
    }
}

// ============================================================================
// Result type alias
// ============================================================================

/// A Result type using SwrlError
pub type SwrlResult<T> = Result<T, SwrlError>;

// ============================================================================
// Macros for convenient error creation
// ============================================================================

/// Create a SwrlError with context from the current location
#[macro_export]
macro_rules! swrl_error {
    ($code:expr, $msg:expr) => {
        $crate::error::SwrlError::new($code, $msg)
            .at(format!("{}:{}", file!(), line!()))
    };
    ($code:expr, $fmt:expr, $($arg:tt)*) => {
        $crate::error::SwrlError::new($code, format!($fmt, $($arg)*))
            .at(format!("{}:{}", file!(), line!()))
    };
}

/// Bail out early with an error
#[macro_export]
macro_rules! swrl_bail {
    ($code:expr, $msg:expr) => {
        return Err($crate::swrl_error!($code, $msg))
    };
    ($code:expr, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::swrl_error!($code, $fmt, $($arg)*))
    };
}

/// Ensure a condition holds, or return an error
#[macro_export]
macro_rules! swrl_ensure {
    ($cond:expr, $code:expr, $msg:expr) => {
        if !$cond {
            $crate::swrl_bail!($code, $msg);
        }
    };
    ($cond:expr, $code:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            $crate::swrl_bail!($code, $fmt, $($arg)*);
        }
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = SwrlError::malformed("missing IRI");
        assert_eq!(err.code, ErrorCode::MalformedAtom);
        assert_eq!(err.message, "missing IRI");
    }

    #[test]
    fn test_error_with_context() {
        let err = SwrlError::parse("syntax error")
            .with_context("line", "42")
            .with_context("column", "10");

        assert_eq!(err.context_field("line"), Some("42"));
        assert_eq!(err.context_field("column"), Some("10"));
        assert_eq!(err.context_field("row"), None);
    }

    #[test]
    fn test_error_with_cause() {
        let err = SwrlError::xml("bad document")
            .with_cause("unexpected end tag")
            .with_cause("unclosed element");

        let ctx = err.context.as_ref().unwrap();
        assert_eq!(ctx.causes.len(), 2);
    }

    #[test]
    fn test_unknown_builtin_carries_predicate() {
        let err = SwrlError::unknown_builtin("http://example.org/fn#nope");
        assert_eq!(err.code, ErrorCode::UnknownBuiltin);
        assert_eq!(err.context_field("predicate"), Some("http://example.org/fn#nope"));
        assert!(err.is_structural());
    }

    #[test]
    fn test_arity_message() {
        let err = SwrlError::arity("swrlb:mod", "exactly 3", 2);
        assert_eq!(err.code, ErrorCode::ArityMismatch);
        assert!(err.message.contains("exactly 3"));
        assert!(err.message.contains("got 2"));
    }

    #[test]
    fn test_missing_argument_is_one_based() {
        let err = SwrlError::missing_argument("swrlb:mod", 0);
        assert!(err.message.contains("argument 1"));
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(ErrorCode::InvalidXml.category(), ErrorCategory::Codec);
        assert_eq!(ErrorCode::ArityMismatch.category(), ErrorCategory::Builtin);
        assert_eq!(ErrorCode::DuplicateColumn.category(), ErrorCategory::Relation);
        assert_eq!(ErrorCode::ConfigNotFound.category(), ErrorCategory::Config);
        assert_eq!(ErrorCode::InvalidLiteral.category(), ErrorCategory::Codec);
        assert_eq!(ErrorCode::FileAccessDenied.category(), ErrorCategory::Io);
        assert!(!ErrorCode::InvalidConfigSyntax.is_structural());
        assert_eq!(ErrorCode::UnknownBuiltin.exit_code(), 2);
        assert_eq!(ErrorCode::ConfigNotFound.exit_code(), 3);
        assert_eq!(ErrorCode::IoError.exit_code(), 4);
    }

    #[test]
    fn test_error_to_json() {
        let err = SwrlError::unknown_builtin("swrlb:frobnicate");
        let json = err.to_json();
        assert!(json.contains("UNKNOWN_BUILTIN"));
        assert!(json.contains("swrlb:frobnicate"));
    }

    #[test]
    fn test_error_display() {
        let err = SwrlError::parse("syntax error")
            .at("atom.txt:3")
            .with_cause("unexpected token")
            .with_hint("Check your syntax");

        let display = err.to_string();
        assert!(display.contains("[1000]"));
        assert!(display.contains("syntax error"));
        assert!(display.contains("atom.txt:3"));
        assert!(display.contains("unexpected token"));
        assert!(display.contains("Check your syntax"));
    }

    #[test]
    fn test_bail_macro_records_location() {
        fn fails() -> SwrlResult<()> {
            swrl_bail!(ErrorCode::RowWidthMismatch, "row {} has {} cells", 2, 5);
        }
        let err = fails().unwrap_err();
        assert_eq!(err.code, ErrorCode::RowWidthMismatch);
        assert_eq!(err.message, "row 2 has 5 cells");
        assert!(err.context.unwrap().location.unwrap().contains("error.rs"));
    }
}
