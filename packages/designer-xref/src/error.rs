//! Error types for designer-xref

use std::fmt;
use thiserror::Error;

use crate::config::ConfigError;

/// Cross-reference error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Persisted stream is not a well-formed reference document
    MalformedData,
    /// Category name never declared by the registry
    UnknownCategory,
    /// A reference finder failed or misbehaved
    Provider,
    /// Operation not allowed in the current storage state
    InvalidState,
    /// Stream acquisition / transfer errors
    Io,
    /// Encoder failures while saving
    Serialization,
    /// Configuration errors
    Config,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MalformedData => "malformed_data",
            ErrorKind::UnknownCategory => "unknown_category",
            ErrorKind::Provider => "provider",
            ErrorKind::InvalidState => "invalid_state",
            ErrorKind::Io => "io",
            ErrorKind::Serialization => "serialization",
            ErrorKind::Config => "config",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Cross-reference error type
#[derive(Debug, Error)]
#[error("[{kind}] {message}")]
pub struct XrefError {
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    pub kind: ErrorKind,
    pub message: String,
}

impl XrefError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedData, message)
    }

    pub fn unknown_category(category: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::UnknownCategory,
            format!("Unknown category: {}", category.into()),
        )
    }

    pub fn provider(provider: &str, message: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::Provider,
            format!("Provider '{}' failed: {}", provider, message.into()),
        )
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidState, message)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialization, message)
    }

    pub fn is_malformed(&self) -> bool {
        self.kind == ErrorKind::MalformedData
    }
}

impl From<std::io::Error> for XrefError {
    fn from(err: std::io::Error) -> Self {
        XrefError::new(ErrorKind::Io, format!("I/O error: {}", err)).with_source(err)
    }
}

// Decode paths are the only place a bare serde_json error escapes; encode
// paths map explicitly to `Serialization`.
impl From<serde_json::Error> for XrefError {
    fn from(err: serde_json::Error) -> Self {
        XrefError::malformed(format!("JSON error: {}", err)).with_source(err)
    }
}

impl From<ConfigError> for XrefError {
    fn from(err: ConfigError) -> Self {
        XrefError::new(ErrorKind::Config, err.to_string()).with_source(err)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, XrefError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    // ═══════════════════════════════════════════════════════════════════════
    // Error Construction Tests
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_error_display() {
        let err = XrefError::unknown_category("Alarms");
        let msg = format!("{}", err);
        assert!(msg.contains("unknown_category"));
        assert!(msg.contains("Alarms"));
    }

    #[test]
    fn test_malformed_error() {
        let err = XrefError::malformed("missing 'categories'");
        assert_eq!(err.kind, ErrorKind::MalformedData);
        assert!(err.is_malformed());
        assert!(err.source.is_none());
        assert_eq!(format!("{}", err), "[malformed_data] missing 'categories'");
    }

    #[test]
    fn test_provider_error() {
        let err = XrefError::provider("FontProvider", "resolver offline");
        assert_eq!(err.kind, ErrorKind::Provider);
        assert_eq!(
            format!("{}", err),
            "[provider] Provider 'FontProvider' failed: resolver offline"
        );
    }

    #[test]
    fn test_with_source() {
        use std::io;

        let io_err = io::Error::new(io::ErrorKind::NotFound, "xref file not found");
        let err: XrefError = io_err.into();

        assert_eq!(err.kind, ErrorKind::Io);
        let source = err.source().unwrap();
        assert!(source.to_string().contains("xref file not found"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ nope")
            .err()
            .unwrap();
        let err: XrefError = json_err.into();

        assert_eq!(err.kind, ErrorKind::MalformedData);
        assert!(err.message.contains("JSON error"));
        assert!(err.source.is_some());
    }

    #[test]
    fn test_from_config_error() {
        let err: XrefError = ConfigError::MissingVersion.into();
        assert_eq!(err.kind, ErrorKind::Config);
        assert!(err.message.contains("version"));
    }

    #[test]
    fn test_error_kind_as_str() {
        assert_eq!(ErrorKind::MalformedData.as_str(), "malformed_data");
        assert_eq!(ErrorKind::UnknownCategory.as_str(), "unknown_category");
        assert_eq!(ErrorKind::Provider.as_str(), "provider");
        assert_eq!(ErrorKind::InvalidState.as_str(), "invalid_state");
        assert_eq!(ErrorKind::Io.as_str(), "io");
        assert_eq!(ErrorKind::Serialization.as_str(), "serialization");
        assert_eq!(ErrorKind::Config.as_str(), "config");
    }

    #[test]
    fn test_result_propagation() {
        fn inner() -> Result<()> {
            Err(XrefError::unknown_category("Nope"))
        }

        fn outer() -> Result<()> {
            inner()?;
            Ok(())
        }

        let err = outer().unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownCategory);
    }
}
