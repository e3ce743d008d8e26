//! Error types for Verstamp

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using VerstampError
pub type Result<T> = std::result::Result<T, VerstampError>;

/// Main error type for Verstamp operations
#[derive(Debug, Error)]
pub enum VerstampError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Stamping-related errors
    #[error(transparent)]
    Stamp(#[from] StampError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// No replacements configured
    #[error("No replacements configured")]
    NoReplacements,

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while stamping a version into a file
#[derive(Debug, Error)]
pub enum StampError {
    /// Target file does not exist
    #[error("Target file not found: {0}")]
    FileNotFound(PathBuf),

    /// Target file exists but could not be read as text
    #[error("Failed to read {file}: {source}")]
    ReadFailure {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Occurrence count differs from the rule's expectation
    #[error("Pattern '{pattern}' matched {found} time(s) in {file}, expected {expected}")]
    PatternMismatch {
        file: PathBuf,
        pattern: String,
        expected: usize,
        found: usize,
    },

    /// Rewritten content could not be persisted
    #[error("Failed to write {file}: {reason}")]
    WriteFailure { file: PathBuf, reason: String },

    /// Match pattern is not a valid regular expression
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Release version is unusable
    #[error("Invalid version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },

    /// Computed result contradicts the configured expected outcome
    #[error("Unexpected result for {file}: expected {expected}, got {actual}")]
    UnexpectedOutcome {
        file: PathBuf,
        expected: String,
        actual: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_mismatch_message() {
        let err = StampError::PatternMismatch {
            file: PathBuf::from("pkg/types.go"),
            pattern: "VERSION = \".*\"".to_string(),
            expected: 1,
            found: 0,
        };
        assert_eq!(
            err.to_string(),
            "Pattern 'VERSION = \".*\"' matched 0 time(s) in pkg/types.go, expected 1"
        );
    }

    #[test]
    fn test_stamp_error_is_transparent() {
        let err: VerstampError = StampError::FileNotFound(PathBuf::from("missing.go")).into();
        assert_eq!(err.to_string(), "Target file not found: missing.go");
    }
}
