//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::stamp::VERSION_PLACEHOLDER;

use super::types::{Config, ReplacementConfig};

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    if !config.replacements.is_empty() {
        debug!(count = config.replacements.len(), "validating replacements");
    }
    for (i, replacement) in config.replacements.iter().enumerate() {
        validate_replacement(i, replacement)?;
    }
    debug!("configuration validation passed");
    Ok(())
}

fn invalid(field: String, message: impl Into<String>) -> crate::error::VerstampError {
    ConfigError::InvalidValue {
        field,
        message: message.into(),
    }
    .into()
}

fn validate_replacement(i: usize, replacement: &ReplacementConfig) -> Result<()> {
    if replacement.files.is_empty() {
        return Err(invalid(
            format!("replacements[{}].files", i),
            "at least one file is required",
        ));
    }

    if replacement.from.is_empty() {
        return Err(invalid(
            format!("replacements[{}].from", i),
            "pattern cannot be empty",
        ));
    }

    if let Err(e) = replacement.pattern() {
        return Err(invalid(format!("replacements[{}].from", i), e.to_string()));
    }

    if !replacement.to.contains(VERSION_PLACEHOLDER) {
        return Err(invalid(
            format!("replacements[{}].to", i),
            format!("must contain {} placeholder", VERSION_PLACEHOLDER),
        ));
    }

    if replacement.expected_matches == 0 {
        return Err(invalid(
            format!("replacements[{}].expected_matches", i),
            "must be at least 1",
        ));
    }

    for (j, result) in replacement.results.iter().enumerate() {
        if !replacement.files.contains(&result.file) {
            return Err(invalid(
                format!("replacements[{}].results[{}].file", i, j),
                format!("{} is not listed in files", result.file.display()),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExpectedResultConfig;
    use crate::stamp::ExpectedOutcome;
    use std::path::PathBuf;

    fn config() -> Config {
        Config {
            replacements: vec![ReplacementConfig {
                files: vec![PathBuf::from("types.go")],
                from: r#"VERSION = "[^"]*""#.to_string(),
                to: "VERSION = \"{version}\"".to_string(),
                expected_matches: 1,
                literal: false,
                results: Vec::new(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
        assert!(validate_config(&config()).is_ok());
    }

    #[test]
    fn test_validate_missing_placeholder() {
        let mut config = config();
        config.replacements[0].to = "VERSION = \"1.0.0\"".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("replacements[0].to"));
    }

    #[test]
    fn test_validate_zero_expected_matches() {
        let mut config = config();
        config.replacements[0].expected_matches = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_bad_regex() {
        let mut config = config();
        config.replacements[0].from = "VERSION = (".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("replacements[0].from"));
    }

    #[test]
    fn test_validate_bad_regex_ok_when_literal() {
        let mut config = config();
        config.replacements[0].from = "VERSION = (".to_string();
        config.replacements[0].literal = true;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_no_files() {
        let mut config = config();
        config.replacements[0].files.clear();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_result_for_unknown_file() {
        let mut config = config();
        config.replacements[0].results.push(ExpectedResultConfig {
            file: PathBuf::from("other.go"),
            outcome: ExpectedOutcome::default(),
        });
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("results[0].file"));
    }
}
