//! Replacement rules

use std::fmt;
use std::ops::Range;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result, StampError};
use crate::types::ReplacementResult;

/// Placeholder substituted with the release version in replacement templates
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// How a rule locates the version declaration
#[derive(Debug, Clone)]
pub enum MatchPattern {
    /// Exact, case-sensitive text
    Literal(String),
    /// Regular expression
    Regex(Regex),
}

impl MatchPattern {
    /// Create a literal pattern
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Compile a regular expression pattern
    pub fn regex(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| StampError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::Regex(regex))
    }

    /// The pattern source text
    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal(text) => text,
            Self::Regex(regex) => regex.as_str(),
        }
    }

    /// Byte ranges of every non-overlapping occurrence, left to right
    pub(crate) fn find_spans(&self, content: &str) -> Vec<Range<usize>> {
        match self {
            Self::Literal(text) => content
                .match_indices(text.as_str())
                .map(|(start, m)| start..start + m.len())
                .collect(),
            Self::Regex(regex) => regex.find_iter(content).map(|m| m.range()).collect(),
        }
    }
}

impl fmt::Display for MatchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assertions on the outcome of a rule, checked before anything is written.
///
/// Unset fields are not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedOutcome {
    /// Whether the file is expected to change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changed: Option<bool>,
    /// Expected number of matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_count: Option<usize>,
    /// Expected number of replacements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement_count: Option<usize>,
}

impl ExpectedOutcome {
    /// Compare against a computed result
    pub fn check(&self, result: &ReplacementResult) -> std::result::Result<(), StampError> {
        let mismatch = |field: &str,
                        expected: String,
                        actual: String|
         -> std::result::Result<(), StampError> {
            Err(StampError::UnexpectedOutcome {
                file: result.file.clone(),
                expected: format!("{} = {}", field, expected),
                actual,
            })
        };

        if let Some(changed) = self.changed {
            if changed != result.changed {
                return mismatch("changed", changed.to_string(), result.changed.to_string());
            }
        }
        if let Some(count) = self.match_count {
            if count != result.match_count {
                return mismatch(
                    "match_count",
                    count.to_string(),
                    result.match_count.to_string(),
                );
            }
        }
        if let Some(count) = self.replacement_count {
            if count != result.replacement_count {
                return mismatch(
                    "replacement_count",
                    count.to_string(),
                    result.replacement_count.to_string(),
                );
            }
        }
        Ok(())
    }
}

/// Where a version literal lives and what it becomes on release
#[derive(Debug, Clone)]
pub struct ReplacementRule {
    target_file: PathBuf,
    pattern: MatchPattern,
    replacement_template: String,
    expected_match_count: usize,
    expected_outcome: Option<ExpectedOutcome>,
}

impl ReplacementRule {
    /// Create a rule.
    ///
    /// The template must contain [`VERSION_PLACEHOLDER`] and at least one
    /// match must be expected.
    pub fn new(
        target_file: impl Into<PathBuf>,
        pattern: MatchPattern,
        replacement_template: impl Into<String>,
        expected_match_count: usize,
    ) -> Result<Self> {
        let replacement_template = replacement_template.into();

        if pattern.as_str().is_empty() {
            return Err(StampError::InvalidPattern {
                pattern: String::new(),
                reason: "pattern cannot be empty".to_string(),
            }
            .into());
        }

        if expected_match_count == 0 {
            return Err(ConfigError::InvalidValue {
                field: "expected_matches".to_string(),
                message: "must be at least 1".to_string(),
            }
            .into());
        }

        if !replacement_template.contains(VERSION_PLACEHOLDER) {
            return Err(ConfigError::InvalidValue {
                field: "to".to_string(),
                message: format!("must contain {} placeholder", VERSION_PLACEHOLDER),
            }
            .into());
        }

        Ok(Self {
            target_file: target_file.into(),
            pattern,
            replacement_template,
            expected_match_count,
            expected_outcome: None,
        })
    }

    /// Attach an expected outcome
    pub fn with_expected_outcome(mut self, outcome: ExpectedOutcome) -> Self {
        self.expected_outcome = Some(outcome);
        self
    }

    /// File the rule rewrites
    pub fn target_file(&self) -> &Path {
        &self.target_file
    }

    pub fn pattern(&self) -> &MatchPattern {
        &self.pattern
    }

    pub fn expected_match_count(&self) -> usize {
        self.expected_match_count
    }

    pub fn expected_outcome(&self) -> Option<&ExpectedOutcome> {
        self.expected_outcome.as_ref()
    }

    /// Instantiate the template with a version
    pub fn render(&self, version: &str) -> String {
        self.replacement_template.replace(VERSION_PLACEHOLDER, version)
    }
}
