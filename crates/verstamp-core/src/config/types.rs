//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::stamp::{ExpectedOutcome, MatchPattern, ReplacementRule};

/// Main configuration for Verstamp
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Version of the config schema
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Versioning configuration
    pub versioning: VersioningConfig,

    /// Version replacements, applied in order
    pub replacements: Vec<ReplacementConfig>,
}

impl Config {
    /// Build replacement rules, resolving relative file paths against `base_dir`
    pub fn to_rules(&self, base_dir: &Path) -> Result<Vec<ReplacementRule>> {
        let mut rules = Vec::new();
        for replacement in &self.replacements {
            rules.extend(replacement.to_rules(base_dir)?);
        }
        Ok(rules)
    }
}

/// Versioning configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VersioningConfig {
    /// Reject release versions that are not valid semver
    pub require_semver: bool,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        Self {
            require_semver: true,
        }
    }
}

/// One version replacement across one or more files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplacementConfig {
    /// Files to rewrite
    pub files: Vec<PathBuf>,

    /// Pattern locating the version declaration
    pub from: String,

    /// Replacement template containing `{version}`
    pub to: String,

    /// Occurrences expected in each file
    #[serde(default = "default_expected_matches")]
    pub expected_matches: usize,

    /// Treat `from` as literal text instead of a regex
    #[serde(default)]
    pub literal: bool,

    /// Expected per-file outcomes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<ExpectedResultConfig>,
}

fn default_expected_matches() -> usize {
    1
}

impl ReplacementConfig {
    /// Compile the match pattern
    pub fn pattern(&self) -> Result<MatchPattern> {
        if self.literal {
            Ok(MatchPattern::literal(&self.from))
        } else {
            MatchPattern::regex(&self.from)
        }
    }

    /// One rule per listed file
    pub fn to_rules(&self, base_dir: &Path) -> Result<Vec<ReplacementRule>> {
        let pattern = self.pattern()?;
        self.files
            .iter()
            .map(|file| -> Result<ReplacementRule> {
                let mut rule = ReplacementRule::new(
                    base_dir.join(file),
                    pattern.clone(),
                    self.to.clone(),
                    self.expected_matches,
                )?;
                if let Some(expected) = self.results.iter().find(|r| &r.file == file) {
                    rule = rule.with_expected_outcome(expected.outcome.clone());
                }
                Ok(rule)
            })
            .collect()
    }
}

/// Expected outcome for one file of a replacement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectedResultConfig {
    /// File the expectation applies to, as listed in `files`
    pub file: PathBuf,

    #[serde(flatten)]
    pub outcome: ExpectedOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replacement() -> ReplacementConfig {
        ReplacementConfig {
            files: vec![PathBuf::from("pkg/experiment/types.go")],
            from: r#"VERSION = "[^"]*""#.to_string(),
            to: "VERSION = \"{version}\"".to_string(),
            expected_matches: 1,
            literal: false,
            results: Vec::new(),
        }
    }

    #[test]
    fn test_rules_resolve_against_base_dir() {
        let rules = replacement().to_rules(Path::new("/repo")).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(
            rules[0].target_file(),
            Path::new("/repo/pkg/experiment/types.go")
        );
    }

    #[test]
    fn test_absolute_paths_kept() {
        let mut config = replacement();
        config.files = vec![PathBuf::from("/abs/version.go")];
        let rules = config.to_rules(Path::new("/repo")).unwrap();
        assert_eq!(rules[0].target_file(), Path::new("/abs/version.go"));
    }

    #[test]
    fn test_results_attach_to_matching_file() {
        let mut config = replacement();
        config.files.push(PathBuf::from("README.md"));
        config.results.push(ExpectedResultConfig {
            file: PathBuf::from("README.md"),
            outcome: ExpectedOutcome {
                changed: Some(true),
                ..Default::default()
            },
        });

        let rules = config.to_rules(Path::new("/repo")).unwrap();
        assert!(rules[0].expected_outcome().is_none());
        assert_eq!(
            rules[1].expected_outcome().and_then(|o| o.changed),
            Some(true)
        );
    }

    #[test]
    fn test_literal_pattern() {
        let mut config = replacement();
        config.literal = true;
        config.from = "VERSION = \"1.2.3\"".to_string();
        assert!(matches!(config.pattern().unwrap(), MatchPattern::Literal(_)));
    }

    #[test]
    fn test_expected_matches_defaults_to_one() {
        let config: ReplacementConfig =
            toml::from_str("files = [\"a.go\"]\nfrom = \"x\"\nto = \"{version}\"\n").unwrap();
        assert_eq!(config.expected_matches, 1);
        assert!(!config.literal);
    }
}
