//! Default configuration values

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "verstamp.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "verstamp.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".verstamp.toml",
        ".verstamp.yaml",
    ]
}

/// Pattern matching a quoted `VERSION` constant without re-matching past the closing quote
pub const DEFAULT_VERSION_PATTERN: &str = r#"VERSION = "[^"]*""#;

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Verstamp Configuration
# Rewrites version declarations when a release is cut.

versioning:
  require_semver: true

replacements:
  - files:
      - version.go
    from: 'VERSION = "[^"]*"'
    to: 'VERSION = "{version}"'
    expected_matches: 1
    literal: false
    results:
      - file: version.go
        changed: true
        match_count: 1
        replacement_count: 1
"#;
