//! Version stamper

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Result, StampError};
use crate::types::ReplacementResult;

use super::rule::ReplacementRule;

/// Rewrites version declarations in files according to replacement rules
#[derive(Debug, Clone, Default)]
pub struct VersionStamper {
    dry_run: bool,
    require_semver: bool,
}

impl VersionStamper {
    /// Create a stamper that writes files and accepts any non-empty version
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute results without writing files
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Reject versions that are not valid semver
    pub fn with_semver_required(mut self, required: bool) -> Self {
        self.require_semver = required;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Check that a version can be stamped
    pub fn check_version(&self, version: &str) -> Result<()> {
        if version.trim().is_empty() {
            return Err(StampError::InvalidVersion {
                version: version.to_string(),
                reason: "version cannot be empty".to_string(),
            }
            .into());
        }

        if self.require_semver {
            semver::Version::parse(version).map_err(|e| StampError::InvalidVersion {
                version: version.to_string(),
                reason: e.to_string(),
            })?;
        }

        Ok(())
    }

    /// Apply a rule to in-memory content.
    ///
    /// Fails with `PatternMismatch` unless the pattern occurs exactly
    /// `expected_match_count` times. Text outside the matched spans is kept
    /// byte for byte, and the rendered template is inserted literally.
    pub fn transform(
        &self,
        rule: &ReplacementRule,
        content: &str,
        version: &str,
    ) -> Result<(String, ReplacementResult)> {
        self.check_version(version)?;

        let spans = rule.pattern().find_spans(content);
        debug!(
            file = %rule.target_file().display(),
            pattern = %rule.pattern(),
            matches = spans.len(),
            expected = rule.expected_match_count(),
            "pattern scanned"
        );

        if spans.len() != rule.expected_match_count() {
            return Err(StampError::PatternMismatch {
                file: rule.target_file().to_path_buf(),
                pattern: rule.pattern().to_string(),
                expected: rule.expected_match_count(),
                found: spans.len(),
            }
            .into());
        }

        let replacement = rule.render(version);
        let mut output = String::with_capacity(content.len() + replacement.len());
        let mut last = 0;
        let mut replaced = 0;

        for span in spans.iter() {
            output.push_str(&content[last..span.start]);
            if content[span.clone()] != replacement {
                replaced += 1;
            }
            output.push_str(&replacement);
            last = span.end;
        }
        output.push_str(&content[last..]);

        let result = ReplacementResult::new(rule.target_file(), spans.len(), replaced);

        if let Some(expected) = rule.expected_outcome() {
            expected.check(&result)?;
        }

        Ok((output, result))
    }

    /// Check that a rule still fits its target file, without a version.
    ///
    /// Returns the match count, or `PatternMismatch` when the file's
    /// declaration has drifted from what the rule expects.
    pub fn check_target(&self, rule: &ReplacementRule) -> Result<usize> {
        let content = read_target(rule.target_file())?;
        let found = rule.pattern().find_spans(&content).len();
        if found != rule.expected_match_count() {
            return Err(StampError::PatternMismatch {
                file: rule.target_file().to_path_buf(),
                pattern: rule.pattern().to_string(),
                expected: rule.expected_match_count(),
                found,
            }
            .into());
        }
        Ok(found)
    }

    /// Stamp a version into the rule's target file.
    ///
    /// The file is only rewritten when the content changes and the stamper
    /// is not in dry-run mode. On any error the file is left untouched.
    pub fn stamp(&self, rule: &ReplacementRule, version: &str) -> Result<ReplacementResult> {
        let path = rule.target_file();
        info!(file = %path.display(), version, dry_run = self.dry_run, "stamping version");

        let content = read_target(path)?;
        let (stamped, result) = self.transform(rule, &content, version)?;

        if result.changed && !self.dry_run {
            let real_path = resolve_target(path)?;
            let staged = stage_write(&real_path, &stamped)?;
            commit_write(staged, &real_path)?;
        }

        info!(
            file = %path.display(),
            changed = result.changed,
            matches = result.match_count,
            replacements = result.replacement_count,
            "stamp complete"
        );
        Ok(result)
    }
}

/// Read a target file, distinguishing a missing file from an unreadable one
pub(crate) fn read_target(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            StampError::FileNotFound(path.to_path_buf()).into()
        } else {
            StampError::ReadFailure {
                file: path.to_path_buf(),
                source: e,
            }
            .into()
        }
    })
}

/// Canonical location of a target, following symlinks so that writes land on
/// the linked file rather than replacing the link
pub(crate) fn resolve_target(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            StampError::FileNotFound(path.to_path_buf()).into()
        } else {
            StampError::ReadFailure {
                file: path.to_path_buf(),
                source: e,
            }
            .into()
        }
    })
}

/// Write new content to a temporary file beside the target, carrying over
/// the target's permissions. Nothing is visible at `path` until
/// [`commit_write`] runs.
pub(crate) fn stage_write(path: &Path, content: &str) -> Result<NamedTempFile> {
    let failure = |reason: String| StampError::WriteFailure {
        file: path.to_path_buf(),
        reason,
    };

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let permissions = fs::metadata(path)
        .map_err(|e| failure(e.to_string()))?
        .permissions();

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| failure(e.to_string()))?;
    temp.write_all(content.as_bytes())
        .map_err(|e| failure(e.to_string()))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| failure(e.to_string()))?;
    temp.as_file()
        .set_permissions(permissions)
        .map_err(|e| failure(e.to_string()))?;

    Ok(temp)
}

/// Atomically move staged content over the target
pub(crate) fn commit_write(staged: NamedTempFile, path: &Path) -> Result<()> {
    staged
        .persist(path)
        .map_err(|e| StampError::WriteFailure {
            file: path.to_path_buf(),
            reason: e.error.to_string(),
        })?;
    debug!(file = %path.display(), "file written");
    Ok(())
}
