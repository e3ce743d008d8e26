//! Core types for Verstamp

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Outcome of applying one replacement rule to one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementResult {
    /// The file that was (or would be) rewritten
    pub file: PathBuf,
    /// Whether the file content changed
    pub changed: bool,
    /// Number of pattern occurrences found
    pub match_count: usize,
    /// Number of occurrences whose text was replaced with different text
    pub replacement_count: usize,
}

impl ReplacementResult {
    /// Create a result from match and replacement counts.
    ///
    /// `changed` is derived from `replacement_count`, and the replacement
    /// count is capped at the match count.
    pub fn new(file: impl Into<PathBuf>, match_count: usize, replacement_count: usize) -> Self {
        let replacement_count = replacement_count.min(match_count);
        Self {
            file: file.into(),
            changed: replacement_count > 0,
            match_count,
            replacement_count,
        }
    }
}

/// All results of one stamping invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StampReport {
    /// The version that was stamped
    pub version: String,
    /// Whether files were left untouched on purpose
    pub dry_run: bool,
    /// One result per rule, in rule order
    pub results: Vec<ReplacementResult>,
}

impl StampReport {
    /// Create an empty report
    pub fn new(version: impl Into<String>, dry_run: bool) -> Self {
        Self {
            version: version.into(),
            dry_run,
            results: Vec::new(),
        }
    }

    /// Files that had at least one replacement, deduplicated, in first-seen order
    pub fn changed_files(&self) -> Vec<&Path> {
        let mut files: Vec<&Path> = Vec::new();
        for result in self.results.iter().filter(|r| r.changed) {
            if !files.contains(&result.file.as_path()) {
                files.push(&result.file);
            }
        }
        files
    }

    /// Total replacements across all rules
    pub fn total_replacements(&self) -> usize {
        self.results.iter().map(|r| r.replacement_count).sum()
    }

    /// Whether any file changed
    pub fn any_changed(&self) -> bool {
        self.results.iter().any(|r| r.changed)
    }
}
