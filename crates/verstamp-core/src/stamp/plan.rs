//! Multi-rule stamping

use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::{ConfigError, Result};
use crate::types::StampReport;

use super::rule::ReplacementRule;
use super::stamper::{commit_write, read_target, resolve_target, stage_write, VersionStamper};

struct StagedFile {
    path: PathBuf,
    content: String,
    dirty: bool,
}

/// Apply every rule, writing nothing unless all of them succeed.
///
/// Rules are evaluated in order against in-memory copies of their target
/// files, so several rules may target the same file however its path is
/// spelled. Rewritten files are staged next to their targets before any of
/// them replaces the original.
pub fn stamp_all(
    stamper: &VersionStamper,
    rules: &[ReplacementRule],
    version: &str,
) -> Result<StampReport> {
    if rules.is_empty() {
        return Err(ConfigError::NoReplacements.into());
    }
    stamper.check_version(version)?;
    info!(rules = rules.len(), version, dry_run = stamper.is_dry_run(), "stamping release version");

    let mut files: Vec<StagedFile> = Vec::new();
    let mut report = StampReport::new(version, stamper.is_dry_run());

    for rule in rules {
        let real_path = resolve_target(rule.target_file())?;
        let index = match files.iter().position(|f| f.path == real_path) {
            Some(index) => index,
            None => {
                let content = read_target(&real_path)?;
                files.push(StagedFile {
                    path: real_path,
                    content,
                    dirty: false,
                });
                files.len() - 1
            }
        };

        let file = &mut files[index];
        let (content, result) = stamper.transform(rule, &file.content, version)?;
        if result.changed {
            file.content = content;
            file.dirty = true;
        }
        report.results.push(result);
    }

    if stamper.is_dry_run() {
        info!(changed = report.changed_files().len(), "dry run, no files written");
        return Ok(report);
    }

    let mut staged = Vec::new();
    for file in files.iter().filter(|f| f.dirty) {
        staged.push((stage_write(&file.path, &file.content)?, &file.path));
    }
    debug!(files = staged.len(), "all rewrites staged");

    for (temp, path) in staged {
        commit_write(temp, path)?;
    }

    info!(
        changed = report.changed_files().len(),
        replacements = report.total_replacements(),
        "release version stamped"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StampError, VerstampError};
    use crate::stamp::rule::MatchPattern;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn rule(path: &Path, pattern: &str, template: &str) -> ReplacementRule {
        ReplacementRule::new(path, MatchPattern::regex(pattern).unwrap(), template, 1).unwrap()
    }

    #[test]
    fn test_stamps_every_file() {
        let temp = TempDir::new().unwrap();
        let go = temp.path().join("types.go");
        let readme = temp.path().join("README.md");
        fs::write(&go, "const VERSION = \"1.2.3\"\n").unwrap();
        fs::write(&readme, "Current release: 1.2.3\n").unwrap();

        let rules = vec![
            rule(&go, r#"VERSION = "[^"]*""#, "VERSION = \"{version}\""),
            rule(&readme, r"release: \S+", "release: {version}"),
        ];

        let report = stamp_all(&VersionStamper::new(), &rules, "1.3.0").unwrap();

        assert_eq!(report.results.len(), 2);
        assert_eq!(report.changed_files(), vec![go.as_path(), readme.as_path()]);
        assert_eq!(fs::read_to_string(&go).unwrap(), "const VERSION = \"1.3.0\"\n");
        assert_eq!(fs::read_to_string(&readme).unwrap(), "Current release: 1.3.0\n");
    }

    #[test]
    fn test_failure_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let go = temp.path().join("types.go");
        let other = temp.path().join("other.go");
        fs::write(&go, "const VERSION = \"1.2.3\"\n").unwrap();
        fs::write(&other, "const Name = \"x\"\n").unwrap();

        let rules = vec![
            rule(&go, r#"VERSION = "[^"]*""#, "VERSION = \"{version}\""),
            rule(&other, r#"VERSION = "[^"]*""#, "VERSION = \"{version}\""),
        ];

        let err = stamp_all(&VersionStamper::new(), &rules, "1.3.0").unwrap_err();

        assert!(matches!(
            err,
            VerstampError::Stamp(StampError::PatternMismatch { .. })
        ));
        assert_eq!(fs::read_to_string(&go).unwrap(), "const VERSION = \"1.2.3\"\n");
    }

    #[test]
    fn test_rules_on_same_file_chain() {
        let temp = TempDir::new().unwrap();
        let go = temp.path().join("types.go");
        fs::write(&go, "const VERSION = \"1.2.3\"\nconst LIBRARY = \"lib/1.2.3\"\n").unwrap();

        let rules = vec![
            rule(&go, r#"VERSION = "[^"]*""#, "VERSION = \"{version}\""),
            rule(&go, r#"LIBRARY = "lib/[^"]*""#, "LIBRARY = \"lib/{version}\""),
        ];

        let report = stamp_all(&VersionStamper::new(), &rules, "1.3.0").unwrap();

        assert_eq!(report.changed_files(), vec![go.as_path()]);
        assert_eq!(
            fs::read_to_string(&go).unwrap(),
            "const VERSION = \"1.3.0\"\nconst LIBRARY = \"lib/1.3.0\"\n"
        );
    }

    #[test]
    fn test_no_rules() {
        let err = stamp_all(&VersionStamper::new(), &[], "1.3.0").unwrap_err();
        assert!(matches!(
            err,
            VerstampError::Config(ConfigError::NoReplacements)
        ));
    }

    #[test]
    fn test_dry_run_reports_without_writing() {
        let temp = TempDir::new().unwrap();
        let go = temp.path().join("types.go");
        fs::write(&go, "const VERSION = \"1.2.3\"\n").unwrap();

        let rules = vec![rule(&go, r#"VERSION = "[^"]*""#, "VERSION = \"{version}\"")];
        let report = stamp_all(&VersionStamper::new().with_dry_run(true), &rules, "1.3.0").unwrap();

        assert!(report.dry_run);
        assert!(report.any_changed());
        assert_eq!(fs::read_to_string(&go).unwrap(), "const VERSION = \"1.2.3\"\n");
    }

    #[test]
    fn test_equivalent_paths_share_one_buffer() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("pkg")).unwrap();
        let go = temp.path().join("types.go");
        fs::write(&go, "const VERSION = \"1.2.3\"\nconst LIBRARY = \"lib/1.2.3\"\n").unwrap();
        let dotted = temp.path().join("pkg").join("..").join("types.go");

        let rules = vec![
            rule(&go, r#"VERSION = "[^"]*""#, "VERSION = \"{version}\""),
            rule(&dotted, r#"LIBRARY = "lib/[^"]*""#, "LIBRARY = \"lib/{version}\""),
        ];

        stamp_all(&VersionStamper::new(), &rules, "1.3.0").unwrap();

        assert_eq!(
            fs::read_to_string(&go).unwrap(),
            "const VERSION = \"1.3.0\"\nconst LIBRARY = \"lib/1.3.0\"\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_staging_writes_nothing() {
        use crate::stamp::stamper::tests::{make_read_only, make_writable};

        let temp = TempDir::new().unwrap();
        let go = temp.path().join("types.go");
        fs::write(&go, "const VERSION = \"1.2.3\"\n").unwrap();
        let locked = temp.path().join("locked");
        fs::create_dir(&locked).unwrap();
        let other = locked.join("other.go");
        fs::write(&other, "const VERSION = \"1.2.3\"\n").unwrap();

        let rules = vec![
            rule(&go, r#"VERSION = "[^"]*""#, "VERSION = \"{version}\""),
            rule(&other, r#"VERSION = "[^"]*""#, "VERSION = \"{version}\""),
        ];

        if !make_read_only(&locked) {
            return;
        }
        let result = stamp_all(&VersionStamper::new(), &rules, "1.3.0");
        make_writable(&locked);

        assert!(matches!(
            result,
            Err(VerstampError::Stamp(StampError::WriteFailure { .. }))
        ));
        assert_eq!(fs::read_to_string(&go).unwrap(), "const VERSION = \"1.2.3\"\n");
        assert_eq!(fs::read_to_string(&other).unwrap(), "const VERSION = \"1.2.3\"\n");
    }
}
