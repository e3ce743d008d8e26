//! Stamp command

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use verstamp_core::config::{config_base_dir, DEFAULT_VERSION_PATTERN};
use verstamp_core::{stamp_all, MatchPattern, ReplacementRule, StampReport, VersionStamper};

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Stamp a release version into the configured files
#[derive(Debug, Args)]
pub struct StampCommand {
    /// Release version to stamp
    #[arg(id = "release_version", value_name = "VERSION")]
    pub version: String,

    /// Report what would change without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Stamp a single file instead of the configured replacements
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Pattern locating the version declaration (with --file)
    #[arg(long, requires = "file", default_value = DEFAULT_VERSION_PATTERN)]
    pub from: String,

    /// Replacement template containing {version} (with --file)
    #[arg(long, requires = "file", default_value = "VERSION = \"{version}\"")]
    pub to: String,

    /// Occurrences expected in the file (with --file)
    #[arg(long, requires = "file", default_value_t = 1)]
    pub expected_matches: usize,

    /// Treat --from as literal text instead of a regex (with --file)
    #[arg(long, requires = "file")]
    pub literal: bool,

    /// Accept versions that are not valid semver
    #[arg(long)]
    pub allow_non_semver: bool,
}

impl StampCommand {
    /// Execute the stamp command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            version = %self.version,
            dry_run = self.dry_run,
            file = ?self.file,
            "executing stamp command"
        );

        let (rules, require_semver) = self.rules(cli)?;
        let stamper = VersionStamper::new()
            .with_dry_run(self.dry_run)
            .with_semver_required(require_semver && !self.allow_non_semver);

        let report = stamp_all(&stamper, &rules, &self.version)?;
        self.output_report(&report, cli)
    }

    /// Rules from the command line, or from configuration
    fn rules(&self, cli: &Cli) -> anyhow::Result<(Vec<ReplacementRule>, bool)> {
        if let Some(file) = &self.file {
            let pattern = if self.literal {
                MatchPattern::literal(&self.from)
            } else {
                MatchPattern::regex(&self.from)?
            };
            let rule =
                ReplacementRule::new(file, pattern, self.to.clone(), self.expected_matches)?;
            return Ok((vec![rule], true));
        }

        let (config, config_path) = cli.load_config()?;
        let rules = config.to_rules(&config_base_dir(&config_path))?;
        Ok((rules, config.versioning.require_semver))
    }

    fn output_report(&self, report: &StampReport, cli: &Cli) -> anyhow::Result<()> {
        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "version": report.version,
                    "dry_run": report.dry_run,
                    "results": report.results,
                    "changed_files": report.changed_files(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if cli.quiet {
                    for file in report.changed_files() {
                        println!("{}", file.display());
                    }
                    return Ok(());
                }

                println!(
                    "{} {}",
                    output::header("Stamping version"),
                    output::version_style().apply_to(&report.version)
                );
                println!();
                for result in &report.results {
                    println!("{}", output::result_line(result));
                }
                println!();

                let changed = report.changed_files().len();
                if report.dry_run {
                    output::info(&format!(
                        "Dry run: {} file(s) would change, nothing written",
                        changed
                    ));
                } else if changed == 0 {
                    output::warning("All files already carry this version");
                } else {
                    output::success(&format!(
                        "Stamped {} in {} file(s)",
                        style(&report.version).bold(),
                        changed
                    ));
                }
            }
        }
        Ok(())
    }
}
