//! Validate command

use std::collections::HashSet;

use clap::Args;
use console::style;
use tracing::info;

use verstamp_core::config::{config_base_dir, Config};
use verstamp_core::VersionStamper;

use crate::cli::{Cli, OutputFormat};
use crate::exit_codes;

/// Validate configuration and check targets for drift
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Only validate the configuration file, skip target files
    #[arg(long)]
    pub config_only: bool,

    /// Strict mode - treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Findings of a validation run
#[derive(Debug, Default)]
struct Findings {
    errors: Vec<String>,
    warnings: Vec<String>,
    /// Errors raised by target files drifting from their rules
    drift: usize,
}

impl Findings {
    /// Exit code for a failed run; drift alone reports as a pattern mismatch
    fn exit_code(&self) -> Option<i32> {
        if self.errors.is_empty() {
            None
        } else if self.errors.len() == self.drift {
            Some(exit_codes::PATTERN_MISMATCH)
        } else {
            Some(exit_codes::CONFIG_ERROR)
        }
    }
}

impl ValidateCommand {
    /// Execute the validate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            config_only = self.config_only,
            strict = self.strict,
            "executing validate command"
        );

        let mut findings = Findings::default();

        let (config, config_path) = match cli.load_config() {
            Ok((c, p)) => (Some(c), Some(p)),
            Err(e) => {
                findings.errors.push(format!("Configuration: {}", e));
                (None, None)
            }
        };

        if let (Some(cfg), Some(path)) = (&config, &config_path) {
            self.check(cfg, &config_base_dir(path), &mut findings);
        }

        if self.strict {
            let mut warnings = std::mem::take(&mut findings.warnings);
            findings.errors.append(&mut warnings);
        }

        let passed = findings.errors.is_empty();

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "valid": passed,
                    "config_path": config_path.map(|p| p.to_string_lossy().to_string()),
                    "errors": findings.errors,
                    "warnings": findings.warnings
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    println!("{}", style("Validation Results").bold());
                    println!();

                    if let Some(path) = config_path {
                        println!("Config: {}", style(path.display()).cyan());
                        println!();
                    }

                    if !findings.errors.is_empty() {
                        println!("{}", style("Errors:").red().bold());
                        for error in &findings.errors {
                            println!("  {} {}", style("✗").red(), error);
                        }
                        println!();
                    }

                    if !findings.warnings.is_empty() {
                        println!("{}", style("Warnings:").yellow().bold());
                        for warning in &findings.warnings {
                            println!("  {} {}", style("!").yellow(), warning);
                        }
                        println!();
                    }

                    if passed {
                        if findings.warnings.is_empty() {
                            println!("{}", style("✓ All checks passed").green().bold());
                        } else {
                            println!(
                                "{} with {} warning(s)",
                                style("✓ Validation passed").green().bold(),
                                findings.warnings.len()
                            );
                        }
                    } else {
                        println!(
                            "{} with {} error(s)",
                            style("✗ Validation failed").red().bold(),
                            findings.errors.len()
                        );
                    }
                }
            }
        }

        if let Some(code) = findings.exit_code() {
            std::process::exit(code);
        }

        Ok(())
    }

    fn check(&self, config: &Config, base_dir: &std::path::Path, findings: &mut Findings) {
        if config.replacements.is_empty() {
            findings
                .warnings
                .push("No replacements configured, stamp would fail".to_string());
            return;
        }

        for (i, replacement) in config.replacements.iter().enumerate() {
            let mut seen = HashSet::new();
            for file in &replacement.files {
                if !seen.insert(file) {
                    findings.warnings.push(format!(
                        "replacements[{}] lists {} more than once",
                        i,
                        file.display()
                    ));
                }
            }
        }

        if self.config_only {
            return;
        }

        let rules = match config.to_rules(base_dir) {
            Ok(rules) => rules,
            Err(e) => {
                findings.errors.push(format!("Replacement rules: {}", e));
                return;
            }
        };

        let stamper = VersionStamper::new();
        for rule in &rules {
            if let Err(e) = stamper.check_target(rule) {
                findings.errors.push(e.to_string());
                findings.drift += 1;
            }
        }
    }
}
