//! Init command

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use dialoguer::{Confirm, Select};
use tracing::info;

use verstamp_core::config::{Config, DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_YAML};

use crate::cli::Cli;

/// Initialize a new Verstamp configuration
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Use defaults without prompting
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Write TOML instead of YAML
    #[arg(long)]
    pub toml: bool,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, yes = self.yes, "executing init command");
        let cwd = std::env::current_dir()?;
        let config_path = self
            .output
            .clone()
            .unwrap_or_else(|| cwd.join(DEFAULT_CONFIG_YAML));

        let format = if self.toml {
            "toml"
        } else if self.yes {
            "yaml"
        } else {
            let formats = vec!["yaml", "toml"];
            let selection = Select::new()
                .with_prompt("Configuration format")
                .items(&formats)
                .default(0)
                .interact()?;
            formats[selection]
        };

        // The format can change the extension, so check the final path
        let (config_path, content) = render_config(config_path, format)?;

        if config_path.exists() && !self.force {
            if self.yes {
                anyhow::bail!(
                    "Configuration file already exists at {}. Use --force to overwrite.",
                    config_path.display()
                );
            }

            let overwrite = Confirm::new()
                .with_prompt(format!(
                    "Configuration file already exists at {}. Overwrite?",
                    config_path.display()
                ))
                .default(false)
                .interact()?;

            if !overwrite {
                println!("{}", style("Aborted.").yellow());
                return Ok(());
            }
        }

        std::fs::write(&config_path, &content)?;

        if !cli.quiet {
            println!(
                "{} Created configuration at {}",
                style("✓").green().bold(),
                style(config_path.display()).cyan()
            );
            println!();
            println!("Next steps:");
            println!(
                "  1. Point the replacement at the file declaring your version in {}",
                config_path.display()
            );
            println!("  2. Run {} to check for drift", style("verstamp validate").cyan());
            println!(
                "  3. Have your release pipeline run {}",
                style("verstamp stamp <version>").cyan()
            );
        }

        Ok(())
    }
}

/// Default configuration content in the requested format, with the path's
/// extension adjusted to match
fn render_config(path: PathBuf, format: &str) -> anyhow::Result<(PathBuf, String)> {
    if format != "toml" {
        return Ok((path, DEFAULT_CONFIG_TEMPLATE.to_string()));
    }

    let path = if has_extension(&path, "yaml") || has_extension(&path, "yml") {
        path.with_extension("toml")
    } else {
        path
    };
    let config: Config = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE)?;
    Ok((path, toml::to_string_pretty(&config)?))
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().is_some_and(|e| e == ext)
}
