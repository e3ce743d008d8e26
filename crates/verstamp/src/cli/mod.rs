//! CLI definition and command handling

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use verstamp_core::config::{load_config, load_config_from_dir, Config};

use commands::{InitCommand, StampCommand, ValidateCommand};

/// Verstamp - Release version stamping CLI
#[derive(Debug, Parser)]
#[command(name = "verstamp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    /// Configuration file (searched for from the working directory if omitted)
    #[arg(long, global = true, env = "VERSTAMP_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Stamp a release version into the configured files
    Stamp(StampCommand),

    /// Validate configuration and check targets for drift
    Validate(ValidateCommand),

    /// Initialize a new Verstamp configuration
    Init(InitCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match self.command {
            Commands::Stamp(ref cmd) => cmd.execute(&self),
            Commands::Validate(ref cmd) => cmd.execute(&self),
            Commands::Init(ref cmd) => cmd.execute(&self),
        }
    }

    /// Load the configuration named by `--config`, or discover one
    pub fn load_config(&self) -> verstamp_core::Result<(Config, PathBuf)> {
        match &self.config {
            Some(path) => Ok((load_config(path)?, path.clone())),
            None => load_config_from_dir(&std::env::current_dir()?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_stamp() {
        let cli = Cli::try_parse_from(["verstamp", "--format", "json", "stamp", "1.3.0", "--dry-run"])
            .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Stamp(cmd) => {
                assert_eq!(cmd.version, "1.3.0");
                assert!(cmd.dry_run);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
