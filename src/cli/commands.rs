//! CLI argument definitions.
//!
//! This module defines the command-line surface using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{MatchStrategy, MoveConfig, ReusePolicy};

/// tfmv - Turn destroy/create pairs in a Terraform plan into state moves.
#[derive(Parser, Debug)]
#[command(name = "tfmv")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the JSON plan (`terraform show -json tfplan > tfplan.json`).
    #[arg(short, long)]
    pub plan_file: Option<PathBuf>,

    /// How created and destroyed resources are paired.
    #[arg(short, long, value_enum)]
    pub strategy: Option<MatchStrategy>,

    /// Whether a destroyed resource may be paired more than once.
    #[arg(long, value_enum)]
    pub reuse: Option<ReusePolicy>,

    /// Path to the configuration file.
    #[arg(short, long, env = "TFMV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format (text, json).
    #[arg(long, default_value = "text")]
    pub output: OutputFormat,

    /// Shell-quote addresses that contain brackets or quotes.
    #[arg(long)]
    pub quote: bool,

    /// Print a per-type summary table to stderr.
    #[arg(long)]
    pub summary: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON.
    #[arg(long)]
    pub log_json: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One `terraform state mv` command per line.
    #[default]
    Text,
    /// JSON document for scripting.
    Json,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Applies flags given on the command line on top of `config`.
    pub fn apply_overrides(&self, config: &mut MoveConfig) {
        if let Some(plan_file) = &self.plan_file {
            config.plan_file.clone_from(plan_file);
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if let Some(reuse) = self.reuse {
            config.reuse = reuse;
        }
        if self.quote {
            config.quote = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "tfmv",
            "--plan-file",
            "prod.json",
            "--strategy",
            "positional",
            "--reuse",
            "allow-reuse",
            "--output",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.plan_file, Some(PathBuf::from("prod.json")));
        assert_eq!(cli.strategy, Some(MatchStrategy::Positional));
        assert_eq!(cli.reuse, Some(ReusePolicy::AllowReuse));
        assert_eq!(cli.output, OutputFormat::Json);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from(["tfmv", "-s", "same-name", "--quote"]).unwrap();
        let mut config = MoveConfig {
            strategy: MatchStrategy::Positional,
            ..MoveConfig::default()
        };
        cli.apply_overrides(&mut config);

        assert_eq!(config.strategy, MatchStrategy::SameName);
        assert!(config.quote);
        assert_eq!(config, MoveConfig {
            strategy: MatchStrategy::SameName,
            quote: true,
            ..MoveConfig::default()
        });
    }

    #[test]
    fn test_absent_flags_keep_config() {
        let cli = Cli::try_parse_from(["tfmv"]).unwrap();
        let mut config = MoveConfig {
            reuse: ReusePolicy::AllowReuse,
            ..MoveConfig::default()
        };
        cli.apply_overrides(&mut config);
        assert_eq!(config.reuse, ReusePolicy::AllowReuse);
    }

    #[test]
    fn test_rejects_unknown_strategy() {
        assert!(Cli::try_parse_from(["tfmv", "--strategy", "fuzzy"]).is_err());
    }
}
