//! Command-line argument parsing for the review fetcher
//!
//! This module defines the CLI structure using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::{AppDescriptor, CountryCode};
use crate::config::AppConfig;

/// Review Fetcher - collect App Store customer reviews across storefronts
#[derive(Parser, Debug)]
#[command(
    name = "review_fetcher",
    version,
    about = "Collect App Store customer reviews from every storefront into spreadsheets",
    long_about = "Fetches the public customer-review feed for each configured app from every storefront market concurrently,
exports the reviews newest first to one spreadsheet per app, and writes a run summary of which markets had reviews,
had none, or failed."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch reviews for the configured apps and export them
    Fetch(FetchArgs),

    /// List the storefront markets that would be queried
    Countries,

    /// Print the effective configuration as TOML
    Config,
}

/// Arguments for the fetch command
#[derive(Args, Debug, Clone, Default)]
pub struct FetchArgs {
    /// App to fetch as NAME=ID; repeatable, replaces the configured apps
    #[arg(short, long = "app", value_name = "NAME=ID")]
    pub apps: Vec<AppDescriptor>,

    /// Storefront market code to query; repeatable, replaces the country list
    #[arg(short, long = "country", value_name = "CC")]
    pub countries: Vec<CountryCode>,

    /// Number of concurrent fetches per app
    #[arg(short = 'w', long)]
    pub workers: Option<usize>,

    /// Directory for spreadsheets and the run summary
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Show what would be fetched without making requests
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the logging level based on global arguments
    pub fn log_level(&self) -> tracing::Level {
        if self.global.quiet {
            tracing::Level::ERROR
        } else if self.global.very_verbose {
            tracing::Level::DEBUG
        } else if self.global.verbose {
            tracing::Level::INFO
        } else {
            tracing::Level::WARN
        }
    }
}

impl FetchArgs {
    /// Apply command-line overrides on top of loaded configuration
    pub fn apply_to(&self, config: &mut AppConfig) {
        if !self.apps.is_empty() {
            config.apps = self.apps.clone();
        }
        if !self.countries.is_empty() {
            config.catalog.countries = Some(self.countries.clone());
        }
        if let Some(workers) = self.workers {
            config.fetch.dispatcher.worker_count = workers;
        }
        if let Some(dir) = &self.output_dir {
            config.output.directory = dir.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_fetch_args_parse() {
        let cli = Cli::try_parse_from([
            "review_fetcher",
            "fetch",
            "--app",
            "MOMCOZY=6473000053",
            "-a",
            "ELVIE=1349263624",
            "-c",
            "us",
            "--country",
            "FR",
            "-w",
            "4",
        ])
        .unwrap();

        let Commands::Fetch(args) = cli.command else {
            panic!("expected fetch command");
        };
        assert_eq!(args.apps.len(), 2);
        assert_eq!(args.apps[1], AppDescriptor::new("ELVIE", 1349263624));
        let codes: Vec<&str> = args.countries.iter().map(CountryCode::as_str).collect();
        assert_eq!(codes, vec!["US", "FR"]);
        assert_eq!(args.workers, Some(4));
    }

    #[test]
    fn test_invalid_app_is_rejected() {
        let result = Cli::try_parse_from(["review_fetcher", "fetch", "--app", "SLACK"]);
        assert!(result.is_err());

        let result = Cli::try_parse_from(["review_fetcher", "fetch", "--country", "USA"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_replace_config() {
        let mut config = AppConfig::default();
        config.apps.push(AppDescriptor::new("OLD", 1));

        let args = FetchArgs {
            apps: vec![AppDescriptor::new("NEW", 2)],
            countries: vec!["GB".parse().unwrap()],
            workers: Some(3),
            output_dir: Some(PathBuf::from("out")),
            dry_run: false,
        };
        args.apply_to(&mut config);

        assert_eq!(config.apps, vec![AppDescriptor::new("NEW", 2)]);
        assert_eq!(config.catalog().len(), 1);
        assert_eq!(config.fetch.dispatcher.worker_count, 3);
        assert_eq!(config.output.directory, PathBuf::from("out"));
    }

    #[test]
    fn test_empty_overrides_keep_config() {
        let mut config = AppConfig::default();
        config.apps.push(AppDescriptor::new("KEEP", 1));
        let before = config.clone();

        FetchArgs::default().apply_to(&mut config);
        assert_eq!(config, before);
    }

    #[test]
    fn test_log_level() {
        let cli_quiet = Cli {
            global: GlobalArgs {
                verbose: false,
                very_verbose: false,
                quiet: true,
                config: None,
            },
            command: Commands::Countries,
        };

        let cli_verbose = Cli {
            global: GlobalArgs {
                verbose: true,
                very_verbose: false,
                quiet: false,
                config: None,
            },
            command: Commands::Countries,
        };

        assert_eq!(cli_quiet.log_level(), tracing::Level::ERROR);
        assert_eq!(cli_verbose.log_level(), tracing::Level::INFO);
    }
}
