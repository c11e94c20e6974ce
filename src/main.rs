//! Review Fetcher CLI application
//!
//! Command-line interface for collecting App Store customer reviews across
//! storefront markets.

use std::process;

use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use review_fetcher::cli::{Cli, Commands, handle_config, handle_countries, handle_fetch};
use review_fetcher::errors::Result;

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        error!("Run failed ({} error): {}", e.category(), e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    init_logging(&cli);

    info!("Review Fetcher v{} starting", env!("CARGO_PKG_VERSION"));

    let config_path = cli.global.config.clone();
    match cli.command {
        Commands::Fetch(args) => {
            info!("Executing fetch command");
            handle_fetch(args, config_path, !cli.global.quiet).await
        }
        Commands::Countries => handle_countries(config_path).await,
        Commands::Config => handle_config(config_path).await,
    }
}

/// Initialize logging based on CLI verbosity settings
fn init_logging(cli: &Cli) {
    let log_level = cli.log_level();

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("review_fetcher={}", log_level).parse() {
        filter = filter.add_directive(directive);
    }

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(cli.global.very_verbose)
        .init();

    if cli.global.very_verbose {
        info!("Very verbose logging enabled");
    } else if cli.global.verbose {
        info!("Verbose logging enabled");
    }
}
