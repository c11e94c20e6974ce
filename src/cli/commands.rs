//! Command handlers for the review fetcher CLI
//!
//! This module connects parsed arguments and loaded configuration to the
//! core pipeline.

use std::path::PathBuf;
use std::time::Instant;

use tracing::{info, warn};

use crate::app::{
    Dispatcher, FeedClient, RunContext, SpreadsheetWriter, SummaryWriter, process_app,
};
use crate::cli::{FetchArgs, FetchProgress};
use crate::config::AppConfig;
use crate::errors::Result;

/// Handle the fetch command
///
/// Applications are processed one after another. The run summary is written
/// once, after the last application, or early if any step returns an error.
/// Configuration errors end the run before a summary location is known.
pub async fn handle_fetch(
    args: FetchArgs,
    config_path: Option<PathBuf>,
    show_progress: bool,
) -> Result<()> {
    let mut config = AppConfig::load(config_path).await?;
    args.apply_to(&mut config);
    config.validate()?;

    let catalog = config.catalog();
    if catalog.is_empty() {
        warn!("Country list is empty; no requests will be made");
    }

    if args.dry_run {
        println!(
            "Dry run - would fetch {} apps from {} countries with {} workers:",
            config.apps.len(),
            catalog.len(),
            config.fetch.dispatcher.worker_count
        );
        for app in &config.apps {
            println!("  {} (id {})", app.slug(), app.id);
        }
        return Ok(());
    }

    let start_time = Instant::now();
    let mut context = RunContext::begin(SummaryWriter::new(config.output.log_path()));

    let client = FeedClient::with_config(&config.fetch.client)?;
    let dispatcher = Dispatcher::new(client, config.fetch.dispatcher.clone());
    let exporter = SpreadsheetWriter::new(&config.output.directory);

    for app in &config.apps {
        let mut progress = FetchProgress::new(&app.slug(), catalog.len(), show_progress);
        let outcome = process_app(
            &dispatcher,
            app,
            catalog.codes(),
            &exporter,
            &mut context,
            |country, status| progress.record(country, status),
        )
        .await;
        progress.finish();

        let outcome = outcome?;
        match (&outcome.export_path, &outcome.parse_error) {
            (Some(path), _) => println!(
                "💾 {}: {} reviews saved to {}",
                app.slug(),
                outcome.review_count,
                path.display()
            ),
            (None, Some(e)) => println!("⚠️  {}: reviews could not be parsed ({})", app.slug(), e),
            (None, None) => {}
        }
    }

    let summary = context.finish()?;
    let (successful, no_reviews, failed) = summary.counts();
    info!("Fetch command completed in {:.2?}", start_time.elapsed());
    println!(
        "Done in {:.2}s: {} countries with reviews, {} without, {} failed. Summary: {}",
        summary.elapsed.as_secs_f64(),
        successful,
        no_reviews,
        failed,
        config.output.log_path().display()
    );

    Ok(())
}

/// Handle the countries command
pub async fn handle_countries(config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path).await?;
    let catalog = config.catalog();

    println!("{} storefront markets:", catalog.len());
    for chunk in catalog.codes().chunks(15) {
        let line: Vec<&str> = chunk.iter().map(|c| c.as_str()).collect();
        println!("  {}", line.join(" "));
    }
    Ok(())
}

/// Handle the config command
pub async fn handle_config(config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path).await?;
    print!("{}", config.to_toml()?);
    Ok(())
}
