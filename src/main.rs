//! Shiori main entry point
//!
//! This is the command-line interface for the Shiori sitemap snapshot
//! crawler.

use clap::Parser;
use shiori::config::{load_config, Config};
use shiori::crawler::run_crawl;
use shiori::sitemap::UrlSource;
use shiori::store::{identifier_for, PageStore};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Shiori: a resumable sitemap snapshot crawler
///
/// Shiori discovers URLs from a sitemap, fetches each page's rendered
/// content through a shared headless browser session, and writes one
/// output file per URL. URLs whose output file already exists are
/// skipped, so an interrupted run can simply be started again.
#[derive(Parser, Debug)]
#[command(name = "shiori")]
#[command(version = "1.0.0")]
#[command(about = "A resumable sitemap snapshot crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Discover URLs and show what would be fetched or skipped, without
    /// launching a browser
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config).await?;
    } else {
        handle_crawl(&config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shiori=info,warn"),
            1 => EnvFilter::new("shiori=debug,info"),
            2 => EnvFilter::new("shiori=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the crawl plan
async fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Shiori Dry Run ===\n");

    println!("Source:");
    println!("  Sitemap URL: {}", config.source.sitemap_url);
    println!("  Request timeout: {}s", config.source.request_timeout);

    println!("\nBrowser:");
    println!("  Headless: {}", config.browser.headless);
    println!("  Page timeout: {}s", config.browser.page_timeout);
    println!("  Extra args: {}", config.browser.extra_args.join(" "));

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);
    println!("  Extension: .{}", config.output.extension);

    let source = UrlSource::new(&config.source, &config.user_agent)?;
    let urls = source.list_urls().await;

    if urls.is_empty() {
        println!("\nNo URLs found to crawl, nothing to do");
        return Ok(());
    }

    let store = PageStore::new(&config.output);
    let mut to_fetch = 0;
    let mut to_skip = 0;

    println!("\nDiscovered {} URLs:", urls.len());
    for url in &urls {
        if store.exists(&identifier_for(url)) {
            println!("  [skip]  {}", url);
            to_skip += 1;
        } else {
            println!("  [fetch] {}", url);
            to_fetch += 1;
        }
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would fetch {} URLs, skip {}", to_fetch, to_skip);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting crawl of {} into {}",
        config.source.sitemap_url,
        config.output.directory
    );

    match run_crawl(config).await {
        Ok(Some(report)) => {
            tracing::info!(
                "Crawl complete: {} succeeded, {} skipped, {} failed ({} total)",
                report.succeeded,
                report.skipped,
                report.failed,
                report.total()
            );
            Ok(())
        }
        Ok(None) => {
            tracing::info!("Nothing to do");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
