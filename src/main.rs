// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap and set up logging
// 2. Build the crawl settings (defaults < config file < flags)
// 3. Wire the real collaborators (web fetcher, image source, transforms)
// 4. Run the crawl with the chosen strategy and print the report
// 5. Exit with proper code (0 = success, 130 = cancelled, 2 = error)
//
// Ctrl-C raises the crawl's cancellation signal. The crawl then stops as a
// whole and reports "cancelled" instead of a partial image count.
// =============================================================================

mod cli;
mod logging;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use cli::{Cli, Commands, CrawlArgs};
use image_crawler::cache::TransformCache;
use image_crawler::crawl::{resolve_strategy, strategy_names};
use image_crawler::image::{build_transforms, transform_names, CachingImageSource, OutputStore};
use image_crawler::loader::Loader;
use image_crawler::page::WebPageFetcher;
use image_crawler::{run_crawl, CrawlConfig, CrawlContext, CrawlError, CrawlReport};

// Exit code used when the crawl was cancelled (128 + SIGINT)
const EXIT_CANCELLED: i32 = 130;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet)?;

    match cli.command {
        Commands::Crawl(args) => handle_crawl(&args).await,
        Commands::Strategies => {
            print_registries();
            Ok(0)
        }
    }
}

// Handles the 'crawl' subcommand
async fn handle_crawl(args: &CrawlArgs) -> Result<i32> {
    let config = load_config(args)?;

    // Resolve names up front so a typo fails before any network traffic
    let strategy = resolve_strategy(&config.strategy)?;
    let transforms = build_transforms(&config)?;

    let loader = Loader::new(Duration::from_secs(config.request_timeout_secs))
        .context("Failed to create HTTP client")?;
    let pages = Arc::new(WebPageFetcher::new(loader.clone()));
    let images = Arc::new(CachingImageSource::new(loader));

    let cache = match &config.cache_file {
        Some(path) => TransformCache::load(path)
            .await
            .with_context(|| format!("Failed to load transform cache {}", path.display()))?,
        None => TransformCache::new(),
    };

    let cancel = CancellationToken::new();
    spawn_ctrl_c_listener(cancel.clone());

    let mut ctx = CrawlContext::new(pages, images, transforms, config.max_depth)
        .with_transform_cache(cache)
        .with_cancellation(cancel);
    if let Some(dir) = &config.output_dir {
        ctx = ctx.with_output(OutputStore::new(dir));
    }
    let ctx = Arc::new(ctx);

    let result = run_crawl(Arc::clone(&ctx), strategy.as_ref(), &args.root).await;

    // Attempted transforms are recorded even when the crawl was cancelled
    if let Some(path) = &config.cache_file {
        ctx.transform_cache()
            .persist(path)
            .await
            .with_context(|| format!("Failed to save transform cache {}", path.display()))?;
    }

    match result {
        Ok(report) => {
            print_report(&report, args.json)?;
            Ok(0)
        }
        Err(CrawlError::Cancelled) => {
            warn!("Crawl cancelled");
            Ok(EXIT_CANCELLED)
        }
        Err(e) => Err(e.into()),
    }
}

// Defaults, then the config file, then command-line flags
fn load_config(args: &CrawlArgs) -> Result<CrawlConfig> {
    let mut config = match &args.config {
        Some(path) => CrawlConfig::from_file(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => CrawlConfig::default(),
    };
    args.apply_to(&mut config);
    config.validate()?;
    Ok(config)
}

fn spawn_ctrl_c_listener(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received, stopping crawl");
            cancel.cancel();
        }
    });
}

fn print_registries() {
    println!("Strategies:");
    for name in strategy_names() {
        println!("   {name}");
    }
    println!("Transforms:");
    for name in transform_names() {
        println!("   {name}");
    }
}

// Prints the report either as a summary or JSON
fn print_report(report: &CrawlReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let stats = &report.stats;
    println!("🔍 Crawled {} ({} strategy, max depth {})", report.root, report.strategy, report.max_depth);
    println!();
    println!("📊 Summary:");
    println!("   📄 Pages fetched:        {}", stats.pages_fetched);
    println!("   ↩️  Already visited:      {}", stats.already_visited);
    println!("   📏 Too deep:             {}", stats.depth_exceeded);
    println!("   ❌ Pages unavailable:    {}", stats.pages_unavailable);
    println!("   🖼️  Images obtained:      {}", stats.images_obtained);
    println!("   ❌ Images unavailable:   {}", stats.images_unavailable);
    println!("   ♻️  Already transformed:  {}", stats.transforms_already_applied);
    println!("   ⚠️  Transforms failed:    {}", stats.transforms_failed);
    println!("   ✅ Images transformed:   {}", report.images_transformed);
    Ok(())
}
