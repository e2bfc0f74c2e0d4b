// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Every crawl flag is optional: a flag that is not given falls back to the
// config file (--config), and then to the built-in defaults.
// =============================================================================

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use image_crawler::CrawlConfig;

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "image-crawler",
    version,
    about = "Crawl linked pages, download their images and transform each image once",
    long_about = "image-crawler follows page links from a root URL (http, https or file) up to a \
                  maximum depth, downloads every image it finds and applies a list of transforms \
                  to each image exactly once, no matter how many pages link to it."
)]
pub struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl from a root URL and transform every image found
    ///
    /// Example: image-crawler crawl https://example.com --max-depth 3 --transform reverse
    Crawl(CrawlArgs),

    /// List the available execution strategies and transforms
    Strategies,
}

#[derive(Args, Debug)]
pub struct CrawlArgs {
    /// Root URL to start from (http://, https:// or file://)
    pub root: String,

    /// TOML config file with crawl settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Maximum crawl depth (the root page is depth 1)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Transform to apply; repeat for several (in order)
    #[arg(long = "transform", value_name = "NAME")]
    pub transforms: Vec<String>,

    /// Execution strategy: sequential, concurrent or parallel
    #[arg(long)]
    pub strategy: Option<String>,

    /// Keep the transform cache in this file between runs
    #[arg(long)]
    pub cache_file: Option<PathBuf>,

    /// Write transformed images under this directory
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Output the crawl report as JSON
    #[arg(long)]
    pub json: bool,
}

impl CrawlArgs {
    // Applies the flags that were given on top of `config`
    pub fn apply_to(&self, config: &mut CrawlConfig) {
        if let Some(depth) = self.max_depth {
            config.max_depth = depth;
        }
        if !self.transforms.is_empty() {
            config.transforms = self.transforms.clone();
        }
        if let Some(strategy) = &self.strategy {
            config.strategy = strategy.clone();
        }
        if let Some(path) = &self.cache_file {
            config.cache_file = Some(path.clone());
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = Some(dir.clone());
        }
    }
}
