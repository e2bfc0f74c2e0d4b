// src/config.rs
// =============================================================================
// Crawl configuration.
//
// Sources, lowest priority first:
// 1. Built-in defaults (CrawlConfig::default)
// 2. An optional TOML file (--config crawl.toml)
// 3. Command-line flags (applied by main.rs)
//
// Example crawl.toml:
//
//   max_depth = 3
//   transforms = ["identity", "reverse"]
//   strategy = "parallel"
//   cache_file = ".image-crawler/transforms.json"
//   output_dir = "out"
//
// Every field is optional in the file; missing fields keep their default.
// =============================================================================

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CrawlError, Result};

/// Settings consumed at startup by the crawl.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrawlConfig {
    /// Deepest page depth that is still fetched (the root page is depth 1)
    pub max_depth: usize,

    /// Transform names, applied in this order to every image
    pub transforms: Vec<String>,

    /// Name of the execution strategy (see `strategy::names`)
    pub strategy: String,

    /// When set, the transform cache is loaded from and saved to this file
    pub cache_file: Option<PathBuf>,

    /// When set, transformed images are written under this directory
    pub output_dir: Option<PathBuf>,

    /// Largest image the size-guard transform accepts
    pub max_image_bytes: usize,

    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            transforms: vec!["identity".to_string()],
            strategy: "sequential".to_string(),
            cache_file: None,
            output_dir: None,
            max_image_bytes: 5 * 1024 * 1024,
            request_timeout_secs: 10,
        }
    }
}

impl CrawlConfig {
    /// Reads a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
            .map_err(|e| CrawlError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parses TOML text.
    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: CrawlConfig =
            toml::from_str(raw).map_err(|e| CrawlError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings no crawl can run with.
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(CrawlError::Config(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.transforms.iter().any(|name| name.trim().is_empty()) {
            return Err(CrawlError::Config("empty transform name".to_string()));
        }
        Ok(())
    }
}
