// src/lib.rs
// =============================================================================
// image_crawler: crawl linked pages, download images, transform each once.
//
// Layout (leaf modules first):
// - sequence: GrowableSequence, the container for page elements/transforms
// - cache:    VisitedSet and TransformCache, the at-most-once gates
// - loader:   loads bytes from http(s):// and file:// URLs
// - page:     pages, page elements, the PageFetcher trait
// - image:    images, the ImageSource and Transform traits, output store
// - crawl:    the recursive crawl, the image pipeline, the strategies
// - config / error: settings and error types
//
// The binary (src/main.rs) wires these together behind a CLI.
// =============================================================================

pub mod cache;
pub mod config;
pub mod crawl;
pub mod error;
pub mod image;
pub mod loader;
pub mod page;
pub mod sequence;

pub use config::CrawlConfig;
pub use crawl::{run_crawl, CrawlContext, CrawlReport, CrawlStrategy};
pub use error::{CrawlError, Result, SequenceError};
pub use sequence::GrowableSequence;
