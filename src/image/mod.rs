// src/image/mod.rs
// =============================================================================
// Images, where they come from, what is done to them, where they go.
//
// Submodules:
// - source: CachingImageSource, downloads an image once and reuses it
// - transform: the Transform trait, built-in transforms, name registry
// - store: OutputStore, writes transformed images to disk
//
// An Image is identified by the URL it came from. That URL is the key the
// TransformCache uses to remember which transforms already ran on it.
// =============================================================================

mod source;
mod store;
mod transform;

pub use source::CachingImageSource;
pub use store::OutputStore;
pub use transform::{build_transform, build_transforms, transform_names, Transform};

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use url::{form_urlencoded, Url};

/// Image bytes plus the URL they were loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    url: String,
    bytes: Vec<u8>,
}

impl Image {
    pub fn new(url: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            url: url.into(),
            bytes,
        }
    }

    /// Source URL; the identity of the image.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Relative path for saving this image, mirroring its URL: the host
    /// (or scheme), the path directories, then the file name. A query
    /// string is folded into the file name, so distinct URLs get distinct
    /// paths.
    pub fn relative_path(&self) -> PathBuf {
        let Ok(url) = Url::parse(&self.url) else {
            // Not an absolute URL; flatten it into a single file name
            let flat = self.url.replace(['/', '\\'], "_");
            return match flat.as_str() {
                "" | "." | ".." => PathBuf::from("image"),
                _ => PathBuf::from(flat),
            };
        };

        let mut path = PathBuf::new();
        match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => path.push(format!("{host}_{port}")),
            (Some(host), None) => path.push(host),
            (None, _) => path.push(url.scheme()),
        }

        // The url crate has already resolved "." and ".." segments
        let mut segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();
        let name = segments.pop().unwrap_or("image");
        for dir in segments {
            path.push(dir);
        }

        match url.query() {
            Some(query) => {
                let query: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
                path.push(format!("{name}_{query}"));
            }
            None => path.push(name),
        }
        path
    }
}

/// Source of images for the crawl.
///
/// Returns `None` when the image can't be obtained; implementations log
/// the reason themselves.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn obtain_image(&self, url: &str) -> Option<Arc<Image>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_of(url: &str) -> PathBuf {
        Image::new(url, vec![]).relative_path()
    }

    #[test]
    fn test_relative_path_mirrors_url() {
        assert_eq!(
            path_of("https://example.com/img/cat.png"),
            PathBuf::from("example.com/img/cat.png")
        );
        assert_eq!(
            path_of("http://127.0.0.1:8080/cat.png"),
            PathBuf::from("127.0.0.1_8080/cat.png")
        );
        assert_eq!(path_of("https://example.com/"), PathBuf::from("example.com/image"));
        assert_eq!(path_of("file:///tmp/site/cat.png"), PathBuf::from("file/tmp/site/cat.png"));
    }

    #[test]
    fn test_same_file_name_different_urls() {
        assert_ne!(
            path_of("https://example.com/a/cat.png"),
            path_of("https://example.com/b/cat.png")
        );
        assert_ne!(
            path_of("https://example.com/cat.png?size=1"),
            path_of("https://example.com/cat.png?size=2")
        );
        assert_eq!(
            path_of("https://example.com/cat.png?size=1"),
            PathBuf::from("example.com/cat.png_size%3D1")
        );
    }

    #[test]
    fn test_relative_path_of_bare_name() {
        assert_eq!(path_of("cat.png"), PathBuf::from("cat.png"));
        assert_eq!(path_of("img/cat.png"), PathBuf::from("img_cat.png"));
        assert_eq!(path_of(".."), PathBuf::from("image"));
    }
}
