// src/image/transform.rs
// =============================================================================
// Transforms and the registry that builds them from names.
//
// A Transform takes an image and returns a new one, or None if it can't
// handle that image. The crawl never calls a transform twice for the same
// image: the TransformCache gates every call by (image URL, transform name).
//
// Built-in transforms:
// - identity:   returns a copy of the image
// - size-guard: copy, but refuses images larger than max_image_bytes
// - reverse:    reverses the byte order (a cheap, deterministic change)
//
// The registry maps a name to a constructor, so the list of transforms can
// come from the config file or the command line.
// =============================================================================

use std::sync::Arc;

use super::Image;
use crate::config::CrawlConfig;
use crate::error::{CrawlError, Result};
use crate::sequence::GrowableSequence;

/// An identified operation on an image.
pub trait Transform: Send + Sync {
    /// Stable name; part of the transform-cache key.
    fn name(&self) -> &str;

    /// Produces a transformed image, or `None` if the transform fails.
    fn apply(&self, image: &Image) -> Option<Image>;
}

struct Identity;

impl Transform for Identity {
    fn name(&self) -> &str {
        "identity"
    }

    fn apply(&self, image: &Image) -> Option<Image> {
        Some(image.clone())
    }
}

struct SizeGuard {
    max_bytes: usize,
}

impl Transform for SizeGuard {
    fn name(&self) -> &str {
        "size-guard"
    }

    fn apply(&self, image: &Image) -> Option<Image> {
        (image.len() <= self.max_bytes).then(|| image.clone())
    }
}

struct Reverse;

impl Transform for Reverse {
    fn name(&self) -> &str {
        "reverse"
    }

    fn apply(&self, image: &Image) -> Option<Image> {
        let mut bytes = image.bytes().to_vec();
        bytes.reverse();
        Some(Image::new(image.url(), bytes))
    }
}

type TransformFactory = fn(&CrawlConfig) -> Arc<dyn Transform>;

fn identity(_: &CrawlConfig) -> Arc<dyn Transform> {
    Arc::new(Identity)
}

fn size_guard(config: &CrawlConfig) -> Arc<dyn Transform> {
    Arc::new(SizeGuard {
        max_bytes: config.max_image_bytes,
    })
}

fn reverse(_: &CrawlConfig) -> Arc<dyn Transform> {
    Arc::new(Reverse)
}

// Name -> constructor, in the order `transform_names` lists them
const REGISTRY: &[(&str, TransformFactory)] = &[
    ("identity", identity),
    ("size-guard", size_guard),
    ("reverse", reverse),
];

/// Names accepted by [`build_transform`].
pub fn transform_names() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|(name, _)| *name)
}

/// Builds the transform registered under `name`.
pub fn build_transform(name: &str, config: &CrawlConfig) -> Result<Arc<dyn Transform>> {
    REGISTRY
        .iter()
        .find(|(registered, _)| *registered == name)
        .map(|(_, factory)| factory(config))
        .ok_or_else(|| CrawlError::UnknownTransform(name.to_string()))
}

/// Builds every transform listed in `config.transforms`, keeping their order.
pub fn build_transforms(config: &CrawlConfig) -> Result<GrowableSequence<Arc<dyn Transform>>> {
    let mut transforms = GrowableSequence::with_capacity(config.transforms.len())?;
    for name in &config.transforms {
        transforms.append(build_transform(name, config)?)?;
    }
    Ok(transforms)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(bytes: Vec<u8>) -> Image {
        Image::new("https://example.com/cat.png", bytes)
    }

    #[test]
    fn test_identity_copies() {
        let transform = build_transform("identity", &CrawlConfig::default()).unwrap();
        let input = image(vec![1, 2, 3]);
        assert_eq!(transform.apply(&input), Some(input.clone()));
    }

    #[test]
    fn test_size_guard_rejects_large_images() {
        let config = CrawlConfig {
            max_image_bytes: 2,
            ..CrawlConfig::default()
        };
        let transform = build_transform("size-guard", &config).unwrap();
        assert!(transform.apply(&image(vec![1, 2])).is_some());
        assert!(transform.apply(&image(vec![1, 2, 3])).is_none());
    }

    #[test]
    fn test_reverse_keeps_identity_url() {
        let transform = build_transform("reverse", &CrawlConfig::default()).unwrap();
        let out = transform.apply(&image(vec![1, 2, 3])).unwrap();
        assert_eq!(out.bytes(), &[3, 2, 1]);
        assert_eq!(out.url(), "https://example.com/cat.png");
    }

    #[test]
    fn test_names_match_registry() {
        for name in transform_names() {
            let transform = build_transform(name, &CrawlConfig::default()).unwrap();
            assert_eq!(transform.name(), name);
        }
    }

    #[test]
    fn test_unknown_transform() {
        let err = build_transform("sepia", &CrawlConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, CrawlError::UnknownTransform(name) if name == "sepia"));
    }

    #[test]
    fn test_build_transforms_keeps_order() {
        let config = CrawlConfig {
            transforms: vec!["reverse".into(), "identity".into()],
            ..CrawlConfig::default()
        };
        let transforms = build_transforms(&config).unwrap();
        let names: Vec<_> = transforms.iter().map(|t| t.name().to_string()).collect();
        assert_eq!(names, vec!["reverse", "identity"]);
    }
}
