// src/page/mod.rs
// =============================================================================
// Pages and the elements found on them.
//
// A Page is a fetched document plus the ordered list of links on it. Each
// link is a PageElement tagged as either another Page or an Image.
//
// Submodules:
// - html: pulls <a href> and <img src> elements out of HTML
// - fetch: WebPageFetcher, the real PageFetcher (http(s) and file://)
//
// The crawl core only depends on the PageFetcher trait, so tests can plug
// in an in-memory site instead of a web server.
// =============================================================================

mod fetch;
mod html;

pub use fetch::WebPageFetcher;
pub use html::extract_page_elements;

use async_trait::async_trait;

use crate::sequence::GrowableSequence;

/// What a link on a page points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A hyperlink to another page (crawled recursively)
    Page,
    /// An image (downloaded and transformed)
    Image,
}

/// A typed link discovered on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageElement {
    kind: ElementKind,
    url: String,
}

impl PageElement {
    pub fn new(kind: ElementKind, url: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
        }
    }

    pub fn page(url: impl Into<String>) -> Self {
        Self::new(ElementKind::Page, url)
    }

    pub fn image(url: impl Into<String>) -> Self {
        Self::new(ElementKind::Image, url)
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// A fetched page and the elements on it, in document order.
#[derive(Debug, Clone)]
pub struct Page {
    uri: String,
    elements: GrowableSequence<PageElement>,
}

impl Page {
    pub fn new(uri: impl Into<String>, elements: GrowableSequence<PageElement>) -> Self {
        Self {
            uri: uri.into(),
            elements,
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Elements whose kind is in `kinds`, keeping document order.
    pub fn elements(&self, kinds: &[ElementKind]) -> GrowableSequence<PageElement> {
        self.elements
            .iter()
            .filter(|element| kinds.contains(&element.kind))
            .cloned()
            .collect()
    }
}

/// Source of pages for the crawl.
///
/// Returns `None` when the page can't be fetched; implementations log the
/// reason themselves.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, uri: &str) -> Option<Page>;
}
