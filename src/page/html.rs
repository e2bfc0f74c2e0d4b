// src/page/html.rs
// =============================================================================
// This module extracts page links and image links from HTML.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
//
// We also use the `url` crate to:
// - Resolve relative URLs against the page URL
// - Drop links that can never be fetched (mailto:, javascript:, ...)
//
// Rust concepts:
// - Iterators: For processing collections
// - Option: a link that can't be resolved is simply skipped
// =============================================================================

use scraper::{Html, Selector};
use tracing::warn;
use url::Url;

use super::{ElementKind, PageElement};
use crate::sequence::GrowableSequence;

// Every element we care about, in one selector so document order is kept
const ELEMENT_SELECTOR: &str = "a[href], img[src]";

// Extracts page and image elements from HTML content
//
// Parameters:
//   html: the HTML content to parse
//   base_url: the URL of the page (for resolving relative links)
//
// Returns: the elements in document order, with absolute URLs
//
// Example:
//   html = "<a href='/docs'>Docs</a><img src='cat.png'>"
//   base_url = "https://example.com/"
//   result = [Page("https://example.com/docs"), Image("https://example.com/cat.png")]
pub fn extract_page_elements(html: &str, base_url: &str) -> GrowableSequence<PageElement> {
    let mut elements = Vec::new();

    let base = match Url::parse(base_url) {
        Ok(url) => url,
        Err(e) => {
            warn!(url = %base_url, error = %e, "Invalid base URL, no elements extracted");
            return GrowableSequence::new();
        }
    };

    let Ok(selector) = Selector::parse(ELEMENT_SELECTOR) else {
        return GrowableSequence::new();
    };

    let document = Html::parse_document(html);

    for element in document.select(&selector) {
        let value = element.value();
        let (kind, target) = match value.name() {
            "img" => (ElementKind::Image, value.attr("src")),
            _ => (ElementKind::Page, value.attr("href")),
        };

        if let Some(absolute_url) = target.and_then(|t| resolve_url(&base, t)) {
            elements.push(PageElement::new(kind, absolute_url));
        }
    }

    GrowableSequence::from_vec(elements)
}

// Resolves a possibly-relative URL to an absolute, fetchable URL
//
// Examples:
//   base = "https://example.com/page/"
//   href = "/docs"          -> Some("https://example.com/docs")
//   href = "../other"       -> Some("https://example.com/other")
//   href = "#top"           -> None (same page)
//   href = "mailto:a@b.com" -> None (not fetchable)
fn resolve_url(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let mut url = base.join(href).ok()?;
    if !is_fetchable(&url) {
        return None;
    }
    // Fragments point into the same document
    url.set_fragment(None);
    Some(url.to_string())
}

// Only http, https and file URLs can be loaded
fn is_fetchable(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https" | "file")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(elements: &GrowableSequence<PageElement>) -> Vec<(ElementKind, String)> {
        elements
            .iter()
            .map(|e| (e.kind(), e.url().to_string()))
            .collect()
    }

    #[test]
    fn test_extracts_pages_and_images_in_order() {
        let html = r#"
            <img src="/img/one.png">
            <a href="/docs">Docs</a>
            <img src="two.jpg">
        "#;
        let elements = extract_page_elements(html, "https://example.com/site/");
        assert_eq!(
            urls(&elements),
            vec![
                (ElementKind::Image, "https://example.com/img/one.png".to_string()),
                (ElementKind::Page, "https://example.com/docs".to_string()),
                (ElementKind::Image, "https://example.com/site/two.jpg".to_string()),
            ]
        );
    }

    #[test]
    fn test_skips_unfetchable_links() {
        let html = r##"
            <a href="mailto:test@example.com">Email</a>
            <a href="javascript:void(0)">JS</a>
            <a href="#section">Anchor</a>
            <img src="data:image/png;base64,AAAA">
        "##;
        let elements = extract_page_elements(html, "https://example.com");
        assert!(elements.is_empty());
    }

    #[test]
    fn test_strips_fragment() {
        let html = r#"<a href="/docs#intro">Docs</a>"#;
        let elements = extract_page_elements(html, "https://example.com");
        assert_eq!(elements.get(0).unwrap().url(), "https://example.com/docs");
    }

    #[test]
    fn test_file_urls_resolve() {
        let html = r#"<a href="sub/index.html">Sub</a><img src="../cat.png">"#;
        let elements = extract_page_elements(html, "file:///site/root/index.html");
        assert_eq!(
            urls(&elements),
            vec![
                (ElementKind::Page, "file:///site/root/sub/index.html".to_string()),
                (ElementKind::Image, "file:///site/cat.png".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_base_yields_nothing() {
        let html = r#"<a href="/docs">Docs</a>"#;
        assert!(extract_page_elements(html, "not a url").is_empty());
    }
}
