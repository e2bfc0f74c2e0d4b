// src/page/fetch.rs
// =============================================================================
// WebPageFetcher: the PageFetcher used by the CLI.
//
// How it works:
// 1. Load the document at the URI (http(s) or file://) through the Loader
// 2. Parse the HTML and collect its page and image elements
// 3. Any failure is logged and reported as "no page" (None)
//
// Note: scraper's Html type is not Send, so parsing happens in a plain
// (non-async) function and the DOM is dropped before the next .await.
// =============================================================================

use async_trait::async_trait;
use tracing::{debug, warn};

use super::{extract_page_elements, Page, PageFetcher};
use crate::loader::Loader;

/// Fetches and parses HTML pages.
#[derive(Debug, Clone)]
pub struct WebPageFetcher {
    loader: Loader,
}

impl WebPageFetcher {
    pub fn new(loader: Loader) -> Self {
        Self { loader }
    }
}

#[async_trait]
impl PageFetcher for WebPageFetcher {
    async fn fetch_page(&self, uri: &str) -> Option<Page> {
        let html = match self.loader.text(uri).await {
            Ok(html) => html,
            Err(e) => {
                warn!(uri = %uri, error = %e, "Failed to fetch page");
                return None;
            }
        };

        let elements = extract_page_elements(&html, uri);
        debug!(uri = %uri, elements = elements.len(), "Fetched page");
        Some(Page::new(uri, elements))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::ElementKind;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> WebPageFetcher {
        WebPageFetcher::new(Loader::new(Duration::from_secs(5)).unwrap())
    }

    #[tokio::test]
    async fn test_fetches_and_parses_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/index.html"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<a href="/about.html">About</a><img src="/cat.png">"#,
            ))
            .mount(&server)
            .await;

        let uri = format!("{}/index.html", server.uri());
        let page = fetcher().fetch_page(&uri).await.unwrap();
        assert_eq!(page.uri(), uri);

        let elements = page.elements(&[ElementKind::Page, ElementKind::Image]);
        assert_eq!(elements.len(), 2);
        assert_eq!(
            elements.get(0).unwrap().url(),
            format!("{}/about.html", server.uri())
        );
        assert_eq!(elements.get(1).unwrap().kind(), ElementKind::Image);
    }

    #[tokio::test]
    async fn test_missing_page_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let page = fetcher()
            .fetch_page(&format!("{}/broken.html", server.uri()))
            .await;
        assert!(page.is_none());
    }
}
