//! In-memory fetcher for testing.

use super::Fetcher;
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use url::Url;

/// In-memory fetcher for testing.
///
/// Pages are canned responses keyed by absolute URL. Requests for any other
/// URL answer with a 404, exactly like a live site would. Every request is
/// logged so tests can assert on the order of the fetch chain.
///
/// # Examples
///
/// ```
/// use partscout_fetch::backend::{Fetcher, MockFetcher};
/// use url::Url;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let fetcher = MockFetcher::with_pages([
///     ("https://catalog.example/search.php?search=BC547", "<html>...</html>"),
/// ]);
/// let url = Url::parse("https://catalog.example/search.php?search=BC547").unwrap();
/// assert_eq!(fetcher.fetch(&url).await.unwrap(), "<html>...</html>");
/// assert_eq!(fetcher.requests().await.len(), 1);
/// # }
/// ```
pub struct MockFetcher {
    name: String,
    pages: HashMap<String, (u16, String)>,
    requests: RwLock<Vec<String>>,
}

impl MockFetcher {
    /// Create a mock fetcher serving the given pages with HTTP 200.
    ///
    /// Panics if any URL does not parse. If test setup is wrong, then test
    /// should not pass.
    pub fn with_pages(pages: impl IntoIterator<Item = (impl AsRef<str>, impl Into<String>)>) -> Self {
        let mut fetcher = Self {
            name: "mock".to_string(),
            pages: HashMap::new(),
            requests: RwLock::new(Vec::new()),
        };
        for (url, body) in pages {
            fetcher = fetcher.with_status(url, 200, body);
        }
        fetcher
    }

    /// Serve `body` with an arbitrary status code at `url`.
    pub fn with_status(mut self, url: impl AsRef<str>, status: u16, body: impl Into<String>) -> Self {
        let url = url.as_ref();
        let Ok(parsed) = Url::parse(url) else {
            // The panic here is DELIBERATE, see `with_pages`.
            panic!("MockFetcher: invalid URL {url}");
        };
        self.pages.insert(parsed.to_string(), (status, body.into()));
        self
    }

    /// Change the name of the mock fetcher.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Every URL requested so far, in request order.
    pub async fn requests(&self) -> Vec<String> {
        self.requests.read().await.clone()
    }
}

impl Default for MockFetcher {
    fn default() -> Self {
        let pages: [(&str, &str); 0] = [];
        Self::with_pages(pages)
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, url: &Url) -> Result<String> {
        self.requests.write().await.push(url.to_string());
        let (status, body) = self.pages.get(url.as_str()).cloned().unwrap_or_else(|| (404, String::new()));
        if !(200..300).contains(&status) {
            exn::bail!(ErrorKind::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_pages_and_logs_requests() {
        let fetcher = MockFetcher::with_pages([("https://a.example", "root"), ("https://a.example/x?y=1", "x")]);
        let root = Url::parse("https://a.example/").unwrap();
        let x = Url::parse("https://a.example/x?y=1").unwrap();
        assert_eq!(fetcher.fetch(&x).await.unwrap(), "x");
        assert_eq!(fetcher.fetch(&root).await.unwrap(), "root");
        assert_eq!(fetcher.requests().await, vec!["https://a.example/x?y=1", "https://a.example/"]);
    }

    #[tokio::test]
    async fn test_unknown_url_is_404() {
        let fetcher = MockFetcher::default();
        let err = fetcher.fetch(&Url::parse("https://a.example/missing").unwrap()).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_status_override() {
        let fetcher = MockFetcher::default().with_status("https://a.example/busy", 503, "try later");
        let err = fetcher.fetch(&Url::parse("https://a.example/busy").unwrap()).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Status { status: 503, .. }));
        assert!(err.is_retryable());
    }
}
