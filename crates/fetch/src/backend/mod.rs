//! Fetcher trait and implementations.
//!
//! This module defines the `Fetcher` trait, the only way the resolvers talk
//! to the outside world. Swapping the implementation is how tests replace
//! live catalog sites with canned markup.

mod http;
#[cfg(feature = "mock")]
mod mock;

pub use self::http::HttpFetcher;
#[cfg(feature = "mock")]
pub use self::mock::MockFetcher;
use crate::error::Result;
use async_trait::async_trait;
use url::Url;

/// Retrieves raw markup from an absolute URL.
///
/// Implementations must not retry or cache: a single failure is reported as
/// such, and identical requests repeat the round-trip.
///
/// # Examples
///
/// ```
/// use partscout_fetch::{Fetcher, error::Result};
/// use url::Url;
///
/// async fn page_size(fetcher: &dyn Fetcher, url: &Url) -> Result<usize> {
///     Ok(fetcher.fetch(url).await?.len())
/// }
/// ```
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Name of the fetcher, for logging only.
    fn name(&self) -> &str;

    /// GET `url` and return the response body as text.
    ///
    /// Fails on transport errors, timeouts and non-2xx responses.
    async fn fetch(&self, url: &Url) -> Result<String>;
}
