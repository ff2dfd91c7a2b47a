use super::Fetcher;
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use exn::ResultExt;
use reqwest::Client;
use std::time::Duration;
use tracing::instrument;
use url::Url;

/// [`Fetcher`] backed by a shared [`reqwest::Client`].
///
/// The client carries the `User-Agent` header and the timeout, so every
/// request made through this fetcher looks the same to the catalog sites.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    name: String,
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            name: "http".to_string(),
            client: builder.build().or_raise(|| ErrorKind::Client)?,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn map_error(err: reqwest::Error, url: &Url) -> crate::error::Error {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout(url.to_string())
        } else {
            ErrorKind::Network(url.to_string())
        };
        exn::Exn::from(err).raise(kind)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self, url), fields(url = %url))]
    async fn fetch(&self, url: &Url) -> Result<String> {
        let response = self.client.get(url.clone()).send().await.map_err(|err| Self::map_error(err, url))?;
        let status = response.status();
        if !status.is_success() {
            exn::bail!(ErrorKind::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.text().await.map_err(|err| Self::map_error(err, url))?;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "fetched page");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_with_timeout() {
        let fetcher = HttpFetcher::new("Mozilla/5.0", Some(Duration::from_secs(5))).unwrap();
        assert_eq!(fetcher.name(), "http");
        assert_eq!(fetcher.with_name("catalog").name(), "catalog");
    }

    #[test]
    fn test_invalid_user_agent() {
        let err = HttpFetcher::new("bad\nagent", None).unwrap_err();
        assert_eq!(&*err, &ErrorKind::Client);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_network_error() {
        let fetcher = HttpFetcher::new("Mozilla/5.0", Some(Duration::from_secs(2))).unwrap();
        // Port 9 (discard) on localhost: nothing listens there in CI.
        let url = Url::parse("http://127.0.0.1:9/").unwrap();
        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Network(_) | ErrorKind::Timeout(_)));
    }
}
