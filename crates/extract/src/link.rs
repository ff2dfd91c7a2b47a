//! Link normalization.
//!
//! Catalog pages hand out a mix of absolute, root-relative, path-relative and
//! protocol-relative links. Everything the pipelines follow goes through
//! here first.

use exn::ResultExt;
use url::Url;

use crate::error::{ErrorKind, Result};

/// Prefixes a protocol-relative link (`//host/path`) with `https:`; anything
/// else is returned unchanged.
///
/// ```rust
/// use partscout_extract::link::normalize_protocol_relative;
/// assert_eq!(normalize_protocol_relative("//cdn.example/x"), "https://cdn.example/x");
/// assert_eq!(normalize_protocol_relative("/x"), "/x");
/// ```
pub fn normalize_protocol_relative(link: &str) -> String {
    let link = link.trim();
    if link.starts_with("//") { format!("https:{link}") } else { link.to_string() }
}

/// Resolves a scraped `href` against a site's base URL.
///
/// Links that already start with `http` are passed through, otherwise the
/// link is appended to the base with exactly one `/` between them.
///
/// ```rust
/// use partscout_extract::link::resolve;
/// assert_eq!(resolve("https://site.example", "/pdf/123.pdf"), "https://site.example/pdf/123.pdf");
/// assert_eq!(resolve("https://site.example", "http://other.example/a.pdf"), "http://other.example/a.pdf");
/// ```
pub fn resolve(base: &str, href: &str) -> String {
    let href = normalize_protocol_relative(href);
    if href.starts_with("http") {
        return href;
    }
    let base = base.trim_end_matches('/');
    if href.starts_with('/') { format!("{base}{href}") } else { format!("{base}/{href}") }
}

/// Parses an absolute URL, mapping failure to [`ErrorKind::InvalidUrl`].
pub fn parse(url: &str) -> Result<Url> {
    Url::parse(url).or_raise(|| ErrorKind::InvalidUrl(url.to_string()))
}

/// Builds a search URL: `{base}/{path}?{param}={query}` with the query
/// percent-encoded.
pub fn search_url(base: &str, path: &str, param: &str, query: &str) -> Result<Url> {
    let mut url = self::parse(&self::resolve(base, path))?;
    url.query_pairs_mut().append_pair(param, query);
    Ok(url)
}
