use crate::error::{ErrorKind, Result, Stage};
use crate::models::DatasheetResult;
use exn::{OptionExt, ResultExt};
use partscout_extract::query::WholeWord;
use partscout_extract::{DatasheetLayout, DatasheetSite, link};
use partscout_fetch::FetcherHandle;
use tracing::instrument;

/// Resolves a free-text part query to a description and a datasheet link.
pub struct DatasheetResolver {
    fetcher: FetcherHandle,
    site: DatasheetSite,
}

impl DatasheetResolver {
    pub fn new(fetcher: FetcherHandle, layout: DatasheetLayout) -> Result<Self> {
        Ok(Self {
            fetcher,
            site: DatasheetSite::try_from(layout).or_raise(|| ErrorKind::Layout)?,
        })
    }

    pub fn site(&self) -> &DatasheetSite {
        &self.site
    }

    /// Search, pick the first article that contains the query as a whole
    /// word, then look for a PDF on the article's detail page.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::MissingParameter`] if the query is blank.
    /// - [`ErrorKind::NotFound`] ([`Stage::Article`]) if no article matched.
    /// - [`ErrorKind::Fetch`]/[`ErrorKind::Parse`] if the search page could
    ///   not be retrieved or is malformed.
    ///
    /// Once an article has matched, the call succeeds: a detail page that
    /// can't be fetched or has no PDF yields `datasheet_url: None`.
    #[instrument(skip(self), fields(fetcher = self.fetcher.name()))]
    pub async fn resolve(&self, query: &str) -> Result<DatasheetResult> {
        let query = query.trim();
        if query.is_empty() {
            exn::bail!(ErrorKind::MissingParameter("word"));
        }
        let matcher = WholeWord::new(query).or_raise(|| ErrorKind::Parse("query"))?;
        let search_url = self.site.search_url(query).or_raise(|| ErrorKind::Parse("search URL"))?;
        let search_page = self.fetcher.fetch(&search_url).await.or_raise(|| ErrorKind::Fetch("search page"))?;
        let article = self
            .site
            .find_article(&search_page, &matcher)
            .or_raise(|| ErrorKind::Parse("search results"))?
            .ok_or_raise(|| ErrorKind::NotFound(Stage::Article))?;
        tracing::debug!(link = %article.link, "matched catalog article");
        let datasheet_url = self.datasheet_url(&article.link).await;
        Ok(DatasheetResult {
            query: query.to_string(),
            description: article.description,
            datasheet_url,
        })
    }

    async fn datasheet_url(&self, detail_link: &str) -> Option<String> {
        let detail_url = match link::parse(detail_link) {
            Ok(url) => url,
            Err(err) => {
                tracing::warn!(link = detail_link, error = ?err, "unusable detail link, no datasheet");
                return None;
            },
        };
        match self.fetcher.fetch(&detail_url).await {
            Ok(page) => self.site.datasheet_link(&page),
            Err(err) => {
                tracing::warn!(url = %detail_url, error = ?err, "detail page unavailable, no datasheet");
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use partscout_fetch::backend::MockFetcher;
    use std::sync::Arc;

    const BASE: &str = "https://www.datasheet4u.com";
    const SEARCH_URL: &str = "https://www.datasheet4u.com/share_search.php?sWord=LM7805";
    const DETAIL_URL: &str = "https://www.datasheet4u.com/parts/lm7805.html";

    const SEARCH_PAGE: &str = r#"
        <main>
            <article><a href="/parts/lm7805a.html"><p>LM7805A variant</p></a></article>
            <article>
                <a href="/parts/lm7805.html">
                    <h3>LM7805</h3>
                    <p>  3-Terminal 1A Positive Voltage Regulator  </p>
                </a>
            </article>
        </main>
    "#;
    const DETAIL_PAGE: &str = r#"
        <table><tr>
            <td>LM7805</td>
            <td><a href="/ds/lm7805.pdf">Download PDF</a></td>
        </tr></table>
    "#;

    fn resolver(fetcher: MockFetcher) -> (Arc<MockFetcher>, DatasheetResolver) {
        let fetcher = Arc::new(fetcher);
        let resolver = DatasheetResolver::new(fetcher.clone(), DatasheetLayout::default()).unwrap();
        (fetcher, resolver)
    }

    #[tokio::test]
    async fn test_resolves_datasheet() {
        let pages = MockFetcher::with_pages([(SEARCH_URL, SEARCH_PAGE), (DETAIL_URL, DETAIL_PAGE)]);
        let (fetcher, resolver) = resolver(pages);
        let result = resolver.resolve("LM7805").await.unwrap();
        assert_eq!(
            result,
            DatasheetResult {
                query: "LM7805".to_string(),
                description: "3-Terminal 1A Positive Voltage Regulator".to_string(),
                datasheet_url: Some(format!("{BASE}/ds/lm7805.pdf")),
            }
        );
        assert_eq!(fetcher.requests().await, vec![SEARCH_URL, DETAIL_URL]);
    }

    #[tokio::test]
    async fn test_listed_without_pdf() {
        let detail = "<table><tr><td>No datasheet available</td></tr></table>";
        let (_, resolver) = resolver(MockFetcher::with_pages([(SEARCH_URL, SEARCH_PAGE), (DETAIL_URL, detail)]));
        let result = resolver.resolve("LM7805").await.unwrap();
        assert_eq!(result.description, "3-Terminal 1A Positive Voltage Regulator");
        assert_eq!(result.datasheet_url, None);
    }

    #[tokio::test]
    async fn test_unreachable_detail_page_is_not_an_error() {
        let (fetcher, resolver) = resolver(
            MockFetcher::with_pages([(SEARCH_URL, SEARCH_PAGE)]).with_status(DETAIL_URL, 500, "oops"),
        );
        let result = resolver.resolve("LM7805").await.unwrap();
        assert_eq!(result.datasheet_url, None);
        assert_eq!(fetcher.requests().await.len(), 2);
    }

    #[tokio::test]
    async fn test_no_matching_article() {
        let search_url = "https://www.datasheet4u.com/share_search.php?sWord=LM78";
        let (fetcher, resolver) = resolver(MockFetcher::with_pages([(search_url, SEARCH_PAGE)]));
        let err = resolver.resolve("LM78").await.unwrap_err();
        assert_eq!(&*err, &ErrorKind::NotFound(Stage::Article));
        // No detail page is fetched once the search comes up empty.
        assert_eq!(fetcher.requests().await, vec![search_url]);
    }

    #[tokio::test]
    async fn test_blank_query() {
        let (fetcher, resolver) = resolver(MockFetcher::default());
        let err = resolver.resolve("   ").await.unwrap_err();
        assert_eq!(&*err, &ErrorKind::MissingParameter("word"));
        assert!(fetcher.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_search_page_failure() {
        let (_, resolver) = resolver(MockFetcher::default().with_status(SEARCH_URL, 502, ""));
        let err = resolver.resolve("LM7805").await.unwrap_err();
        assert_eq!(&*err, &ErrorKind::Fetch("search page"));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_query_is_trimmed() {
        let (_, resolver) = resolver(MockFetcher::with_pages([(SEARCH_URL, SEARCH_PAGE), (DETAIL_URL, DETAIL_PAGE)]));
        let result = resolver.resolve("  LM7805 ").await.unwrap();
        assert_eq!(result.query, "LM7805");
    }

    #[test]
    fn test_serializes_camel_case() {
        let result = DatasheetResult {
            query: "NE555".to_string(),
            description: "Timer".to_string(),
            datasheet_url: None,
        };
        assert_eq!(
            serde_json::to_string(&result).unwrap(),
            r#"{"query":"NE555","description":"Timer","datasheetUrl":null}"#
        );
    }

    #[test]
    fn test_invalid_layout() {
        let layout = DatasheetLayout {
            pdf_link: "td a[".to_string(),
            ..Default::default()
        };
        let err = DatasheetResolver::new(Arc::new(MockFetcher::default()), layout).err().unwrap();
        assert_eq!(&*err, &ErrorKind::Layout);
    }
}
