use crate::error::{ErrorKind, Result, Stage};
use crate::models::SubstitutionResult;
use exn::{OptionExt, ResultExt};
use partscout_extract::{SubstitutionLayout, SubstitutionSite, link};
use partscout_fetch::FetcherHandle;
use tracing::instrument;

/// Resolves an exact part designator to its list of substitutes.
pub struct SubstitutionResolver {
    fetcher: FetcherHandle,
    site: SubstitutionSite,
}

impl SubstitutionResolver {
    pub fn new(fetcher: FetcherHandle, layout: SubstitutionLayout) -> Result<Self> {
        Ok(Self {
            fetcher,
            site: SubstitutionSite::try_from(layout).or_raise(|| ErrorKind::Layout)?,
        })
    }

    pub fn site(&self) -> &SubstitutionSite {
        &self.site
    }

    /// Search, follow the link whose text is exactly the designator, follow
    /// the part page's substitution link, and read the table.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::MissingParameter`] if the designator is blank.
    /// - [`ErrorKind::NotFound`] with [`Stage::ExactTransistor`] or
    ///   [`Stage::SubstitutionLink`] if the chain ends early.
    /// - [`ErrorKind::Fetch`]/[`ErrorKind::Parse`] for anything else.
    ///
    /// An empty table is not an error; the result just has no MPNs.
    #[instrument(skip(self), fields(fetcher = self.fetcher.name()))]
    pub async fn resolve(&self, designator: &str) -> Result<SubstitutionResult> {
        let designator = designator.trim();
        if designator.is_empty() {
            exn::bail!(ErrorKind::MissingParameter("search"));
        }
        let search_url = self.site.search_url(designator).or_raise(|| ErrorKind::Parse("search URL"))?;
        let search_page = self.fetcher.fetch(&search_url).await.or_raise(|| ErrorKind::Fetch("search page"))?;
        let transistor_url = self
            .site
            .exact_part_link(&search_page, designator)
            .ok_or_raise(|| ErrorKind::NotFound(Stage::ExactTransistor))?;

        let part_url = link::parse(&transistor_url).or_raise(|| ErrorKind::Parse("transistor link"))?;
        let part_page = self.fetcher.fetch(&part_url).await.or_raise(|| ErrorKind::Fetch("transistor page"))?;
        let page = self.site.transistor_page(&transistor_url, &part_page);
        let substitution_url =
            page.substitution_link_url.ok_or_raise(|| ErrorKind::NotFound(Stage::SubstitutionLink))?;

        let table_url = link::parse(&substitution_url).or_raise(|| ErrorKind::Parse("substitution link"))?;
        let table_page = self.fetcher.fetch(&table_url).await.or_raise(|| ErrorKind::Fetch("substitution table"))?;
        let mpns = self.site.substitutes(&table_page);
        tracing::debug!(count = mpns.len(), "read substitution table");
        Ok(SubstitutionResult {
            base: designator.to_string(),
            transistor_url: page.canonical_url,
            substitution_url,
            mpns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use partscout_fetch::backend::MockFetcher;
    use std::sync::Arc;

    const SEARCH_URL: &str = "https://alltransistors.com/search.php?search=BC547";
    const PART_URL: &str = "https://alltransistors.com/transistor.php?transistor=1000";
    const TABLE_URL: &str = "https://alltransistors.com/substitution.php?transistor=1000";

    const SEARCH_PAGE: &str = r#"
        <ul>
            <li><a href="transistor.php?transistor=1001">BC547A</a></li>
            <li><a href="transistor.php?transistor=1000">BC547</a></li>
        </ul>
    "#;
    const PART_PAGE: &str = r#"
        <div>
            <span class="my-link" data-link="//alltransistors.com/pdf.php?transistor=1000">Datasheet</span>
            <span class="my-link" data-link="//alltransistors.com/substitution.php?transistor=1000">Substitution</span>
        </div>
    "#;
    const TABLE_PAGE: &str = r#"
        <table><tbody>
            <tr><td><a href="/t?1">BC548</a></td><td>NPN</td></tr>
            <tr><td>-</td><td>NPN</td></tr>
            <tr><td><a href="/t?2">2N3904</a></td><td>NPN</td></tr>
        </tbody></table>
    "#;

    fn resolver(fetcher: MockFetcher) -> (Arc<MockFetcher>, SubstitutionResolver) {
        let fetcher = Arc::new(fetcher);
        let resolver = SubstitutionResolver::new(fetcher.clone(), SubstitutionLayout::default()).unwrap();
        (fetcher, resolver)
    }

    #[tokio::test]
    async fn test_resolves_substitutes() {
        let (fetcher, resolver) = resolver(MockFetcher::with_pages([
            (SEARCH_URL, SEARCH_PAGE),
            (PART_URL, PART_PAGE),
            (TABLE_URL, TABLE_PAGE),
        ]));
        let result = resolver.resolve("BC547").await.unwrap();
        assert_eq!(
            result,
            SubstitutionResult {
                base: "BC547".to_string(),
                transistor_url: PART_URL.to_string(),
                substitution_url: TABLE_URL.to_string(),
                mpns: vec!["BC548".to_string(), "2N3904".to_string()],
            }
        );
        assert_eq!(fetcher.requests().await, vec![SEARCH_URL, PART_URL, TABLE_URL]);
    }

    #[tokio::test]
    async fn test_exact_transistor_not_found() {
        let search_url = "https://alltransistors.com/search.php?search=BC54";
        let (fetcher, resolver) = resolver(MockFetcher::with_pages([(search_url, SEARCH_PAGE)]));
        let err = resolver.resolve("BC54").await.unwrap_err();
        assert_eq!(&*err, &ErrorKind::NotFound(Stage::ExactTransistor));
        assert_eq!(fetcher.requests().await.len(), 1);
    }

    #[tokio::test]
    async fn test_substitution_link_not_found() {
        let part_page = r#"<span class="my-link" data-link="//x/pdf.php">Datasheet</span>"#;
        let (fetcher, resolver) = resolver(MockFetcher::with_pages([(SEARCH_URL, SEARCH_PAGE), (PART_URL, part_page)]));
        let err = resolver.resolve("BC547").await.unwrap_err();
        assert_eq!(&*err, &ErrorKind::NotFound(Stage::SubstitutionLink));
        assert_eq!(fetcher.requests().await.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_table_is_not_an_error() {
        let (_, resolver) = resolver(MockFetcher::with_pages([
            (SEARCH_URL, SEARCH_PAGE),
            (PART_URL, PART_PAGE),
            (TABLE_URL, "<p>No substitutes known.</p>"),
        ]));
        let result = resolver.resolve("BC547").await.unwrap();
        assert!(result.mpns.is_empty());
    }

    #[tokio::test]
    async fn test_table_fetch_failure() {
        let (_, resolver) = resolver(
            MockFetcher::with_pages([(SEARCH_URL, SEARCH_PAGE), (PART_URL, PART_PAGE)]).with_status(TABLE_URL, 500, ""),
        );
        let err = resolver.resolve("BC547").await.unwrap_err();
        assert_eq!(&*err, &ErrorKind::Fetch("substitution table"));
    }

    #[tokio::test]
    async fn test_blank_designator() {
        let (_, resolver) = resolver(MockFetcher::default());
        let err = resolver.resolve("").await.unwrap_err();
        assert_eq!(&*err, &ErrorKind::MissingParameter("search"));
    }

    #[test]
    fn test_serializes_camel_case() {
        let result = SubstitutionResult {
            base: "BC547".to_string(),
            transistor_url: PART_URL.to_string(),
            substitution_url: TABLE_URL.to_string(),
            mpns: vec!["BC548".to_string()],
        };
        let json: serde_json::Value = serde_json::to_value(&result).unwrap();
        assert_eq!(json["transistorUrl"], PART_URL);
        assert_eq!(json["substitutionUrl"], TABLE_URL);
        assert_eq!(json["mpns"], serde_json::json!(["BC548"]));
    }
}
