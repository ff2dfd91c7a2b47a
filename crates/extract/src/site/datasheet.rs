use super::{compile, text_of, visible_text};
use crate::consts;
use crate::error::{ErrorKind, Result};
use crate::link;
use crate::models::CatalogArticle;
use crate::query::WholeWord;
use scraper::{Html, Selector};
use tracing::instrument;
use url::Url;

/// Where and how to look for datasheets.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct DatasheetLayout {
    pub base_url: String,
    pub search_path: String,
    pub search_param: String,
    /// One search result.
    pub article: String,
    /// Link to the detail page, within an article.
    pub article_link: String,
    /// Description text, within the article link.
    pub description: String,
    /// Link to the PDF, on the detail page.
    pub pdf_link: String,
    /// Description used when the article has none.
    pub missing_description: String,
}
impl Default for DatasheetLayout {
    fn default() -> Self {
        Self {
            base_url: consts::DATASHEET_BASE_URL.to_string(),
            search_path: consts::DATASHEET_SEARCH_PATH.to_string(),
            search_param: consts::DATASHEET_SEARCH_PARAM.to_string(),
            article: consts::DATASHEET_ARTICLE.to_string(),
            article_link: consts::DATASHEET_ARTICLE_LINK.to_string(),
            description: consts::DATASHEET_DESCRIPTION.to_string(),
            pdf_link: consts::DATASHEET_PDF_LINK.to_string(),
            missing_description: consts::DATASHEET_MISSING_DESCRIPTION.to_string(),
        }
    }
}

/// A [`DatasheetLayout`] with compiled selectors.
#[derive(Debug)]
pub struct DatasheetSite {
    layout: DatasheetLayout,
    article: Selector,
    article_link: Selector,
    description: Selector,
    pdf_link: Selector,
}
impl TryFrom<DatasheetLayout> for DatasheetSite {
    type Error = crate::error::Error;
    fn try_from(layout: DatasheetLayout) -> Result<Self> {
        link::parse(&layout.base_url)?;
        Ok(Self {
            article: compile(&layout.article)?,
            article_link: compile(&layout.article_link)?,
            description: compile(&layout.description)?,
            pdf_link: compile(&layout.pdf_link)?,
            layout,
        })
    }
}
impl DatasheetSite {
    pub fn layout(&self) -> &DatasheetLayout {
        &self.layout
    }

    pub fn search_url(&self, query: &str) -> Result<Url> {
        link::search_url(&self.layout.base_url, &self.layout.search_path, &self.layout.search_param, query)
    }

    /// Resolves a link found on this site to an absolute URL.
    pub fn resolve(&self, href: &str) -> String {
        link::resolve(&self.layout.base_url, href)
    }

    /// Finds the first article on a search-results page whose text contains
    /// the query as a whole word.
    ///
    /// There is no scoring: the first match in document order wins. Returns
    /// `Ok(None)` if nothing matched, and an error if the winning article
    /// has no usable link (the page isn't shaped the way the layout says).
    #[instrument(level = "debug", skip(self, html, matcher), fields(html_size = html.len(), query = matcher.query()))]
    pub fn find_article(&self, html: &str, matcher: &WholeWord) -> Result<Option<CatalogArticle>> {
        let document = Html::parse_document(html);
        let Some(article) = document.select(&self.article).find(|el| matcher.is_match(&visible_text(el))) else {
            return Ok(None);
        };
        let Some(anchor) = article.select(&self.article_link).next() else {
            exn::bail!(ErrorKind::MissingAttribute {
                element: "article",
                attribute: "href",
            });
        };
        let Some(href) = anchor.value().attr("href").filter(|href| !href.trim().is_empty()) else {
            exn::bail!(ErrorKind::MissingAttribute {
                element: "article link",
                attribute: "href",
            });
        };
        let description = anchor.select(&self.description).map(|el| text_of(&el)).collect::<String>();
        let description = match description.trim() {
            "" => self.layout.missing_description.clone(),
            trimmed => trimmed.to_string(),
        };
        Ok(Some(CatalogArticle {
            link: self.resolve(href),
            description,
        }))
    }

    /// Finds the first PDF link on an article's detail page.
    ///
    /// `None` is a legitimate answer: the part is listed, but there's no
    /// downloadable datasheet.
    #[instrument(level = "debug", skip(self, html), fields(html_size = html.len()))]
    pub fn datasheet_link(&self, html: &str) -> Option<String> {
        let document = Html::parse_document(html);
        document
            .select(&self.pdf_link)
            .next()
            .and_then(|el| el.value().attr("href"))
            .filter(|href| !href.trim().is_empty())
            .map(|href| self.resolve(href))
    }
}
