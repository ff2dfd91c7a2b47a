//! Transient entities produced while walking a catalog site.
//!
//! None of these are persisted; they live for the duration of a single
//! resolution call.

/// A search-result article on the datasheet catalog that matched the query.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogArticle {
    /// Absolute URL of the article's detail page.
    pub link: String,
    /// Trimmed description text, or the layout's placeholder.
    pub description: String,
}

/// A part-detail page on the substitution catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransistorPage {
    pub canonical_url: String,
    /// Where the substitution table lives, if the page advertises one.
    pub substitution_link_url: Option<String>,
}
impl TransistorPage {
    pub fn new(canonical_url: impl Into<String>, substitution_link_url: Option<String>) -> Self {
        Self {
            canonical_url: canonical_url.into(),
            substitution_link_url,
        }
    }
}
