use super::{compile, text_of};
use crate::consts;
use crate::error::Result;
use crate::link;
use crate::models::TransistorPage;
use scraper::{Html, Selector};
use tracing::instrument;
use url::Url;

/// Where and how to look for substitute parts.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct SubstitutionLayout {
    pub base_url: String,
    pub search_path: String,
    pub search_param: String,
    /// Links to part-detail pages, on the search page.
    pub part_link: String,
    /// Elements that may advertise the substitution table, on a part page.
    pub marker: String,
    /// Text (case-insensitive) identifying the right marker.
    pub marker_text: String,
    /// Attribute on the marker carrying the table's URL.
    pub link_attribute: String,
    /// Rows of the substitution table.
    pub row: String,
    /// Cells within a row; only the first one is read.
    pub cell: String,
    /// Part links within a cell; only the first one is read.
    pub cell_link: String,
}
impl Default for SubstitutionLayout {
    fn default() -> Self {
        Self {
            base_url: consts::SUBSTITUTION_BASE_URL.to_string(),
            search_path: consts::SUBSTITUTION_SEARCH_PATH.to_string(),
            search_param: consts::SUBSTITUTION_SEARCH_PARAM.to_string(),
            part_link: consts::SUBSTITUTION_PART_LINK.to_string(),
            marker: consts::SUBSTITUTION_MARKER.to_string(),
            marker_text: consts::SUBSTITUTION_MARKER_TEXT.to_string(),
            link_attribute: consts::SUBSTITUTION_LINK_ATTRIBUTE.to_string(),
            row: consts::SUBSTITUTION_ROW.to_string(),
            cell: consts::SUBSTITUTION_CELL.to_string(),
            cell_link: consts::SUBSTITUTION_CELL_LINK.to_string(),
        }
    }
}

/// A [`SubstitutionLayout`] with compiled selectors.
#[derive(Debug)]
pub struct SubstitutionSite {
    layout: SubstitutionLayout,
    marker_text: String,
    part_link: Selector,
    marker: Selector,
    row: Selector,
    cell: Selector,
    cell_link: Selector,
}
impl TryFrom<SubstitutionLayout> for SubstitutionSite {
    type Error = crate::error::Error;
    fn try_from(layout: SubstitutionLayout) -> Result<Self> {
        link::parse(&layout.base_url)?;
        Ok(Self {
            marker_text: layout.marker_text.trim().to_lowercase(),
            part_link: compile(&layout.part_link)?,
            marker: compile(&layout.marker)?,
            row: compile(&layout.row)?,
            cell: compile(&layout.cell)?,
            cell_link: compile(&layout.cell_link)?,
            layout,
        })
    }
}
impl SubstitutionSite {
    pub fn layout(&self) -> &SubstitutionLayout {
        &self.layout
    }

    pub fn search_url(&self, designator: &str) -> Result<Url> {
        link::search_url(&self.layout.base_url, &self.layout.search_path, &self.layout.search_param, designator)
    }

    /// Resolves a link found on this site to an absolute URL.
    pub fn resolve(&self, href: &str) -> String {
        link::resolve(&self.layout.base_url, href)
    }

    /// Finds the part link whose text is exactly the designator.
    ///
    /// Stricter than the datasheet search on purpose: `BC547` must not pick
    /// up `BC547A`, because the substitutes of the two differ.
    #[instrument(level = "debug", skip(self, html), fields(html_size = html.len()))]
    pub fn exact_part_link(&self, html: &str, designator: &str) -> Option<String> {
        let wanted = designator.trim().to_lowercase();
        let document = Html::parse_document(html);
        document
            .select(&self.part_link)
            .find(|el| text_of(el).trim().to_lowercase() == wanted)
            .and_then(|el| el.value().attr("href"))
            .map(|href| self.resolve(href))
    }

    /// Reads the substitution-table link off a part-detail page.
    ///
    /// Only the first marker carrying the marker text is considered; if it
    /// doesn't have the link attribute there is no table.
    #[instrument(level = "debug", skip(self, html), fields(html_size = html.len()))]
    pub fn transistor_page(&self, url: &str, html: &str) -> TransistorPage {
        let document = Html::parse_document(html);
        let substitution_link_url = document
            .select(&self.marker)
            .find(|el| text_of(el).trim().to_lowercase().contains(&self.marker_text))
            .and_then(|el| el.value().attr(&self.layout.link_attribute))
            .map(str::trim)
            .filter(|link| !link.is_empty())
            .map(link::normalize_protocol_relative);
        TransistorPage::new(url, substitution_link_url)
    }

    /// Lists the equivalent part numbers from a substitution table, in row
    /// order, skipping rows without a linked part in their first cell.
    /// Duplicates are kept.
    #[instrument(level = "debug", skip(self, html), fields(html_size = html.len()))]
    pub fn substitutes(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        document
            .select(&self.row)
            .filter_map(|row| row.select(&self.cell).next())
            .filter_map(|cell| cell.select(&self.cell_link).next())
            .map(|anchor| text_of(&anchor).trim().to_string())
            .filter(|mpn| !mpn.is_empty())
            .collect()
    }
}
