//! Default catalog layouts.
//!
//! The two catalog sites the resolvers were written against. Everything here
//! is only a default; layouts are configuration data and can be overridden.

pub(crate) const DATASHEET_BASE_URL: &str = "https://www.datasheet4u.com";
pub(crate) const DATASHEET_SEARCH_PATH: &str = "share_search.php";
pub(crate) const DATASHEET_SEARCH_PARAM: &str = "sWord";
pub(crate) const DATASHEET_ARTICLE: &str = "article";
pub(crate) const DATASHEET_ARTICLE_LINK: &str = "a";
pub(crate) const DATASHEET_DESCRIPTION: &str = "p";
pub(crate) const DATASHEET_PDF_LINK: &str = "td a[href*='.pdf']";
/// "Description not found", shown when the catalog article has no blurb.
pub(crate) const DATASHEET_MISSING_DESCRIPTION: &str = "Opis nije pronađen";

pub(crate) const SUBSTITUTION_BASE_URL: &str = "https://alltransistors.com";
pub(crate) const SUBSTITUTION_SEARCH_PATH: &str = "search.php";
pub(crate) const SUBSTITUTION_SEARCH_PARAM: &str = "search";
pub(crate) const SUBSTITUTION_PART_LINK: &str = "a[href*='transistor.php']";
pub(crate) const SUBSTITUTION_MARKER: &str = "span.my-link";
pub(crate) const SUBSTITUTION_MARKER_TEXT: &str = "substitution";
pub(crate) const SUBSTITUTION_LINK_ATTRIBUTE: &str = "data-link";
pub(crate) const SUBSTITUTION_ROW: &str = "table tbody tr";
pub(crate) const SUBSTITUTION_CELL: &str = "td";
pub(crate) const SUBSTITUTION_CELL_LINK: &str = "a";

/// Characters which may not directly follow a whole-word match. Catalog
/// listings glue suffixes onto part numbers with these (`LM7805-T`,
/// `BC547/B`, `LM317.PDF`), so a match followed by one is a different part.
pub(crate) const FORBIDDEN_TRAILERS: &[char] = &['-', '/', '.'];
