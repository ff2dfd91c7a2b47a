//! Site layouts and the extractors that walk them.
//!
//! A layout is plain configuration data (base URL, search endpoint, CSS
//! selectors, marker text). A site is a layout whose selectors have been
//! compiled, which is where invalid configuration is caught.

mod datasheet;
mod substitution;

pub use self::datasheet::{DatasheetLayout, DatasheetSite};
pub use self::substitution::{SubstitutionLayout, SubstitutionSite};
use crate::error::{ErrorKind, Result};
use scraper::{ElementRef, Selector};

fn compile(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|err| {
        exn::Exn::from(ErrorKind::InvalidSelector {
            selector: css.to_string(),
            reason: err.to_string(),
        })
    })
}

fn text_of(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// Text as a reader sees it: separate text nodes stay separate words, so
/// `<h3>LM7805</h3><p>Regulator</p>` reads `LM7805 Regulator`.
fn visible_text(element: &ElementRef<'_>) -> String {
    element.text().map(str::trim).filter(|text| !text.is_empty()).collect::<Vec<_>>().join(" ")
}
