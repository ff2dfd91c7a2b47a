//! Free-text filtering of the stock.
//!
//! Filtering happens in Rust rather than SQL: the stock of a hobby bench is
//! small, and matching must ignore punctuation (`LM-7805` finds `LM7805`),
//! which SQLite's `LIKE` can't do.

use crate::error::{ErrorKind, Result};
use crate::models::ElectronicComponent;
use exn::ResultExt;
use icu_collator::{Collator, CollatorOptions};
use icu_locid::locale;
use partscout_extract::query::{normalize_for_match, tokens};

/// Normalized searchable fields of a component, in sort-priority order.
fn fields(component: &ElectronicComponent) -> [String; 4] {
    [
        normalize_for_match(&component.mpn),
        normalize_for_match(&component.description),
        normalize_for_match(component.packaging.as_deref().unwrap_or_default()),
        normalize_for_match(&component.place),
    ]
}

fn sort_key(component: &ElectronicComponent) -> String {
    fields(component).into_iter().find(|field| !field.is_empty()).unwrap_or_default()
}

/// Splits every term into tokens. Blank terms contribute nothing.
pub fn parse_terms<S: AsRef<str>>(terms: &[S]) -> Vec<String> {
    terms.iter().flat_map(|term| tokens(term.as_ref())).collect()
}

/// Whether every token occurs in at least one field of the component.
pub fn matches(component: &ElectronicComponent, tokens: &[String]) -> bool {
    let fields = fields(component);
    tokens.iter().all(|token| fields.iter().any(|field| field.contains(token.as_str())))
}

/// Croatian collation: `č` and `ć` follow `c`, `đ` follows `d`.
fn collator() -> Result<Collator> {
    Collator::try_new(&locale!("hr").into(), CollatorOptions::new()).or_raise(|| ErrorKind::Collation)
}

/// Keeps the components matching all tokens, ordered by their first
/// non-empty field (MPN, then description, packaging, place) and then id.
///
/// With no tokens the stock is returned unfiltered, in id order.
pub fn filter(mut components: Vec<ElectronicComponent>, tokens: &[String]) -> Result<Vec<ElectronicComponent>> {
    if tokens.is_empty() {
        components.sort_by_key(|component| component.id);
        return Ok(components);
    }
    let collator = collator()?;
    let mut keyed = components
        .into_iter()
        .filter(|component| matches(component, tokens))
        .map(|component| (sort_key(&component), component))
        .collect::<Vec<_>>();
    keyed.sort_by(|(a_key, a), (b_key, b)| collator.compare(a_key, b_key).then_with(|| a.id.cmp(&b.id)));
    Ok(keyed.into_iter().map(|(_, component)| component).collect())
}
