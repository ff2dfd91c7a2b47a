//! Filling in stock records from the datasheet catalog.

use crate::error::{ErrorKind, Result};
use exn::{OptionExt, ResultExt};
use partscout_inventory::Inventory;
use partscout_inventory::models::ElectronicComponent;
use partscout_resolve::{DatasheetResolver, DatasheetResult};
use tracing::instrument;

/// Which fields a lookup may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Only fields that are still empty.
    FillMissing,
    /// Whatever the catalog has an answer for.
    Overwrite,
}

/// Merges a lookup result into a component. Returns whether anything changed.
///
/// The catalog's "no description" placeholder never replaces a real one.
pub fn apply(component: &mut ElectronicComponent, found: DatasheetResult, placeholder: &str, mode: Mode) -> bool {
    let mut changed = false;
    let description = found.description.trim();
    let has_description = !component.description.trim().is_empty();
    if !description.is_empty() && description != placeholder && (mode == Mode::Overwrite || !has_description) {
        changed |= component.description != description;
        component.description = description.to_string();
    }
    if let Some(url) = found.datasheet_url {
        let has_datasheet = component.datasheet.as_deref().is_some_and(|ds| !ds.trim().is_empty());
        if mode == Mode::Overwrite || !has_datasheet {
            changed |= component.datasheet.as_deref() != Some(url.as_str());
            component.datasheet = Some(url);
        }
    }
    changed
}

/// Looks the component's MPN up in the datasheet catalog and writes back
/// whatever it learned.
#[instrument(skip(inventory, resolver))]
pub async fn enrich(
    inventory: &dyn Inventory,
    resolver: &DatasheetResolver,
    mpn: &str,
    mode: Mode,
) -> Result<ElectronicComponent> {
    let mut component = inventory
        .find_by_mpn(mpn)
        .await
        .or_raise(|| ErrorKind::Inventory)?
        .ok_or_raise(|| ErrorKind::UnknownMpn(mpn.to_string()))?;
    let found = resolver.resolve(&component.mpn).await.or_raise(|| ErrorKind::Resolve)?;
    let placeholder = resolver.site().layout().missing_description.as_str();
    if !apply(&mut component, found, placeholder, mode) {
        tracing::debug!(id = component.id, "nothing new to record");
        return Ok(component);
    }
    let written = inventory.write(&component).await.or_raise(|| ErrorKind::Inventory)?;
    tracing::info!(id = written.id, mpn = written.mpn.as_str(), "component enriched");
    Ok(written)
}
