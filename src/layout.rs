//! Recognition of the two known substance page layouts.

use derive_more::Display;
use scraper::{Html, Selector};
use zinc_vendors_utils::selector;

use crate::parser::{catalog_table, legacy_catalogs};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Display)]
pub enum Layout {
    /// Vendors in a table headed by "Catalog Name" and "Supplier code".
    #[display("catalog table")]
    CatalogTable,
    /// Vendors in a `dl` under `div.catalogs`.
    #[display("legacy catalogs")]
    LegacyCatalogs,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Display)]
pub enum PageState {
    #[display("ready ({_0})")]
    Ready(Layout),
    #[display("loading")]
    Loading,
    #[display("pending")]
    Pending,
}

pub fn has_catalog_table(html: &Html) -> bool {
    html.select(selector!("table")).any(|table| {
        let headers = catalog_table::header_cells(table)
            .into_iter()
            .map(|s| s.to_lowercase())
            .collect::<Vec<_>>();
        catalog_table::HEADERS
            .iter()
            .all(|expected| headers.contains(&expected.to_lowercase()))
    })
}

pub fn has_legacy_catalogs(html: &Html) -> bool {
    html.select(selector!(legacy_catalogs::CONTAINER))
        .next()
        .is_some()
}

pub fn has_spinner(html: &Html, spinner: &Selector) -> bool {
    html.select(spinner).next().is_some()
}

/// Checks the detectors in priority order.
pub fn detect(html: &Html, spinner: &Selector) -> PageState {
    if has_catalog_table(html) {
        PageState::Ready(Layout::CatalogTable)
    } else if has_legacy_catalogs(html) {
        PageState::Ready(Layout::LegacyCatalogs)
    } else if has_spinner(html, spinner) {
        PageState::Loading
    } else {
        PageState::Pending
    }
}
