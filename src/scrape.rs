use std::time::Duration;

use derive_more::Display;
use log::{info, warn};

use crate::{
    browser::PageSource,
    config::LookupSettings,
    layout::{Layout, PageState},
    parser,
    schema::{MoleculeId, Row, VendorListing},
    wait::wait_until_ready,
};

/// Reasons a single lookup produced no vendors.  None of them stops the run.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Page was not ready within {0:?} (last seen: {1})")]
    Timeout(Duration, PageState),
    #[error("Failed to load the page: {0}")]
    Navigation(String),
    #[error("No vendor listing found on the {0} page")]
    ListingNotFound(Layout),
}

#[derive(Clone, Copy, Default, PartialEq, Eq, Debug, Display)]
#[display(
    "{processed} processed, {with_vendors} with vendors, {timed_out} timed out, \
     {listing_not_found} without a vendor listing, {navigation_failed} failed to load"
)]
pub struct ScrapeSummary {
    pub processed: usize,
    pub with_vendors: usize,
    pub timed_out: usize,
    pub listing_not_found: usize,
    pub navigation_failed: usize,
}
impl ScrapeSummary {
    fn record(&mut self, outcome: &Result<VendorListing, LookupError>) {
        self.processed += 1;
        match outcome {
            Ok(listing) if !listing.is_empty() => self.with_vendors += 1,
            Ok(_) => {}
            Err(LookupError::Timeout(..)) => self.timed_out += 1,
            Err(LookupError::Navigation(_)) => self.navigation_failed += 1,
            Err(LookupError::ListingNotFound(_)) => self.listing_not_found += 1,
        }
    }
}

/// Looks up every identifier in order, one page at a time.
pub fn scrape_all<S: PageSource + ?Sized>(
    source: &mut S,
    settings: &LookupSettings,
    ids: &[MoleculeId],
) -> (Vec<Row>, ScrapeSummary) {
    let mut summary = ScrapeSummary::default();
    let rows = ids
        .iter()
        .enumerate()
        .map(|(i, id)| {
            info!("[{}/{}] {id}", i + 1, ids.len());
            let outcome = scrape_one(&mut *source, settings, id);
            summary.record(&outcome);
            match outcome {
                Ok(listing) => Row::new(id.clone(), listing),
                Err(e) => {
                    warn!("Vendors not found for {id}: {e}");
                    Row::bare(id.clone())
                }
            }
        })
        .collect();
    info!("Scraping finished: {summary}");
    (rows, summary)
}

pub fn scrape_one<S: PageSource + ?Sized>(
    source: &mut S,
    settings: &LookupSettings,
    id: &MoleculeId,
) -> Result<VendorListing, LookupError> {
    let url = settings
        .url_template
        .url_for(id)
        .map_err(|e| LookupError::Navigation(format!("{e:#}")))?;
    source
        .navigate(&url)
        .map_err(|e| LookupError::Navigation(format!("{e:#}")))?;
    let ready = wait_until_ready(
        source,
        &settings.spinner,
        settings.ready_timeout,
        settings.poll_interval,
    )?;
    let root = parser::root_container(&ready.html, &settings.root);
    parser::parse_listing(&root, ready.layout)
        .ok_or(LookupError::ListingNotFound(ready.layout))
}
