use scraper::{ElementRef, Html};
use zinc_vendors_utils::selector;

use crate::{
    schema::{group_by_vendor, SupplierCode, VendorListing, VendorName},
    text::element_text,
};

pub const CONTAINER: &str = "div.catalogs dl.dl-delimited";

pub fn parse(html: &Html) -> Option<VendorListing> {
    html.select(selector!(CONTAINER)).next().map(parse_list)
}

/// Each `dt` names a vendor; the `dd` right after it holds one link per supplier code.
pub fn parse_list(dl: ElementRef) -> VendorListing {
    let pairs = dl
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|e| e.value().name() == "dt")
        .flat_map(|dt| {
            let vendor = element_text(dt);
            let codes = if vendor.is_empty() {
                vec![]
            } else {
                next_dd(dt).map(parse_codes).unwrap_or_default()
            };
            codes
                .into_iter()
                .map(move |code| (VendorName::from(vendor.clone()), code))
        });
    group_by_vendor(pairs)
}

fn next_dd(dt: ElementRef) -> Option<ElementRef> {
    dt.next_siblings()
        .filter_map(ElementRef::wrap)
        .next()
        .filter(|e| e.value().name() == "dd")
}

fn parse_codes(dd: ElementRef) -> Vec<SupplierCode> {
    let mut links = dd.select(selector!("a")).peekable();
    let texts: Vec<String> = if links.peek().is_some() {
        links.map(element_text).collect()
    } else {
        vec![element_text(dd)]
    };
    texts
        .into_iter()
        .filter(|s| !s.is_empty())
        .map(SupplierCode::from)
        .collect()
}
