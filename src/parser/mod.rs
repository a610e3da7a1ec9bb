//! Vendor extraction from rendered substance pages.

pub mod catalog_table;
pub mod legacy_catalogs;

use log::debug;
use scraper::{Html, Selector};

use crate::{layout::Layout, schema::VendorListing};

/// Re-parses the markup of the root application container, or clones the whole
/// document if the page has none.
pub fn root_container(html: &Html, root: &Selector) -> Html {
    match html.select(root).next() {
        Some(container) => Html::parse_fragment(&container.html()),
        None => {
            debug!("Root container not found; parsing the whole document");
            html.clone()
        }
    }
}

/// The vendor table wins over the legacy list, which is only consulted on legacy pages.
pub fn parse_listing(html: &Html, layout: Layout) -> Option<VendorListing> {
    catalog_table::parse(html).or_else(|| match layout {
        Layout::LegacyCatalogs => legacy_catalogs::parse(html),
        Layout::CatalogTable => None,
    })
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::{parse_listing, root_container};
    use crate::layout::Layout;

    #[test]
    fn only_root_container_is_parsed() {
        let html = Html::parse_document(
            r#"
            <div id="sidebar"><table><thead><tr><th>Catalog Name</th><th>Supplier code</th></tr></thead>
              <tbody><tr><td>Ad</td><td>X</td></tr></tbody></table></div>
            <div id="app"><p>No vendors yet</p></div>"#,
        );
        let root = root_container(&html, &Selector::parse("#app").unwrap());
        assert!(parse_listing(&root, Layout::CatalogTable).is_none());
    }

    #[test]
    fn legacy_list_is_used_on_legacy_pages() {
        let html = Html::parse_document(
            r#"<div class="catalogs"><dl class="dl-delimited"><dt>A</dt><dd><a>1</a></dd></dl></div>"#,
        );
        let root = root_container(&html, &Selector::parse("#app").unwrap());
        assert!(parse_listing(&root, Layout::CatalogTable).is_none());
        let listing = parse_listing(&root, Layout::LegacyCatalogs).unwrap();
        assert_eq!(listing.len(), 1);
    }
}
