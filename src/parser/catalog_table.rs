use log::debug;
use scraper::{ElementRef, Html};
use zinc_vendors_utils::selector;

use crate::{
    schema::{group_by_vendor, SupplierCode, VendorListing, VendorName},
    text::element_text,
};

/// Leading header cells of the vendor table.
pub const HEADERS: [&str; 2] = ["Catalog Name", "Supplier code"];

/// Elements whose text is preferred over the enclosing code cell's.
const CLICKABLE: &str = "a, button";

fn child_elements<'a>(
    element: ElementRef<'a>,
    names: &'a [&'a str],
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |e| names.contains(&e.value().name()))
}

fn cells(tr: ElementRef) -> impl Iterator<Item = ElementRef> {
    child_elements(tr, &["th", "td"])
}

/// The first `tr` of `thead`, or else the first body row made of `th` cells.
pub fn header_row(table: ElementRef) -> Option<ElementRef> {
    if let Some(thead) = child_elements(table, &["thead"]).next() {
        return child_elements(thead, &["tr"]).next();
    }
    child_elements(table, &["tbody"])
        .flat_map(|tbody| child_elements(tbody, &["tr"]))
        .next()
        .filter(|tr| cells(*tr).any(|cell| cell.value().name() == "th"))
}

/// Normalized text of every header cell, in order.
pub fn header_cells(table: ElementRef) -> Vec<String> {
    header_row(table)
        .map(|tr| cells(tr).map(element_text).collect())
        .unwrap_or_default()
}

/// The leading header cells match [`HEADERS`], ignoring case.
pub fn is_vendor_table(table: ElementRef) -> bool {
    let headers = header_cells(table);
    headers.len() >= HEADERS.len()
        && HEADERS
            .iter()
            .zip(&headers)
            .all(|(x, y)| x.to_lowercase() == y.to_lowercase())
}

fn body_rows(table: ElementRef) -> impl Iterator<Item = ElementRef> {
    let header = header_row(table).map(|tr| tr.id());
    child_elements(table, &["tbody"])
        .flat_map(|tbody| child_elements(tbody, &["tr"]))
        .filter(move |tr| Some(tr.id()) != header)
}

/// Finds the vendor table.  The first one in document order wins.
pub fn find(html: &Html) -> Option<ElementRef> {
    let mut tables = html.select(selector!("table")).filter(|&t| is_vendor_table(t));
    let found = tables.next()?;
    let others = tables.count();
    if others > 0 {
        debug!("{others} more vendor table(s) found; using the first one");
    }
    Some(found)
}

pub fn parse(html: &Html) -> Option<VendorListing> {
    find(html).map(parse_table)
}

pub fn parse_table(table: ElementRef) -> VendorListing {
    group_by_vendor(body_rows(table).filter_map(parse_row))
}

fn parse_row(tr: ElementRef) -> Option<(VendorName, SupplierCode)> {
    let mut cells = cells(tr);
    let (vendor_cell, code_cell) = (cells.next()?, cells.next()?);
    let vendor = element_text(vendor_cell);
    let code = match code_cell.select(selector!(CLICKABLE)).next() {
        Some(clickable) => element_text(clickable),
        None => element_text(code_cell),
    };
    if vendor.is_empty() || code.is_empty() {
        return None;
    }
    Some((vendor.into(), code.into()))
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::{find, header_cells, parse};

    fn fields(html: &str) -> Vec<(String, String)> {
        parse(&Html::parse_document(html))
            .unwrap()
            .iter()
            .map(|(v, c)| (v.to_string(), c.to_string()))
            .collect()
    }

    const TABLE: &str = r#"
        <table class="table">
          <thead><tr><th> Catalog
            Name </th><th>Supplier code</th><th>Price</th></tr></thead>
          <tbody>
            <tr><td>VendorA</td><td><a href="/x">C1</a></td><td>1</td></tr>
            <tr><td>VendorA</td><td><a href="/y"> C2 </a></td><td>2</td></tr>
            <tr><td>VendorB</td><td>C3</td><td>3</td></tr>
            <tr><td>VendorA</td><td><button>C1</button></td><td>4</td></tr>
          </tbody>
        </table>"#;

    #[test]
    fn groups_codes_per_vendor() {
        assert_eq!(
            fields(TABLE),
            [
                ("VendorA".to_owned(), "C1 C2".to_owned()),
                ("VendorB".to_owned(), "C3".to_owned()),
            ]
        );
    }

    #[test]
    fn code_comes_from_link_inside_cell() {
        let html = r#"
            <table>
              <thead><tr><th>Catalog Name</th><th>Supplier code</th></tr></thead>
              <tbody>
                <tr><td>VendorA</td><td>code: <a href="/x">C7</a> <span>in stock</span></td></tr>
                <tr><td>VendorB</td><td><span>ref</span> <button> B 2 </button></td></tr>
                <tr><td>VendorC</td><td> plain  text </td></tr>
              </tbody>
            </table>"#;
        assert_eq!(
            fields(html),
            [
                ("VendorA".to_owned(), "C7".to_owned()),
                ("VendorB".to_owned(), "B 2".to_owned()),
                ("VendorC".to_owned(), "plain text".to_owned()),
            ]
        );
    }

    #[test]
    fn header_case_is_ignored() {
        let html = r#"
            <table>
              <thead><tr><th>Catalog name</th><th>SUPPLIER Code</th></tr></thead>
              <tbody><tr><td>VendorA</td><td>C1</td></tr></tbody>
            </table>"#;
        assert_eq!(fields(html), [("VendorA".to_owned(), "C1".to_owned())]);
    }

    #[test]
    fn skips_incomplete_rows() {
        let html = r#"
            <table>
              <tr><th>Catalog Name</th><th>Supplier code</th></tr>
              <tr><td>VendorA</td></tr>
              <tr><td> </td><td>C9</td></tr>
              <tr><td>VendorC</td><td><a></a></td></tr>
              <tr><td>VendorD</td><td>D1</td></tr>
            </table>"#;
        assert_eq!(fields(html), [("VendorD".to_owned(), "D1".to_owned())]);
    }

    #[test]
    fn headers_must_lead() {
        let html = Html::parse_document(
            r#"
            <table id="other"><thead><tr><th>Price</th><th>Catalog Name</th><th>Supplier code</th></tr></thead></table>
            "#,
        );
        assert!(find(&html).is_none());
    }

    #[test]
    fn first_matching_table_wins() {
        let html = Html::parse_document(
            r#"
            <table id="summary"><thead><tr><th>Catalog</th></tr></thead></table>
            <table id="first"><thead><tr><th>Catalog Name</th><th>Supplier code</th></tr></thead>
              <tbody><tr><td>VendorA</td><td>C1</td></tr></tbody></table>
            <table id="second"><thead><tr><th>Catalog Name</th><th>Supplier code</th></tr></thead>
              <tbody><tr><td>VendorZ</td><td>Z1</td></tr></tbody></table>
            "#,
        );
        let table = find(&html).unwrap();
        assert_eq!(table.value().attr("id"), Some("first"));
        assert_eq!(header_cells(table), ["Catalog Name", "Supplier code"]);
    }

    #[test]
    fn no_table() {
        assert!(parse(&Html::parse_document("<div id=\"app\"><p>Nothing</p></div>")).is_none());
    }
}
