use itertools::Itertools;
use scraper::ElementRef;

/// Collapses every run of whitespace into a single space and trims both ends.
pub fn normalize(s: &str) -> String {
    s.split_whitespace().join(" ")
}

/// Rendered text of an element, normalized.
pub fn element_text(element: ElementRef) -> String {
    normalize(&element.text().collect::<String>())
}
