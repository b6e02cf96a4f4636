use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static WITH_CLASS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[class]").expect("class selector is valid"));

/// Every element, in document order, whose `class` attribute contains any of
/// `patterns` as a case-insensitive substring.
///
/// Patterns are expected in lowercase.
pub fn find_all_matching_class_substring<'a>(
    document: &'a Html,
    patterns: &[&str],
) -> Vec<ElementRef<'a>> {
    document
        .select(&WITH_CLASS)
        .filter(|element| {
            element
                .value()
                .attr("class")
                .map(|class| {
                    let class = class.to_lowercase();
                    patterns.iter().any(|pattern| class.contains(pattern))
                })
                .unwrap_or(false)
        })
        .collect()
}
