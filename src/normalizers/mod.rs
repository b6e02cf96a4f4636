//! Field normalizers shared by the extractors.
//!
//! Every function here is pure and total: input that does not fit the
//! expected shape degrades to an absent value or a default instead of an error.

mod duration;
mod ingredient;
mod instructions;
mod servings;

pub use duration::parse_duration_minutes;
pub use ingredient::{parse_ingredient_line, parse_ingredients};
pub use instructions::{flatten_instructions, InstructionNode};
pub use servings::parse_servings;

use html_escape::decode_html_entities;

/// Decode HTML entities in text lifted from JSON-LD.
pub fn decode_html_symbols(text: &str) -> String {
    // some sites double-encode, e.g. `&amp;#39;`
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

/// Collapse every run of whitespace into a single space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decoded, whitespace-normalised text, or `None` if nothing is left.
pub(crate) fn clean_text(text: &str) -> Option<String> {
    let cleaned = collapse_whitespace(&decode_html_symbols(text));
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_double_encoded_entities() {
        assert_eq!(decode_html_symbols("Mom&amp;#39;s pie"), "Mom's pie");
        assert_eq!(decode_html_symbols("Salt &amp; pepper"), "Salt & pepper");
    }

    #[test]
    fn test_clean_text_drops_blank() {
        assert_eq!(clean_text("  \n\t "), None);
        assert_eq!(clean_text(" Mix\n   well "), Some("Mix well".to_string()));
    }
}
