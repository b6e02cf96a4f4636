use crate::model::ImportedRecipe;
use scraper::Html;
use serde_json::Value;

mod class_match;
mod html_class;
mod json_ld;

pub use class_match::find_all_matching_class_substring;
pub use html_class::HtmlClassExtractor;
pub use json_ld::JsonLdExtractor;

pub struct ParsingContext {
    pub url: String,
    pub document: Html,
}

impl ParsingContext {
    pub fn new(html: &str, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            document: Html::parse_document(html),
        }
    }
}

/// A strategy that may or may not find a recipe in a page.
///
/// `None` means "not here", which is expected and sends the pipeline on to
/// the next strategy.
pub trait Extractor {
    fn parse(&self, context: &ParsingContext) -> Option<ImportedRecipe>;
}

/// True if the JSON-LD `@type` of `value` is `expected`, or is a list containing it.
pub fn has_schema_type(value: &Value, expected: &str) -> bool {
    match value.get("@type") {
        Some(Value::String(t)) => t == expected,
        Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some(expected)),
        _ => false,
    }
}
