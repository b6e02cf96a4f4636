use crate::extractors::{find_all_matching_class_substring, ParsingContext};
use crate::model::{ImportedRecipe, Ingredient, Step, DEFAULT_SERVINGS, PLACEHOLDER_TITLE};
use crate::normalizers::collapse_whitespace;
use log::debug;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

const TITLE_PATTERNS: &[&str] = &["recipe-title", "recipe__title", "recipe-name"];
const INGREDIENT_PATTERNS: &[&str] = &["ingredient"];
const INSTRUCTION_PATTERNS: &[&str] = &["instruction", "step", "direction"];

/// Longer text is taken to be a container rather than a single ingredient.
const MAX_INGREDIENT_CHARS: usize = 200;
/// Shorter text is taken to be a step number or icon label.
const MIN_STEP_CHARS: usize = 10;
const MAX_INGREDIENTS: usize = 50;
const MAX_STEPS: usize = 30;

static H1_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1").expect("h1 selector is valid"));
static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("title selector is valid"));
static META_DESCRIPTION_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("meta[name='description']").expect("meta description selector is valid")
});
// " - Site Name" / " | Site Name"
static SITE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s[-|].*$").expect("site suffix pattern is valid"));

/// Last-resort extraction from class names and generic page markup.
///
/// Never fails: a page with nothing recognisable still gives a record with
/// the placeholder title and no ingredients or steps.
pub struct HtmlClassExtractor;

impl HtmlClassExtractor {
    pub fn extract(&self, context: &ParsingContext) -> ImportedRecipe {
        debug!("HtmlClassExtractor: Extracting recipe from class names");
        let document = &context.document;

        let ingredients: Vec<Ingredient> = matching_texts(document, INGREDIENT_PATTERNS)
            .filter(|text| text.chars().count() <= MAX_INGREDIENT_CHARS)
            .take(MAX_INGREDIENTS)
            .map(Ingredient::named)
            .collect();

        let steps: Vec<Step> = matching_texts(document, INSTRUCTION_PATTERNS)
            .filter(|text| text.chars().count() > MIN_STEP_CHARS)
            .take(MAX_STEPS)
            .map(Step::new)
            .collect();

        debug!("HtmlClassExtractor: Ingredients count: {}", ingredients.len());
        debug!("HtmlClassExtractor: Instructions count: {}", steps.len());

        ImportedRecipe {
            title: infer_title(document),
            description: meta_description(document),
            prep_time_minutes: None,
            cook_time_minutes: None,
            servings: DEFAULT_SERVINGS,
            ingredients,
            steps,
            source_url: context.url.clone(),
        }
    }
}

fn element_text(element: &ElementRef) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

/// Non-empty texts of elements whose class contains one of `patterns`.
fn matching_texts<'a>(
    document: &'a Html,
    patterns: &[&str],
) -> impl Iterator<Item = String> + 'a {
    find_all_matching_class_substring(document, patterns)
        .into_iter()
        .map(|element| element_text(&element))
        .filter(|text| !text.is_empty())
}

fn infer_title(document: &Html) -> String {
    if let Some(title) = matching_texts(document, TITLE_PATTERNS).next() {
        debug!("HtmlClassExtractor: Title from class name");
        return title;
    }

    if let Some(title) = document
        .select(&H1_SELECTOR)
        .map(|h1| element_text(&h1))
        .find(|text| !text.is_empty())
    {
        debug!("HtmlClassExtractor: Title from h1");
        return title;
    }

    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|title| strip_site_suffix(&element_text(&title)))
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| PLACEHOLDER_TITLE.to_string())
}

fn strip_site_suffix(title: &str) -> String {
    SITE_SUFFIX.replace(title, "").trim().to_string()
}

fn meta_description(document: &Html) -> String {
    document
        .select(&META_DESCRIPTION_SELECTOR)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(collapse_whitespace)
        .unwrap_or_default()
}
