use super::{has_schema_type, Extractor, ParsingContext};
use crate::model::{ImportedRecipe, Ingredient, Step, PLACEHOLDER_TITLE};
use crate::normalizers::{
    clean_text, flatten_instructions, parse_duration_minutes, parse_ingredients, parse_servings,
};
use log::debug;
use reqwest::Url;
use scraper::Selector;
use serde::Deserialize;
use serde_json::Value;
use std::sync::LazyLock;

static JSON_LD_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("script[type='application/ld+json']").expect("JSON-LD selector is valid")
});

/// Reads the first schema.org `Recipe` embedded as JSON-LD.
pub struct JsonLdExtractor;

impl JsonLdExtractor {
    fn convert_to_recipe(&self, json_ld_recipe: JsonLdRecipe, url: &str) -> ImportedRecipe {
        let title = json_ld_recipe
            .name
            .as_ref()
            .and_then(text_value)
            .unwrap_or_else(|| PLACEHOLDER_TITLE.to_string());

        let description = json_ld_recipe
            .description
            .as_ref()
            .and_then(text_value)
            .unwrap_or_default();

        let ingredients: Vec<Ingredient> =
            parse_ingredients(json_ld_recipe.recipe_ingredient.as_ref());
        let steps: Vec<Step> = flatten_instructions(json_ld_recipe.recipe_instructions.as_ref())
            .into_iter()
            .map(Step::new)
            .collect();

        ImportedRecipe {
            title,
            description,
            prep_time_minutes: parse_duration_minutes(
                json_ld_recipe.prep_time.as_ref().and_then(Value::as_str),
            ),
            cook_time_minutes: parse_duration_minutes(
                json_ld_recipe.cook_time.as_ref().and_then(Value::as_str),
            ),
            servings: parse_servings(json_ld_recipe.recipe_yield.as_ref()),
            ingredients,
            steps,
            source_url: resolve_source_url(json_ld_recipe.url.as_ref(), url),
        }
    }
}

/// The recipe fields the importer reads. Every field is optional and loosely
/// typed so that any JSON object converts; shape handling is left to the
/// normalizers.
#[derive(Debug, Default, Deserialize)]
struct JsonLdRecipe {
    name: Option<Value>,
    description: Option<Value>,
    #[serde(rename = "prepTime")]
    prep_time: Option<Value>,
    #[serde(rename = "cookTime")]
    cook_time: Option<Value>,
    #[serde(rename = "recipeYield")]
    recipe_yield: Option<Value>,
    #[serde(rename = "recipeIngredient")]
    recipe_ingredient: Option<Value>,
    #[serde(rename = "recipeInstructions")]
    recipe_instructions: Option<Value>,
    url: Option<Value>,
}

impl TryFrom<&Value> for JsonLdRecipe {
    type Error = serde_json::Error;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value.clone())
    }
}

/// Text of a string, a `{ "text": ... }` object or the first usable list entry.
fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => clean_text(s),
        Value::Object(obj) => obj.get("text").and_then(Value::as_str).and_then(clean_text),
        Value::Array(items) => items.iter().find_map(text_value),
        _ => None,
    }
}

/// The recipe's declared `url`, resolved against the page when relative.
fn resolve_source_url(declared: Option<&Value>, page_url: &str) -> String {
    let Some(declared) = declared
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|u| !u.is_empty())
    else {
        return page_url.to_string();
    };

    match Url::parse(declared) {
        Ok(absolute) if matches!(absolute.scheme(), "http" | "https") => declared.to_string(),
        Ok(_) => page_url.to_string(),
        Err(_) => Url::parse(page_url)
            .and_then(|base| base.join(declared))
            .map(String::from)
            .unwrap_or_else(|_| page_url.to_string()),
    }
}

/// Values to test for the `Recipe` type, in order: the elements of a
/// top-level array, or the value itself followed by its `@graph` entries.
fn recipe_candidates(json_ld: &Value) -> Vec<&Value> {
    match json_ld {
        Value::Array(items) => items.iter().collect(),
        _ => {
            let mut candidates = vec![json_ld];
            match json_ld.get("@graph") {
                Some(Value::Array(graph)) => candidates.extend(graph),
                Some(single @ Value::Object(_)) => candidates.push(single),
                _ => {}
            }
            candidates
        }
    }
}

fn parse_json_block(raw: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("JsonLdExtractor: Invalid JSON ({e}), retrying after repair");
            serde_json::from_str::<Value>(&repair_json(raw)).ok()
        }
    }
}

/// Fix the two faults publishers most often leave in hand-written JSON-LD:
/// raw line breaks inside strings and trailing commas.
fn repair_json(json_str: &str) -> String {
    let chars: Vec<char> = json_str.chars().collect();
    let mut repaired = String::with_capacity(json_str.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            match c {
                _ if escaped => {
                    escaped = false;
                    repaired.push(c);
                }
                '\\' => {
                    escaped = true;
                    repaired.push(c);
                }
                '"' => {
                    in_string = false;
                    repaired.push(c);
                }
                '\n' | '\r' | '\t' => repaired.push(' '),
                _ => repaired.push(c),
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                repaired.push(c);
            }
            ',' => {
                let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
                if !matches!(next, Some(']') | Some('}')) {
                    repaired.push(c);
                }
            }
            _ => repaired.push(c),
        }
    }

    repaired
}

impl Extractor for JsonLdExtractor {
    fn parse(&self, context: &ParsingContext) -> Option<ImportedRecipe> {
        debug!("JsonLdExtractor: Starting parse for URL: {}", context.url);

        let scripts: Vec<_> = context.document.select(&JSON_LD_SELECTOR).collect();
        debug!(
            "JsonLdExtractor: Found {} JSON-LD script tags",
            scripts.len()
        );

        for (index, script) in scripts.iter().enumerate() {
            let raw_json: String = script.text().collect();
            let Some(json_ld) = parse_json_block(&raw_json) else {
                debug!("JsonLdExtractor: Skipping malformed JSON-LD block {index}");
                continue;
            };

            let Some(recipe) = recipe_candidates(&json_ld)
                .into_iter()
                .find(|candidate| has_schema_type(candidate, "Recipe"))
            else {
                debug!("JsonLdExtractor: No Recipe in JSON-LD block {index}");
                continue;
            };

            debug!("JsonLdExtractor: Found Recipe in JSON-LD block {index}");
            let json_ld_recipe = JsonLdRecipe::try_from(recipe).unwrap_or_else(|e| {
                debug!("JsonLdExtractor: Unexpected Recipe shape ({e}), using defaults");
                JsonLdRecipe::default()
            });
            return Some(self.convert_to_recipe(json_ld_recipe, &context.url));
        }

        debug!("JsonLdExtractor: No valid recipe found in any JSON-LD script");
        None
    }
}
