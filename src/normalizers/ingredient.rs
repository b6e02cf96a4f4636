use log::debug;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use super::clean_text;
use crate::model::Ingredient;

// leading quantity, optional unit token, rest is the name
static INGREDIENT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        ^(?P<quantity>
            [0-9¼½¾⅓⅔⅛⅜⅝⅞][0-9¼½¾⅓⅔⅛⅜⅝⅞.,/]*
            (?:\s+[0-9¼½¾⅓⅔⅛⅜⅝⅞][0-9¼½¾⅓⅔⅛⅜⅝⅞.,/]*)*
        )
        \s*
        (?:(?P<unit>tbsps?|tsps?|cups?|kg|ml|lbs?|oz|sp|g|l)\.?(?:\s+|$))?
        # a name never starts inside the quantity
        (?P<name>[^0-9¼½¾⅓⅔⅛⅜⅝⅞.,/\s].*)$",
    )
    .expect("ingredient pattern is valid")
});

/// Split a free-text ingredient line into amount, unit and name.
///
/// Lines without a readable leading quantity keep the whole text as the name.
pub fn parse_ingredient_line(line: &str) -> Ingredient {
    let line = line.trim();

    let Some(caps) = INGREDIENT_LINE.captures(line) else {
        return Ingredient::named(line);
    };

    let name = caps["name"].trim();
    let amount = parse_quantity(&caps["quantity"]);
    match amount {
        Some(amount) if !name.is_empty() => Ingredient {
            name: name.to_string(),
            amount: Some(amount),
            unit: caps.name("unit").map(|u| u.as_str().to_lowercase()),
            notes: None,
        },
        _ => {
            debug!("Unreadable quantity in ingredient line: {line}");
            Ingredient::named(line)
        }
    }
}

/// Ingredients from a `recipeIngredient` value, in document order.
///
/// Strings go through [`parse_ingredient_line`]; other entries become a bare
/// name. Entries with no text are dropped.
pub fn parse_ingredients(raw: Option<&Value>) -> Vec<Ingredient> {
    match raw {
        Some(Value::Array(items)) => items.iter().filter_map(ingredient_from_value).collect(),
        Some(single @ Value::String(_)) => ingredient_from_value(single).into_iter().collect(),
        _ => Vec::new(),
    }
}

fn ingredient_from_value(value: &Value) -> Option<Ingredient> {
    match value {
        Value::String(line) => clean_text(line).map(|line| parse_ingredient_line(&line)),
        Value::Null => None,
        Value::Object(obj) => {
            let label = ["name", "text"]
                .iter()
                .find_map(|key| obj.get(*key).and_then(Value::as_str))
                .map(str::to_string)
                .unwrap_or_else(|| value.to_string());
            clean_text(&label).map(Ingredient::named)
        }
        other => clean_text(&other.to_string()).map(Ingredient::named),
    }
}

fn parse_quantity(text: &str) -> Option<f64> {
    text.split_whitespace()
        .map(parse_quantity_token)
        .sum::<Option<f64>>()
}

fn parse_quantity_token(token: &str) -> Option<f64> {
    let last = token.chars().last()?;
    match vulgar_fraction(last) {
        Some(fraction) => {
            let whole = &token[..token.len() - last.len_utf8()];
            if whole.is_empty() {
                Some(fraction)
            } else {
                Some(parse_plain_number(whole)? + fraction)
            }
        }
        None => parse_plain_number(token),
    }
}

fn parse_plain_number(text: &str) -> Option<f64> {
    let value = match text.split_once('/') {
        Some((numerator, denominator)) => {
            let numerator: f64 = numerator.parse().ok()?;
            let denominator: f64 = denominator.parse().ok()?;
            if denominator == 0.0 {
                return None;
            }
            numerator / denominator
        }
        None => text.replace(',', ".").parse().ok()?,
    };
    value.is_finite().then_some(value)
}

fn vulgar_fraction(c: char) -> Option<f64> {
    let value = match c {
        '¼' => 0.25,
        '½' => 0.5,
        '¾' => 0.75,
        '⅓' => 1.0 / 3.0,
        '⅔' => 2.0 / 3.0,
        '⅛' => 0.125,
        '⅜' => 0.375,
        '⅝' => 0.625,
        '⅞' => 0.875,
        _ => return None,
    };
    Some(value)
}
