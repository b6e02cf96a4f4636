use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::model::DEFAULT_SERVINGS;

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("digit pattern is valid"));

/// Serving count from a `recipeYield`-like value.
///
/// Numbers are used directly, strings contribute their first run of digits,
/// arrays are scanned for the first element that yields a count. Anything
/// else, or a count below one, gives the default of 4.
pub fn parse_servings(raw: Option<&Value>) -> u32 {
    raw.and_then(servings_from_value)
        .unwrap_or(DEFAULT_SERVINGS)
}

fn servings_from_value(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => {
            let count = n.as_u64().or_else(|| n.as_f64().map(|f| f.trunc() as u64))?;
            positive(count)
        }
        Value::String(s) => {
            let digits = FIRST_NUMBER.find(s)?;
            positive(digits.as_str().parse().ok()?)
        }
        Value::Array(items) => items.iter().find_map(servings_from_value),
        _ => None,
    }
}

fn positive(count: u64) -> Option<u32> {
    u32::try_from(count).ok().filter(|c| *c >= 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_and_strings() {
        assert_eq!(parse_servings(Some(&json!(4))), 4);
        assert_eq!(parse_servings(Some(&json!(6.0))), 6);
        assert_eq!(parse_servings(Some(&json!("serves 6"))), 6);
        assert_eq!(parse_servings(Some(&json!("12 cookies"))), 12);
        assert_eq!(parse_servings(Some(&json!("serves ٣ or 6"))), 6);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(parse_servings(None), 4);
        assert_eq!(parse_servings(Some(&json!(""))), 4);
        assert_eq!(parse_servings(Some(&json!("many"))), 4);
        assert_eq!(parse_servings(Some(&json!(0))), 4);
        assert_eq!(parse_servings(Some(&json!(-2))), 4);
        assert_eq!(parse_servings(Some(&json!(null))), 4);
        assert_eq!(parse_servings(Some(&json!({"value": 3}))), 4);
    }

    #[test]
    fn test_array_takes_first_usable_entry() {
        assert_eq!(parse_servings(Some(&json!(["8", "8 slices"]))), 8);
        assert_eq!(parse_servings(Some(&json!(["a loaf", "10 slices"]))), 10);
        assert_eq!(parse_servings(Some(&json!([]))), 4);
    }
}
