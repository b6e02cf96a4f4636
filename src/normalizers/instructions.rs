use serde_json::Value;

use super::clean_text;
use crate::extractors::has_schema_type;

/// One entry of a `recipeInstructions` value, classified by shape.
#[derive(Debug)]
pub enum InstructionNode<'a> {
    /// A bare string: one step.
    Text(&'a str),
    /// A `HowToStep`: its `text`, falling back to its `name`.
    Step(&'a Value),
    /// A `HowToSection`: its `itemListElement` entries; the heading is dropped.
    Section(&'a [Value]),
    /// Anything else: `text`/`name` if present, otherwise its string form.
    Other(&'a Value),
}

impl<'a> InstructionNode<'a> {
    pub fn classify(value: &'a Value) -> Self {
        if let Value::String(text) = value {
            return InstructionNode::Text(text);
        }
        if has_schema_type(value, "HowToStep") {
            return InstructionNode::Step(value);
        }
        if has_schema_type(value, "HowToSection") {
            let items = value
                .get("itemListElement")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            return InstructionNode::Section(items);
        }
        InstructionNode::Other(value)
    }

    fn collect_into(self, steps: &mut Vec<String>) {
        let text = match self {
            InstructionNode::Text(text) => clean_text(text),
            InstructionNode::Step(step) => text_or_name(step),
            InstructionNode::Section(items) => {
                for item in items {
                    InstructionNode::classify(item).collect_into(steps);
                }
                return;
            }
            InstructionNode::Other(Value::Null) => None,
            InstructionNode::Other(other) => {
                text_or_name(other).or_else(|| clean_text(&other.to_string()))
            }
        };
        steps.extend(text);
    }
}

fn text_or_name(value: &Value) -> Option<String> {
    ["text", "name"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(Value::as_str))
        .find_map(clean_text)
}

/// Flatten a `recipeInstructions` value into ordered step texts.
///
/// A single string is one step. Arrays may mix strings, `HowToStep`s and
/// `HowToSection`s; sections are expanded in place. Any other value yields
/// nothing. Empty steps are dropped.
pub fn flatten_instructions(raw: Option<&Value>) -> Vec<String> {
    let mut steps = Vec::new();
    match raw {
        Some(Value::String(text)) => steps.extend(clean_text(text)),
        Some(Value::Array(items)) => {
            for item in items {
                InstructionNode::classify(item).collect_into(&mut steps);
            }
        }
        _ => {}
    }
    steps
}
