use serde::{Deserialize, Serialize};

/// Title used when neither structured data nor the page markup yields one.
pub const PLACEHOLDER_TITLE: &str = "Imported Recipe";

/// Servings assumed when the source does not state a usable count.
pub const DEFAULT_SERVINGS: u32 = 4;

/// A recipe extracted from a third-party page, ready to be persisted by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedRecipe {
    pub title: String,
    pub description: String,
    pub prep_time_minutes: Option<u32>,
    pub cook_time_minutes: Option<u32>,
    pub servings: u32,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<Step>,
    pub source_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub amount: Option<f64>,
    pub unit: Option<String>,
    pub notes: Option<String>,
}

impl Ingredient {
    /// An ingredient whose whole text is its name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount: None,
            unit: None,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub instruction: String,
    pub timer_seconds: Option<u32>,
}

impl Step {
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            timer_seconds: None,
        }
    }
}
