//! # Recipe Data Model
//!
//! This module defines the queries the bot can send to the recipe service and the
//! typed records it gets back. Records are decoded from the raw JSON objects the
//! service returns and never change afterwards.
//!
//! ## Core Concepts
//!
//! - **Query**: one fully specified request (kind plus optional parameter)
//! - **RecipeRecord**: a full drink with its ingredient/measure pairs
//! - **IngredientRecord**: details about one ingredient
//! - **DrinkSummary**: name and picture only, as returned by the ingredient filter
//!
//! ## Usage
//!
//! ```rust
//! use cocktails::recipe_model::{Query, QueryKind};
//!
//! let query = Query::new(QueryKind::SearchByName, "margarita");
//! assert_eq!(query.parameter.as_deref(), Some("margarita"));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Number of `strIngredientN` / `strMeasureN` slots in a drink record
pub const MAX_INGREDIENT_SLOTS: usize = 15;

/// The five kinds of lookup the bot supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryKind {
    RandomDrink,
    SearchByName,
    SearchByLetter,
    SearchByIngredient,
    DrinksByIngredient,
}

/// One request to the recipe service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub kind: QueryKind,
    pub parameter: Option<String>,
}

impl Query {
    pub fn new(kind: QueryKind, parameter: impl Into<String>) -> Self {
        Self {
            kind,
            parameter: Some(parameter.into()),
        }
    }

    pub fn random() -> Self {
        Self {
            kind: QueryKind::RandomDrink,
            parameter: None,
        }
    }

    pub fn parameter_or_empty(&self) -> &str {
        self.parameter.as_deref().unwrap_or("")
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parameter {
            Some(parameter) => write!(f, "{:?}({parameter})", self.kind),
            None => write!(f, "{:?}", self.kind),
        }
    }
}

/// One ingredient line of a drink, in the order the service lists them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub name: String,
    pub measure: Option<String>,
}

/// A complete drink recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub id: Option<String>,
    pub name: String,
    pub category: Option<String>,
    pub alcoholic: Option<String>,
    pub glass: Option<String>,
    pub instructions: Option<String>,
    pub image_ref: Option<String>,
    pub ingredients: Vec<IngredientLine>,
}

impl RecipeRecord {
    /// Decode a raw `drinks[]` entry. Entries without a name are rejected.
    pub fn from_api(raw: &Map<String, Value>) -> Option<Self> {
        let name = text_field(raw, "strDrink")?;

        // Slots may have gaps; keep populated ones in slot order
        let ingredients = (1..=MAX_INGREDIENT_SLOTS)
            .filter_map(|slot| {
                let name = text_field(raw, &format!("strIngredient{slot}"))?;
                let measure = text_field(raw, &format!("strMeasure{slot}"));
                Some(IngredientLine { name, measure })
            })
            .collect();

        Some(Self {
            id: text_field(raw, "idDrink"),
            name,
            category: text_field(raw, "strCategory"),
            alcoholic: text_field(raw, "strAlcoholic"),
            glass: text_field(raw, "strGlass"),
            instructions: text_field(raw, "strInstructions"),
            image_ref: text_field(raw, "strDrinkThumb"),
            ingredients,
        })
    }
}

/// Details about a single ingredient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientRecord {
    pub id: Option<String>,
    pub name: String,
    pub kind: Option<String>,
    pub is_alcoholic: Option<bool>,
    pub abv: Option<String>,
    pub description: Option<String>,
}

impl IngredientRecord {
    pub fn from_api(raw: &Map<String, Value>) -> Option<Self> {
        let name = text_field(raw, "strIngredient")?;
        let is_alcoholic = text_field(raw, "strAlcohol").map(|flag| {
            matches!(flag.to_lowercase().as_str(), "yes" | "true" | "1")
        });

        Some(Self {
            id: text_field(raw, "idIngredient"),
            name,
            kind: text_field(raw, "strType"),
            is_alcoholic,
            abv: text_field(raw, "strABV"),
            description: text_field(raw, "strDescription"),
        })
    }
}

/// The reduced drink shape returned when filtering by ingredient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkSummary {
    pub id: Option<String>,
    pub name: String,
    pub image_ref: Option<String>,
}

impl DrinkSummary {
    pub fn from_api(raw: &Map<String, Value>) -> Option<Self> {
        Some(Self {
            id: text_field(raw, "idDrink"),
            name: text_field(raw, "strDrink")?,
            image_ref: text_field(raw, "strDrinkThumb"),
        })
    }
}

/// Successful outcome of a lookup; empty vectors mean "nothing matched"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryResult {
    Recipes(Vec<RecipeRecord>),
    Ingredients(Vec<IngredientRecord>),
    Drinks(Vec<DrinkSummary>),
}

impl QueryResult {
    pub fn len(&self) -> usize {
        match self {
            QueryResult::Recipes(records) => records.len(),
            QueryResult::Ingredients(records) => records.len(),
            QueryResult::Drinks(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Non-empty, trimmed string value of a field; `null`, missing and blank are `None`
fn text_field(raw: &Map<String, Value>, key: &str) -> Option<String> {
    match raw.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    #[test]
    fn test_recipe_keeps_populated_slots_in_order() {
        let raw = object(json!({
            "idDrink": "11000",
            "strDrink": "Mojito",
            "strCategory": "Cocktail",
            "strIngredient1": "Light rum",
            "strMeasure1": "2-3 oz ",
            "strIngredient2": "Lime",
            "strMeasure2": null,
            "strIngredient3": null,
            "strIngredient4": "Mint",
            "strMeasure4": "2-4 ",
            "strIngredient15": ""
        }));

        let record = RecipeRecord::from_api(&raw).unwrap();
        assert_eq!(record.name, "Mojito");
        assert_eq!(
            record.ingredients,
            vec![
                IngredientLine {
                    name: "Light rum".to_string(),
                    measure: Some("2-3 oz".to_string())
                },
                IngredientLine {
                    name: "Lime".to_string(),
                    measure: None
                },
                IngredientLine {
                    name: "Mint".to_string(),
                    measure: Some("2-4".to_string())
                },
            ]
        );
    }

    #[test]
    fn test_recipe_without_name_is_rejected() {
        let raw = object(json!({ "strCategory": "Cocktail" }));
        assert!(RecipeRecord::from_api(&raw).is_none());
    }

    #[test]
    fn test_ingredient_alcohol_flag() {
        let raw = object(json!({
            "idIngredient": "1",
            "strIngredient": "Vodka",
            "strType": "Vodka",
            "strAlcohol": "Yes",
            "strABV": "40"
        }));

        let record = IngredientRecord::from_api(&raw).unwrap();
        assert_eq!(record.is_alcoholic, Some(true));
        assert_eq!(record.abv.as_deref(), Some("40"));
        assert!(record.description.is_none());
    }

    #[test]
    fn test_query_display() {
        assert_eq!(Query::random().to_string(), "RandomDrink");
        assert_eq!(
            Query::new(QueryKind::SearchByLetter, "A").to_string(),
            "SearchByLetter(A)"
        );
    }
}
