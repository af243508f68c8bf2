//! # Recipe API Client
//!
//! Every query kind is served by the same GET-and-decode routine. What differs per
//! kind (template placeholder, parameter normalization, result key, record decoder)
//! lives in the [`ENDPOINTS`] lookup table.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};
use url::Url;

use crate::api_errors::ApiError;
use crate::config::{ApiConfig, EndpointTemplates};
use crate::recipe_model::{
    DrinkSummary, IngredientRecord, Query, QueryKind, QueryResult, RecipeRecord,
};

/// Anything that can answer a recipe query
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Run one query. `Ok` with an empty result means nothing matched.
    async fn fetch(&self, query: &Query) -> Result<QueryResult, ApiError>;
}

/// Per-kind endpoint behaviour
pub struct Endpoint {
    pub kind: QueryKind,
    /// Placeholder in the URL template, `None` for parameterless endpoints
    pub placeholder: Option<&'static str>,
    pub normalize: fn(&str) -> String,
    /// Top-level JSON key holding the result array
    pub result_key: &'static str,
    pub decode: fn(&[Map<String, Value>]) -> QueryResult,
}

pub static ENDPOINTS: [Endpoint; 5] = [
    Endpoint {
        kind: QueryKind::RandomDrink,
        placeholder: None,
        normalize: underscore_spaces,
        result_key: "drinks",
        decode: decode_recipes,
    },
    Endpoint {
        kind: QueryKind::SearchByName,
        placeholder: Some("{query}"),
        normalize: underscore_spaces,
        result_key: "drinks",
        decode: decode_recipes,
    },
    Endpoint {
        kind: QueryKind::SearchByLetter,
        placeholder: Some("{letter}"),
        normalize: uppercase_letter,
        result_key: "drinks",
        decode: decode_recipes,
    },
    Endpoint {
        kind: QueryKind::SearchByIngredient,
        placeholder: Some("{ingredient}"),
        normalize: ingredient_parameter,
        result_key: "ingredients",
        decode: decode_ingredients,
    },
    Endpoint {
        kind: QueryKind::DrinksByIngredient,
        placeholder: Some("{ingredient}"),
        normalize: ingredient_parameter,
        result_key: "drinks",
        decode: decode_drinks,
    },
];

/// Lookup table entry for a query kind
pub fn endpoint_for(kind: QueryKind) -> &'static Endpoint {
    ENDPOINTS
        .iter()
        .find(|endpoint| endpoint.kind == kind)
        .unwrap_or(&ENDPOINTS[0])
}

/// HTTP client for TheCocktailDB-style JSON APIs
pub struct CocktailClient {
    http: reqwest::Client,
    endpoints: EndpointTemplates,
}

impl CocktailClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("cocktails-bot/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            endpoints: config.endpoints.clone(),
        })
    }

    /// Build the request URL for a query from its endpoint template
    pub fn request_url(&self, query: &Query) -> Result<Url, ApiError> {
        let endpoint = endpoint_for(query.kind);
        let mut target = self.endpoints.resolve(query.kind);

        if let Some(placeholder) = endpoint.placeholder {
            let parameter = query
                .parameter
                .as_deref()
                .ok_or_else(|| ApiError::InvalidUrl(format!("{query} needs a parameter")))?;
            let normalized = (endpoint.normalize)(parameter);
            let encoded: String =
                url::form_urlencoded::byte_serialize(normalized.as_bytes()).collect();
            target = target.replace(placeholder, &encoded);
        }

        Url::parse(&target).map_err(|e| ApiError::InvalidUrl(format!("{target}: {e}")))
    }

    async fn lookup(&self, query: &Query) -> Result<QueryResult, ApiError> {
        let endpoint = endpoint_for(query.kind);
        let url = self.request_url(query)?;
        info!(query = %query, url = %url, "Requesting recipe API");

        let response = self.http.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;

        // The filter endpoint answers unknown ingredients with an empty body
        if body.trim().is_empty() {
            debug!(query = %query, "Recipe API returned an empty body");
            return Ok((endpoint.decode)(&[]));
        }

        let value: Value = serde_json::from_str(&body)?;
        let Value::Object(root) = value else {
            return Err(ApiError::Decode("response is not a JSON object".to_string()));
        };

        // `null`, a missing key and "no data found" strings all mean no match
        let items: Vec<Map<String, Value>> = match root.get(endpoint.result_key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_object().cloned())
                .collect(),
            _ => Vec::new(),
        };

        let result = (endpoint.decode)(&items);
        if result.len() < items.len() {
            warn!(
                query = %query,
                skipped = items.len() - result.len(),
                "Skipped records without a name"
            );
        }
        info!(query = %query, results = result.len(), "Recipe API lookup completed");

        Ok(result)
    }
}

#[async_trait]
impl RecipeSource for CocktailClient {
    async fn fetch(&self, query: &Query) -> Result<QueryResult, ApiError> {
        let result = self.lookup(query).await;
        if let Err(e) = &result {
            error!(query = %query, error = %e, "Recipe lookup failed");
        }
        result
    }
}

fn underscore_spaces(parameter: &str) -> String {
    parameter.trim().replace(' ', "_")
}

fn uppercase_letter(parameter: &str) -> String {
    parameter.trim().to_uppercase()
}

fn ingredient_parameter(parameter: &str) -> String {
    underscore_spaces(&title_case(parameter))
}

/// Capitalize each word and lowercase the rest, e.g. `"LIGHT rum"` -> `"Light Rum"`
pub fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn decode_recipes(items: &[Map<String, Value>]) -> QueryResult {
    QueryResult::Recipes(items.iter().filter_map(RecipeRecord::from_api).collect())
}

fn decode_ingredients(items: &[Map<String, Value>]) -> QueryResult {
    QueryResult::Ingredients(items.iter().filter_map(IngredientRecord::from_api).collect())
}

fn decode_drinks(items: &[Map<String, Value>]) -> QueryResult {
    QueryResult::Drinks(items.iter().filter_map(DrinkSummary::from_api).collect())
}
