//! # Recipe API Client Tests
//!
//! Runs the HTTP client against a local mock of the recipe service.

use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cocktails::api_errors::ApiError;
use cocktails::cocktail_api::{CocktailClient, RecipeSource};
use cocktails::config::{ApiConfig, EndpointTemplates};
use cocktails::recipe_model::{Query, QueryKind, QueryResult};

fn client_for(server: &MockServer, request_timeout_secs: u64) -> CocktailClient {
    let base = format!("{}/api/json/v1/1", server.uri());
    let config = ApiConfig {
        endpoints: EndpointTemplates {
            random: format!("{base}/random.php"),
            search_by_name: format!("{base}/search.php?s={{query}}"),
            search_by_letter: format!("{base}/search.php?f={{letter}}"),
            search_ingredient: format!("{base}/search.php?i={{ingredient}}"),
            drinks_by_ingredient: format!("{base}/filter.php?i={{ingredient}}"),
        },
        request_timeout_secs,
    };
    CocktailClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_random_drink_is_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/json/v1/1/random.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "drinks": [{
                "idDrink": "11000",
                "strDrink": "Mojito",
                "strCategory": "Cocktail",
                "strAlcoholic": "Alcoholic",
                "strGlass": "Highball glass",
                "strInstructions": "Muddle mint leaves with sugar and lime juice.",
                "strDrinkThumb": "https://example.com/mojito.jpg",
                "strIngredient1": "Light rum",
                "strMeasure1": "2-3 oz ",
                "strIngredient2": "Mint",
                "strMeasure2": "2-4 ",
                "strIngredient3": null,
                "strMeasure3": null
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 10);
    let result = client.fetch(&Query::random()).await.unwrap();

    let QueryResult::Recipes(records) = result else {
        panic!("Expected recipes");
    };
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Mojito");
    assert_eq!(records[0].glass.as_deref(), Some("Highball glass"));
    let names: Vec<&str> = records[0]
        .ingredients
        .iter()
        .map(|line| line.name.as_str())
        .collect();
    assert_eq!(names, vec!["Light rum", "Mint"]);
}

#[tokio::test]
async fn test_ingredient_parameter_is_title_cased() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/json/v1/1/filter.php"))
        .and(query_param("i", "Light_Rum"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "drinks": [
                { "strDrink": "Bacardi Cocktail", "strDrinkThumb": "https://example.com/1.jpg", "idDrink": "17254" },
                { "strDrink": "Daiquiri", "strDrinkThumb": "https://example.com/2.jpg", "idDrink": "11006" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 10);
    let query = Query::new(QueryKind::DrinksByIngredient, "light RUM");
    let result = client.fetch(&query).await.unwrap();

    let QueryResult::Drinks(drinks) = result else {
        panic!("Expected drink summaries");
    };
    assert_eq!(drinks.len(), 2);
    assert_eq!(drinks[1].name, "Daiquiri");
}

#[tokio::test]
async fn test_ingredient_search_decodes_details() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/json/v1/1/search.php"))
        .and(query_param("i", "Vodka"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ingredients": [{
                "idIngredient": "1",
                "strIngredient": "Vodka",
                "strDescription": "Vodka is a distilled beverage.",
                "strType": "Vodka",
                "strAlcohol": "Yes",
                "strABV": "40"
            }]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, 10);
    let result = client
        .fetch(&Query::new(QueryKind::SearchByIngredient, "vodka"))
        .await
        .unwrap();

    let QueryResult::Ingredients(records) = result else {
        panic!("Expected ingredients");
    };
    assert_eq!(records[0].name, "Vodka");
    assert_eq!(records[0].is_alcoholic, Some(true));
    assert_eq!(records[0].abv.as_deref(), Some("40"));
}

#[tokio::test]
async fn test_name_search_replaces_spaces() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/json/v1/1/search.php"))
        .and(query_param("s", "long_island"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "drinks": null })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 10);
    let result = client
        .fetch(&Query::new(QueryKind::SearchByName, "long island"))
        .await
        .unwrap();
    assert_eq!(result, QueryResult::Recipes(vec![]));
}

#[tokio::test]
async fn test_empty_result_shapes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/json/v1/1/filter.php"))
        .and(query_param("i", "Nothing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "drinks": "no data found" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/json/v1/1/filter.php"))
        .and(query_param("i", "Blank"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/json/v1/1/search.php"))
        .and(query_param("i", "Gin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ingredients": null })))
        .mount(&server)
        .await;

    let client = client_for(&server, 10);

    for parameter in ["nothing", "blank"] {
        let result = client
            .fetch(&Query::new(QueryKind::DrinksByIngredient, parameter))
            .await
            .unwrap();
        assert_eq!(result, QueryResult::Drinks(vec![]), "parameter {parameter}");
    }

    let result = client
        .fetch(&Query::new(QueryKind::SearchByIngredient, "gin"))
        .await
        .unwrap();
    assert_eq!(result, QueryResult::Ingredients(vec![]));
}

#[tokio::test]
async fn test_server_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server, 10);
    let err = client.fetch(&Query::random()).await.unwrap_err();
    assert_eq!(err, ApiError::Status(500));
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/json/v1/1/search.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, 10);
    let err = client
        .fetch(&Query::new(QueryKind::SearchByLetter, "a"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "drinks": null }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, 1);
    let err = client.fetch(&Query::random()).await.unwrap_err();
    assert!(matches!(err, ApiError::Timeout(_)), "got {err:?}");
}

#[tokio::test]
async fn test_unreachable_service_is_a_transport_error() {
    let config = ApiConfig {
        endpoints: EndpointTemplates {
            random: "http://127.0.0.1:9/random.php".to_string(),
            ..EndpointTemplates::default()
        },
        request_timeout_secs: 5,
    };
    let client = CocktailClient::new(&config).unwrap();

    let err = client.fetch(&Query::random()).await.unwrap_err();
    assert!(
        matches!(err, ApiError::Transport(_) | ApiError::Timeout(_)),
        "got {err:?}"
    );
}
