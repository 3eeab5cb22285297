//! Integration tests for `CheapsharkClient` using wiremock HTTP mocks.

use gamedb_cheapshark::{CheapsharkClient, CheapsharkError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> CheapsharkClient {
    CheapsharkClient::with_base_url(30, base_url).expect("client construction should not fail")
}

#[tokio::test]
async fn game_lookup_returns_parsed_lookup() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "info": {
            "gameID": "612",
            "title": "Portal",
            "thumb": "https://cdn.example.com/portal/capsule.jpg"
        },
        "cheapestPriceEver": {
            "price": "1.25",
            "date": 1_330_000_000
        },
        "deals": [
            {
                "storeID": "1",
                "dealID": "X8sebHhbc1Ga0dTkgg59WgyM506af9oNZZJLU9uSrX8",
                "price": "9.99",
                "retailPrice": "19.99",
                "savings": "50.025013"
            },
            {
                "storeID": "7",
                "price": "12.50",
                "retailPrice": "19.99"
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/games"))
        .and(query_param("id", "612"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let lookup = client.game_lookup("612").await.expect("should parse lookup");

    assert!(!lookup.is_empty());
    let info = lookup.info.expect("info present");
    assert_eq!(info.game_id.as_deref(), Some("612"));
    assert_eq!(info.title.as_deref(), Some("Portal"));
    let cheapest = lookup.cheapest_price_ever.expect("cheapest present");
    assert_eq!(cheapest.price.as_deref(), Some("1.25"));
    let deals = lookup.deals.expect("deals present");
    assert_eq!(deals.len(), 2);
    assert_eq!(deals[0].store_id.as_deref(), Some("1"));
    assert_eq!(deals[1].price.as_deref(), Some("12.50"));
}

#[tokio::test]
async fn unknown_game_yields_an_empty_lookup() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/games"))
        .and(query_param("id", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let lookup = client.game_lookup("0").await.expect("empty object parses");
    assert!(lookup.is_empty());
}

#[tokio::test]
async fn non_object_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/games"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.game_lookup("612").await.expect_err("array body must fail");
    assert!(
        matches!(err, CheapsharkError::Deserialize { .. }),
        "expected Deserialize, got: {err:?}"
    );
}

#[tokio::test]
async fn http_error_status_surfaces_as_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/games"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.game_lookup("612").await.expect_err("500 must fail");
    assert!(
        matches!(err, CheapsharkError::Http(_)),
        "expected Http, got: {err:?}"
    );
}

#[tokio::test]
async fn base_url_without_trailing_slash_still_routes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/games"))
        .and(query_param("id", "612"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let base = server.uri();
    let client = test_client(base.trim_end_matches('/'));
    client
        .game_lookup("612")
        .await
        .expect("normalised base URL should reach /games");
}
