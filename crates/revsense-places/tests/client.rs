//! Integration tests for `PlacesClient` using wiremock HTTP mocks.

use revsense_core::BusinessQuery;
use revsense_places::{PlacesClient, PlacesError, ResolveError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> PlacesClient {
    PlacesClient::with_base_url("test-key", 30, "revsense-test", base_url)
        .expect("client construction should not fail")
        .with_retry(2, 0)
}

fn query(name: &str, hint: Option<&str>) -> BusinessQuery {
    BusinessQuery::new(name, hint).expect("valid query")
}

#[tokio::test]
async fn text_search_returns_candidates_in_order() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "OK",
        "results": [
            { "place_id": "p1", "name": "Star Kabab", "formatted_address": "Dhanmondi, Dhaka" },
            { "name": "Star Kabab (summary)" }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .and(query_param("key", "test-key"))
        .and(query_param("query", "Star Kabab"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let candidates = client.text_search("Star Kabab").await.expect("search");

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].place_id.as_deref(), Some("p1"));
    assert!(candidates[1].place_id.is_none());
}

#[tokio::test]
async fn resolve_appends_location_hint_to_query() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "OK",
        "results": [{ "place_id": "ju-1", "name": "Jahangirnagar University" }]
    });

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .and(query_param("query", "Jahangirnagar University Savar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let resolved = client
        .resolve_business(&query("Jahangirnagar University", Some("Savar")))
        .await
        .expect("should resolve");

    assert_eq!(resolved.id, "ju-1");
    assert_eq!(resolved.display_name, "Jahangirnagar University");
}

#[tokio::test]
async fn resolve_zero_results_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "status": "ZERO_RESULTS", "results": [] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .resolve_business(&query("Definitely Not A Place", None))
        .await
        .unwrap_err();

    assert!(matches!(err, ResolveError::NotFound { .. }), "got {err:?}");
}

#[tokio::test]
async fn resolve_without_place_ids_is_ambiguous() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "OK",
        "results": [
            { "name": "Cafe A" },
            { "name": "Cafe B" },
            { "name": "Cafe C" }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .resolve_business(&query("Cafe", None))
        .await
        .unwrap_err();

    match err {
        ResolveError::Ambiguous { suggestions } => {
            assert_eq!(suggestions, vec!["Cafe A", "Cafe B", "Cafe C"]);
        }
        other => panic!("expected Ambiguous, got {other:?}"),
    }
}

#[tokio::test]
async fn request_denied_surfaces_as_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .resolve_business(&query("Anything", None))
        .await
        .unwrap_err();

    assert!(
        matches!(err, ResolveError::Provider(PlacesError::ApiError { ref status, .. }) if status == "REQUEST_DENIED"),
        "got {err:?}"
    );
}

#[tokio::test]
async fn over_query_limit_is_quota_exceeded_and_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OVER_QUERY_LIMIT",
            "error_message": "You have exceeded your daily request quota."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.place_details("p1").await.unwrap_err();

    assert!(matches!(err, PlacesError::QuotaExceeded(_)), "got {err:?}");
}

#[tokio::test]
async fn server_errors_are_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "result": { "name": "Recovered", "reviews": [] }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let details = client.place_details("p1").await.expect("should recover");
    assert_eq!(details.name.as_deref(), Some("Recovered"));
}

#[tokio::test]
async fn transport_errors_do_not_leak_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri()).with_retry(0, 0);
    let err = client.place_details("p1").await.unwrap_err();
    assert!(matches!(err, PlacesError::Http(_)));
    assert!(!err.to_string().contains("test-key"), "leaked: {err}");
}

#[tokio::test]
async fn fetch_reviews_maps_details_into_raw_reviews() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "OK",
        "result": {
            "name": "Star Kabab & Restaurant",
            "rating": 4.2,
            "user_ratings_total": 15321,
            "reviews": [
                {
                    "author_name": "A",
                    "rating": 5,
                    "relative_time_description": "2 weeks ago",
                    "text": "Great service!",
                    "time": 1_700_000_000,
                    "language": "en"
                },
                { "author_name": "B", "rating": 1, "text": "   " },
                { "author_name": "C", "rating": 2 }
            ]
        }
    });

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .and(query_param("place_id", "p1"))
        .and(query_param("fields", "name,rating,review,user_ratings_total"))
        .and(query_param("language", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri()).with_language(Some("en".to_owned()));
    let business = revsense_core::ResolvedBusiness {
        id: "p1".to_owned(),
        display_name: "Star Kabab".to_owned(),
        address: None,
    };
    let fetched = client.fetch_reviews(&business).await.expect("fetch");

    assert_eq!(fetched.place.name, "Star Kabab & Restaurant");
    assert_eq!(fetched.place.user_ratings_total, Some(15321));
    assert_eq!(fetched.reviews.len(), 3);
    assert_eq!(fetched.reviews[0].text, "Great service!");
    assert_eq!(fetched.reviews[1].text, "   ");
    assert_eq!(fetched.reviews[2].text, "");
    assert_eq!(fetched.reviews[0].metadata.author_rating, Some(5));
}

#[tokio::test]
async fn fetch_reviews_with_no_reviews_is_empty_not_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "result": { "name": "Quiet Place" }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let business = revsense_core::ResolvedBusiness {
        id: "p2".to_owned(),
        display_name: "Quiet Place".to_owned(),
        address: None,
    };
    let fetched = client.fetch_reviews(&business).await.expect("fetch");
    assert!(fetched.reviews.is_empty());
}
