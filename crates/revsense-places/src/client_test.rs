use super::*;

fn test_client(base_url: &str) -> PlacesClient {
    PlacesClient::with_base_url("test-key", 30, "revsense-test", base_url)
        .expect("client construction should not fail")
}

#[test]
fn build_url_puts_key_first() {
    let client = test_client("https://maps.example.com/maps/api/place");
    let url = client
        .build_url("textsearch/json", &[("query", "cafe")])
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://maps.example.com/maps/api/place/textsearch/json?key=test-key&query=cafe"
    );
}

#[test]
fn build_url_tolerates_trailing_slashes() {
    let client = test_client("https://maps.example.com/maps/api/place//");
    let url = client
        .build_url("details/json", &[("place_id", "abc")])
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://maps.example.com/maps/api/place/details/json?key=test-key&place_id=abc"
    );
}

#[test]
fn build_url_encodes_special_characters() {
    let client = test_client("https://maps.example.com");
    let url = client
        .build_url("textsearch/json", &[("query", "Tom & Jerry's Diner")])
        .unwrap();
    assert!(
        url.as_str().contains("Tom+%26+Jerry%27s+Diner"),
        "query param should be percent-encoded: {url}"
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = PlacesClient::with_base_url("k", 30, "ua", "not a url");
    assert!(matches!(result, Err(PlacesError::InvalidBaseUrl { .. })));
}

#[test]
fn check_status_accepts_ok_and_zero_results() {
    assert!(PlacesClient::check_status("OK", None).is_ok());
    assert!(PlacesClient::check_status("ZERO_RESULTS", None).is_ok());
}

#[test]
fn check_status_maps_over_query_limit_to_quota() {
    let err = PlacesClient::check_status("OVER_QUERY_LIMIT", Some("daily limit")).unwrap_err();
    assert!(matches!(err, PlacesError::QuotaExceeded(ref m) if m == "daily limit"));
}

#[test]
fn check_status_maps_other_statuses_to_api_error() {
    let err = PlacesClient::check_status("REQUEST_DENIED", Some("bad key")).unwrap_err();
    match err {
        PlacesError::ApiError { status, message } => {
            assert_eq!(status, "REQUEST_DENIED");
            assert_eq!(message, "bad key");
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}
