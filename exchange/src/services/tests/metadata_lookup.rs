//! Tests for RealMetadataLookup service

use std::time::Duration;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared::LookupFailure;
use crate::services::metadata_lookup::{RealMetadataLookup, text_query};
use crate::traits::MetadataLookup;

fn lookup_for(server: &MockServer) -> RealMetadataLookup {
    RealMetadataLookup::new(server.uri(), Duration::from_secs(2), 20).unwrap()
}

fn volume(title: &str, authors: &[&str], identifiers: &[(&str, &str)]) -> serde_json::Value {
    json!({
        "id": title,
        "volumeInfo": {
            "title": title,
            "authors": authors,
            "imageLinks": { "thumbnail": format!("http://books.example/{title}.jpg") },
            "industryIdentifiers": identifiers
                .iter()
                .map(|(kind, id)| json!({ "type": kind, "identifier": id }))
                .collect::<Vec<_>>(),
        }
    })
}

#[tokio::test]
async fn test_lookup_by_identifier_normalizes_first_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/volumes"))
        .and(query_param("q", "isbn:9784000000000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalItems": 1,
            "items": [volume("Intro to X", &["A. Author", "B. Author"], &[("ISBN_10", "4000000000"), ("ISBN_13", "9784000000000")])]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let results = lookup_for(&server).lookup_by_identifier("978-4-00-000000-0").await.unwrap();

    assert_eq!(results.len(), 1);
    let book = &results[0];
    assert_eq!(book.title, "Intro to X");
    assert_eq!(book.author(), Some("A. Author"));
    assert_eq!(book.isbn(), Some("9784000000000"));
    assert_eq!(book.thumbnail(), Some("http://books.example/Intro to X.jpg"));
}

#[tokio::test]
async fn test_isbn_10_used_when_13_missing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/volumes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [volume("Old Print", &[], &[("OTHER", "OCLC:1"), ("ISBN_10", "400000000X")])]
        })))
        .mount(&server)
        .await;

    let results = lookup_for(&server).lookup_by_identifier("400000000X").await.unwrap();

    assert_eq!(results[0].isbn(), Some("400000000X"));
    assert_eq!(results[0].author(), None);
}

#[tokio::test]
async fn test_no_items_is_empty_not_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/volumes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "totalItems": 0 })))
        .mount(&server)
        .await;

    let results = lookup_for(&server).lookup_by_identifier("9780000000000").await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_lookup_by_text_preserves_ranking() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/volumes"))
        .and(query_param("q", "intitle:Calculus+inauthor:Stewart"))
        .and(query_param("maxResults", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                volume("Calculus", &["Stewart"], &[("ISBN_13", "9781285740621")]),
                volume("Calculus: Early Transcendentals", &["Stewart"], &[]),
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let results = lookup_for(&server)
        .lookup_by_text(Some("Calculus".to_string()), Some("Stewart".to_string()))
        .await
        .unwrap();

    let titles: Vec<&str> = results.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Calculus", "Calculus: Early Transcendentals"]);
    assert_eq!(results[1].isbn(), None);
}

#[tokio::test]
async fn test_empty_queries_fail_without_a_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let lookup = lookup_for(&server);
    assert_eq!(lookup.lookup_by_text(None, Some("  ".to_string())).await, Err(LookupFailure::InvalidQuery));
    assert_eq!(lookup.lookup_by_identifier(" - ").await, Err(LookupFailure::InvalidQuery));
}

#[tokio::test]
async fn test_rate_limit_maps_to_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let result = lookup_for(&server).lookup_by_identifier("9784000000000").await;
    assert_eq!(result, Err(LookupFailure::RateLimited));
}

#[tokio::test]
async fn test_provider_error_carries_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 400, "message": "Invalid value" }
        })))
        .mount(&server)
        .await;

    let result = lookup_for(&server).lookup_by_identifier("9784000000000").await;
    assert_eq!(result, Err(LookupFailure::ProviderError("Invalid value".to_string())));
}

#[tokio::test]
async fn test_unparsable_body_is_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = lookup_for(&server).lookup_by_identifier("9784000000000").await;
    assert!(matches!(result, Err(LookupFailure::ProviderError(_))));
}

#[tokio::test]
async fn test_timeout_is_unreachable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let lookup = RealMetadataLookup::new(server.uri(), Duration::from_millis(50), 20).unwrap();
    let result = lookup.lookup_by_identifier("9784000000000").await;
    assert!(matches!(result, Err(LookupFailure::Unreachable(_))));
}

#[test]
fn test_text_query_shapes() {
    assert_eq!(text_query(Some("Optics"), None).as_deref(), Some("intitle:Optics"));
    assert_eq!(text_query(None, Some("Hecht")).as_deref(), Some("inauthor:Hecht"));
    assert_eq!(text_query(Some(""), Some(" ")), None);
}
