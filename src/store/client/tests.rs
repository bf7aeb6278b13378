//! Tests for the HTTP review store.

use std::time::Duration;

use rstest::rstest;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{HttpReviewStore, HttpReviewStoreConfig};
use crate::error::CatalogError;
use crate::listing::ListingQuery;
use crate::store::{NewReview, Review, ReviewStore};

fn store_for(server: &MockServer) -> HttpReviewStore {
    let config = HttpReviewStoreConfig::new(&server.uri(), Duration::from_secs(5))
        .expect("mock server URI should be a valid base");
    HttpReviewStore::new(config).expect("client should build")
}

#[rstest]
#[case("http://shop.test", "http://shop.test/")]
#[case("http://shop.test/catalog", "http://shop.test/catalog/")]
#[case(" http://shop.test/ ", "http://shop.test/")]
fn base_url_is_normalised_with_trailing_slash(#[case] input: &str, #[case] expected: &str) {
    let config = HttpReviewStoreConfig::new(input, Duration::from_secs(1))
        .expect("base should parse");

    assert_eq!(config.base_url.as_str(), expected);
}

#[test]
fn non_base_urls_are_rejected() {
    let result = HttpReviewStoreConfig::new("mailto:shop@example.com", Duration::from_secs(1));

    assert!(
        matches!(result, Err(CatalogError::InvalidUrl(_))),
        "expected invalid URL, got {result:?}"
    );
}

#[tokio::test]
async fn create_review_posts_product_and_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/addReview"))
        .and(body_json(json!({"product_id": 3, "review_text": "Great mug"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 41, "text": "Great mug"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    let store = store_for(&server);

    let created = store
        .create_review(&NewReview {
            product_id: 3,
            text: "Great mug".to_owned(),
        })
        .await
        .expect("create should succeed");

    assert_eq!(created, Some(41));
}

#[tokio::test]
async fn create_review_tolerates_bodies_without_identifier() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/addReview"))
        .respond_with(ResponseTemplate::new(201).set_body_string("ok"))
        .mount(&server)
        .await;
    let store = store_for(&server);

    let created = store
        .create_review(&NewReview {
            product_id: 3,
            text: "Fine".to_owned(),
        })
        .await
        .expect("2xx should count as success");

    assert_eq!(created, None);
}

#[tokio::test]
async fn update_review_posts_new_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/edit_review/9"))
        .and(body_json(json!({"review_text": "Edited"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;
    let store = store_for(&server);

    store
        .update_review(9, "Edited")
        .await
        .expect("update should succeed");
}

#[tokio::test]
async fn non_success_status_maps_to_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/delete_review/5"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "review does not exist"})),
        )
        .mount(&server)
        .await;
    let store = store_for(&server);

    let error = store
        .delete_review(5)
        .await
        .expect_err("404 should be rejected");

    match error {
        CatalogError::RemoteRejected {
            operation,
            status,
            message,
        } => {
            assert_eq!(operation, "delete_review");
            assert_eq!(status, 404);
            assert!(
                message.contains("review does not exist"),
                "unexpected message: {message}"
            );
        }
        other => panic!("expected RemoteRejected, got {other:?}"),
    }
}

#[tokio::test]
async fn rejection_bodies_are_truncated() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/edit_review/1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("x".repeat(400)))
        .mount(&server)
        .await;
    let store = store_for(&server);

    let error = store
        .update_review(1, "text")
        .await
        .expect_err("500 should be rejected");

    let CatalogError::RemoteRejected { message, .. } = error else {
        panic!("expected RemoteRejected, got {error:?}");
    };
    assert_eq!(message.chars().count(), 163);
    assert!(message.ends_with("..."));
}

#[tokio::test]
async fn delete_product_forwards_listing_query() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/delete/12"))
        .and(query_param("page", "3"))
        .and(query_param("q", "blue mug"))
        .and(query_param("per_page", "10"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"redirect": "/view.html?page=3"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    let store = store_for(&server);
    let query = ListingQuery::new(3, 10, "blue mug").expect("query should be valid");

    store
        .delete_product(12, &query)
        .await
        .expect("delete should succeed");
}

#[tokio::test]
async fn list_reviews_attaches_product_identifier() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/product/4/reviews"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 8, "text": "Newer"},
            {"id": 2, "text": "Older"}
        ])))
        .mount(&server)
        .await;
    let store = store_for(&server);

    let reviews = store.list_reviews(4).await.expect("listing should succeed");

    assert_eq!(
        reviews,
        vec![
            Review {
                id: 8,
                text: "Newer".to_owned(),
                product_id: 4,
            },
            Review {
                id: 2,
                text: "Older".to_owned(),
                product_id: 4,
            },
        ]
    );
}

#[tokio::test]
async fn list_reviews_reports_malformed_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/product/4/reviews"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;
    let store = store_for(&server);

    let error = store
        .list_reviews(4)
        .await
        .expect_err("HTML should not decode");

    assert!(
        matches!(error, CatalogError::Decode { .. }),
        "expected Decode, got {error:?}"
    );
}

#[tokio::test]
async fn custom_listing_path_is_used() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/4/reviews.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    let config = HttpReviewStoreConfig::new(&server.uri(), Duration::from_secs(5))
        .expect("base should parse")
        .with_reviews_path("api/products/{product_id}/reviews.json");
    let store = HttpReviewStore::new(config).expect("client should build");

    let reviews = store.list_reviews(4).await.expect("listing should succeed");

    assert!(reviews.is_empty());
}

#[tokio::test]
async fn slow_responses_map_to_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/delete_review/1"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;
    let config = HttpReviewStoreConfig::new(&server.uri(), Duration::from_millis(200))
        .expect("base should parse");
    let store = HttpReviewStore::new(config).expect("client should build");

    let error = store
        .delete_review(1)
        .await
        .expect_err("request should time out");

    assert!(
        matches!(error, CatalogError::Timeout { ref operation, .. } if operation == "delete_review"),
        "expected Timeout, got {error:?}"
    );
}
