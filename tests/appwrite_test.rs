//! Document-store client tests: auth headers, query serialization, document
//! operations and error mapping against a mock Appwrite endpoint.

use cinetrend::appwrite::{AppwriteClient, Query, StoreError};
use cinetrend::models::TrendingRecord;
use mockito::{Matcher, Server};
use serde_json::json;

fn store_for(server: &Server) -> AppwriteClient {
    AppwriteClient::new(
        reqwest::Client::new(),
        server.url(),
        "proj-1".to_string(),
        "key-1".to_string(),
        "db-1".to_string(),
        "col-1".to_string(),
    )
}

const DOCUMENTS: &str = "/databases/db-1/collections/col-1/documents";

/// One expected `queries[]` pair, matched as a raw substring of the encoded
/// query string. Form-decoding the query would collapse the repeated key.
fn query_pair(json: &str) -> Matcher {
    Matcher::Regex(serde_urlencoded::to_string(&[("queries[]", json)]).unwrap())
}

#[tokio::test]
async fn list_sends_auth_headers_and_json_queries() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", DOCUMENTS)
        .match_header("X-Appwrite-Project", "proj-1")
        .match_header("X-Appwrite-Key", "key-1")
        .match_query(Matcher::AllOf(vec![
            query_pair(r#"{"attribute":"movie_id","method":"equal","values":[550]}"#),
            query_pair(r#"{"method":"limit","values":[1]}"#),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "total": 1,
                "documents": [
                    {
                        "$id": "550",
                        "$createdAt": "2025-06-01T10:00:00.000+00:00",
                        "$updatedAt": "2025-06-02T09:30:00.000+00:00",
                        "searchTerm": "fight club",
                        "count": 7,
                        "movie_id": 550,
                        "poster_url": "https://image.tmdb.org/t/p/w500/x.jpg",
                        "title": "Fight Club"
                    }
                ]
            }"#,
        )
        .create_async()
        .await;

    let store = store_for(&server);
    let list = store
        .list_documents::<TrendingRecord>(&[Query::equal("movie_id", 550u64), Query::Limit(1)])
        .await
        .unwrap();

    mock.assert_async().await;

    assert_eq!(list.total, 1);
    assert_eq!(list.documents[0].id, "550");
    assert_eq!(list.documents[0].count, 7);
}

#[tokio::test]
async fn create_posts_document_id_and_data() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", DOCUMENTS)
        .match_header("X-Appwrite-Project", "proj-1")
        .match_body(Matcher::Json(json!({
            "documentId": "550",
            "data": {"searchTerm": "fight club", "count": 1, "movie_id": 550}
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"$id": "550", "searchTerm": "fight club", "count": 1, "movie_id": 550}"#)
        .create_async()
        .await;

    let store = store_for(&server);
    store
        .create_document(
            "550",
            &json!({"searchTerm": "fight club", "count": 1, "movie_id": 550}),
        )
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn duplicate_create_is_a_conflict() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", DOCUMENTS)
        .with_status(409)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"message": "Document with the requested ID already exists.", "code": 409, "type": "document_already_exists"}"#,
        )
        .create_async()
        .await;

    let store = store_for(&server);
    let err = store.create_document("550", &json!({"count": 1})).await.unwrap_err();

    mock.assert_async().await;
    assert!(matches!(err, StoreError::Conflict));
}

#[tokio::test]
async fn update_patches_only_the_given_attributes() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("PATCH", format!("{DOCUMENTS}/550").as_str())
        .match_body(Matcher::Json(json!({
            "data": {"searchTerm": "fight club 1999", "poster_url": "https://img/p.jpg"}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"$id": "550"}"#)
        .create_async()
        .await;

    let store = store_for(&server);
    store
        .update_document(
            "550",
            &json!({"searchTerm": "fight club 1999", "poster_url": "https://img/p.jpg"}),
        )
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn increment_hits_the_attribute_endpoint() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("PATCH", format!("{DOCUMENTS}/550/count/increment").as_str())
        .match_header("X-Appwrite-Key", "key-1")
        .match_body(Matcher::Json(json!({"value": 1})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"$id": "550", "count": 8}"#)
        .create_async()
        .await;

    let store = store_for(&server);
    store.increment_attribute("550", "count", 1).await.unwrap();

    mock.assert_async().await;
}

// =============================================================================
// Error mapping
// =============================================================================

#[tokio::test]
async fn missing_document_maps_to_not_found() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("PATCH", format!("{DOCUMENTS}/999/count/increment").as_str())
        .with_status(404)
        .with_body(r#"{"message": "Document not found", "code": 404}"#)
        .create_async()
        .await;

    let store = store_for(&server);
    let err = store.increment_attribute("999", "count", 1).await.unwrap_err();

    mock.assert_async().await;
    assert!(matches!(err, StoreError::NotFound));
}

#[tokio::test]
async fn bad_key_maps_to_unauthorized() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", DOCUMENTS)
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"message": "Invalid API key", "code": 401}"#)
        .create_async()
        .await;

    let store = store_for(&server);
    let err = store.list_documents::<TrendingRecord>(&[]).await.unwrap_err();

    mock.assert_async().await;
    assert!(matches!(err, StoreError::Unauthorized));
}

#[tokio::test]
async fn other_failures_keep_their_status() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", DOCUMENTS)
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("maintenance")
        .create_async()
        .await;

    let store = store_for(&server);
    let err = store.list_documents::<TrendingRecord>(&[]).await.unwrap_err();

    mock.assert_async().await;
    assert!(matches!(err, StoreError::Status(503)));
}

#[tokio::test]
async fn garbage_body_is_a_decode_error() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", DOCUMENTS)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{ nope")
        .create_async()
        .await;

    let store = store_for(&server);
    let err = store.list_documents::<TrendingRecord>(&[]).await.unwrap_err();

    mock.assert_async().await;
    assert!(matches!(err, StoreError::Decode(_)));
}
