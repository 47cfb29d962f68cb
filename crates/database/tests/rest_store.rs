use configuration::StoreSettings;
use core_types::{NewSchool, SchoolId, StoreTimestamp};
use database::{RestRepository, SchoolStore, StoreError};
use httpmock::prelude::*;
use serde_json::json;

fn settings(server: &MockServer) -> StoreSettings {
    StoreSettings {
        url: server.base_url(),
        key: "service-key".to_string(),
        table: "schools".to_string(),
    }
}

fn lincoln_high() -> NewSchool {
    NewSchool {
        name: "Lincoln High".to_string(),
        address: "1 Main St".to_string(),
        latitude: 40.0,
        longitude: -75.0,
    }
}

#[tokio::test]
async fn insert_posts_the_row_and_returns_the_stored_school() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/rest/v1/schools")
                .header("apikey", "service-key")
                .header("authorization", "Bearer service-key")
                .header("prefer", "return=representation")
                .header("accept", "application/vnd.pgrst.object+json")
                .json_body(json!({
                    "name": "Lincoln High",
                    "address": "1 Main St",
                    "latitude": 40.0,
                    "longitude": -75.0
                }));
            then.status(201)
                .header("content-type", "application/json")
                .json_body(json!({
                    "id": 42,
                    "name": "Lincoln High",
                    "address": "1 Main St",
                    "latitude": 40.0,
                    "longitude": -75.0,
                    "created_at": "2024-05-01T10:00:00+00:00"
                }));
        })
        .await;

    let store = RestRepository::new(&settings(&server)).unwrap();
    let school = store.insert(&lincoln_high()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(school.id, SchoolId::Int(42));
    assert_eq!(school.name, "Lincoln High");
    assert!(school.created_at.is_some());
}

#[tokio::test]
async fn list_all_selects_every_column() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/rest/v1/schools")
                .query_param("select", "*")
                .header("apikey", "service-key");
            then.status(200).json_body(json!([
                { "id": 1, "name": "A", "address": "a", "latitude": 10.0, "longitude": 10.0 },
                { "id": 2, "name": "B", "address": "b", "latitude": 0.0, "longitude": 0.0 }
            ]));
        })
        .await;

    let store = RestRepository::new(&settings(&server)).unwrap();
    let schools = store.list_all().await.unwrap();

    mock.assert_async().await;
    assert_eq!(schools.len(), 2);
    assert_eq!(schools[1].name, "B");
}

#[tokio::test]
async fn uuid_ids_are_returned_as_text() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/v1/schools");
            then.status(200).json_body(json!([{
                "id": "3f1c9a2e-8b7d-4c1e-9f00-123456789abc",
                "name": "Lincoln High",
                "address": "1 Main St",
                "latitude": 40.0,
                "longitude": -75.0
            }]));
        })
        .await;

    let store = RestRepository::new(&settings(&server)).unwrap();
    let schools = store.list_all().await.unwrap();

    assert_eq!(
        schools[0].id,
        SchoolId::Text("3f1c9a2e-8b7d-4c1e-9f00-123456789abc".to_string())
    );
}

#[tokio::test]
async fn timestamps_without_offset_are_accepted() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/rest/v1/schools");
            then.status(201).json_body(json!({
                "id": 5,
                "name": "Lincoln High",
                "address": "1 Main St",
                "latitude": 40.0,
                "longitude": -75.0,
                "created_at": "2024-05-01T10:00:00.123456"
            }));
        })
        .await;

    let store = RestRepository::new(&settings(&server)).unwrap();
    let school = store.insert(&lincoln_high()).await.unwrap();

    assert!(matches!(school.created_at, Some(StoreTimestamp::Naive(_))));
    let out = serde_json::to_value(&school).unwrap();
    assert_eq!(out["created_at"], "2024-05-01T10:00:00.123456");
}

#[tokio::test]
async fn remote_error_message_is_passed_through() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/v1/schools");
            then.status(401).json_body(json!({
                "code": "PGRST301",
                "details": null,
                "hint": null,
                "message": "Invalid API key"
            }));
        })
        .await;

    let store = RestRepository::new(&settings(&server)).unwrap();
    let err = store.list_all().await.unwrap_err();

    assert!(matches!(err, StoreError::Remote { status: 401, .. }));
    assert_eq!(err.to_string(), "Invalid API key");
}

#[tokio::test]
async fn non_json_error_body_is_used_verbatim() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/rest/v1/schools");
            then.status(503).body("upstream unavailable");
        })
        .await;

    let store = RestRepository::new(&settings(&server)).unwrap();
    let err = store.insert(&lincoln_high()).await.unwrap_err();

    assert_eq!(err.to_string(), "upstream unavailable");
}

#[tokio::test]
async fn connect_picks_the_rest_backend_for_http_urls() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/v1/schools");
            then.status(200).json_body(json!([]));
        })
        .await;

    let store = database::connect(&settings(&server)).await.unwrap();
    assert!(store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn connect_pool_rejects_rest_urls() {
    let settings = StoreSettings {
        url: "https://abc.supabase.co".to_string(),
        key: "service-key".to_string(),
        table: "schools".to_string(),
    };
    let err = database::connect_pool(&settings).await.unwrap_err();
    assert!(matches!(err, StoreError::Unsupported(_)));
}
